/// An error arising from publishing or unpublishing commands
///
/// `E` is the error type of the [`Session`](crate::Session) the request was
/// made through.
#[derive(Debug, thiserror::Error)]
pub enum Error<E> {
    /// Commands were already published for this identity through this router
    #[error("Commands already registered for application {identity}")]
    AlreadyRegistered {
        /// The identity the commands were registered under
        identity: String,
    },
    /// The bulk overwrite request failed
    #[error("Error registering commands: {0}")]
    RemoteRegistrationFailed(#[source] E),
    /// A delete request failed, leaving this and any later commands registered
    #[error("Error deleting command {id}: {source}")]
    RemoteDeletionFailed {
        /// The ID of the command that could not be deleted
        id: String,
        /// The underlying API error
        source: E,
    },
}
