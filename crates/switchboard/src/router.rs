use std::{collections::VecDeque, fmt};

use hashbrown::HashMap;
use tokio::sync::Mutex;

use crate::{
    error::Error,
    feature::Feature,
    registry::Registry,
    session::{Event, EventKey, Session},
};

type Published<S> = HashMap<<S as Session>::Identity, VecDeque<<S as Session>::CommandId>>;

/// A frozen set of features which dispatches interactions and manages command
/// registration
///
/// Dispatch only reads the feature list, so a router can be shared between any
/// number of concurrent [`route`](Self::route) calls.  Command registration is
/// tracked per application identity, and each router registers commands at
/// most once for a given identity.
pub struct Router<S: Session> {
    features: Box<[Feature<S>]>,
    published: Mutex<Published<S>>,
}

impl<S: Session> fmt::Debug for Router<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("features", &self.features)
            .field("published", &self.published)
            .finish()
    }
}

impl<S: Session> From<Registry<S>> for Router<S> {
    #[inline]
    fn from(registry: Registry<S>) -> Self { Self::new(registry) }
}

impl<S: Session> Router<S> {
    /// Freeze the given registry into a router
    #[must_use]
    pub fn new(registry: Registry<S>) -> Self {
        Self {
            features: registry.into_features(),
            published: Mutex::new(HashMap::new()),
        }
    }

    /// All features of this router, in matching order
    #[inline]
    #[must_use]
    pub fn features(&self) -> &[Feature<S>] { &self.features }

    /// Find the feature an event with the given key is routed to
    #[must_use]
    pub fn find(&self, key: EventKey<'_>) -> Option<&Feature<S>> {
        self.features.iter().find(|f| f.route().matches(key))
    }

    /// The command IDs this router has registered under `identity` and not yet
    /// deleted, or [`None`] if it never registered commands for it
    pub async fn published(&self, identity: &S::Identity) -> Option<Vec<S::CommandId>> {
        self.published
            .lock()
            .await
            .get(identity)
            .map(|ids| ids.iter().cloned().collect())
    }

    /// Register every command and autocomplete feature with the platform,
    /// replacing all commands previously registered in the given scope
    ///
    /// Commands are submitted in a single bulk overwrite, in feature order.
    /// `guild` selects the scope; [`None`] registers global commands.
    ///
    /// # Errors
    /// This method returns [`Error::AlreadyRegistered`] without contacting the
    /// platform if this router already registered commands for the session's
    /// identity.  If the platform rejects the request
    /// [`Error::RemoteRegistrationFailed`] is returned and nothing is
    /// recorded, so the call may be retried.
    #[tracing::instrument(level = "info", skip(self, session))]
    pub async fn publish_commands(
        &self,
        session: &S,
        guild: Option<&S::Guild>,
    ) -> Result<(), Error<S::Error>> {
        let identity = session.identity();
        let mut published = self.published.lock().await;

        if published.contains_key(&identity) {
            tracing::warn!(%identity, "Refusing to register commands twice");
            return Err(Error::AlreadyRegistered {
                identity: identity.to_string(),
            });
        }

        let commands: Vec<_> = self
            .features
            .iter()
            .filter_map(|f| f.route().command())
            .cloned()
            .collect();

        tracing::info!(%identity, "Overwriting {} command(s)", commands.len());
        let ids = session
            .overwrite_commands(guild, commands)
            .await
            .map_err(Error::RemoteRegistrationFailed)?;
        tracing::debug!(?ids, "Commands registered");

        published.insert(identity, ids.into());
        Ok(())
    }

    /// Delete every command this router registered for the session's
    /// identity, in registration order
    ///
    /// Each command is forgotten as soon as it is deleted, so after a failure
    /// calling this again resumes with the command that failed.  The identity
    /// itself stays registered and cannot be published to again.
    ///
    /// # Errors
    /// This method stops at the first rejected delete request and returns
    /// [`Error::RemoteDeletionFailed`], leaving that command and any after it
    /// registered.
    #[tracing::instrument(level = "info", skip(self, session))]
    pub async fn unpublish_commands(
        &self,
        session: &S,
        guild: Option<&S::Guild>,
    ) -> Result<(), Error<S::Error>> {
        let identity = session.identity();
        let mut published = self.published.lock().await;

        let Some(ids) = published.get_mut(&identity) else {
            tracing::debug!(%identity, "No commands registered");
            return Ok(());
        };

        while let Some(id) = ids.front() {
            tracing::info!(%id, "Deleting command");
            session
                .delete_command(guild, id)
                .await
                .map_err(|source| Error::RemoteDeletionFailed {
                    id: id.to_string(),
                    source,
                })?;
            ids.pop_front();
        }

        Ok(())
    }

    /// Dispatch an interaction to the first feature matching its kind and
    /// discriminator
    ///
    /// Events matching no feature are dropped without effect.
    pub async fn route(&self, session: &S, event: S::Event) {
        let Some(feature) = event.key().and_then(|k| self.find(k)) else {
            return;
        };

        tracing::debug!(kind = ?feature.kind(), route = ?feature.route(), "Feature selected");
        feature.handler().handle(session, event).await;
    }
}
