//! The narrow interface through which the router talks to the chat platform

use std::{fmt, hash::Hash};

use crate::feature::Kind;

/// A command definition as submitted to the platform
///
/// Apart from its name the definition is opaque to the router and is handed to
/// [`Session::overwrite_commands`] unmodified.
pub trait CommandSpec {
    /// The unique, non-localized name of this command
    fn name(&self) -> &str;
}

/// The routing key of an inbound interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventKey<'a> {
    /// The kind of interaction received
    pub kind: Kind,
    /// The command name for command and autocomplete interactions, or the
    /// custom ID for component and modal-submit interactions
    pub discriminator: &'a str,
}

impl<'a> EventKey<'a> {
    /// Construct a new routing key
    #[inline]
    #[must_use]
    pub fn new(kind: Kind, discriminator: &'a str) -> Self {
        Self {
            kind,
            discriminator,
        }
    }
}

/// An inbound interaction event
pub trait Event {
    /// Extract the routing key of this event, or [`None`] if it is not an
    /// interaction that can be routed to a feature
    fn key(&self) -> Option<EventKey<'_>>;
}

/// A live connection to the chat platform
#[async_trait::async_trait]
pub trait Session: Send + Sync + 'static {
    /// The identity command registrations are tracked under
    type Identity: fmt::Debug + fmt::Display + Clone + Eq + Hash + Send + Sync + 'static;
    /// Identifier of a guild, used to scope command registration
    type Guild: fmt::Debug + Send + Sync + 'static;
    /// A command definition to submit to the platform
    type Command: CommandSpec + fmt::Debug + Clone + Send + Sync + 'static;
    /// The platform-assigned ID of a registered command
    type CommandId: fmt::Debug + fmt::Display + Clone + Send + Sync + 'static;
    /// Inbound interaction events delivered on this session
    type Event: Event + Send + 'static;
    /// Error returned by the platform API
    type Error: std::error::Error + Send + Sync + 'static;

    /// The identity of the application this session is connected as
    fn identity(&self) -> Self::Identity;

    /// Replace every command registered in the given scope (or globally, if
    /// `guild` is [`None`]) with `commands`, returning the IDs the platform
    /// assigned to them
    ///
    /// # Errors
    /// This method returns an error if the platform rejects the request.
    async fn overwrite_commands(
        &self,
        guild: Option<&Self::Guild>,
        commands: Vec<Self::Command>,
    ) -> Result<Vec<Self::CommandId>, Self::Error>;

    /// Delete a single registered command from the given scope
    ///
    /// # Errors
    /// This method returns an error if the platform rejects the request.
    async fn delete_command(
        &self,
        guild: Option<&Self::Guild>,
        id: &Self::CommandId,
    ) -> Result<(), Self::Error>;
}
