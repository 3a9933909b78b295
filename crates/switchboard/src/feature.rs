//! Types describing a single routable interaction and the logic handling it

use std::{fmt, future::Future, sync::Arc};

use crate::session::{CommandSpec, EventKey, Session};

/// The kind of an interaction, as far as routing is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    /// An application command was invoked
    Command,
    /// An application command option requested autocompletion
    Autocomplete,
    /// A message component was used
    Component,
    /// A modal was submitted
    Modal,
}

/// The interaction pattern a [`Feature`] responds to
///
/// Each variant carries only the discriminator meaningful for its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route<C> {
    /// Invocations of the given command, matched by name
    Command(C),
    /// Autocomplete requests for the given command, matched by name
    Autocomplete(C),
    /// Message components with exactly this custom ID
    Component(String),
    /// Modal submissions with exactly this custom ID
    Modal(String),
}

impl<C: CommandSpec> Route<C> {
    /// The interaction kind this route accepts
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Command(_) => Kind::Command,
            Self::Autocomplete(_) => Kind::Autocomplete,
            Self::Component(_) => Kind::Component,
            Self::Modal(_) => Kind::Modal,
        }
    }

    /// The key compared against an event's discriminator
    #[must_use]
    pub fn discriminator(&self) -> &str {
        match self {
            Self::Command(c) | Self::Autocomplete(c) => c.name(),
            Self::Component(id) | Self::Modal(id) => id,
        }
    }

    /// The command definition to register, if this route has one
    #[must_use]
    pub fn command(&self) -> Option<&C> {
        match self {
            Self::Command(c) | Self::Autocomplete(c) => Some(c),
            Self::Component(_) | Self::Modal(_) => None,
        }
    }

    /// Test whether an event with the given key should be routed here
    #[inline]
    #[must_use]
    pub fn matches(&self, key: EventKey<'_>) -> bool {
        self.kind() == key.kind && self.discriminator() == key.discriminator
    }
}

/// Logic run in response to an interaction routed to its [`Feature`]
///
/// Any failure inside the handler is the handler's own responsibility; the
/// router neither observes nor recovers from it.
#[async_trait::async_trait]
pub trait Handler<S: Session>: fmt::Debug + Send + Sync {
    /// Respond to an interaction event received on `session`
    async fn handle(&self, session: &S, event: S::Event);
}

/// A [`Handler`] backed by an async closure, created with [`handler_fn`]
#[derive(Clone, Copy)]
pub struct FnHandler<F>(F);

impl<F> fmt::Debug for FnHandler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FnHandler")
            .field(&std::any::type_name::<F>())
            .finish()
    }
}

/// Wrap an async function taking an owned session handle and the event into a
/// [`Handler`]
#[inline]
#[must_use]
pub fn handler_fn<F>(f: F) -> FnHandler<F> { FnHandler(f) }

#[async_trait::async_trait]
impl<S, F, Fut> Handler<S> for FnHandler<F>
where
    S: Session + Clone,
    F: Fn(S, S::Event) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    #[inline]
    async fn handle(&self, session: &S, event: S::Event) { (self.0)(session.clone(), event).await }
}

/// A single routable unit: an interaction pattern and the handler it invokes
pub struct Feature<S: Session> {
    route: Route<S::Command>,
    handler: Arc<dyn Handler<S>>,
}

impl<S: Session> fmt::Debug for Feature<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Feature")
            .field("route", &self.route)
            .field("handler", &self.handler)
            .finish()
    }
}

impl<S: Session> Clone for Feature<S> {
    fn clone(&self) -> Self {
        Self {
            route: self.route.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<S: Session> Feature<S> {
    /// Construct a feature from a route and a shared handler
    #[inline]
    #[must_use]
    pub fn new(route: Route<S::Command>, handler: Arc<dyn Handler<S>>) -> Self {
        Self { route, handler }
    }

    /// Construct a feature handling invocations of the given command
    #[inline]
    #[must_use]
    pub fn command(spec: S::Command, handler: impl Handler<S> + 'static) -> Self {
        Self::new(Route::Command(spec), Arc::new(handler))
    }

    /// Construct a feature handling autocomplete requests for the given
    /// command
    ///
    /// The command is registered along with the plain command features.
    #[inline]
    #[must_use]
    pub fn autocomplete(spec: S::Command, handler: impl Handler<S> + 'static) -> Self {
        Self::new(Route::Autocomplete(spec), Arc::new(handler))
    }

    /// Construct a feature handling the message component with the given
    /// custom ID
    #[inline]
    #[must_use]
    pub fn component(custom_id: impl Into<String>, handler: impl Handler<S> + 'static) -> Self {
        Self::new(Route::Component(custom_id.into()), Arc::new(handler))
    }

    /// Construct a feature handling submissions of the modal with the given
    /// custom ID
    #[inline]
    #[must_use]
    pub fn modal(custom_id: impl Into<String>, handler: impl Handler<S> + 'static) -> Self {
        Self::new(Route::Modal(custom_id.into()), Arc::new(handler))
    }

    /// The interaction pattern this feature responds to
    #[inline]
    #[must_use]
    pub fn route(&self) -> &Route<S::Command> { &self.route }

    /// The interaction kind this feature responds to
    #[inline]
    #[must_use]
    pub fn kind(&self) -> Kind { self.route.kind() }

    #[inline]
    pub(crate) fn handler(&self) -> &dyn Handler<S> { &*self.handler }
}

#[cfg(test)]
mod tests {
    use super::{Kind, Route};
    use crate::{mock::Cmd, session::EventKey};

    #[test]
    fn test_route_keys() {
        let cmd = Route::Command(Cmd("ping"));
        assert_eq!(cmd.kind(), Kind::Command);
        assert_eq!(cmd.discriminator(), "ping");
        assert_eq!(cmd.command(), Some(&Cmd("ping")));

        let ac = Route::Autocomplete(Cmd("color"));
        assert_eq!(ac.kind(), Kind::Autocomplete);
        assert_eq!(ac.discriminator(), "color");
        assert!(ac.command().is_some());

        let btn = Route::<Cmd>::Component("btn1".into());
        assert_eq!(btn.kind(), Kind::Component);
        assert_eq!(btn.discriminator(), "btn1");
        assert!(btn.command().is_none());

        let modal = Route::<Cmd>::Modal("form".into());
        assert_eq!(modal.kind(), Kind::Modal);
        assert!(modal.command().is_none());
    }

    #[test]
    fn test_route_matches() {
        let cmd = Route::Command(Cmd("ping"));
        assert!(cmd.matches(EventKey::new(Kind::Command, "ping")));
        assert!(!cmd.matches(EventKey::new(Kind::Command, "pong")));
        assert!(!cmd.matches(EventKey::new(Kind::Autocomplete, "ping")));
        assert!(!cmd.matches(EventKey::new(Kind::Component, "ping")));

        let btn = Route::<Cmd>::Component("btn1".into());
        assert!(btn.matches(EventKey::new(Kind::Component, "btn1")));
        assert!(!btn.matches(EventKey::new(Kind::Component, "BTN1")));
        assert!(!btn.matches(EventKey::new(Kind::Modal, "btn1")));
    }
}
