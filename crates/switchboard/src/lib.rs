//! First-match interaction routing for chat bots
//!
//! Applications describe each interaction they respond to as a [`Feature`],
//! collect them in a [`Registry`], and freeze the registry into a [`Router`].
//! The router publishes the command features to the platform in a single bulk
//! overwrite and dispatches every inbound interaction to the first feature
//! whose kind and discriminator match it.
//!
//! The platform itself is reached only through the [`Session`] and [`Event`]
//! traits; the [`discord`] module implements them for Serenity.

#![deny(
    clippy::disallowed_methods,
    clippy::suspicious,
    clippy::style,
    clippy::clone_on_ref_ptr,
    missing_debug_implementations,
    missing_copy_implementations
)]
#![warn(clippy::pedantic, missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod discord;
mod error;
mod feature;
mod registry;
mod router;
mod session;

#[cfg(test)]
mod mock;

pub use error::Error;
pub use feature::{handler_fn, Feature, FnHandler, Handler, Kind, Route};
pub use registry::Registry;
pub use router::Router;
pub use session::{CommandSpec, Event, EventKey, Session};
