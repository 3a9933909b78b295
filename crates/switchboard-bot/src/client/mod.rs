use std::num::NonZeroU64;

use serenity::{
    model::{gateway::GatewayIntents, id::GuildId},
    Client,
};

use crate::{prelude::*, util::DebugShim};

mod features;
mod handler;

pub use handler::Handler;

#[derive(Debug, clap::Args)]
pub struct ClientOpts {
    /// The Discord API token to use
    #[arg(long, env)]
    discord_token: DebugShim<String>,

    /// Register commands in this guild only, rather than globally
    #[arg(long, env)]
    guild: Option<NonZeroU64>,

    /// Delete the registered commands again before exiting
    #[arg(long, env)]
    unpublish_on_exit: bool,
}

pub async fn build(opts: ClientOpts) -> Result<(Client, Arc<Handler>)> {
    let ClientOpts {
        discord_token,
        guild,
        unpublish_on_exit,
    } = opts;

    let intents = GatewayIntents::non_privileged();
    let handler = Handler::new_rc(
        features::router(),
        guild.map(GuildId::from),
        unpublish_on_exit,
    );

    let client = Client::builder(discord_token.0, intents)
        .event_handler_arc(Arc::clone(&handler))
        .await
        .context("Error constructing Serenity client")?;

    Ok((client, handler))
}
