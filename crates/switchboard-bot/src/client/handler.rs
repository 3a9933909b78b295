use std::{future::Future, sync::OnceLock};

use serenity::{
    client::Context,
    model::{application::Interaction, gateway::Ready, id::GuildId},
};
use switchboard::Router;

use crate::prelude::*;

pub struct Handler {
    router: Router<Context>,
    guild: Option<GuildId>,
    unpublish_on_exit: bool,
    ctx: OnceLock<Context>,
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("router", &self.router)
            .field("guild", &self.guild)
            .field("unpublish_on_exit", &self.unpublish_on_exit)
            .finish_non_exhaustive()
    }
}

impl Handler {
    pub fn new_rc(
        router: Router<Context>,
        guild: Option<GuildId>,
        unpublish_on_exit: bool,
    ) -> Arc<Self> {
        Arc::new(Self {
            router,
            guild,
            unpublish_on_exit,
            ctx: OnceLock::new(),
        })
    }

    /// Remove the commands published on startup, if requested
    pub async fn unpublish(&self) -> Result {
        if !self.unpublish_on_exit {
            return Ok(());
        }

        let Some(ctx) = self.ctx.get() else {
            debug!("Never connected, no commands to delete");
            return Ok(());
        };

        info!("Deleting registered commands");
        self.router
            .unpublish_commands(ctx, self.guild.as_ref())
            .await
            .context("Error deleting registered commands")
    }
}

#[instrument(skip(f))]
async fn handler(method: &'static str, f: impl Future<Output = Result<()>>) {
    match f.await {
        Ok(()) => (),
        Err(e) => error!("Error in {method}: {e:?}"),
    }
}

#[async_trait]
impl serenity::client::EventHandler for Handler {
    async fn interaction_create(&self, ctx: Context, int: Interaction) {
        self.router.route(&ctx, int).await;
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        handler("ready", async move {
            info!(user = %ready.user.name, "Connected to Discord");

            if self.ctx.set(ctx.clone()).is_err() {
                debug!("Reconnected, keeping original context");
            }

            match self
                .router
                .publish_commands(&ctx, self.guild.as_ref())
                .await
            {
                Ok(()) => Ok(()),
                Err(switchboard::Error::AlreadyRegistered { .. }) => {
                    debug!("Commands already registered");
                    Ok(())
                },
                Err(e) => Err(e).context("Error registering commands"),
            }
        })
        .await;
    }
}
