//! [`Session`] and [`Event`] implementations for Serenity

use serenity::{
    builder::CreateCommand,
    client::Context,
    model::{
        application::{Command, CommandType, Interaction},
        id::{CommandId, GuildId, UserId},
    },
};

use crate::{
    feature::Kind,
    session::{CommandSpec, Event, EventKey, Session},
};

/// An application command to be registered with Discord
///
/// This pairs a Serenity command builder with the command's name, which the
/// builder does not expose once set.
#[derive(Debug, Clone)]
pub struct CommandInfo {
    name: String,
    builder: CreateCommand,
}

impl CommandInfo {
    /// Construct a new description of a chat input command
    #[inline]
    #[must_use]
    pub fn slash(name: impl Into<String>, desc: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            builder: CreateCommand::new(name.clone()).description(desc),
            name,
        }
    }

    /// Construct a new description of a user context menu command
    #[inline]
    #[must_use]
    pub fn user(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            builder: CreateCommand::new(name.clone()).kind(CommandType::User),
            name,
        }
    }

    /// Construct a new description of a message context menu command
    #[inline]
    #[must_use]
    pub fn message(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            builder: CreateCommand::new(name.clone()).kind(CommandType::Message),
            name,
        }
    }

    /// Customize the underlying command builder, e.g. to add options
    ///
    /// The closure must not rename the command.
    #[inline]
    #[must_use]
    pub fn build(self, f: impl FnOnce(CreateCommand) -> CreateCommand) -> Self {
        let Self { name, builder } = self;
        Self {
            name,
            builder: f(builder),
        }
    }
}

impl CommandSpec for CommandInfo {
    #[inline]
    fn name(&self) -> &str { &self.name }
}

impl From<CommandInfo> for CreateCommand {
    #[inline]
    fn from(value: CommandInfo) -> Self { value.builder }
}

impl Event for Interaction {
    fn key(&self) -> Option<EventKey<'_>> {
        match self {
            Interaction::Command(c) => Some(EventKey::new(Kind::Command, &c.data.name)),
            Interaction::Autocomplete(a) => Some(EventKey::new(Kind::Autocomplete, &a.data.name)),
            Interaction::Component(c) => Some(EventKey::new(Kind::Component, &c.data.custom_id)),
            Interaction::Modal(m) => Some(EventKey::new(Kind::Modal, &m.data.custom_id)),
            _ => None,
        }
    }
}

#[async_trait::async_trait]
impl Session for Context {
    type Command = CommandInfo;
    type CommandId = CommandId;
    type Error = serenity::Error;
    type Event = Interaction;
    type Guild = GuildId;
    type Identity = UserId;

    #[inline]
    fn identity(&self) -> UserId { self.cache.current_user().id }

    async fn overwrite_commands(
        &self,
        guild: Option<&GuildId>,
        commands: Vec<CommandInfo>,
    ) -> Result<Vec<CommandId>, serenity::Error> {
        let commands = commands.into_iter().map(Into::into).collect();

        let created = if let Some(guild) = guild {
            guild.set_commands(&self.http, commands).await
        } else {
            Command::set_global_commands(&self.http, commands).await
        }?;

        Ok(created.into_iter().map(|c| c.id).collect())
    }

    async fn delete_command(
        &self,
        guild: Option<&GuildId>,
        id: &CommandId,
    ) -> Result<(), serenity::Error> {
        if let Some(guild) = guild {
            guild.delete_command(&self.http, *id).await
        } else {
            Command::delete_global_command(&self.http, *id).await
        }
    }
}
