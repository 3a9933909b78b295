use serenity::{
    builder::{
        CreateActionRow, CreateButton, CreateInputText, CreateInteractionResponse,
        CreateInteractionResponseMessage, CreateModal,
    },
    client::Context,
    model::application::{ActionRowComponent, ButtonStyle, InputTextStyle, Interaction},
};
use switchboard::{discord::CommandInfo, handler_fn, Feature, Registry, Router};

use crate::prelude::*;

const PING_AGAIN: &str = "ping-again";
const FEEDBACK_FORM: &str = "feedback-form";
const FEEDBACK_BODY: &str = "feedback-body";

pub fn router() -> Router<Context> {
    let mut reg = Registry::<Context>::new();

    reg.add_features([
        Feature::command(
            CommandInfo::slash("ping", "Check whether the bot is listening"),
            handler_fn(ping),
        ),
        Feature::component(PING_AGAIN, handler_fn(ping_again)),
    ])
    .add_features([
        Feature::command(
            CommandInfo::slash("feedback", "Send feedback to the bot's operators"),
            handler_fn(feedback),
        ),
        Feature::modal(FEEDBACK_FORM, handler_fn(feedback_submit)),
    ]);

    let router = Router::new(reg);
    for feature in router.features() {
        debug!(kind = ?feature.kind(), route = ?feature.route(), "Feature registered");
    }

    router
}

fn log_err(what: &str, res: serenity::Result<()>) {
    if let Err(err) = res {
        warn!(%err, "Error responding to {what}");
    }
}

#[instrument(level = "info", skip_all)]
async fn ping(ctx: Context, int: Interaction) {
    let Interaction::Command(cmd) = int else {
        return;
    };

    let res = CreateInteractionResponseMessage::new()
        .content("Pong!")
        .components(vec![CreateActionRow::Buttons(vec![CreateButton::new(
            PING_AGAIN,
        )
        .style(ButtonStyle::Primary)
        .label("Again")])]);

    log_err(
        "/ping",
        cmd.create_response(&ctx, CreateInteractionResponse::Message(res))
            .await,
    );
}

#[instrument(level = "info", skip_all)]
async fn ping_again(ctx: Context, int: Interaction) {
    let Interaction::Component(mc) = int else {
        return;
    };

    let res = CreateInteractionResponseMessage::new()
        .content(format!("Pong! (again, for {})", mc.user.name));

    log_err(
        "ping button",
        mc.create_response(&ctx, CreateInteractionResponse::UpdateMessage(res))
            .await,
    );
}

#[instrument(level = "info", skip_all)]
async fn feedback(ctx: Context, int: Interaction) {
    let Interaction::Command(cmd) = int else {
        return;
    };

    let modal = CreateModal::new(FEEDBACK_FORM, "Feedback").components(vec![
        CreateActionRow::InputText(CreateInputText::new(
            InputTextStyle::Paragraph,
            "What's on your mind?",
            FEEDBACK_BODY,
        )),
    ]);

    log_err(
        "/feedback",
        cmd.create_response(&ctx, CreateInteractionResponse::Modal(modal))
            .await,
    );
}

#[instrument(level = "info", skip_all)]
async fn feedback_submit(ctx: Context, int: Interaction) {
    let Interaction::Modal(ms) = int else {
        return;
    };

    let body = ms
        .data
        .components
        .iter()
        .flat_map(|r| &r.components)
        .find_map(|c| match c {
            ActionRowComponent::InputText(t) if t.custom_id == FEEDBACK_BODY => {
                Some(t.value.clone())
            },
            _ => None,
        });
    info!(user = %ms.user.name, ?body, "Feedback received");

    let res = CreateInteractionResponseMessage::new()
        .content("Thanks for the feedback!")
        .ephemeral(true);

    log_err(
        "feedback form",
        ms.create_response(&ctx, CreateInteractionResponse::Message(res))
            .await,
    );
}
