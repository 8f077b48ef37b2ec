//! Handlers for patient requests: informational answers and requests that
//! page the care team.

use shared::apl::Headline;
use shared::i18n::ITEM_PLACEHOLDER;
use shared::{PromptKey, ResponseBuilder, Result};
use tracing::info;

use crate::context::{FollowUp, TurnContext};
use crate::intents::{InfoTopic, StaffRequest, MAINTENANCE_INTENT, ROOM_ITEM_SLOT};

/// Spoken in place of the room item when the slot did not resolve.
pub const DEFAULT_ROOM_ITEM: &str = "household item";

/// Answer a question straight from the prompt table.
pub async fn handle_info_request(
    ctx: &TurnContext<'_>,
    intent_name: &str,
    prompt: PromptKey,
) -> Result<ResponseBuilder> {
    info!(state = %ctx.attributes.state_label(), intent = intent_name, "Informational request");

    let directive = ctx.headline(Headline::Lobby).await?;
    let builder = ResponseBuilder::new().maybe_directive(directive);

    Ok(ctx.close_or_reprompt(builder, ctx.t(prompt), FollowUp::Brief))
}

/// Reassure the patient and send one alert to the care team.
pub async fn handle_staff_request(
    ctx: &TurnContext<'_>,
    intent_name: &str,
    prompt: PromptKey,
    staff_message: PromptKey,
) -> Result<ResponseBuilder> {
    info!(state = %ctx.attributes.state_label(), intent = intent_name, "Staff request");

    let directive = ctx.headline(Headline::StaffOnTheWay).await?;
    let builder = ResponseBuilder::new().maybe_directive(directive);

    let alert = ctx.staff_alert(intent_name, ctx.t(staff_message));
    ctx.services.notifier.notify(&alert).await;

    Ok(ctx.close_or_reprompt(builder, ctx.t(prompt), FollowUp::Brief))
}

pub async fn info(ctx: &TurnContext<'_>, topic: InfoTopic) -> Result<ResponseBuilder> {
    handle_info_request(ctx, topic.intent_name(), topic.prompt()).await
}

pub async fn staff(ctx: &TurnContext<'_>, request: StaffRequest) -> Result<ResponseBuilder> {
    handle_staff_request(
        ctx,
        request.intent_name(),
        request.prompt(),
        request.staff_message(),
    )
    .await
}

/// Maintenance request for an item in the room, e.g. "the lights are broken".
pub async fn maintenance(ctx: &TurnContext<'_>) -> Result<ResponseBuilder> {
    info!(state = %ctx.attributes.state_label(), intent = MAINTENANCE_INTENT, "Maintenance request");

    let item = ctx
        .envelope
        .slot_resolution(ROOM_ITEM_SLOT)
        .unwrap_or_else(|| DEFAULT_ROOM_ITEM.to_string());

    let speech = ctx.t(PromptKey::Maintenance).replace(ITEM_PLACEHOLDER, &item);
    let message = ctx
        .t(PromptKey::StaffMaintenance)
        .replace(ITEM_PLACEHOLDER, &item);

    let directive = ctx.headline(Headline::MaintenanceOnTheWay).await?;
    let builder = ResponseBuilder::new().maybe_directive(directive);

    let alert = ctx.staff_alert(MAINTENANCE_INTENT, message);
    ctx.services.notifier.notify(&alert).await;

    Ok(ctx.close_or_reprompt(builder, speech, FollowUp::Brief))
}
