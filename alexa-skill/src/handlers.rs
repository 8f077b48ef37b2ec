//! Lifecycle handlers: launch, stop, session end, the catch-all, and the
//! error handler.

use shared::apl::Headline;
use shared::{Error, PromptKey, ResponseBuilder, Result, SkillState};
use tracing::{error, info, warn};

use crate::context::{FollowUp, TurnContext};

/// Greet the user, longer the first time they open the skill.
pub async fn launch(ctx: &mut TurnContext<'_>) -> Result<ResponseBuilder> {
    info!(first_run = ctx.attributes.is_first_run(), "LaunchRequest");

    let welcome = if ctx.attributes.is_first_run() {
        PromptKey::WelcomeLong
    } else {
        PromptKey::WelcomeBack
    };
    let speech = ctx
        .translator
        .join(&[welcome, PromptKey::MainMenu, PromptKey::Launch]);
    let reprompt = ctx.translator.join(&[PromptKey::MainMenu, PromptKey::Launch]);

    ctx.attributes.set_state(SkillState::Menu);
    ctx.attributes.set_first_run(false);

    let directive = ctx.headline(Headline::Lobby).await?;

    Ok(ResponseBuilder::new()
        .maybe_directive(directive)
        .speak(speech)
        .reprompt(reprompt)
        .with_should_end_session(false))
}

/// AMAZON.StopIntent and AMAZON.CancelIntent: save the session and say goodbye.
pub async fn cancel_or_stop(ctx: &TurnContext<'_>) -> Result<ResponseBuilder> {
    info!(state = %ctx.attributes.state_label(), intent = ctx.envelope.request_name(), "Stop");

    match ctx.envelope.user_id() {
        Some(user_id) => {
            ctx.services
                .store
                .save(user_id, ctx.attributes.as_map())
                .await?
        }
        None => warn!("Request has no user id, session attributes not saved"),
    }

    let directive = ctx.headline(Headline::Goodbye).await?;

    Ok(ResponseBuilder::new()
        .maybe_directive(directive)
        .speak(ctx.t(PromptKey::Goodbye))
        .with_should_end_session(true))
}

pub async fn session_ended(ctx: &TurnContext<'_>) -> Result<ResponseBuilder> {
    let request = &ctx.envelope.request;
    match &request.error {
        Some(platform_error) => warn!(
            reason = request.reason.as_deref().unwrap_or("UNKNOWN"),
            error = %platform_error,
            "Session ended with error"
        ),
        None => info!(
            reason = request.reason.as_deref().unwrap_or("UNKNOWN"),
            "Session ended"
        ),
    }

    Ok(ResponseBuilder::new().with_should_end_session(true))
}

/// Catch-all for request names without a dedicated handler.
pub async fn unhandled(ctx: &TurnContext<'_>, name: &str) -> Result<ResponseBuilder> {
    info!(state = %ctx.attributes.state_label(), intent = %name, "Unhandled intent");

    let directive = ctx.headline(Headline::Lobby).await?;
    let builder = ResponseBuilder::new().maybe_directive(directive);

    Ok(ctx.close_or_reprompt(builder, ctx.t(PromptKey::Fallback), FollowUp::Menu))
}

/// Turn any handler failure into a spoken apology. Never fails.
pub async fn error(ctx: &TurnContext<'_>, err: &Error) -> ResponseBuilder {
    error!(
        request_id = ctx.envelope.request_id().unwrap_or("unknown"),
        intent = ctx.envelope.request_name(),
        kind = err.kind(),
        error = %err,
        details = ?err,
        "Handler failed"
    );

    let directive = match ctx.headline(Headline::Lobby).await {
        Ok(directive) => directive,
        Err(e) => {
            warn!(error = %e, "Skipping visual in error response");
            None
        }
    };
    let builder = ResponseBuilder::new().maybe_directive(directive);

    ctx.close_or_reprompt(builder, ctx.t(PromptKey::Error), FollowUp::Menu)
}
