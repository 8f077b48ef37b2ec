//! Per-process collaborators and per-turn state handed to every handler.

use chrono::Utc;
use serde_json::Value;
use shared::apl::{self, Headline};
use shared::i18n::{FACILITY_PLACEHOLDER, ROOM_PLACEHOLDER};
use shared::{
    AttributesStore, MediaSigner, PromptKey, RequestEnvelope, ResponseBuilder, Result,
    SessionAttributes, StaffAlert, StaffNotifier, Translator,
};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Collaborators created once per container.
pub struct Services {
    pub store: Arc<dyn AttributesStore>,
    pub media: Arc<dyn MediaSigner>,
    pub notifier: StaffNotifier,
    pub headline_document: Value,
    pub facility_name: String,
    pub room_id: String,
    pub default_locale: String,
}

/// What a continuing session appends to the answer before reprompting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    /// "What else can I help you with?"
    Brief,
    /// Main menu followed by "what else can I help you with?"
    Menu,
}

/// State for one request/response cycle.
pub struct TurnContext<'a> {
    pub envelope: &'a RequestEnvelope,
    pub services: &'a Services,
    pub translator: Translator,
    pub attributes: SessionAttributes,
}

impl<'a> TurnContext<'a> {
    pub fn new(envelope: &'a RequestEnvelope, services: &'a Services) -> Self {
        let locale = envelope
            .locale()
            .unwrap_or(services.default_locale.as_str());

        let attributes = envelope
            .session
            .as_ref()
            .and_then(|s| s.attributes.clone())
            .map(SessionAttributes::from_map)
            .unwrap_or_default();

        Self {
            envelope,
            services,
            translator: Translator::for_tag(locale),
            attributes,
        }
    }

    /// On the first turn of a session, merge in what was saved for the user.
    /// Storage problems never block the turn; the user is greeted as new.
    pub async fn load_saved_attributes(&mut self) {
        let envelope = self.envelope;
        if !envelope.is_new_session() {
            return;
        }

        let Some(user_id) = envelope.user_id() else {
            self.attributes.set_first_run(true);
            return;
        };

        match self.services.store.load(user_id).await {
            Ok(Some(saved)) => self.attributes.merge_missing(saved),
            Ok(None) => {
                info!("No saved attributes, treating as first run");
                self.attributes.set_first_run(true);
            }
            Err(e) => {
                warn!(error = %e, kind = e.kind(), "Failed to load saved attributes");
                self.attributes.set_first_run(true);
            }
        }
    }

    pub fn t(&self, key: PromptKey) -> String {
        self.translator.t(key)
    }

    /// Render directive for `headline`, or `None` when the device has no screen.
    pub async fn headline(&self, headline: Headline) -> Result<Option<Value>> {
        if !self.envelope.supports_apl() {
            return Ok(None);
        }

        let image_url = self.services.media.image_url(headline.image()).await?;
        Ok(Some(apl::render_directive(
            &self.services.headline_document,
            &headline.data(image_url),
        )))
    }

    /// End a first-turn session after the answer; keep a continuing one
    /// open with a reprompt.
    pub fn close_or_reprompt(
        &self,
        builder: ResponseBuilder,
        speech: String,
        follow_up: FollowUp,
    ) -> ResponseBuilder {
        if self.envelope.is_new_session() {
            return builder.speak(speech).with_should_end_session(true);
        }

        let reprompt = self
            .translator
            .join(&[PromptKey::MainMenu, PromptKey::WhatCanIHelp]);
        let suffix = match follow_up {
            FollowUp::Brief => self.t(PromptKey::WhatCanIHelp),
            FollowUp::Menu => reprompt.clone(),
        };

        builder
            .speak(format!("{} {}", speech.trim_end(), suffix))
            .reprompt(reprompt)
            .with_should_end_session(false)
    }

    /// Alert for the care team; `message` may carry the facility and room
    /// placeholders, which are filled from this deployment.
    pub fn staff_alert(&self, intent: &str, message: String) -> StaffAlert {
        let message = message
            .replace(FACILITY_PLACEHOLDER, &self.services.facility_name)
            .replace(ROOM_PLACEHOLDER, &self.services.room_id);

        StaffAlert {
            alert_id: Uuid::new_v4(),
            message,
            intent: intent.to_string(),
            facility: self.services.facility_name.clone(),
            room_id: self.services.room_id.clone(),
            locale: self.translator.locale().tag().to_string(),
            session_id: self.envelope.session_id().map(String::from),
            user_id: self.envelope.user_id().map(String::from),
            device_id: self.envelope.device_id().map(String::from),
            raised_at: Utc::now(),
        }
    }
}
