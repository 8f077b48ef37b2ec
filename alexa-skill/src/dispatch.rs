//! Routes one request to its handler and builds the response envelope.

use shared::{RequestEnvelope, ResponseBuilder, ResponseEnvelope, Result};

use crate::context::{Services, TurnContext};
use crate::intents::SkillIntent;
use crate::{handlers, requests};

/// Handle one turn. Always yields a response: handler errors are turned
/// into a spoken apology by the error handler.
pub async fn handle_turn(envelope: &RequestEnvelope, services: &Services) -> ResponseEnvelope {
    let mut ctx = TurnContext::new(envelope, services);
    ctx.load_saved_attributes().await;

    let intent = SkillIntent::from_name(envelope.request_name());

    let result = route(&mut ctx, intent).await;
    let builder = match result {
        Ok(builder) => builder,
        Err(e) => handlers::error(&ctx, &e).await,
    };

    builder.build(ctx.attributes)
}

async fn route(ctx: &mut TurnContext<'_>, intent: SkillIntent) -> Result<ResponseBuilder> {
    match intent {
        SkillIntent::Launch => handlers::launch(ctx).await,
        SkillIntent::CancelOrStop => handlers::cancel_or_stop(ctx).await,
        SkillIntent::SessionEnded => handlers::session_ended(ctx).await,
        SkillIntent::Info(topic) => requests::info(ctx, topic).await,
        SkillIntent::Staff(request) => requests::staff(ctx, request).await,
        SkillIntent::Maintenance => requests::maintenance(ctx).await,
        SkillIntent::Unhandled(name) => handlers::unhandled(ctx, &name).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intents::{InfoTopic, StaffRequest};
    use crate::requests::DEFAULT_ROOM_ITEM;
    use crate::test_support::{
        envelope, intent_envelope, services, services_with_store, FailingStore, HangingChannel,
        MockChannel, RecordingChannel,
    };
    use serde_json::json;
    use shared::apl::RENDER_DOCUMENT;
    use shared::i18n::ITEM_PLACEHOLDER;
    use shared::session::{FIRST_RUN, STATE};
    use shared::{AttributesStore, InMemoryAttributesStore, LogChannel, StaffNotifier};
    use std::sync::Arc;
    use std::time::Duration;

    const ERROR_TEXT: &str = "Sorry, I had trouble doing what you asked.";

    fn has_render_directive(response: &ResponseEnvelope) -> bool {
        response
            .response
            .directives
            .iter()
            .any(|d| d["type"] == RENDER_DOCUMENT)
    }

    #[tokio::test]
    async fn test_new_session_ends_after_answer() {
        let services = services(Arc::new(LogChannel));

        for name in ["InfoWifiIntent", "PainIntent", "MaintenanceIntent", "NotARealIntent"] {
            let response = handle_turn(&intent_envelope(name, true, false), &services).await;
            assert!(response.should_end_session(), "{} kept a new session open", name);
            assert_eq!(response.reprompt(), None, "{} reprompted a new session", name);
            assert!(response.speech().is_some_and(|s| !s.is_empty()));
        }
    }

    #[tokio::test]
    async fn test_continuing_session_stays_open_with_reprompt() {
        let services = services(Arc::new(LogChannel));

        for name in ["InfoWifiIntent", "PainIntent", "MaintenanceIntent", "NotARealIntent"] {
            let response = handle_turn(&intent_envelope(name, false, false), &services).await;
            assert!(!response.should_end_session(), "{} ended a continuing session", name);
            assert!(response.reprompt().is_some_and(|r| !r.is_empty()), "{} has no reprompt", name);
        }
    }

    #[tokio::test]
    async fn test_every_info_topic_speaks_its_prompt() {
        let services = services(Arc::new(LogChannel));

        for topic in InfoTopic::ALL {
            let response =
                handle_turn(&intent_envelope(topic.intent_name(), true, false), &services).await;
            let speech = response.speech().unwrap_or_default();
            let translator = shared::Translator::new(shared::Locale::EnUs);
            assert!(
                translator
                    .prompt(topic.prompt())
                    .variants()
                    .iter()
                    .any(|v| speech.starts_with(v)),
                "{} spoke {:?}",
                topic.intent_name(),
                speech
            );
        }
    }

    #[tokio::test]
    async fn test_every_staff_request_notifies_exactly_once() {
        for request in StaffRequest::ALL {
            let mut channel = MockChannel::new();
            channel
                .expect_deliver()
                .withf(move |alert| {
                    alert.intent == request.intent_name()
                        && alert.message.starts_with("Alert:")
                        && alert.locale == "en-US"
                })
                .times(1)
                .returning(|_| Ok("delivered".to_string()));
            channel.expect_name().return_const("mock");

            let services = services(Arc::new(channel));
            let response =
                handle_turn(&intent_envelope(request.intent_name(), false, false), &services).await;

            assert!(!response.should_end_session());
        }
    }

    #[tokio::test]
    async fn test_info_requests_do_not_notify() {
        let mut channel = MockChannel::new();
        channel.expect_deliver().times(0);
        channel.expect_name().return_const("mock");
        let services = services(Arc::new(channel));

        handle_turn(&intent_envelope("InfoPhoneNumberIntent", false, false), &services).await;
        handle_turn(&intent_envelope("NotARealIntent", false, false), &services).await;
    }

    #[tokio::test]
    async fn test_notification_failure_still_answers_patient() {
        let mut channel = MockChannel::new();
        channel
            .expect_deliver()
            .times(1)
            .returning(|_| Err(shared::Error::Notify("gateway down".to_string())));
        channel.expect_name().return_const("mock");
        let services = services(Arc::new(channel));

        let response = handle_turn(&intent_envelope("HelpFallIntent", true, false), &services).await;

        assert!(response
            .speech()
            .is_some_and(|s| s.starts_with("I have let the nurse know")));
    }

    #[tokio::test]
    async fn test_hung_staff_channel_does_not_block_reply() {
        let mut services = services(Arc::new(LogChannel));
        services.notifier =
            StaffNotifier::new(Arc::new(HangingChannel)).with_timeout(Duration::from_millis(100));

        let request = intent_envelope("BleedingIntent", false, false);
        let turn = handle_turn(&request, &services);
        let response = tokio::time::timeout(Duration::from_secs(5), turn)
            .await
            .expect("turn blocked on the staff channel");

        assert!(response.speech().is_some_and(|s| s.starts_with("Help is on the way.")));
        assert!(!response.should_end_session());
    }

    #[tokio::test]
    async fn test_alert_text_names_configured_facility_and_room() {
        let channel = Arc::new(RecordingChannel::default());
        let mut services = services(channel.clone());
        services.facility_name = "St. Mary".to_string();
        services.room_id = "204".to_string();

        handle_turn(&intent_envelope("HelpFallIntent", false, false), &services).await;
        handle_turn(&maintenance_envelope(json!("lamp")), &services).await;

        let alerts = channel.alerts();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].room_id, "204");
        assert_eq!(alerts[0].message, "Alert: patient of St. Mary unit 204 fell down.");
        assert_eq!(alerts[1].message, "Alert: patient of St. Mary unit 204 has issues with lamp.");
        assert!(alerts.iter().all(|a| !a.message.contains("unit 100")));
    }

    fn maintenance_envelope(slot_value: serde_json::Value) -> RequestEnvelope {
        envelope(json!({
            "version": "1.0",
            "session": {"new": false, "sessionId": "s-1", "user": {"userId": "u-1"}},
            "request": {
                "type": "IntentRequest",
                "requestId": "r-1",
                "locale": "en-US",
                "intent": {
                    "name": "MaintenanceIntent",
                    "slots": {"Room_Item": {"name": "Room_Item", "value": slot_value}}
                }
            }
        }))
    }

    #[tokio::test]
    async fn test_maintenance_substitutes_room_item() {
        let channel = Arc::new(RecordingChannel::default());
        let services = services(channel.clone());

        let response = handle_turn(&maintenance_envelope(json!("lamp")), &services).await;

        let speech = response.speech().unwrap_or_default();
        assert!(speech.contains("lamp"));
        assert!(!speech.contains(ITEM_PLACEHOLDER));

        let alerts = channel.alerts();
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].message.contains("lamp"));
        assert!(!alerts[0].message.contains(ITEM_PLACEHOLDER));
        assert_eq!(alerts[0].intent, "MaintenanceIntent");
    }

    #[tokio::test]
    async fn test_maintenance_defaults_when_slot_missing_or_empty() {
        let missing = envelope(json!({
            "session": {"new": true, "user": {"userId": "u-1"}},
            "request": {"type": "IntentRequest", "intent": {"name": "MaintenanceIntent"}}
        }));

        for request in [maintenance_envelope(json!("")), maintenance_envelope(serde_json::Value::Null), missing] {
            let channel = Arc::new(RecordingChannel::default());
            let services = services(channel.clone());

            let response = handle_turn(&request, &services).await;

            let speech = response.speech().unwrap_or_default();
            assert!(speech.contains(DEFAULT_ROOM_ITEM));
            assert!(!speech.contains(ITEM_PLACEHOLDER));

            let alerts = channel.alerts();
            assert_eq!(alerts.len(), 1);
            assert!(alerts[0].message.contains(DEFAULT_ROOM_ITEM));
        }
    }

    #[tokio::test]
    async fn test_incomplete_user_and_slot_sections_still_get_an_answer() {
        let channel = Arc::new(RecordingChannel::default());
        let services = services(channel.clone());
        let request = envelope(json!({
            "session": {"new": true, "user": {}},
            "request": {
                "type": "IntentRequest",
                "intent": {
                    "name": "MaintenanceIntent",
                    "slots": {"Room_Item": {"value": "sink", "resolutions": {"resolutionsPerAuthority": [{"status": {}}]}}}
                }
            }
        }));

        let response = handle_turn(&request, &services).await;

        assert!(response.speech().is_some_and(|s| s.contains("sink")));
        assert_eq!(channel.alerts().len(), 1);
    }

    #[tokio::test]
    async fn test_visual_attached_only_with_apl_support() {
        let services = services(Arc::new(LogChannel));

        for name in ["LaunchRequest", "InfoWifiIntent", "PainIntent", "MaintenanceIntent", "AMAZON.StopIntent", "NotARealIntent"] {
            let with_screen = handle_turn(&intent_envelope(name, false, true), &services).await;
            assert!(has_render_directive(&with_screen), "{} missing visual", name);

            let without = handle_turn(&intent_envelope(name, false, false), &services).await;
            assert!(without.response.directives.is_empty(), "{} attached a visual", name);
        }

        let declared_false = envelope(json!({
            "session": {"new": false},
            "context": {"System": {"device": {"supportedInterfaces": {"Alexa.Presentation.APL": false}}}},
            "request": {"type": "IntentRequest", "intent": {"name": "InfoWifiIntent"}}
        }));
        let response = handle_turn(&declared_false, &services).await;
        assert!(response.response.directives.is_empty());
    }

    #[tokio::test]
    async fn test_staff_visual_uses_nurse_image() {
        let services = services(Arc::new(LogChannel));
        let response = handle_turn(&intent_envelope("PainIntent", false, true), &services).await;

        let data = &response.response.directives[0]["datasources"]["headlineTemplateData"];
        assert_eq!(data["backgroundImage"], "https://cdn.example.com/media/nurse.png");
        assert_eq!(data["text"], "The staff is on the way to help.");
    }

    #[tokio::test]
    async fn test_first_launch_gives_long_welcome_and_sets_menu_state() {
        let services = services(Arc::new(LogChannel));

        let response = handle_turn(&intent_envelope("LaunchRequest", true, false), &services).await;

        let speech = response.speech().unwrap_or_default();
        assert!(speech.starts_with("Welcome to My Hospital. I am your digital assistant."));
        assert!(!response.should_end_session());
        assert!(response.reprompt().is_some());
        assert_eq!(response.session_attributes.get(STATE), Some(&json!("MENU")));
        assert_eq!(response.session_attributes.get(FIRST_RUN), Some(&json!(false)));
    }

    #[tokio::test]
    async fn test_returning_user_gets_short_welcome() {
        let store = Arc::new(InMemoryAttributesStore::new());
        store
            .save("u-1", json!({"FIRST_RUN": false}).as_object().unwrap())
            .await
            .unwrap();
        let services = services_with_store(store, Arc::new(LogChannel));

        let response = handle_turn(&intent_envelope("LaunchRequest", true, false), &services).await;

        let speech = response.speech().unwrap_or_default();
        assert!(speech.starts_with("Welcome to My Hospital. You can say"));
    }

    #[tokio::test]
    async fn test_stop_persists_attributes_and_ends_session() {
        let store = Arc::new(InMemoryAttributesStore::new());
        let services = services_with_store(store.clone(), Arc::new(LogChannel));

        let mut request = intent_envelope("AMAZON.StopIntent", false, false);
        if let Some(session) = request.session.as_mut() {
            session.attributes = json!({"STATE": "MENU", "FIRST_RUN": false}).as_object().cloned();
        }

        let response = handle_turn(&request, &services).await;

        assert!(response.should_end_session());
        assert_eq!(response.speech(), Some("Enjoy your day."));
        let saved = store.load("u-1").await.unwrap().unwrap();
        assert_eq!(saved.get(STATE), Some(&json!("MENU")));
    }

    #[tokio::test]
    async fn test_session_ended_is_silent() {
        let services = services(Arc::new(LogChannel));
        let request = envelope(json!({
            "session": {"new": false, "user": {"userId": "u-1"}},
            "request": {"type": "SessionEndedRequest", "reason": "EXCEEDED_MAX_REPROMPTS"}
        }));

        let response = handle_turn(&request, &services).await;

        assert!(response.should_end_session());
        assert_eq!(response.speech(), None);
        assert_eq!(response.reprompt(), None);
    }

    #[tokio::test]
    async fn test_handler_failure_routes_to_error_handler() {
        let services = services_with_store(Arc::new(FailingStore), Arc::new(LogChannel));

        let continuing = handle_turn(&intent_envelope("AMAZON.StopIntent", false, true), &services).await;
        assert!(continuing.speech().is_some_and(|s| s.starts_with(ERROR_TEXT)));
        assert!(!continuing.should_end_session());
        assert!(continuing.reprompt().is_some_and(|r| !r.is_empty()));
        assert!(has_render_directive(&continuing));

        let new = handle_turn(&intent_envelope("AMAZON.CancelIntent", true, false), &services).await;
        assert!(new.speech().is_some_and(|s| s.starts_with(ERROR_TEXT)));
        assert!(new.should_end_session());
    }

    #[tokio::test]
    async fn test_load_failure_does_not_block_staff_request() {
        let channel = Arc::new(RecordingChannel::default());
        let services = services_with_store(Arc::new(FailingStore), channel.clone());

        let response = handle_turn(&intent_envelope("BleedingIntent", true, false), &services).await;

        assert!(response.speech().is_some_and(|s| s.starts_with("Help is on the way.")));
        assert_eq!(channel.alerts().len(), 1);
        assert_eq!(response.session_attributes.get(FIRST_RUN), Some(&json!(true)));
    }

    #[tokio::test]
    async fn test_error_handler_answers_any_error() {
        let services = services(Arc::new(LogChannel));
        let request = intent_envelope("PainIntent", false, false);
        let ctx = TurnContext::new(&request, &services);

        let errors = vec![
            shared::Error::Aws("throttled".to_string()),
            shared::Error::Config(String::new()),
            shared::Error::Validation("no intent".to_string()),
            shared::Error::NotFound("user".to_string()),
            shared::Error::Notify("down".to_string()),
            shared::Error::Internal("boom".to_string()),
            shared::Error::Serialization(serde_json::from_str::<u8>("x").unwrap_err()),
        ];

        for err in errors {
            let response = handlers::error(&ctx, &err)
                .await
                .build(ctx.attributes.clone());
            let value = serde_json::to_value(&response).unwrap();
            assert_eq!(value["version"], "1.0");
            assert!(value["response"]["outputSpeech"]["text"]
                .as_str()
                .is_some_and(|s| s.starts_with(ERROR_TEXT)));
            assert_eq!(value["response"]["shouldEndSession"], false);
        }
    }
}
