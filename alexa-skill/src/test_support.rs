//! Fixtures shared by the handler tests.

use async_trait::async_trait;
use mockall::mock;
use serde_json::{json, Map, Value};
use shared::apl;
use shared::{
    AttributesStore, Error, InMemoryAttributesStore, PublicMediaUrls, RequestEnvelope, Result,
    StaffAlert, StaffChannel, StaffNotifier,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::context::Services;

mock! {
    pub Channel {}

    #[async_trait]
    impl StaffChannel for Channel {
        async fn deliver(&self, alert: &StaffAlert) -> Result<String>;
        fn name(&self) -> &'static str;
    }
}

/// Keeps every alert it is handed.
#[derive(Default)]
pub struct RecordingChannel {
    alerts: Mutex<Vec<StaffAlert>>,
}

impl RecordingChannel {
    pub fn alerts(&self) -> Vec<StaffAlert> {
        self.alerts.lock().unwrap().clone()
    }
}

#[async_trait]
impl StaffChannel for RecordingChannel {
    async fn deliver(&self, alert: &StaffAlert) -> Result<String> {
        self.alerts.lock().unwrap().push(alert.clone());
        Ok("recorded".to_string())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Never answers within any reasonable turn budget.
pub struct HangingChannel;

#[async_trait]
impl StaffChannel for HangingChannel {
    async fn deliver(&self, _alert: &StaffAlert) -> Result<String> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok("too late".to_string())
    }

    fn name(&self) -> &'static str {
        "hanging"
    }
}

/// Store whose backend is unreachable.
pub struct FailingStore;

#[async_trait]
impl AttributesStore for FailingStore {
    async fn load(&self, _user_id: &str) -> Result<Option<Map<String, Value>>> {
        Err(Error::Internal("attribute store unavailable".to_string()))
    }

    async fn save(&self, _user_id: &str, _attributes: &Map<String, Value>) -> Result<()> {
        Err(Error::Internal("attribute store unavailable".to_string()))
    }
}

pub fn services_with_store(
    store: Arc<dyn AttributesStore>,
    channel: Arc<dyn StaffChannel>,
) -> Services {
    Services {
        store,
        media: Arc::new(PublicMediaUrls::new("https://cdn.example.com")),
        notifier: StaffNotifier::new(channel),
        headline_document: apl::headline_document().unwrap(),
        facility_name: "My Hospital".to_string(),
        room_id: "100".to_string(),
        default_locale: "en-US".to_string(),
    }
}

pub fn services(channel: Arc<dyn StaffChannel>) -> Services {
    services_with_store(Arc::new(InMemoryAttributesStore::new()), channel)
}

pub fn envelope(value: Value) -> RequestEnvelope {
    serde_json::from_value(value).unwrap()
}

/// Envelope for `name`; names ending in `Request` are request types,
/// anything else is sent as an intent.
pub fn intent_envelope(name: &str, new_session: bool, apl: bool) -> RequestEnvelope {
    let request = if name.ends_with("Request") {
        json!({"type": name, "requestId": "r-1", "locale": "en-US"})
    } else {
        json!({
            "type": "IntentRequest",
            "requestId": "r-1",
            "locale": "en-US",
            "intent": {"name": name, "slots": {}}
        })
    };

    let interfaces = if apl {
        json!({"Alexa.Presentation.APL": {"runtime": {"maxVersion": "1.8"}}})
    } else {
        json!({})
    };

    envelope(json!({
        "version": "1.0",
        "session": {
            "new": new_session,
            "sessionId": "amzn1.echo-api.session.1",
            "application": {"applicationId": "amzn1.ask.skill.1"},
            "user": {"userId": "u-1"}
        },
        "context": {
            "System": {
                "device": {"deviceId": "d-1", "supportedInterfaces": interfaces},
                "user": {"userId": "u-1"}
            }
        },
        "request": request
    }))
}
