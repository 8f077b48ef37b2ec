//! Inbound request envelope from the voice platform.
//!
//! Only the fields the skill reads are modelled; everything else in the
//! platform payload is ignored during deserialization.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Interface name advertised by devices that can render APL documents.
pub const APL_INTERFACE: &str = "Alexa.Presentation.APL";

/// Entity resolution status code for a successful match.
const ER_SUCCESS_MATCH: &str = "ER_SUCCESS_MATCH";

/// Top-level request envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestEnvelope {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub context: Option<Context>,
    pub request: Request,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub attributes: Option<Map<String, Value>>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub application: Option<Application>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(default)]
    pub application_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Context {
    #[serde(rename = "System")]
    pub system: Option<SystemContext>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SystemContext {
    #[serde(default)]
    pub device: Option<Device>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub supported_interfaces: Map<String, Value>,
}

/// The `request` section. The shape varies by `type`, so every
/// type-specific field is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(rename = "type")]
    pub request_type: String,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub intent: Option<Intent>,
    /// Present on `SessionEndedRequest`
    #[serde(default)]
    pub reason: Option<String>,
    /// Present on `SessionEndedRequest` when the platform hit an error
    #[serde(default)]
    pub error: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Slot {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub resolutions: Option<Resolutions>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolutions {
    #[serde(default)]
    pub resolutions_per_authority: Vec<Authority>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Authority {
    #[serde(default)]
    pub authority: Option<String>,
    #[serde(default)]
    pub status: ResolutionStatus,
    #[serde(default)]
    pub values: Vec<ResolutionValueWrapper>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResolutionStatus {
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResolutionValueWrapper {
    pub value: ResolutionValue,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResolutionValue {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
}

impl RequestEnvelope {
    /// Intent name for intent requests, the request type otherwise.
    pub fn request_name(&self) -> &str {
        match (&self.request.intent, self.request.request_type.as_str()) {
            (Some(intent), "IntentRequest") => &intent.name,
            (_, request_type) => request_type,
        }
    }

    /// An envelope without a session is treated as the start of one.
    pub fn is_new_session(&self) -> bool {
        self.session.as_ref().map(|s| s.new).unwrap_or(true)
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session.as_ref()?.session_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request.request_id.as_deref()
    }

    pub fn locale(&self) -> Option<&str> {
        self.request.locale.as_deref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.session
            .as_ref()
            .and_then(|s| s.user.as_ref())
            .or_else(|| self.system().and_then(|s| s.user.as_ref()))
            .map(|u| u.user_id.as_str())
            .filter(|id| !id.is_empty())
    }

    pub fn device_id(&self) -> Option<&str> {
        self.system()?.device.as_ref()?.device_id.as_deref()
    }

    /// True when the device declares the interface and the declaration is
    /// neither `null` nor `false`.
    pub fn supports_interface(&self, name: &str) -> bool {
        self.system()
            .and_then(|s| s.device.as_ref())
            .and_then(|d| d.supported_interfaces.get(name))
            .map(|v| !matches!(v, Value::Null | Value::Bool(false)))
            .unwrap_or(false)
    }

    pub fn supports_apl(&self) -> bool {
        self.supports_interface(APL_INTERFACE)
    }

    /// Resolved value of a slot: the first successful entity resolution, or
    /// the raw spoken value. Empty values count as absent.
    pub fn slot_resolution(&self, slot_name: &str) -> Option<String> {
        let slot = self.request.intent.as_ref()?.slots.get(slot_name)?;

        let resolved = slot.resolutions.as_ref().and_then(|r| {
            r.resolutions_per_authority
                .iter()
                .filter(|a| a.status.code == ER_SUCCESS_MATCH)
                .find_map(|a| a.values.first())
                .map(|v| v.value.name.trim().to_string())
                .filter(|name| !name.is_empty())
        });

        resolved
            .or_else(|| slot.value.clone())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn system(&self) -> Option<&SystemContext> {
        self.context.as_ref()?.system.as_ref()
    }
}
