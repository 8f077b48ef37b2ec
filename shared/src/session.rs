//! Session attributes carried between turns of one conversation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Attribute key for the conversation state marker.
pub const STATE: &str = "STATE";
/// Attribute key set when the user has never been seen before.
pub const FIRST_RUN: &str = "FIRST_RUN";

/// Conversation state marker stored under [`STATE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkillState {
    Menu,
}

/// Flat key/value bag scoped to one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionAttributes(Map<String, Value>);

impl SessionAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Copy in every attribute from `other` that is not already present.
    pub fn merge_missing(&mut self, other: Map<String, Value>) {
        for (key, value) in other {
            self.0.entry(key).or_insert(value);
        }
    }

    pub fn state(&self) -> Option<SkillState> {
        self.0
            .get(STATE)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn set_state(&mut self, state: SkillState) {
        // unit variants always serialize to a string
        if let Ok(value) = serde_json::to_value(state) {
            self.0.insert(STATE.to_string(), value);
        }
    }

    /// Label for log lines; `NONE` before any state has been set.
    pub fn state_label(&self) -> String {
        match self.0.get(STATE) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "NONE".to_string(),
        }
    }

    pub fn is_first_run(&self) -> bool {
        self.0.get(FIRST_RUN).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn set_first_run(&mut self, first_run: bool) {
        self.0.insert(FIRST_RUN.to_string(), Value::Bool(first_run));
    }
}
