//! Shared library for the patient-room skill Lambda.
//!
//! This crate provides the platform envelope types, prompt tables, session
//! attributes, and the collaborators handlers call through narrow traits
//! (attribute store, media signer, staff channel).

pub mod apl;
pub mod config;
pub mod db;
pub mod envelope;
pub mod error;
pub mod i18n;
pub mod media;
pub mod notify;
pub mod response;
pub mod secrets;
pub mod session;
pub mod store;

pub use config::{Config, MediaConfig, StaffChannelConfig, StoreConfig};
pub use envelope::RequestEnvelope;
pub use error::{Error, Result};
pub use i18n::{Locale, PromptKey, Translator};
pub use media::{ImageKey, MediaSigner, PublicMediaUrls, S3MediaSigner};
pub use notify::{LogChannel, SnsChannel, StaffAlert, StaffChannel, StaffNotifier, WebhookChannel};
pub use response::{ResponseBuilder, ResponseEnvelope};
pub use session::{SessionAttributes, SkillState};
pub use store::{AttributesStore, InMemoryAttributesStore, PgAttributesStore};
