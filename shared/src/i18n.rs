//! Localized prompt tables.
//!
//! Prompts are addressed by [`PromptKey`]. A prompt is either a single
//! string or a list of variants; looking up a variant list picks one at
//! random so repeated answers do not sound canned.

use rand::seq::SliceRandom;

mod en_us;

/// Placeholder replaced with the resolved room item in maintenance prompts.
pub const ITEM_PLACEHOLDER: &str = "APARTMENTITEM";

/// Placeholders in staff messages, filled from the deployment's facility and room.
pub const FACILITY_PLACEHOLDER: &str = "FACILITYNAME";
pub const ROOM_PLACEHOLDER: &str = "ROOMNUMBER";

/// Symbolic prompt names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKey {
    WelcomeLong,
    WelcomeBack,
    MainMenu,
    WhatCanIHelp,
    Launch,
    Goodbye,
    Fallback,
    Error,
    Services,
    Fall,
    Respiration,
    Bleeding,
    Help,
    HelpNeedBackup,
    Maintenance,
    Medication,
    Mobility,
    Pain,
    Symptoms,
    Talk,
    Toileting,
    BloodPressure,
    Boredom,
    Escort,
    InfoWifi,
    InfoPhone,
    InfoAddress,
    InfoAccessibility,
    StaffFall,
    StaffHelp,
    StaffMaintenance,
    StaffMedication,
    StaffMobility,
    StaffPain,
    StaffUnwell,
    StaffBoredom,
    StaffBathroom,
    StaffTalk,
    StaffNurseBackup,
    StaffBleeding,
    StaffEscort,
    StaffBloodPressure,
    StaffRespiration,
}

impl PromptKey {
    pub const ALL: [PromptKey; 43] = [
        PromptKey::WelcomeLong,
        PromptKey::WelcomeBack,
        PromptKey::MainMenu,
        PromptKey::WhatCanIHelp,
        PromptKey::Launch,
        PromptKey::Goodbye,
        PromptKey::Fallback,
        PromptKey::Error,
        PromptKey::Services,
        PromptKey::Fall,
        PromptKey::Respiration,
        PromptKey::Bleeding,
        PromptKey::Help,
        PromptKey::HelpNeedBackup,
        PromptKey::Maintenance,
        PromptKey::Medication,
        PromptKey::Mobility,
        PromptKey::Pain,
        PromptKey::Symptoms,
        PromptKey::Talk,
        PromptKey::Toileting,
        PromptKey::BloodPressure,
        PromptKey::Boredom,
        PromptKey::Escort,
        PromptKey::InfoWifi,
        PromptKey::InfoPhone,
        PromptKey::InfoAddress,
        PromptKey::InfoAccessibility,
        PromptKey::StaffFall,
        PromptKey::StaffHelp,
        PromptKey::StaffMaintenance,
        PromptKey::StaffMedication,
        PromptKey::StaffMobility,
        PromptKey::StaffPain,
        PromptKey::StaffUnwell,
        PromptKey::StaffBoredom,
        PromptKey::StaffBathroom,
        PromptKey::StaffTalk,
        PromptKey::StaffNurseBackup,
        PromptKey::StaffBleeding,
        PromptKey::StaffEscort,
        PromptKey::StaffBloodPressure,
        PromptKey::StaffRespiration,
    ];
}

/// A prompt as stored in a locale table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    Single(&'static str),
    Variants(&'static [&'static str]),
}

impl Prompt {
    /// All phrasings this prompt can produce.
    pub fn variants(&self) -> &[&'static str] {
        match self {
            Prompt::Single(text) => std::slice::from_ref(text),
            Prompt::Variants(list) => list,
        }
    }

    fn pick(&self) -> &'static str {
        match self {
            Prompt::Single(text) => *text,
            Prompt::Variants(list) => list.choose(&mut rand::thread_rng()).copied().unwrap_or(""),
        }
    }
}

/// Locales with a prompt table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    EnUs,
}

impl Locale {
    /// Map a BCP-47 tag onto a supported locale. Only en-US has a table,
    /// so every other tag falls back to it.
    pub fn resolve(tag: &str) -> Self {
        if !tag.eq_ignore_ascii_case("en-US") {
            tracing::debug!(locale = %tag, "No prompt table for locale, using en-US");
        }
        Locale::EnUs
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
        }
    }

    fn table(&self) -> fn(PromptKey) -> Prompt {
        match self {
            Locale::EnUs => en_us::prompt,
        }
    }
}

/// Prompt lookup bound to one locale, handed to each handler.
#[derive(Debug, Clone, Copy)]
pub struct Translator {
    locale: Locale,
}

impl Translator {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn for_tag(tag: &str) -> Self {
        Self::new(Locale::resolve(tag))
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn prompt(&self, key: PromptKey) -> Prompt {
        (self.locale.table())(key)
    }

    /// Text for `key`; a random variant when the prompt has several.
    pub fn t(&self, key: PromptKey) -> String {
        self.prompt(key).pick().to_string()
    }

    /// Text for several keys joined by single spaces.
    pub fn join(&self, keys: &[PromptKey]) -> String {
        keys.iter()
            .map(|key| self.t(*key).trim().to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
