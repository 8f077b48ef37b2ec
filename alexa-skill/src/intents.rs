//! Classification of incoming requests.
//!
//! Every request name maps onto exactly one [`SkillIntent`]. Names the skill
//! does not know become [`SkillIntent::Unhandled`], so the match in the
//! dispatcher is total without relying on handler order.

use shared::PromptKey;

/// Questions answered from the prompt table alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoTopic {
    Accessibility,
    Address,
    PhoneNumber,
    Services,
    Wifi,
    Introduction,
    SkillHelp,
}

impl InfoTopic {
    pub const ALL: [InfoTopic; 7] = [
        InfoTopic::Accessibility,
        InfoTopic::Address,
        InfoTopic::PhoneNumber,
        InfoTopic::Services,
        InfoTopic::Wifi,
        InfoTopic::Introduction,
        InfoTopic::SkillHelp,
    ];

    pub fn intent_name(&self) -> &'static str {
        match self {
            InfoTopic::Accessibility => "InfoAccessibilityIntent",
            InfoTopic::Address => "InfoAddressIntent",
            InfoTopic::PhoneNumber => "InfoPhoneNumberIntent",
            InfoTopic::Services => "InfoServicesIntent",
            InfoTopic::Wifi => "InfoWifiIntent",
            InfoTopic::Introduction => "IntroductionIntent",
            InfoTopic::SkillHelp => "AMAZON.HelpIntent",
        }
    }

    pub fn prompt(&self) -> PromptKey {
        match self {
            InfoTopic::Accessibility => PromptKey::InfoAccessibility,
            InfoTopic::Address => PromptKey::InfoAddress,
            InfoTopic::PhoneNumber => PromptKey::InfoPhone,
            InfoTopic::Services | InfoTopic::SkillHelp => PromptKey::Services,
            InfoTopic::Wifi => PromptKey::InfoWifi,
            InfoTopic::Introduction => PromptKey::WhatCanIHelp,
        }
    }
}

/// Requests that page the care team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffRequest {
    Bleeding,
    BloodPressure,
    Boredom,
    Toileting,
    Talk,
    Symptoms,
    Pain,
    Respiration,
    Medication,
    Mobility,
    Escort,
    Fall,
    General,
    NeedBackup,
}

impl StaffRequest {
    pub const ALL: [StaffRequest; 14] = [
        StaffRequest::Bleeding,
        StaffRequest::BloodPressure,
        StaffRequest::Boredom,
        StaffRequest::Toileting,
        StaffRequest::Talk,
        StaffRequest::Symptoms,
        StaffRequest::Pain,
        StaffRequest::Respiration,
        StaffRequest::Medication,
        StaffRequest::Mobility,
        StaffRequest::Escort,
        StaffRequest::Fall,
        StaffRequest::General,
        StaffRequest::NeedBackup,
    ];

    pub fn intent_name(&self) -> &'static str {
        match self {
            StaffRequest::Bleeding => "BleedingIntent",
            StaffRequest::BloodPressure => "BloodPressureIntent",
            StaffRequest::Boredom => "BoredomIntent",
            StaffRequest::Toileting => "ToiletingIntent",
            StaffRequest::Talk => "TalkIntent",
            // interaction model spelling
            StaffRequest::Symptoms => "SymptonsIntent",
            StaffRequest::Pain => "PainIntent",
            StaffRequest::Respiration => "RespirationIntent",
            StaffRequest::Medication => "MedicationIntent",
            StaffRequest::Mobility => "MobilityIntent",
            StaffRequest::Escort => "HelpEscortIntent",
            StaffRequest::Fall => "HelpFallIntent",
            StaffRequest::General => "HelpGeneralIntent",
            StaffRequest::NeedBackup => "HelpNeedBackupIntent",
        }
    }

    /// What the patient hears.
    pub fn prompt(&self) -> PromptKey {
        match self {
            StaffRequest::Bleeding => PromptKey::Bleeding,
            StaffRequest::BloodPressure => PromptKey::BloodPressure,
            StaffRequest::Boredom => PromptKey::Boredom,
            StaffRequest::Toileting => PromptKey::Toileting,
            StaffRequest::Talk => PromptKey::Talk,
            StaffRequest::Symptoms => PromptKey::Symptoms,
            StaffRequest::Pain => PromptKey::Pain,
            StaffRequest::Respiration => PromptKey::Respiration,
            StaffRequest::Medication => PromptKey::Medication,
            StaffRequest::Mobility => PromptKey::Mobility,
            StaffRequest::Escort => PromptKey::Escort,
            StaffRequest::Fall => PromptKey::Fall,
            StaffRequest::General => PromptKey::Help,
            StaffRequest::NeedBackup => PromptKey::HelpNeedBackup,
        }
    }

    /// What the care team receives.
    pub fn staff_message(&self) -> PromptKey {
        match self {
            StaffRequest::Bleeding => PromptKey::StaffBleeding,
            StaffRequest::BloodPressure => PromptKey::StaffBloodPressure,
            StaffRequest::Boredom => PromptKey::StaffBoredom,
            StaffRequest::Toileting => PromptKey::StaffBathroom,
            StaffRequest::Talk => PromptKey::StaffTalk,
            StaffRequest::Symptoms => PromptKey::StaffUnwell,
            StaffRequest::Pain => PromptKey::StaffPain,
            StaffRequest::Respiration => PromptKey::StaffRespiration,
            StaffRequest::Medication => PromptKey::StaffMedication,
            StaffRequest::Mobility => PromptKey::StaffMobility,
            StaffRequest::Escort => PromptKey::StaffEscort,
            StaffRequest::Fall => PromptKey::StaffFall,
            StaffRequest::General => PromptKey::StaffHelp,
            StaffRequest::NeedBackup => PromptKey::StaffNurseBackup,
        }
    }
}

pub const MAINTENANCE_INTENT: &str = "MaintenanceIntent";

/// Slot naming the broken item in a maintenance request.
pub const ROOM_ITEM_SLOT: &str = "Room_Item";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillIntent {
    Launch,
    CancelOrStop,
    SessionEnded,
    Info(InfoTopic),
    Staff(StaffRequest),
    Maintenance,
    /// Catch-all for every other request name
    Unhandled(String),
}

impl SkillIntent {
    pub fn from_name(name: &str) -> Self {
        match name {
            "LaunchRequest" => SkillIntent::Launch,
            "AMAZON.CancelIntent" | "AMAZON.StopIntent" => SkillIntent::CancelOrStop,
            "SessionEndedRequest" => SkillIntent::SessionEnded,
            MAINTENANCE_INTENT => SkillIntent::Maintenance,
            other => {
                if let Some(topic) = InfoTopic::ALL.iter().find(|t| t.intent_name() == other) {
                    SkillIntent::Info(*topic)
                } else if let Some(request) =
                    StaffRequest::ALL.iter().find(|r| r.intent_name() == other)
                {
                    SkillIntent::Staff(*request)
                } else {
                    SkillIntent::Unhandled(other.to_string())
                }
            }
        }
    }

    /// Every request name with a dedicated handler.
    pub fn supported_names() -> Vec<&'static str> {
        let mut names = vec![
            "LaunchRequest",
            "AMAZON.CancelIntent",
            "AMAZON.StopIntent",
            "SessionEndedRequest",
            MAINTENANCE_INTENT,
        ];
        names.extend(InfoTopic::ALL.iter().map(|t| t.intent_name()));
        names.extend(StaffRequest::ALL.iter().map(|r| r.intent_name()));
        names
    }
}

#[cfg(test)]
impl SkillIntent {
    fn is_catch_all(&self) -> bool {
        matches!(self, SkillIntent::Unhandled(_))
    }
}
