//! en-US prompt table.

use super::{Prompt, PromptKey};

pub(super) fn prompt(key: PromptKey) -> Prompt {
    use Prompt::{Single, Variants};

    match key {
        PromptKey::WelcomeLong => Single("Welcome to My Hospital. I am your digital assistant."),
        PromptKey::WelcomeBack => Single("Welcome to My Hospital."),
        PromptKey::MainMenu => Single(
            "You can say things like bring me my medication, check blood pressure, or if you are not feeling well.",
        ),
        PromptKey::WhatCanIHelp => Variants(&[
            "Is there anything else I can do for you?",
            "What else can I help you with?",
        ]),
        PromptKey::Launch => Variants(&[
            "How can I help?",
            "Is there anything I can do for you?",
            "What can I help you with?",
        ]),
        PromptKey::Goodbye => Single("Enjoy your day."),
        PromptKey::Fallback => Single("It looks like I can't do that."),
        PromptKey::Error => Single("Sorry, I had trouble doing what you asked. Please try again."),
        PromptKey::Services => Single(
            "I'm here to help. You can say things like bring me my medication, check blood pressure, or if you are not feeling well.",
        ),
        PromptKey::Fall => Single("I have let the nurse know, and someone will be there right away."),
        PromptKey::Respiration => {
            Single("Help is on the way. Please remain in your bed and try to breathe slowly.")
        }
        PromptKey::Bleeding => Single(
            "Help is on the way. Please stay still and breathe slowly. If you have an open wound, please avoid touching it.",
        ),
        PromptKey::Help => {
            Single("I have received your request for help. Someone will be by shortly.")
        }
        PromptKey::HelpNeedBackup => Single("Backup nurse is on the way."),
        PromptKey::Maintenance => Single(
            "I have let maintenance know you have an issue with your APARTMENTITEM. Someone will be by shortly to assist.",
        ),
        PromptKey::Medication => Single(
            "I have let the nurse know that you're in need of medication assistance. Someone will be by shortly to assist.",
        ),
        PromptKey::Mobility => Single(
            "I have let the care team know that you need assistance getting up. Please do not try to get up yourself.",
        ),
        PromptKey::Pain => Single(
            "I have let the nurse know that you're in pain, and someone will be there shortly. If this is an emergency, please press the button on your pendant.",
        ),
        PromptKey::Symptoms => Single(
            "I have let the nurse know that you aren't feeling well. Someone will be by to check on you shortly. If this is an emergency, please press the button on your pendant.",
        ),
        PromptKey::Talk => Single(
            "I have let the nurse know you need assistance. Someone will be by shortly. If this is an emergency, please press the button on your pendant.",
        ),
        PromptKey::Toileting => Single(
            "I have let the care team know that you need assistance, and someone will be by shortly. If this is urgent, please press the button on your pendant.",
        ),
        PromptKey::BloodPressure => Single(
            "I have let the care team know that you need to have blood pressure measured, and someone will be by shortly. If this is urgent, please press the button on your pendant.",
        ),
        PromptKey::Boredom => Single(
            "I have let the care team know that you would like someone to talk to. If this is urgent, please press the button on your pendant.",
        ),
        PromptKey::Escort => Single(
            "Great! Please stay in your bed. A member of our care team will come and pick you up.",
        ),
        PromptKey::InfoWifi => Single(
            "Free wi-fi is available. The network name is Guest. There is no password.",
        ),
        PromptKey::InfoPhone => Single("The number to call reception is 0-1-2-5-5-5-7-8-9."),
        PromptKey::InfoAddress => Single("My Hospital is located at 1-2-3 Care St."),
        PromptKey::InfoAccessibility => Single(
            "We offer a range of accessibility services such as wheelchair ramps, elevators, braille signage, and interpreter services to ensure that our facilities and care are accessible to all patients.",
        ),

        PromptKey::StaffFall => Single("Alert: patient of FACILITYNAME unit ROOMNUMBER fell down."),
        PromptKey::StaffHelp => {
            Single("Alert: patient of FACILITYNAME unit ROOMNUMBER requires your assistance.")
        }
        PromptKey::StaffMaintenance => {
            Single("Alert: patient of FACILITYNAME unit ROOMNUMBER has issues with APARTMENTITEM.")
        }
        PromptKey::StaffMedication => {
            Single("Alert: patient of FACILITYNAME unit ROOMNUMBER requires help with medication.")
        }
        PromptKey::StaffMobility => {
            Single("Alert: patient of FACILITYNAME unit ROOMNUMBER needs assistance to get up.")
        }
        PromptKey::StaffPain => {
            Single("Alert: patient of FACILITYNAME unit ROOMNUMBER is feeling pain and requires help.")
        }
        PromptKey::StaffUnwell => Single(
            "Alert: patient of FACILITYNAME unit ROOMNUMBER is not feeling well and requires help.",
        ),
        PromptKey::StaffBoredom => {
            Single("Alert: patient in FACILITYNAME unit ROOMNUMBER is looking for mental support.")
        }
        PromptKey::StaffBathroom => {
            Single("Alert: patient of FACILITYNAME unit ROOMNUMBER needs your help to use the bathroom.")
        }
        PromptKey::StaffTalk => {
            Single("Alert: patient of FACILITYNAME unit ROOMNUMBER needs to talk to a nurse.")
        }
        PromptKey::StaffNurseBackup => Single("Alert: backup nurse needed in FACILITYNAME unit ROOMNUMBER."),
        PromptKey::StaffBleeding => Single("Alert: patient in FACILITYNAME unit ROOMNUMBER is bleeding."),
        PromptKey::StaffEscort => {
            Single("Alert: patient in FACILITYNAME unit ROOMNUMBER wants to go for a walk.")
        }
        PromptKey::StaffBloodPressure => Single(
            "Alert: patient in FACILITYNAME unit ROOMNUMBER is waiting to have their blood pressure measured.",
        ),
        PromptKey::StaffRespiration => {
            Single("Alert: patient in FACILITYNAME unit ROOMNUMBER is having trouble breathing.")
        }
    }
}
