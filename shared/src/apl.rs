//! APL headline visual shown on devices with a screen.

use serde::Serialize;
use serde_json::{json, Value};

use crate::media::ImageKey;
use crate::Result;

/// Directive type for rendering an APL document.
pub const RENDER_DOCUMENT: &str = "Alexa.Presentation.APL.RenderDocument";

/// Datasource name the headline document binds to.
pub const HEADLINE_DATASOURCE: &str = "headlineTemplateData";

const HEADLINE_DOCUMENT: &str = include_str!("../assets/apl/headline.json");

/// Parse the bundled headline document.
pub fn headline_document() -> Result<Value> {
    Ok(serde_json::from_str(HEADLINE_DOCUMENT)?)
}

/// Datasource payload for the headline template.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlineData {
    pub background_image: String,
    pub text: String,
    pub sub: String,
    pub logo_url: String,
    pub hint_text: String,
}

/// The screens the skill shows, each with a fixed background and caption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Headline {
    Lobby,
    Goodbye,
    StaffOnTheWay,
    MaintenanceOnTheWay,
}

impl Headline {
    pub fn image(&self) -> ImageKey {
        match self {
            Headline::Lobby => ImageKey::Lobby,
            Headline::Goodbye => ImageKey::Goodbye,
            Headline::StaffOnTheWay => ImageKey::Nurse,
            Headline::MaintenanceOnTheWay => ImageKey::Repair,
        }
    }

    fn text(&self) -> &'static str {
        match self {
            Headline::Lobby => "Welcome to My Hospital.",
            Headline::Goodbye => "Have a great day!",
            Headline::StaffOnTheWay => "The staff is on the way to help.",
            Headline::MaintenanceOnTheWay => "The maintenance staff is on the way to help.",
        }
    }

    fn hint(&self) -> &'static str {
        match self {
            Headline::Lobby => "Try, \"Alexa, start my day.\"",
            Headline::Goodbye => "Try, \"Alexa, give me the news.\"",
            Headline::StaffOnTheWay | Headline::MaintenanceOnTheWay => {
                "Try, \"Alexa, play calming music.\""
            }
        }
    }

    pub fn data(&self, background_image: String) -> HeadlineData {
        HeadlineData {
            background_image,
            text: self.text().to_string(),
            sub: " ".to_string(),
            logo_url: String::new(),
            hint_text: self.hint().to_string(),
        }
    }
}

/// Build the RenderDocument directive for `document` bound to `data`.
pub fn render_directive(document: &Value, data: &HeadlineData) -> Value {
    json!({
        "type": RENDER_DOCUMENT,
        "document": document,
        "datasources": {
            HEADLINE_DATASOURCE: data,
        }
    })
}
