//! JSON schemas of the REST API.

use astrologic_core::{
    BirthData, CoreResult, DisplaySection, PhaseLabel, ReadingOutcome, Synthesis,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

/// Raw birth data as submitted by the intake form or a JSON client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BirthDataReq {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    /// Date of birth, `YYYY-MM-DD`.
    pub dob: String,
    /// Local time of birth, 24h `HH:MM`.
    pub time: String,
    pub city: String,
}

impl BirthDataReq {
    pub fn validate(&self) -> CoreResult<BirthData> {
        BirthData::new(
            self.name.as_deref(),
            self.gender.as_deref(),
            &self.dob,
            &self.time,
            &self.city,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ParseReadingReq {
    pub reading: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReadingSectionRes {
    pub title: String,
    pub icon: String,
    pub content: String,
}

impl From<&DisplaySection> for ReadingSectionRes {
    fn from(section: &DisplaySection) -> Self {
        Self {
            title: section.title.clone(),
            icon: section.icon.to_string(),
            content: section.content.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ParseReadingRes {
    pub sections: Vec<ReadingSectionRes>,
}

impl ParseReadingRes {
    pub fn from_sections(sections: &[DisplaySection]) -> Self {
        Self {
            sections: sections.iter().map(ReadingSectionRes::from).collect(),
        }
    }
}

/// Charts plus either parsed reading sections or the no-reading note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReadingRes {
    #[schema(value_type = Object)]
    pub synthesis: Synthesis,
    pub sections: Option<Vec<ReadingSectionRes>>,
    pub note: Option<String>,
}

impl ReadingRes {
    pub fn new(synthesis: Synthesis, outcome: &ReadingOutcome) -> Self {
        Self {
            synthesis,
            sections: outcome
                .sections()
                .map(|sections| sections.iter().map(ReadingSectionRes::from).collect()),
            note: outcome.note().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PhaseRes {
    pub key: String,
    pub burmese: String,
    pub english: String,
    pub glyph: String,
}

impl From<&PhaseLabel> for PhaseRes {
    fn from(label: &PhaseLabel) -> Self {
        Self {
            key: label.phase.key().to_string(),
            burmese: label.burmese.to_string(),
            english: label.english.to_string(),
            glyph: label.glyph.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PhasesRes {
    pub phases: Vec<PhaseRes>,
}
