//! Synthesis payload returned by the remote synthesis service.
//!
//! The charts are computed elsewhere and passed through untouched; this crate only models them
//! for display. Every field defaults when absent so a partially populated payload still renders.

use crate::constants::NO_READING_NOTE;
use crate::reading::{DisplaySection, ReadingParser};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Echo of the submitted birth data, plus the geocoded location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisUser {
    pub name: String,
    pub gender: String,
    pub dob: String,
    pub time: String,
    pub city: String,
    pub coordinates: Option<Coordinates>,
}

/// Tropical placements formatted as `"<Sign> <degree>°"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WesternChart {
    pub sun: String,
    pub moon: String,
    pub mercury: String,
    pub venus: String,
    pub mars: String,
    pub jupiter: String,
    pub saturn: String,
    pub ascendant: String,
    pub dominant_aspects: Vec<String>,
}

impl WesternChart {
    /// Planet placements in conventional order, paired with their display names.
    pub fn placements(&self) -> [(&'static str, &str); 7] {
        [
            ("Sun", self.sun.as_str()),
            ("Moon", self.moon.as_str()),
            ("Mercury", self.mercury.as_str()),
            ("Venus", self.venus.as_str()),
            ("Mars", self.mars.as_str()),
            ("Jupiter", self.jupiter.as_str()),
            ("Saturn", self.saturn.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VedicChart {
    pub nakshatra: String,
    pub nakshatra_pada: u8,
    pub nakshatra_lord: String,
    pub mahadasha: String,
    pub mahadasha_ends: String,
    pub next_dasha: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MahaboteChart {
    pub birth_day: String,
    pub birth_day_burmese: String,
    pub house_name: String,
    pub house_burmese: String,
    pub ruling_planet: String,
    pub be_year: i32,
    pub kyin: Option<u8>,
    pub day_value: Option<u8>,
    pub house_index: Option<u8>,
    pub nakshatra_burmese: String,
    /// 1-based position in the seven-house grid.
    pub grid_number: u8,
    pub characteristics: String,
}

impl MahaboteChart {
    /// Whether `grid_number` lies in the seven-house grid.
    pub fn has_valid_grid(&self) -> bool {
        (1..=7).contains(&self.grid_number)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Synthesis {
    pub user: Option<SynthesisUser>,
    pub western: WesternChart,
    pub vedic: VedicChart,
    pub mahabote: MahaboteChart,
}

/// Full response of the synthesis endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisResponse {
    pub synthesis: Synthesis,
    /// Narrative reading; `None` when generation failed upstream.
    pub reading: Option<String>,
    pub error: Option<String>,
}

/// What to show in place of the narrative reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadingOutcome {
    Sections(Vec<DisplaySection>),
    Unavailable(&'static str),
}

impl ReadingOutcome {
    /// Parses `reading` if present; a missing reading is never handed to the parser.
    pub fn from_reading(reading: Option<&str>, parser: &ReadingParser) -> Self {
        match reading {
            Some(raw) => ReadingOutcome::Sections(parser.parse(raw)),
            None => ReadingOutcome::Unavailable(NO_READING_NOTE),
        }
    }

    pub fn sections(&self) -> Option<&[DisplaySection]> {
        match self {
            ReadingOutcome::Sections(sections) => Some(sections),
            ReadingOutcome::Unavailable(_) => None,
        }
    }

    pub fn note(&self) -> Option<&'static str> {
        match self {
            ReadingOutcome::Sections(_) => None,
            ReadingOutcome::Unavailable(note) => Some(*note),
        }
    }
}

impl SynthesisResponse {
    pub fn reading_outcome(&self, parser: &ReadingParser) -> ReadingOutcome {
        ReadingOutcome::from_reading(self.reading.as_deref(), parser)
    }
}

/// Astronomical symbol for a classical planet name, if it has one.
pub fn planet_symbol(planet: &str) -> Option<&'static str> {
    match planet {
        "Sun" => Some("☉"),
        "Moon" => Some("☽"),
        "Mercury" => Some("☿"),
        "Venus" => Some("♀"),
        "Mars" => Some("♂"),
        "Jupiter" => Some("♃"),
        "Saturn" => Some("♄"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "synthesis": {
            "user": {
                "name": "Aung", "gender": "Male", "dob": "1990-05-17", "time": "08:30",
                "city": "Yangon", "coordinates": {"lat": 16.8, "lon": 96.15}
            },
            "western": {
                "sun": "Taurus 26.4°", "moon": "Leo 3.1°", "mercury": "Gemini 10.0°",
                "venus": "Aries 12.9°", "mars": "Pisces 20.2°", "jupiter": "Cancer 7.7°",
                "saturn": "Capricorn 24.5°", "ascendant": "Gemini 1.2°",
                "dominant_aspects": ["Sun Trine Saturn", "Moon Square Mars"]
            },
            "vedic": {
                "nakshatra": "Magha", "nakshatra_pada": 2, "nakshatra_lord": "Ketu",
                "mahadasha": "Ketu Dasha", "mahadasha_ends": "2027-03-01", "next_dasha": "Venus"
            },
            "mahabote": {
                "birth_day": "Thursday", "birth_day_burmese": "ကြာသပတေး",
                "house_name": "Yaza (ရာဇ)", "house_burmese": "ရာဇ", "ruling_planet": "Sun",
                "be_year": 1352, "kyin": 1, "day_value": 5, "house_index": 4,
                "nakshatra_burmese": "ကြာ (Kyar)", "grid_number": 5,
                "characteristics": "Leadership, authority."
            }
        },
        "reading": "**Past:** Long ago.",
        "error": null
    }"#;

    #[test]
    fn test_deserialize_service_response() {
        let resp: SynthesisResponse = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(resp.synthesis.western.sun, "Taurus 26.4°");
        assert_eq!(resp.synthesis.western.dominant_aspects.len(), 2);
        assert_eq!(resp.synthesis.vedic.nakshatra_pada, 2);
        assert_eq!(resp.synthesis.mahabote.grid_number, 5);
        assert_eq!(resp.synthesis.mahabote.kyin, Some(1));
        assert!(resp.synthesis.mahabote.has_valid_grid());
        let user = resp.synthesis.user.as_ref().unwrap();
        assert_eq!(user.city, "Yangon");
        assert_eq!(user.coordinates.as_ref().unwrap().lat, 16.8);
    }

    #[test]
    fn test_missing_fields_default() {
        let resp: SynthesisResponse =
            serde_json::from_str(r#"{"synthesis": {"vedic": {"nakshatra": "Revati"}}}"#).unwrap();
        assert_eq!(resp.synthesis.vedic.nakshatra, "Revati");
        assert_eq!(resp.synthesis.western, WesternChart::default());
        assert_eq!(resp.reading, None);
        assert!(!resp.synthesis.mahabote.has_valid_grid());
    }

    #[test]
    fn test_reading_outcome_parses_present_reading() {
        let resp: SynthesisResponse = serde_json::from_str(SAMPLE).unwrap();
        let outcome = resp.reading_outcome(&ReadingParser::standard());
        let sections = outcome.sections().unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Past");
        assert_eq!(outcome.note(), None);
    }

    #[test]
    fn test_null_reading_shows_note() {
        let resp = SynthesisResponse::default();
        let outcome = resp.reading_outcome(&ReadingParser::standard());
        assert_eq!(outcome, ReadingOutcome::Unavailable(NO_READING_NOTE));
        assert!(outcome.sections().is_none());
    }

    #[test]
    fn test_empty_reading_is_still_parsed() {
        let outcome = ReadingOutcome::from_reading(Some(""), &ReadingParser::standard());
        let sections = outcome.sections().unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, "");
    }

    #[test]
    fn test_planet_symbols() {
        let chart = WesternChart::default();
        for (name, _) in chart.placements() {
            assert!(planet_symbol(name).is_some(), "{name}");
        }
        assert_eq!(planet_symbol("Rahu"), None);
    }
}
