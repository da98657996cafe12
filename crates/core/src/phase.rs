//! Narrative phases and the bilingual header table used to classify reading sections.
//!
//! The narrative generator is asked to open each part of a reading with a bold header such as
//! `**နိဒါန်း (Introduction):**`. Generators do not always follow instructions, so a header is
//! classified by substring: it names a phase if it contains either the Burmese label or the
//! leading word of the English label. Classification only chooses the icon of a section; it
//! never moves section boundaries.

use crate::constants::UNMATCHED_GLYPH;
use serde::{Deserialize, Serialize};

/// One of the fixed phases of a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrativePhase {
    Introduction,
    Past,
    Present,
    Future,
    Remedy,
}

impl NarrativePhase {
    /// All phases in reading order.
    pub const ALL: [NarrativePhase; 5] = [
        NarrativePhase::Introduction,
        NarrativePhase::Past,
        NarrativePhase::Present,
        NarrativePhase::Future,
        NarrativePhase::Remedy,
    ];

    /// Stable lowercase key, matching the serde representation.
    pub fn key(self) -> &'static str {
        match self {
            NarrativePhase::Introduction => "introduction",
            NarrativePhase::Past => "past",
            NarrativePhase::Present => "present",
            NarrativePhase::Future => "future",
            NarrativePhase::Remedy => "remedy",
        }
    }
}

impl std::fmt::Display for NarrativePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Labels and glyph for a single phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseLabel {
    pub phase: NarrativePhase,
    /// Burmese label, matched as a whole.
    pub burmese: &'static str,
    /// English label; only its first word is matched.
    pub english: &'static str,
    pub glyph: &'static str,
}

impl PhaseLabel {
    /// Leading word of the English label, or `""` for a blank label.
    pub fn english_token(&self) -> &'static str {
        self.english.split_whitespace().next().unwrap_or("")
    }

    /// Whether `title` names this phase.
    ///
    /// Matching is a case-sensitive substring test. Blank tokens never match, otherwise every
    /// title would contain them.
    pub fn matches(&self, title: &str) -> bool {
        let burmese = self.burmese.trim();
        let english = self.english_token();
        (!burmese.is_empty() && title.contains(burmese))
            || (!english.is_empty() && title.contains(english))
    }
}

/// Ordered, immutable table of phase labels.
///
/// Order is significant: when a title matches several entries, the earliest entry wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseTable {
    entries: Vec<PhaseLabel>,
}

impl PhaseTable {
    /// Build a table from explicit entries, kept in the given order.
    pub fn new(entries: Vec<PhaseLabel>) -> Self {
        Self { entries }
    }

    /// The standard Burmese/English table, in reading order.
    pub fn standard() -> Self {
        Self::new(vec![
            PhaseLabel {
                phase: NarrativePhase::Introduction,
                burmese: "နိဒါန်း",
                english: "Introduction",
                glyph: "✨",
            },
            PhaseLabel {
                phase: NarrativePhase::Past,
                burmese: "အတိတ်",
                english: "Past Patterns",
                glyph: "🌙",
            },
            PhaseLabel {
                phase: NarrativePhase::Present,
                burmese: "ပစ္စုပ္ပန်",
                english: "Present Energy",
                glyph: "☀️",
            },
            PhaseLabel {
                phase: NarrativePhase::Future,
                burmese: "အနာဂတ်",
                english: "Future Guidance",
                glyph: "🌟",
            },
            PhaseLabel {
                phase: NarrativePhase::Remedy,
                burmese: "ယတြာ",
                english: "Remedy & Advice",
                glyph: "🪷",
            },
        ])
    }

    pub fn entries(&self) -> &[PhaseLabel] {
        &self.entries
    }

    /// First entry, in table order, whose labels appear in `title`.
    pub fn resolve(&self, title: &str) -> Option<&PhaseLabel> {
        self.entries.iter().find(|entry| entry.matches(title))
    }

    /// Glyph for `title`, or the unmatched-header glyph when no phase is named.
    pub fn glyph_for(&self, title: &str) -> &'static str {
        self.resolve(title)
            .map(|entry| entry.glyph)
            .unwrap_or(UNMATCHED_GLYPH)
    }

    /// Entry for a specific phase, if the table has one.
    pub fn label(&self, phase: NarrativePhase) -> Option<&PhaseLabel> {
        self.entries.iter().find(|entry| entry.phase == phase)
    }
}

impl Default for PhaseTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phase_of(title: &str) -> Option<NarrativePhase> {
        PhaseTable::standard().resolve(title).map(|e| e.phase)
    }

    #[test]
    fn test_standard_table_is_in_reading_order() {
        let phases: Vec<_> = PhaseTable::standard()
            .entries()
            .iter()
            .map(|e| e.phase)
            .collect();
        assert_eq!(phases, NarrativePhase::ALL.to_vec());
    }

    #[test]
    fn test_resolves_generator_headers() {
        assert_eq!(
            phase_of("နိဒါန်း (Introduction)"),
            Some(NarrativePhase::Introduction)
        );
        assert_eq!(phase_of("အတိတ် (Past)"), Some(NarrativePhase::Past));
        assert_eq!(phase_of("ပစ္စုပ္ပန် (Present)"), Some(NarrativePhase::Present));
        assert_eq!(phase_of("အနာဂတ် (Future)"), Some(NarrativePhase::Future));
        assert_eq!(
            phase_of("ယတြာ / အကြံပြုချက် (Remedy)"),
            Some(NarrativePhase::Remedy)
        );
    }

    #[test]
    fn test_burmese_token_alone_is_enough() {
        assert_eq!(phase_of("အနာဂတ်"), Some(NarrativePhase::Future));
    }

    #[test]
    fn test_english_leading_word_alone_is_enough() {
        assert_eq!(phase_of("Your Future"), Some(NarrativePhase::Future));
        // Only the first word of "Future Guidance" is a token.
        assert_eq!(phase_of("Guidance"), None);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert_eq!(phase_of("future"), None);
        assert_eq!(phase_of("FUTURE"), None);
    }

    #[test]
    fn test_earlier_entry_wins_ties() {
        assert_eq!(phase_of("Past and Future"), Some(NarrativePhase::Past));
        assert_eq!(phase_of("Future, then Past"), Some(NarrativePhase::Past));
        assert_eq!(phase_of("Remedy for the Present"), Some(NarrativePhase::Present));
    }

    #[test]
    fn test_unknown_title_gets_unmatched_glyph() {
        let table = PhaseTable::standard();
        assert!(table.resolve("Lucky Numbers").is_none());
        assert_eq!(table.glyph_for("Lucky Numbers"), UNMATCHED_GLYPH);
        assert_eq!(table.glyph_for(""), UNMATCHED_GLYPH);
        assert_eq!(table.glyph_for("Introduction"), "✨");
    }

    #[test]
    fn test_blank_tokens_never_match() {
        let table = PhaseTable::new(vec![PhaseLabel {
            phase: NarrativePhase::Past,
            burmese: "",
            english: "   ",
            glyph: "x",
        }]);
        assert!(table.resolve("anything at all").is_none());
    }

    #[test]
    fn test_substitute_table_controls_resolution() {
        let table = PhaseTable::new(vec![
            PhaseLabel {
                phase: NarrativePhase::Remedy,
                burmese: "ယတြာ",
                english: "Cure",
                glyph: "💊",
            },
            PhaseLabel {
                phase: NarrativePhase::Introduction,
                burmese: "နိဒါန်း",
                english: "Cure-all opening",
                glyph: "👋",
            },
        ]);
        assert_eq!(table.glyph_for("Cure"), "💊");
        assert_eq!(table.glyph_for("Cure-all"), "💊");
        assert_eq!(table.glyph_for("Introduction"), UNMATCHED_GLYPH);
        assert_eq!(table.label(NarrativePhase::Future), None);
    }

    #[test]
    fn test_phase_key_matches_serde() {
        for phase in NarrativePhase::ALL {
            let json = serde_json::to_string(&phase).unwrap();
            assert_eq!(json, format!("\"{}\"", phase.key()));
        }
    }
}
