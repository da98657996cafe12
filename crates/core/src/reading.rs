//! Segmentation of generated readings into titled display sections.
//!
//! A reading is free text from a language model. When the model follows its instructions the
//! text is a run of bold headers, each followed by prose:
//!
//! ```markdown
//! **နိဒါန်း (Introduction):** Mingalaba ...
//!
//! **အတိတ် (Past):** In your early years ...
//! ```
//!
//! Nothing guarantees that shape, so parsing is tolerant:
//! - a header is any `**text**` run whose text contains no `*`;
//! - text before the first header is dropped;
//! - a reading with no headers becomes one fallback section holding the whole text.
//!
//! Parsing never fails and has no side effects other than debug logging.

use crate::constants::{FALLBACK_GLYPH, FALLBACK_TITLE, HEADER_DELIMITER};
use crate::phase::PhaseTable;
use serde::Serialize;
use std::ops::Range;

/// A titled block of a reading, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplaySection {
    pub title: String,
    pub icon: &'static str,
    pub content: String,
}

impl DisplaySection {
    /// The single section used when a reading has no recognisable structure.
    pub fn fallback(raw: &str) -> Self {
        Self {
            title: FALLBACK_TITLE.to_string(),
            icon: FALLBACK_GLYPH,
            content: raw.trim().to_string(),
        }
    }
}

/// A piece of a reading produced by [`spans`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span<'a> {
    /// Text outside any header, i.e. before the first one.
    Loose(&'a str),
    /// A header (delimiters stripped, untrimmed) and the text up to the next header.
    Headed { title: &'a str, body: &'a str },
}

/// Byte offsets of a header marker within the text.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Marker {
    start: usize,
    inner: Range<usize>,
    end: usize,
}

/// Finds the first header marker starting at or after `from`.
///
/// A marker is the delimiter, one or more non-`*` characters, then the delimiter again. When a
/// delimiter does not open a valid marker, scanning resumes one byte later, so `***x**` yields the
/// marker starting at offset 1. `*` is ASCII, which keeps every offset on a char boundary.
fn find_marker(text: &str, from: usize) -> Option<Marker> {
    let mut search = from;
    while search < text.len() {
        let open = search + text[search..].find(HEADER_DELIMITER)?;
        let inner_start = open + HEADER_DELIMITER.len();
        let close = text[inner_start..].find('*').map(|len| inner_start + len);

        match close {
            Some(close) if close > inner_start && text[close..].starts_with(HEADER_DELIMITER) => {
                return Some(Marker {
                    start: open,
                    inner: inner_start..close,
                    end: close + HEADER_DELIMITER.len(),
                });
            }
            _ => search = open + 1,
        }
    }
    None
}

/// Lazy iterator over the [`Span`]s of a reading.
#[derive(Debug, Clone)]
pub struct Spans<'a> {
    text: &'a str,
    cursor: usize,
}

impl<'a> Iterator for Spans<'a> {
    type Item = Span<'a>;

    fn next(&mut self) -> Option<Span<'a>> {
        if self.cursor >= self.text.len() {
            return None;
        }

        match find_marker(self.text, self.cursor) {
            Some(marker) if marker.start == self.cursor => {
                let stop = find_marker(self.text, marker.end)
                    .map_or(self.text.len(), |next| next.start);
                self.cursor = stop;
                Some(Span::Headed {
                    title: &self.text[marker.inner],
                    body: &self.text[marker.end..stop],
                })
            }
            Some(marker) => {
                let loose = &self.text[self.cursor..marker.start];
                self.cursor = marker.start;
                Some(Span::Loose(loose))
            }
            None => {
                let loose = &self.text[self.cursor..];
                self.cursor = self.text.len();
                Some(Span::Loose(loose))
            }
        }
    }
}

/// Splits `text` into spans in a single forward scan. Markers never overlap: once a header is
/// consumed, scanning continues after its closing delimiter.
pub fn spans(text: &str) -> Spans<'_> {
    Spans { text, cursor: 0 }
}

/// Strips one trailing colon (ASCII or full-width) from a header.
fn clean_title(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed
        .strip_suffix(':')
        .or_else(|| trimmed.strip_suffix('：'))
        .unwrap_or(trimmed)
        .trim()
}

/// Strips one leading colon that sits after the closing delimiter, as in `**Past**: ...`.
fn clean_content(raw: &str) -> &str {
    let trimmed = raw.trim_start();
    trimmed
        .strip_prefix(':')
        .or_else(|| trimmed.strip_prefix('：'))
        .unwrap_or(trimmed)
        .trim()
}

/// Turns raw readings into display sections using a phase table for icons.
#[derive(Debug, Clone, Default)]
pub struct ReadingParser {
    table: PhaseTable,
}

impl ReadingParser {
    pub fn new(table: PhaseTable) -> Self {
        Self { table }
    }

    /// Parser over [`PhaseTable::standard`].
    pub fn standard() -> Self {
        Self::new(PhaseTable::standard())
    }

    pub fn table(&self) -> &PhaseTable {
        &self.table
    }

    /// Parses `raw` into sections in the order their headers appear.
    ///
    /// Always returns at least one section. Same-titled sections are neither merged nor
    /// reordered.
    pub fn parse(&self, raw: &str) -> Vec<DisplaySection> {
        let mut sections = Vec::new();
        let mut skipped = 0usize;

        for span in spans(raw) {
            match span {
                Span::Headed { title, body } => {
                    let title = clean_title(title);
                    sections.push(DisplaySection {
                        title: title.to_string(),
                        icon: self.table.glyph_for(title),
                        content: clean_content(body).to_string(),
                    });
                }
                Span::Loose(_) => skipped += 1,
            }
        }

        if sections.is_empty() {
            tracing::debug!("reading has no section headers; using a single fallback section");
            return vec![DisplaySection::fallback(raw)];
        }

        if skipped > 0 {
            tracing::debug!(skipped, "dropped text outside section headers");
        }
        sections
    }
}

/// Renders sections back to normalised markdown: one `**title**` paragraph per section.
pub fn render_sections(sections: &[DisplaySection]) -> String {
    sections
        .iter()
        .map(|section| {
            if section.content.is_empty() {
                format!("**{}**", section.title)
            } else {
                format!("**{}**\n\n{}", section.title, section.content)
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::UNMATCHED_GLYPH;
    use crate::phase::{NarrativePhase, PhaseLabel};

    fn parse(raw: &str) -> Vec<DisplaySection> {
        ReadingParser::standard().parse(raw)
    }

    fn titles(sections: &[DisplaySection]) -> Vec<&str> {
        sections.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn test_plain_text_falls_back_to_single_section() {
        let raw = "  You are a gentle soul.\n\nThe coming year favours patience.  ";
        let sections = parse(raw);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, FALLBACK_TITLE);
        assert_eq!(sections[0].icon, FALLBACK_GLYPH);
        assert_eq!(sections[0].content, raw.trim());
    }

    #[test]
    fn test_empty_input_yields_one_empty_fallback() {
        assert_eq!(parse(""), vec![DisplaySection::fallback("")]);
        assert_eq!(parse("")[0].content, "");
        assert_eq!(parse(" \n\t ")[0].content, "");
    }

    #[test]
    fn test_single_header_with_colon_inside_marker() {
        let sections = parse("**Introduction:** Hello there");
        assert_eq!(
            sections,
            vec![DisplaySection {
                title: "Introduction".into(),
                icon: "✨",
                content: "Hello there".into(),
            }]
        );
    }

    #[test]
    fn test_multiple_headers_keep_input_order() {
        let sections = parse("**Past** Long ago. **Future:** Tomorrow.");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Past");
        assert_eq!(sections[0].content, "Long ago.");
        assert_eq!(sections[0].icon, "🌙");
        assert_eq!(sections[1].title, "Future");
        assert_eq!(sections[1].content, "Tomorrow.");
        assert_eq!(sections[1].icon, "🌟");
    }

    #[test]
    fn test_full_bilingual_reading() {
        let raw = "**နိဒါန်း (Introduction):** မင်္ဂလာပါ။\n\n\
                   **အတိတ် (Past):** ငယ်စဉ်က...\n\n\
                   **ပစ္စုပ္ပန် (Present):** ယခု...\n\n\
                   **အနာဂတ် (Future):** လာမည့်နှစ်...\n\n\
                   **ယတြာ / အကြံပြုချက် (Remedy):** ဆုတောင်းပါ။";
        let sections = parse(raw);
        let icons: Vec<_> = sections.iter().map(|s| s.icon).collect();
        assert_eq!(icons, vec!["✨", "🌙", "☀️", "🌟", "🪷"]);
        assert_eq!(sections[0].title, "နိဒါန်း (Introduction)");
        assert_eq!(sections[0].content, "မင်္ဂလာပါ။");
        assert_eq!(sections[4].title, "ယတြာ / အကြံပြုချက် (Remedy)");
        assert_eq!(sections[4].content, "ဆုတောင်းပါ။");
    }

    #[test]
    fn test_colon_after_marker_is_stripped() {
        let sections = parse("**Present**: Steady energy.\n**Remedy** : Light a candle.");
        assert_eq!(sections[0].content, "Steady energy.");
        assert_eq!(sections[1].content, "Light a candle.");
    }

    #[test]
    fn test_unknown_header_gets_diamond() {
        let sections = parse("**Lucky Colours:** Green and gold.");
        assert_eq!(sections[0].title, "Lucky Colours");
        assert_eq!(sections[0].icon, UNMATCHED_GLYPH);
    }

    #[test]
    fn test_text_before_first_header_is_dropped() {
        let sections = parse("Here is your reading.\n\n**Past:** Long ago.");
        assert_eq!(titles(&sections), vec!["Past"]);
        assert_eq!(sections[0].content, "Long ago.");
    }

    #[test]
    fn test_headers_without_bodies_still_emit_sections() {
        let sections = parse("**Past****Future**");
        assert_eq!(titles(&sections), vec!["Past", "Future"]);
        assert!(sections.iter().all(|s| s.content.is_empty()));
    }

    #[test]
    fn test_inline_bold_inside_body_starts_a_new_section() {
        let sections = parse("**Present:** You feel **strong** today.");
        assert_eq!(titles(&sections), vec!["Present", "strong"]);
        assert_eq!(sections[0].content, "You feel");
        assert_eq!(sections[1].content, "today.");
        assert_eq!(sections[1].icon, UNMATCHED_GLYPH);
    }

    #[test]
    fn test_unmatched_delimiters_fall_back() {
        for raw in ["**never closed", "a ** b", "****", "* single *", "**\u{2a}**"] {
            let sections = parse(raw);
            assert_eq!(sections.len(), 1, "input {raw:?}");
            assert_eq!(sections[0].title, FALLBACK_TITLE);
            assert_eq!(sections[0].content, raw.trim());
        }
    }

    #[test]
    fn test_triple_asterisks_find_inner_marker() {
        let sections = parse("***Future*** bright");
        assert_eq!(titles(&sections), vec!["Future"]);
        assert_eq!(sections[0].content, "* bright");
    }

    #[test]
    fn test_same_titles_are_not_merged() {
        let sections = parse("**Past:** one **Past:** two");
        assert_eq!(titles(&sections), vec!["Past", "Past"]);
        assert_eq!(sections[0].content, "one");
        assert_eq!(sections[1].content, "two");
    }

    #[test]
    fn test_order_follows_input_not_phase() {
        let sections = parse("**Remedy:** a **Introduction:** b **Past:** c");
        assert_eq!(titles(&sections), vec!["Remedy", "Introduction", "Past"]);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let raw = "intro **Past:** x **Odd** y **Future** z";
        let parser = ReadingParser::standard();
        assert_eq!(parser.parse(raw), parser.parse(raw));
    }

    #[test]
    fn test_keyword_in_body_does_not_affect_icon() {
        let sections = parse("**Lucky Colours:** Your future is green.");
        assert_eq!(sections[0].icon, UNMATCHED_GLYPH);
    }

    #[test]
    fn test_full_width_colon_is_stripped() {
        let sections = parse("**အနာဂတ်：** ကောင်းမည်");
        assert_eq!(sections[0].title, "အနာဂတ်");
        assert_eq!(sections[0].icon, "🌟");
        assert_eq!(sections[0].content, "ကောင်းမည်");
    }

    #[test]
    fn test_multiline_header_text_is_trimmed() {
        let sections = parse("**\n Past \n** body");
        assert_eq!(sections[0].title, "Past");
    }

    #[test]
    fn test_parser_uses_injected_table() {
        let parser = ReadingParser::new(PhaseTable::new(vec![PhaseLabel {
            phase: NarrativePhase::Future,
            burmese: "အနာဂတ်",
            english: "Tomorrow",
            glyph: "🚀",
        }]));
        let sections = parser.parse("**Tomorrow:** go. **Future:** stay.");
        assert_eq!(sections[0].icon, "🚀");
        assert_eq!(sections[1].icon, UNMATCHED_GLYPH);
    }

    #[test]
    fn test_spans_expose_loose_and_headed_text() {
        let collected: Vec<_> = spans("lead **A** one **B**").collect();
        assert_eq!(
            collected,
            vec![
                Span::Loose("lead "),
                Span::Headed {
                    title: "A",
                    body: " one "
                },
                Span::Headed { title: "B", body: "" },
            ]
        );
        assert_eq!(spans("").count(), 0);
    }

    #[test]
    fn test_render_sections_normalises_markdown() {
        let sections = parse("**Past:**   Long ago.   **Future**");
        assert_eq!(render_sections(&sections), "**Past**\n\nLong ago.\n\n**Future**");
    }
}
