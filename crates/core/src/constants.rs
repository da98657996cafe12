//! Constants used throughout the AstroLogic core crate.
//!
//! Literals shown to the user and defaults for runtime configuration live here so the CLI and the
//! web front end render identical text.

/// Title of the single section produced when a reading has no recognisable headers.
pub const FALLBACK_TITLE: &str = "Generated Reading";

/// Glyph of the single fallback section.
pub const FALLBACK_GLYPH: &str = "🔮";

/// Glyph for a header that does not name any known narrative phase.
pub const UNMATCHED_GLYPH: &str = "💎";

/// Doubled emphasis delimiter that wraps section headers in generated readings.
pub const HEADER_DELIMITER: &str = "**";

/// Shown in place of parsed sections when the synthesis service returned no reading.
pub const NO_READING_NOTE: &str =
    "The narrative reading is unavailable right now. Your chart data below was calculated successfully.";

/// Default base URL of the synthesis service.
pub const DEFAULT_SYNTHESIS_URL: &str = "http://localhost:8000";

/// Default request timeout for the synthesis service, in seconds. Narrative generation is slow.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Default listen address of the web front end.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Synthesis service path returning charts plus the narrative reading.
pub const SYNTHESIS_PATH: &str = "/api/synthesis";

/// Synthesis service path returning charts only.
pub const SYNTHESIS_DATA_ONLY_PATH: &str = "/api/synthesis/data-only";

/// Name used when the intake form leaves the name blank.
pub const DEFAULT_NAME: &str = "User";

/// Gender used when the intake form leaves the gender blank.
pub const DEFAULT_GENDER: &str = "Unknown";
