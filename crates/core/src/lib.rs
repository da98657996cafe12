//! # AstroLogic Core
//!
//! Core logic for the AstroLogic reading front end.
//!
//! This crate contains pure data operations only:
//! - the bilingual narrative-phase table ([`phase`])
//! - segmentation of generated readings into display sections ([`reading`])
//! - the synthesis payload model ([`synthesis`])
//! - birth-data intake validation ([`intake`])
//! - startup configuration ([`config`])
//!
//! **No transport concerns**: HTTP calls to the synthesis service live in `astrologic-client`,
//! and the web views in `api-rest`.

pub mod config;
pub mod constants;
pub mod error;
pub mod intake;
pub mod phase;
pub mod reading;
pub mod synthesis;

pub use config::CoreConfig;
pub use error::{CoreError, CoreResult};
pub use intake::BirthData;
pub use phase::{NarrativePhase, PhaseLabel, PhaseTable};
pub use reading::{render_sections, DisplaySection, ReadingParser};
pub use synthesis::{ReadingOutcome, Synthesis, SynthesisResponse};
