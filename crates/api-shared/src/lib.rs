//! # API Shared
//!
//! Shared wire types and services for the AstroLogic web APIs.
//!
//! Contains:
//! - JSON request/response schemas (`schema` module), documented with utoipa
//! - Shared services like `HealthService`
//!
//! Used by `api-rest`; schemas convert from `astrologic-core` domain types.

pub mod health;
pub mod schema;

pub use health::HealthService;
pub use schema::*;
