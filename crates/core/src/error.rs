#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid {field}: {source}")]
    InvalidText {
        field: &'static str,
        #[source]
        source: astro_types::TextError,
    },
    #[error("invalid birth date/time (expected YYYY-MM-DD and HH:MM): {0}")]
    InvalidBirthDateTime(chrono::ParseError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
