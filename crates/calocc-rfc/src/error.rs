use thiserror::Error;

/// Feed decoding and occurrence resolution errors
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid date-time: {0}")]
    InvalidDateTime(String),

    #[error("RRule error: {0}")]
    RRuleError(String),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error(transparent)]
    CoreError(#[from] calocc_core::error::CoreError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
