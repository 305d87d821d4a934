//! Error types for quote parsing and position construction.

use thiserror::Error;

use crate::data::{OptionKind, RecordSchema};

/// A date string that is not `MM/DD/YYYY`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cannot parse date: {text}")]
pub struct DateParseError {
    pub text: String,
}

impl DateParseError {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A calendar date whose year does not fit the `YYYYMMDD` encoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Date {date} is outside the encodable year range")]
pub struct DateRangeError {
    pub date: chrono::NaiveDate,
}

/// Failure to turn one input line into an option record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("{schema} record is missing field {index} ({field})")]
    MissingField {
        schema: RecordSchema,
        index: usize,
        field: &'static str,
    },

    #[error("{schema} record has invalid {field}: {value:?}")]
    InvalidNumber {
        schema: RecordSchema,
        field: &'static str,
        value: String,
    },
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Rejected straddle or P&L pairing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PositionError {
    #[error("{slot} leg must be a {expected} option, got {actual}")]
    WrongKind {
        slot: &'static str,
        expected: OptionKind,
        actual: OptionKind,
    },

    #[error("Legs disagree on {field}: {left} vs {right}")]
    LegMismatch {
        field: &'static str,
        left: String,
        right: String,
    },

    #[error("Positions disagree on {field}: {initial} vs {final_value}")]
    PositionMismatch {
        field: &'static str,
        initial: String,
        final_value: String,
    },
}

pub type PositionResult<T> = Result<T, PositionError>;

/// Malformed check configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
