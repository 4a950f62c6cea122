//! Operator status codes.

#![allow(missing_docs)]

use thiserror::Error;

/// Failure statuses returned by operators, the literal parser and FBs.
///
/// Operators never panic on well-formed calls; every failure is reported by
/// value and leaves the `result` container untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum IecError {
    /// An operand failed a category or exact-type check.
    #[error("data type not allowed in operation")]
    NotAllowedType,

    /// A narrowing conversion lost information.
    #[error("result truncated")]
    Truncated,

    /// A value does not fit the target (e.g. BCD digits, string length).
    #[error("value out of range")]
    OutOfRange,

    /// The requested data type is not defined for this operation.
    #[error("data type not defined")]
    TypeNotDefined,

    /// A required operand was absent.
    #[error("required parameter is missing")]
    NullParameter,

    /// Sentinel: result is true.
    #[error("result is true")]
    ResultTrue,

    /// Sentinel: result is false.
    #[error("result is false")]
    ResultFalse,

    /// Element not in list, or lookup past the end.
    #[error("element not found")]
    ElementNotFound,

    /// Generic failure.
    #[error("operation failed")]
    Error,
}

/// Result of an operator call. `Ok(())` is the `Ok` status.
pub type Status = Result<(), IecError>;

impl IecError {
    /// Numeric status code, compatible with C hosts of the value model.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::NotAllowedType => 0x01,
            Self::Truncated => 0x02,
            Self::OutOfRange => 0x03,
            Self::TypeNotDefined => 0x04,
            Self::NullParameter => 0x05,
            Self::ResultTrue => 0x06,
            Self::ResultFalse => 0x07,
            Self::ElementNotFound => 0x08,
            Self::Error => 0xff,
        }
    }
}

/// Numeric code for a whole status, `0x00` meaning success.
#[must_use]
pub fn status_code(status: &Status) -> u8 {
    match status {
        Ok(()) => 0x00,
        Err(err) => err.code(),
    }
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid TOML for this schema.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field holds a value outside its allowed set.
    #[error("invalid config value '{value}' for '{field}'")]
    InvalidValue { field: &'static str, value: String },
}
