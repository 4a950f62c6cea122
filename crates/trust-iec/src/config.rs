//! Runtime configuration loading.

#![allow(missing_docs)]

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::clock::ClockResolution;
use crate::error::ConfigError;
use crate::value::{AnyClass, IecType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub clock: ClockConfig,
    pub literals: LiteralProfile,
    pub arithmetic: ArithmeticConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            clock: ClockConfig::default(),
            literals: LiteralProfile::default(),
            arithmetic: ArithmeticConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockConfig {
    pub resolution: ClockResolution,
}

/// Target types for literals without an explicit type prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralProfile {
    /// Untyped decimal integers.
    pub default_integer: IecType,
    /// Untyped reals (with `.` or an exponent).
    pub default_real: IecType,
    /// Untyped `2#`, `8#` and `16#` literals.
    pub default_bits: IecType,
}

impl Default for LiteralProfile {
    fn default() -> Self {
        Self {
            default_integer: IecType::Int,
            default_real: IecType::LReal,
            default_bits: IecType::Int,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArithmeticConfig {
    pub expt: ExptMode,
}

/// EXPT evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExptMode {
    /// `a` raised to `b`.
    #[default]
    Power,
    /// Integer XOR of both operands, as older runtimes computed it.
    LegacyXor,
}

impl RuntimeConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let raw: ConfigToml = toml::from_str(text)?;
        raw.into_config()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigToml {
    clock: ClockSection,
    literals: LiteralSection,
    arithmetic: ArithmeticSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ClockSection {
    resolution: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LiteralSection {
    default_integer: Option<String>,
    default_real: Option<String>,
    default_bits: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ArithmeticSection {
    expt: Option<String>,
}

impl ConfigToml {
    fn into_config(self) -> Result<RuntimeConfig, ConfigError> {
        let defaults = RuntimeConfig::default();

        let resolution = match self.clock.resolution {
            Some(text) => parse_resolution(&text)?,
            None => defaults.clock.resolution,
        };
        let expt = match self.arithmetic.expt {
            Some(text) => parse_expt(&text)?,
            None => defaults.arithmetic.expt,
        };

        let base = defaults.literals;
        let literals = LiteralProfile {
            default_integer: literal_type(
                "literals.default_integer",
                self.literals.default_integer.as_deref(),
                AnyClass::INT,
                base.default_integer,
            )?,
            default_real: literal_type(
                "literals.default_real",
                self.literals.default_real.as_deref(),
                AnyClass::REAL,
                base.default_real,
            )?,
            default_bits: literal_type(
                "literals.default_bits",
                self.literals.default_bits.as_deref(),
                AnyClass::INTEGRAL,
                base.default_bits,
            )?,
        };

        Ok(RuntimeConfig {
            clock: ClockConfig { resolution },
            literals,
            arithmetic: ArithmeticConfig { expt },
        })
    }
}

fn parse_resolution(text: &str) -> Result<ClockResolution, ConfigError> {
    match text.trim().to_ascii_lowercase().as_str() {
        "ms" => Ok(ClockResolution::Millis),
        "us" => Ok(ClockResolution::Micros),
        _ => Err(ConfigError::InvalidValue {
            field: "clock.resolution",
            value: text.to_string(),
        }),
    }
}

fn parse_expt(text: &str) -> Result<ExptMode, ConfigError> {
    match text.trim().to_ascii_lowercase().as_str() {
        "power" => Ok(ExptMode::Power),
        "legacy-xor" => Ok(ExptMode::LegacyXor),
        _ => Err(ConfigError::InvalidValue {
            field: "arithmetic.expt",
            value: text.to_string(),
        }),
    }
}

/// Unknown names fall back to `default`; known types outside `class` are
/// rejected.
fn literal_type(
    field: &'static str,
    name: Option<&str>,
    class: AnyClass,
    default: IecType,
) -> Result<IecType, ConfigError> {
    let Some(name) = name else {
        return Ok(default);
    };
    let Some(ty) = IecType::from_name(name) else {
        warn!(field, name, fallback = %default, "unknown type name in config");
        return Ok(default);
    };
    if !crate::value::classify(ty).intersects(class) {
        return Err(ConfigError::InvalidValue {
            field,
            value: name.to_string(),
        });
    }
    Ok(ty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = RuntimeConfig::from_toml_str("").unwrap();
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn unknown_type_name_falls_back() {
        let config = RuntimeConfig::from_toml_str("[literals]\ndefault_integer = \"QUAD\"\n")
            .unwrap();
        assert_eq!(config.literals.default_integer, IecType::Int);
    }
}
