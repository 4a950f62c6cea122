//! `trust-iec` - IEC 61131-3 elementary value model, standard operators and
//! function blocks.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

/// Monotonic clocks for timer blocks.
pub mod clock;
/// Runtime configuration.
pub mod config;
/// Operator status codes and configuration errors.
pub mod error;
/// Literal classification and parsing.
pub mod literal;
/// Operand stack for n-ary operators.
pub mod stack;
/// Standard operators, conversions and function blocks.
pub mod stdlib;
/// Value container, type catalog and classification.
pub mod value;

pub use clock::{Clock, ManualClock, StdClock};
pub use config::RuntimeConfig;
pub use error::{IecError, Status};
pub use stack::OperandStack;
pub use stdlib::StandardLibrary;
pub use value::{AnyClass, IecType, Value};
