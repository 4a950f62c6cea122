//! Standard library registry.

pub mod arithmetic;
pub mod bit;
pub mod comparison;
pub mod conversion;
pub mod fbs;
mod helpers;
pub mod math;
pub mod selection;
pub mod string;
pub mod time;
pub mod validate;

use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::debug;

use crate::config::{LiteralProfile, RuntimeConfig};
use crate::error::{IecError, Status};
use crate::stack::OperandStack;
use crate::value::Value;

/// Uniform operator entry point.
///
/// Fixed-arity operators take their operands from the stack in push order
/// (`IN1` pushed first); n-ary operators consume the whole stack. The stack
/// is empty when the call returns.
pub type StdFunc = fn(&mut Value, &mut OperandStack<'_>) -> Status;

/// Name-indexed registry of standard operators.
#[derive(Debug, Default, Clone)]
pub struct StandardLibrary {
    functions: IndexMap<SmolStr, StdFunc>,
    literals: LiteralProfile,
}

impl StandardLibrary {
    /// Build a standard library with default functions.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&RuntimeConfig::default())
    }

    /// Build a standard library honouring the arithmetic and literal
    /// settings of `config`.
    #[must_use]
    pub fn with_config(config: &RuntimeConfig) -> Self {
        let mut lib = Self {
            functions: IndexMap::new(),
            literals: config.literals,
        };
        arithmetic::register(&mut lib);
        arithmetic::register_expt(&mut lib, config.arithmetic.expt);
        math::register(&mut lib);
        bit::register(&mut lib);
        comparison::register(&mut lib);
        selection::register(&mut lib);
        string::register(&mut lib);
        time::register(&mut lib);
        lib
    }

    /// Register (or replace) a function by name.
    pub fn register(&mut self, name: impl Into<SmolStr>, func: StdFunc) {
        let key = SmolStr::new(name.into().as_str().to_ascii_uppercase());
        self.functions.insert(key, func);
    }

    /// Get a standard function by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<StdFunc> {
        let key = SmolStr::new(name.to_ascii_uppercase());
        self.functions.get(&key).copied()
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(SmolStr::as_str)
    }

    /// Call a standard function by name. Conversion names (`INT_TO_REAL`,
    /// `TRUNC_DINT`, ...) resolve without registration.
    pub fn call(&self, name: &str, result: &mut Value, operands: &mut OperandStack<'_>) -> Status {
        let key = SmolStr::new(name.to_ascii_uppercase());
        if let Some(func) = self.functions.get(&key) {
            return func(result, operands);
        }
        if let Some(status) = conversion::call_conversion(&key, result, operands, &self.literals) {
            return status;
        }
        operands.flush();
        debug!(name, "unknown standard function");
        Err(IecError::ElementNotFound)
    }
}
