//! Operand stack for n-ary operators.

#![allow(missing_docs)]

use crate::value::Value;

/// LIFO of borrowed operands.
///
/// Consuming operators leave the stack empty on every return path.
#[derive(Debug, Default, Clone)]
pub struct OperandStack<'a> {
    items: Vec<&'a Value>,
}

impl<'a> OperandStack<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, value: &'a Value) {
        self.items.push(value);
    }

    pub fn pop(&mut self) -> Option<&'a Value> {
        self.items.pop()
    }

    #[must_use]
    pub fn peek(&self) -> Option<&'a Value> {
        self.items.last().copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Drops every remaining operand.
    pub fn flush(&mut self) {
        self.items.clear();
    }

    /// Empties the stack, returning operands in pop order (top first).
    pub fn drain(&mut self) -> Vec<&'a Value> {
        let mut items = std::mem::take(&mut self.items);
        items.reverse();
        items
    }
}

impl<'a> Extend<&'a Value> for OperandStack<'a> {
    fn extend<T: IntoIterator<Item = &'a Value>>(&mut self, iter: T) {
        self.items.extend(iter);
    }
}

impl<'a> FromIterator<&'a Value> for OperandStack<'a> {
    /// Pushes in iteration order, so the last item is on top.
    fn from_iter<T: IntoIterator<Item = &'a Value>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
