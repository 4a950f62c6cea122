//! Tagged value container, type catalog and classification.

#![allow(missing_docs)]

mod class;
mod container;
mod datetime;
mod flags;
mod payload;
mod types;

pub use class::*;
pub use container::*;
pub use datetime::*;
pub use flags::*;
pub use payload::*;
pub use types::*;
