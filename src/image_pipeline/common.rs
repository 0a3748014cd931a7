//! Common utilities module
//!
//! Shared error type used by every stage of the thermal frame pipeline.

pub mod error;

pub use error::{ConversionError, Result};
