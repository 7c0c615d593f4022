//! Common utilities module
//!
//! This module contains shared utilities used across the raw processing layer.

pub mod error;

pub use error::{ProcessorError, Result};
