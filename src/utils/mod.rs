//! # Utilities
//!
//! Pure helpers shared across the dashboard core.

pub mod format;

pub use format::{format_bytes, format_relative_age};
