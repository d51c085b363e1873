//! Kinetrace Common Utilities
//!
//! Shared infrastructure for all Kinetrace crates:
//! - Error types and result aliases
//! - Frame timing utilities for per-frame elapsed time
//! - Tracing/logging initialization
//! - Configuration loading and validation

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
