//! Visage Common Utilities
//!
//! Shared infrastructure for all Visage crates:
//! - Error types and result aliases
//! - Tick timing utilities for fixed-rate replay
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
