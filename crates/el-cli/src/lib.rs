//! errlens: library crate behind the `errlens` binary.
//!
//! Re-exports the modules so the end-to-end test crate can drive the
//! same pipeline `main` runs.

pub mod config;
pub mod observer;
pub mod runner;
