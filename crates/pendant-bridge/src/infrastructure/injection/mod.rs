//! Platform key injection implementations.
//!
//! The Windows implementation is selected at compile time; other targets
//! fall back to the recording mock (the bridge then runs as a dry-run
//! decoder, which is useful for bench-testing pendant firmware).

pub mod mock;

#[cfg(target_os = "windows")]
pub mod windows;
