//! Infrastructure layer: OS-facing and transport adapters.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `pendant_core`, but MUST NOT be imported by the application layer.
//!
//! # Sub-modules
//!
//! - **`injection`** – OS implementations of the `KeyInjector` seam.
//!   `SendInput` on Windows, plus a recording mock for tests and for
//!   dry-runs on platforms without an injection backend.
//!
//! - **`serial`** – The pendant serial link: opens the port, frames the
//!   byte stream into lines, and forwards them on an mpsc channel with
//!   automatic reconnection.
//!
//! - **`config`** – TOML configuration persistence (port, baud rate,
//!   log level).

pub mod config;
pub mod injection;
pub mod serial;
