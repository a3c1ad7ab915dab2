//! Application layer use cases.
//!
//! - **`translate_line`** – The full per-line pipeline: decode a framed
//!   serial line, map it to a directional intent, and emit the ordered
//!   Ctrl+key event sequence through a [`translate_line::KeyInjector`].
//!   The injector is a trait so the OS call can be swapped for a recording
//!   mock in tests.

pub mod translate_line;

pub use translate_line::{InjectionError, KeyInjector, LineOutcome, TranslateLineUseCase};
