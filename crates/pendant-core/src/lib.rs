//! # pendant-core
//!
//! Shared library for Pendant Bridge containing the G-code command decoder,
//! the motion-to-intent mapping, and the key code translation table.
//!
//! This crate is pure translation logic: it has zero dependencies on OS
//! APIs, serial ports, or async runtimes, so every rule in it is testable
//! without hardware.
//!
//! # Architecture overview (for beginners)
//!
//! Pendant Bridge connects a physical CNC pendant (an Arduino-class device
//! that emits relative-move G-code lines over a serial link) to the host's
//! keyboard queue, so CAM/jog software bound to Ctrl+arrow keys can be
//! driven by turning the pendant's wheel.
//!
//! This crate defines the three steps of that translation:
//!
//! - **`gcode`** – Parses one text line (`G91G0X-2.5`, optionally prefixed
//!   with `GCODE: `) into a typed [`MotionCommand`], or rejects it with a
//!   [`DecodeError`].
//!
//! - **`domain`** – Pure domain types. A [`MotionCommand`] (axis + signed
//!   magnitude) becomes a [`DirectionalIntent`]: one of the six navigation
//!   signals (arrows plus page up/down).
//!
//! - **`keymap`** – The static table mapping each intent to its Windows
//!   Virtual Key code. The table is a total `match` on the intent enum, so
//!   a missing entry is a compile error rather than a runtime surprise.

pub mod domain;
pub mod gcode;
pub mod keymap;

// Re-export the most-used types at the crate root so callers can write
// `pendant_core::MotionCommand` instead of the full module path.
pub use domain::motion::{Axis, DirectionalIntent, MotionCommand};
pub use gcode::decoder::{decode, DecodeError};
pub use keymap::windows_vk::{intent_to_vk, VK_CONTROL};
