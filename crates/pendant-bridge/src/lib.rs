//! pendant-bridge library entry point.
//!
//! Re-exports the module tree so that integration tests in `tests/` and
//! the binary entry point in `main.rs` share the same code.
//!
//! # What does pendant-bridge do? (for beginners)
//!
//! A CNC pendant is a handheld jog wheel. This one runs firmware that
//! reports each wheel click as a relative-move G-code line over a serial
//! link, e.g. `GCODE: G91G0X-2`. The bridge application:
//!
//! 1. Opens the serial port and frames the byte stream into `\n`-delimited
//!    lines (reconnecting automatically if the device is unplugged).
//! 2. Decodes each line with `pendant-core` into a motion command and
//!    directional intent.
//! 3. Synthesizes the matching Ctrl+key press/release sequence through the
//!    OS input-injection API (`SendInput` on Windows), so whatever CAM/jog
//!    application has focus reacts as if the user pressed the keys.
//!
//! One line is fully decoded, mapped, and emitted before the next line is
//! dispatched; the four injection calls of a sequence are synchronous and
//! never interleave with another line's output.

/// Application layer: the line translation use case and its seams.
pub mod application;

/// Infrastructure layer: serial transport, OS key injection, configuration.
pub mod infrastructure;
