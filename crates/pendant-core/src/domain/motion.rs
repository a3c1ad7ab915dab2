//! Motion commands and the directional intent they translate into.
//!
//! A [`MotionCommand`] is the typed form of one relative-move G-code line:
//! which axis moved, and by how much (signed). A [`DirectionalIntent`] is
//! the six-way navigation signal the host application actually consumes.
//!
//! The sign/axis mapping is fixed:
//!
//! | axis | magnitude > 0 | magnitude < 0 |
//! |------|---------------|---------------|
//! | Y    | Up            | Down          |
//! | X    | Right         | Left          |
//! | Z    | PageUp        | PageDown      |
//!
//! A zero magnitude maps to no intent at all. Pendant encoders can emit
//! zero-distance moves from mechanical jitter; those must not press keys.

/// The three machine axes the pendant can move.
///
/// This enum is closed on purpose: the decoder only ever produces these
/// three values, so "unknown axis" is unrepresentable downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// One decoded relative-move command: an axis plus a signed distance.
///
/// Invariant: `magnitude` is finite. The decoder rejects non-finite
/// values before a `MotionCommand` is ever constructed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionCommand {
    pub axis: Axis,
    pub magnitude: f32,
}

/// The six-way navigation signal a motion command translates into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectionalIntent {
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
}

impl DirectionalIntent {
    /// Maps a motion command to its directional intent.
    ///
    /// Returns `None` for a zero magnitude: that is a deliberate no-op
    /// (jitter suppression), not an error. Non-finite magnitudes also map
    /// to `None`; the decoder never produces them, but this function must
    /// not turn a bad float into a key press.
    pub fn from_motion(cmd: &MotionCommand) -> Option<Self> {
        if cmd.magnitude == 0.0 || !cmd.magnitude.is_finite() {
            return None;
        }
        let positive = cmd.magnitude > 0.0;
        Some(match (cmd.axis, positive) {
            (Axis::Y, true) => DirectionalIntent::Up,
            (Axis::Y, false) => DirectionalIntent::Down,
            (Axis::X, true) => DirectionalIntent::Right,
            (Axis::X, false) => DirectionalIntent::Left,
            (Axis::Z, true) => DirectionalIntent::PageUp,
            (Axis::Z, false) => DirectionalIntent::PageDown,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
