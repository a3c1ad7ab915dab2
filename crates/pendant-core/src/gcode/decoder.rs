//! Decoder for pendant G-code lines.
//!
//! Accepted grammar, anchored at the start of the (already trimmed) line:
//!
//! ```text
//! ["GCODE: "] "G91G0" <axis> <signed-decimal> [trailing text]
//! ```
//!
//! where `<axis>` is exactly one of `X`, `Y`, `Z` and `<signed-decimal>`
//! is an optional `-`, one or more digits, and an optional fractional
//! part (`-?\d+\.?\d*` in regex terms). Anything after the number is
//! ignored: pendant firmware is known to append checksums and comments,
//! so the match is deliberately a prefix match, not a full-line match.
//!
//! The scanner is hand-rolled rather than regex-based. The grammar is
//! three fixed tokens; walking the bytes directly keeps the "trailing
//! text ignored" rule an explicit, tested decision instead of a pattern
//! artifact, and avoids pulling a pattern engine into the hot path.

use thiserror::Error;

use crate::domain::motion::{Axis, MotionCommand};

/// Optional tag some pendant firmware prepends to every command line.
const LINE_PREFIX: &str = "GCODE: ";

/// Fixed literal opening every relative-move command.
const COMMAND_HEAD: &str = "G91G0";

/// Errors produced while decoding one line.
///
/// `Unrecognized` is the normal rejection path for chatter on the serial
/// link (boot banners, status lines, malformed commands) and must never
/// abort the pipeline.
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    /// The line does not match the `G91G0<axis><value>` grammar.
    #[error("unrecognized command line: {0:?}")]
    Unrecognized(String),

    /// The grammar matched but the numeric magnitude is not a finite value.
    #[error("magnitude is not a finite number")]
    InvalidMagnitude,
}

/// Decodes one delimiter-stripped line into a [`MotionCommand`].
///
/// Decoding is pure: the same line always yields the same result.
///
/// # Errors
///
/// Returns [`DecodeError::Unrecognized`] when the line does not match the
/// grammar, and [`DecodeError::InvalidMagnitude`] when the matched number
/// overflows to a non-finite float.
pub fn decode(line: &str) -> Result<MotionCommand, DecodeError> {
    // The prefix check is case-sensitive and anchored; an absent prefix
    // leaves the line untouched.
    let body = line.strip_prefix(LINE_PREFIX).unwrap_or(line);

    let unrecognized = || DecodeError::Unrecognized(line.to_string());

    let rest = body.strip_prefix(COMMAND_HEAD).ok_or_else(unrecognized)?;

    let axis = match rest.as_bytes().first() {
        Some(b'X') => Axis::X,
        Some(b'Y') => Axis::Y,
        Some(b'Z') => Axis::Z,
        _ => return Err(unrecognized()),
    };

    let number = scan_signed_decimal(&rest[1..]).ok_or_else(unrecognized)?;

    // The scanner guarantees digits, so parse can only fail by producing
    // a non-finite value on overflow; both paths report InvalidMagnitude.
    let magnitude: f32 = number.parse().map_err(|_| DecodeError::InvalidMagnitude)?;
    if !magnitude.is_finite() {
        return Err(DecodeError::InvalidMagnitude);
    }

    Ok(MotionCommand { axis, magnitude })
}

/// Scans a signed decimal literal from the start of `input`.
///
/// Shape: optional `-`, one or more digits, then an optional `.` followed
/// by zero or more digits. Returns the matched prefix, or `None` when no
/// digit follows the optional sign. Trailing non-numeric text is left
/// unconsumed by design.
fn scan_signed_decimal(input: &str) -> Option<&str> {
    let bytes = input.as_bytes();
    let mut pos = 0;

    if bytes.first() == Some(&b'-') {
        pos += 1;
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    if pos == int_start {
        // At least one digit is required before any decimal point.
        return None;
    }

    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
    }

    Some(&input[..pos])
}

// ── Tests ─────────────────────────────────────────────────────────────────────
