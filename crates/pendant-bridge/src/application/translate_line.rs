//! TranslateLineUseCase: the line → key-sequence translation pipeline.
//!
//! This use case owns the whole chain the bridge exists for: one framed
//! serial line goes in, and either a four-call key event sequence comes
//! out of the [`KeyInjector`] or a diagnosed no-op is logged. OS-level
//! injection is behind the trait; the platform implementations live in
//! the infrastructure layer.

use std::sync::Arc;

use pendant_core::{decode, intent_to_vk, DecodeError, DirectionalIntent, VK_CONTROL};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Error type for OS key injection.
#[derive(Debug, Error)]
pub enum InjectionError {
    /// The OS input call rejected or failed to queue the event.
    #[error("platform input injection failed: {0}")]
    Platform(String),
}

/// The injection sink seam: one synthetic key transition per call.
///
/// Implementations must perform the event synchronously; the emitter
/// relies on call order reaching the OS input queue unchanged.
pub trait KeyInjector: Send + Sync {
    /// Presses the key identified by the Windows virtual-key code `vk`.
    fn key_down(&self, vk: u16) -> Result<(), InjectionError>;

    /// Releases the key identified by the Windows virtual-key code `vk`.
    fn key_up(&self, vk: u16) -> Result<(), InjectionError>;
}

/// Per-line diagnostic outcome.
///
/// Zero-magnitude moves get their own variant so that pendant jitter is
/// distinguishable from malformed input when reading the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// The line decoded to a non-zero move and the key sequence was emitted.
    Emitted(DirectionalIntent),
    /// The line decoded cleanly but the move distance was zero: deliberate no-op.
    ZeroMagnitude,
    /// The line does not match the command grammar: dropped, pipeline continues.
    Unrecognized,
    /// The grammar matched but the magnitude was not a finite number.
    InvalidMagnitude,
}

/// The Translate Line use case.
///
/// Stateless across lines: each call to [`handle_line`](Self::handle_line)
/// is independent, so decoding the same line twice always behaves
/// identically.
pub struct TranslateLineUseCase {
    injector: Arc<dyn KeyInjector>,
}

impl TranslateLineUseCase {
    /// Creates a new use case emitting through the given injector.
    pub fn new(injector: Arc<dyn KeyInjector>) -> Self {
        Self { injector }
    }

    /// Runs one line through decode → map → emit and logs the outcome.
    ///
    /// Decode failures are recovered locally (logged, no event emitted)
    /// and reported through [`LineOutcome`]; only a sink failure is an
    /// `Err`, because a partial emission is hazardous for the receiving
    /// application and the caller must see it. The failure is per-event:
    /// the use case stays usable for subsequent lines.
    ///
    /// # Errors
    ///
    /// Returns [`InjectionError`] if the OS injection call fails.
    pub fn handle_line(&self, line: &str) -> Result<LineOutcome, InjectionError> {
        let line = line.trim();

        match decode(line) {
            Ok(cmd) => match DirectionalIntent::from_motion(&cmd) {
                Some(intent) => {
                    self.emit(intent)?;
                    info!(
                        ?intent,
                        axis = ?cmd.axis,
                        magnitude = cmd.magnitude,
                        "emitted key sequence"
                    );
                    Ok(LineOutcome::Emitted(intent))
                }
                None => {
                    debug!(axis = ?cmd.axis, "zero-magnitude move, no key emitted");
                    Ok(LineOutcome::ZeroMagnitude)
                }
            },
            Err(DecodeError::Unrecognized(original)) => {
                debug!(line = %original, "unrecognized line dropped");
                Ok(LineOutcome::Unrecognized)
            }
            Err(DecodeError::InvalidMagnitude) => {
                warn!(line = %line, "command matched but magnitude is not finite");
                Ok(LineOutcome::InvalidMagnitude)
            }
        }
    }

    /// Emits the ordered key event sequence for one intent:
    ///
    /// 1. Ctrl down
    /// 2. target key down
    /// 3. target key up
    /// 4. Ctrl up
    ///
    /// The four calls are synchronous and never reordered or batched; the
    /// OS input queue is order-sensitive. If a call fails mid-sequence,
    /// the remaining key-up calls are attempted best-effort before the
    /// error propagates; a Ctrl left stuck down would hijack every real
    /// keystroke on the host. The failed call itself is not retried.
    ///
    /// # Errors
    ///
    /// Returns the first [`InjectionError`] reported by the sink.
    pub fn emit(&self, intent: DirectionalIntent) -> Result<(), InjectionError> {
        let vk = intent_to_vk(intent);

        // Nothing is pressed yet; a failure here needs no cleanup.
        self.injector.key_down(VK_CONTROL)?;

        if let Err(e) = self.injector.key_down(vk) {
            let _ = self.injector.key_up(VK_CONTROL);
            return Err(e);
        }
        if let Err(e) = self.injector.key_up(vk) {
            let _ = self.injector.key_up(VK_CONTROL);
            return Err(e);
        }
        self.injector.key_up(VK_CONTROL)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
