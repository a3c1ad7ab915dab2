//! Serial transport for the pendant link.
//!
//! Architecture:
//! - `PendantLink` owns the port configuration and a reconnect loop.
//! - The read loop frames the byte stream into `\n`-delimited lines; the
//!   `BufReader` owns the partial-line buffer, so the translation core
//!   never buffers across lines.
//! - Framed lines and lifecycle changes are forwarded as [`SerialEvent`]s
//!   on an mpsc channel to the single dispatch loop in `main`.
//!
//! Closing the channel receiver (or flipping the `running` flag) is the
//! only cancellation path; it stops new line delivery but never interrupts
//! an in-flight key emission, which happens on the receiving side.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, BufReader},
    sync::mpsc,
    time,
};
use tokio_serial::SerialPortBuilderExt;
use tracing::{debug, info, warn};

/// Errors that can occur on the serial link.
#[derive(Debug, Error)]
pub enum SerialLinkError {
    /// The port could not be opened.
    #[error("failed to open serial port {port}: {source}")]
    Open {
        port: String,
        #[source]
        source: tokio_serial::Error,
    },
    /// An I/O error occurred on the open port.
    #[error("serial I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration for the pendant serial link.
#[derive(Debug, Clone)]
pub struct SerialLinkConfig {
    /// Port name, e.g. `COM6` or `/dev/ttyUSB0`.
    pub port: String,
    /// Baud rate; the reference pendant firmware talks at 57600.
    pub baud_rate: u32,
    /// Delay before reopening the port after a failure or disconnect.
    pub reconnect_interval: Duration,
}

impl Default for SerialLinkConfig {
    fn default() -> Self {
        Self {
            port: default_port_name(),
            baud_rate: 57600,
            reconnect_interval: Duration::from_secs(5),
        }
    }
}

fn default_port_name() -> String {
    #[cfg(target_os = "windows")]
    return "COM6".to_string();
    #[cfg(not(target_os = "windows"))]
    return "/dev/ttyUSB0".to_string();
}

/// Events emitted by the serial layer to the dispatch loop.
#[derive(Debug, PartialEq, Eq)]
pub enum SerialEvent {
    /// One complete line, delimiter and trailing CR stripped.
    LineReceived(String),
    /// The port was opened successfully.
    Connected { port: String },
    /// The port was lost (unplug, I/O error, EOF).
    Disconnected,
}

/// Manages the serial connection to the pendant device.
pub struct PendantLink {
    config: SerialLinkConfig,
}

impl PendantLink {
    /// Creates a new (not yet opened) `PendantLink`.
    pub fn new(config: SerialLinkConfig) -> Self {
        Self { config }
    }

    /// Opens the port and begins delivering lines.
    ///
    /// Returns a channel receiver carrying [`SerialEvent`]s. Runs a
    /// continuous reconnect loop until `running` is set to false or the
    /// receiver is dropped.
    pub fn start(self: Arc<Self>, running: Arc<AtomicBool>) -> mpsc::Receiver<SerialEvent> {
        let (tx, rx) = mpsc::channel(128);
        let this = Arc::clone(&self);

        tokio::spawn(async move {
            while running.load(Ordering::Relaxed) {
                match tokio_serial::new(&this.config.port, this.config.baud_rate)
                    .open_native_async()
                {
                    Ok(stream) => {
                        info!(
                            port = %this.config.port,
                            baud = this.config.baud_rate,
                            "serial port opened"
                        );
                        if tx
                            .send(SerialEvent::Connected {
                                port: this.config.port.clone(),
                            })
                            .await
                            .is_err()
                        {
                            return; // dispatch loop is gone
                        }

                        if let Err(e) = read_lines(stream, &tx, &running).await {
                            warn!("serial read failed: {e}");
                        }
                        if tx.send(SerialEvent::Disconnected).await.is_err() {
                            return;
                        }
                    }
                    Err(source) => {
                        let err = SerialLinkError::Open {
                            port: this.config.port.clone(),
                            source,
                        };
                        warn!("{err}");
                    }
                }

                if !running.load(Ordering::Relaxed) {
                    return;
                }
                time::sleep(this.config.reconnect_interval).await;
            }
        });

        rx
    }
}

/// Longest line the framer will buffer. G-code pendant commands are tens
/// of bytes; anything longer is wrong-baud noise, not a command.
const MAX_LINE_LEN: usize = 256;

/// Reads `\n`-delimited lines from `stream` until EOF, error, or shutdown.
///
/// Lines are forwarded one at a time; the channel send provides the
/// backpressure that keeps the pipeline strictly serial. Bytes that are
/// not valid UTF-8 (line noise during plugging) are replaced rather than
/// killing the connection. A non-empty partial line at EOF is still
/// delivered: pendant firmware flushes its last command without a
/// trailing newline on power-down.
///
/// A line that outgrows [`MAX_LINE_LEN`] is dropped in its entirety and
/// framing resynchronizes on the next `\n`, so a stream that never
/// delivers a newline (wrong baud rate) cannot grow the buffer without
/// bound.
async fn read_lines<R>(
    stream: R,
    tx: &mpsc::Sender<SerialEvent>,
    running: &Arc<AtomicBool>,
) -> Result<(), SerialLinkError>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(stream);
    let mut buf: Vec<u8> = Vec::new();
    // Set while skipping the remainder of a line that outgrew the cap.
    let mut discarding = false;

    while running.load(Ordering::Relaxed) {
        let chunk = reader.fill_buf().await?;
        if chunk.is_empty() {
            debug!("serial stream reached EOF");
            if !discarding && !buf.is_empty() {
                forward_line(&buf, tx).await;
            }
            return Ok(());
        }

        let newline = chunk.iter().position(|&b| b == b'\n');
        let take = newline.unwrap_or(chunk.len());

        if discarding {
            // Keep dropping until the newline that ends the oversized line.
        } else if buf.len() + take > MAX_LINE_LEN {
            warn!(cap = MAX_LINE_LEN, "dropping oversized line, resyncing on next newline");
            buf.clear();
            discarding = newline.is_none();
        } else {
            buf.extend_from_slice(&chunk[..take]);
        }

        let consumed = newline.map_or(take, |i| i + 1);
        reader.consume(consumed);

        if newline.is_some() {
            if discarding {
                discarding = false;
            } else {
                if !forward_line(&buf, tx).await {
                    return Ok(()); // receiver dropped, shutting down
                }
                buf.clear();
            }
        }
    }
    Ok(())
}

/// Sends one framed line, CR-stripped and blank-filtered. Returns `false`
/// when the receiver is gone.
async fn forward_line(buf: &[u8], tx: &mpsc::Sender<SerialEvent>) -> bool {
    let line = String::from_utf8_lossy(buf);
    let line = line.trim_end_matches('\r');
    if line.is_empty() {
        return true;
    }
    tx.send(SerialEvent::LineReceived(line.to_string()))
        .await
        .is_ok()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn running_flag() -> Arc<AtomicBool> {
        Arc::new(AtomicBool::new(true))
    }

    async fn collect_lines<R: AsyncRead + Unpin>(stream: R) -> Vec<SerialEvent> {
        let (tx, mut rx) = mpsc::channel(128);
        let running = running_flag();
        read_lines(stream, &tx, &running).await.unwrap();
        drop(tx);

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_read_lines_frames_on_newline() {
        // Arrange / Act
        let events = collect_lines(&b"G91G0X5\nG91G0Y-1\n"[..]).await;

        // Assert
        assert_eq!(
            events,
            vec![
                SerialEvent::LineReceived("G91G0X5".to_string()),
                SerialEvent::LineReceived("G91G0Y-1".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_read_lines_strips_carriage_returns() {
        let events = collect_lines(&b"GCODE: G91G0Z1\r\n"[..]).await;

        assert_eq!(
            events,
            vec![SerialEvent::LineReceived("GCODE: G91G0Z1".to_string())]
        );
    }

    #[tokio::test]
    async fn test_read_lines_buffers_partial_lines_across_chunks() {
        // Arrange – the line arrives split across three reads, as serial
        // bytes do; framing must reassemble it before delivery.
        let stream = tokio_test::io::Builder::new()
            .read(b"G91")
            .read(b"G0X-2")
            .read(b".5\n")
            .build();

        // Act
        let events = collect_lines(stream).await;

        // Assert
        assert_eq!(
            events,
            vec![SerialEvent::LineReceived("G91G0X-2.5".to_string())]
        );
    }

    #[tokio::test]
    async fn test_read_lines_delivers_final_partial_line_at_eof() {
        let events = collect_lines(&b"G91G0X1\nG91G0Y2"[..]).await;

        assert_eq!(
            events,
            vec![
                SerialEvent::LineReceived("G91G0X1".to_string()),
                SerialEvent::LineReceived("G91G0Y2".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_read_lines_skips_blank_lines() {
        let events = collect_lines(&b"\n\r\nG91G0X1\n\n"[..]).await;

        assert_eq!(
            events,
            vec![SerialEvent::LineReceived("G91G0X1".to_string())]
        );
    }

    #[tokio::test]
    async fn test_read_lines_replaces_invalid_utf8_instead_of_failing() {
        // 0xFF is not valid UTF-8; the line must still come through.
        let events = collect_lines(&b"\xFFG91G0X1\n"[..]).await;

        assert_eq!(events.len(), 1);
        match &events[0] {
            SerialEvent::LineReceived(line) => assert!(line.ends_with("G91G0X1")),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_read_lines_drops_oversized_line_and_resyncs() {
        // Arrange – one line far over the cap, then a real command.
        let mut stream = vec![b'x'; MAX_LINE_LEN + 40];
        stream.push(b'\n');
        stream.extend_from_slice(b"G91G0X5\n");

        // Act
        let events = collect_lines(&stream[..]).await;

        // Assert – the noise is gone, the command after it survives.
        assert_eq!(
            events,
            vec![SerialEvent::LineReceived("G91G0X5".to_string())]
        );
    }

    #[tokio::test]
    async fn test_read_lines_discards_newlineless_noise_at_eof() {
        // A stream that never delivers a newline (wrong baud rate) must
        // not be delivered as a partial line at EOF.
        let noise = vec![b'x'; MAX_LINE_LEN * 3];
        let events = collect_lines(&noise[..]).await;

        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_read_lines_resyncs_across_chunks_after_overflow() {
        // Arrange – noise split across reads, newline and a command later.
        let noise = vec![b'x'; MAX_LINE_LEN + 1];
        let stream = tokio_test::io::Builder::new()
            .read(&noise)
            .read(b"more noise\nG91G0Y-1\n")
            .build();

        // Act
        let events = collect_lines(stream).await;

        // Assert
        assert_eq!(
            events,
            vec![SerialEvent::LineReceived("G91G0Y-1".to_string())]
        );
    }

    #[tokio::test]
    async fn test_read_lines_keeps_line_at_exactly_the_cap() {
        let mut stream = vec![b'y'; MAX_LINE_LEN];
        stream.push(b'\n');

        let events = collect_lines(&stream[..]).await;

        assert_eq!(
            events,
            vec![SerialEvent::LineReceived(
                String::from_utf8(vec![b'y'; MAX_LINE_LEN]).unwrap()
            )]
        );
    }

    #[tokio::test]
    async fn test_read_lines_stops_when_running_cleared() {
        let running = Arc::new(AtomicBool::new(false));
        let (tx, mut rx) = mpsc::channel(8);

        read_lines(&b"G91G0X5\n"[..], &tx, &running).await.unwrap();
        drop(tx);

        assert!(rx.recv().await.is_none());
    }

    #[test]
    fn test_default_config_uses_reference_baud_rate() {
        let config = SerialLinkConfig::default();
        assert_eq!(config.baud_rate, 57600);
        assert_eq!(config.reconnect_interval, Duration::from_secs(5));
    }
}
