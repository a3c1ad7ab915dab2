//! Pendant Bridge application entry point.
//!
//! Wires together the serial link, the line translation use case, and the
//! platform key injector, then runs the Tokio dispatch loop.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_or_init_config() -- TOML config (port, baud, log level)
//!  └─ PendantLink::start()  -- serial reconnect loop + line framing
//!  └─ dispatch_events()     -- select over serial events and Ctrl-C
//!       ├─ LineReceived  -> TranslateLineUseCase (decode → map → emit)
//!       ├─ Connected     -> log lifecycle
//!       └─ Disconnected  -> log; reconnect handled by PendantLink
//! ```
//!
//! The dispatch loop is the serialization point: one line is fully
//! translated and its key sequence fully emitted before the next event is
//! received, so key events from different lines can never interleave.

use std::future::Future;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use pendant_bridge::application::translate_line::{KeyInjector, TranslateLineUseCase};
use pendant_bridge::infrastructure::{
    config::load_or_init_config,
    serial::{PendantLink, SerialEvent, SerialLinkConfig},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_or_init_config()?;

    // Initialise structured logging. RUST_LOG wins; the config file's
    // log_level is the fallback.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.bridge.log_level)),
        )
        .init();

    info!("Pendant Bridge starting");

    // Shutdown flag.
    let running = Arc::new(AtomicBool::new(true));

    // ── Platform key injector ─────────────────────────────────────────────────
    #[cfg(target_os = "windows")]
    let injector: Arc<dyn KeyInjector> =
        Arc::new(pendant_bridge::infrastructure::injection::windows::WindowsKeyInjector::new());
    #[cfg(not(target_os = "windows"))]
    let injector: Arc<dyn KeyInjector> = {
        warn!("no key injection backend for this platform; running as dry-run decoder");
        Arc::new(pendant_bridge::infrastructure::injection::mock::MockKeyInjector::new())
    };

    let use_case = TranslateLineUseCase::new(injector);

    // ── Serial link ───────────────────────────────────────────────────────────
    let link = Arc::new(PendantLink::new(SerialLinkConfig {
        port: config.serial.port.clone(),
        baud_rate: config.serial.baud_rate,
        reconnect_interval: Duration::from_secs(config.serial.reconnect_interval_secs),
    }));
    let serial_rx = link.start(Arc::clone(&running));

    // ── Main dispatch loop ────────────────────────────────────────────────────
    info!(port = %config.serial.port, "Pendant Bridge ready, waiting for pendant");

    dispatch_events(serial_rx, &use_case, running.as_ref(), async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await;

    info!("Pendant Bridge stopped");
    Ok(())
}

/// Runs the event dispatch loop until the serial channel closes or
/// `shutdown` completes.
///
/// Selecting on `shutdown` keeps Ctrl-C responsive even while the pendant
/// is silent and `recv()` is parked; `running` is cleared on the way out
/// so the serial reconnect loop stops too (dropping the receiver covers
/// an open port, the flag covers the sleep between reopen attempts).
async fn dispatch_events(
    mut serial_rx: mpsc::Receiver<SerialEvent>,
    use_case: &TranslateLineUseCase,
    running: &AtomicBool,
    shutdown: impl Future<Output = ()>,
) {
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("shutdown signal received");
                running.store(false, Ordering::Relaxed);
                return;
            }
            event = serial_rx.recv() => match event {
                None => return,
                Some(SerialEvent::Connected { port }) => {
                    info!(%port, "pendant connected");
                }
                Some(SerialEvent::Disconnected) => {
                    warn!("pendant link lost; reconnect in progress");
                }
                Some(SerialEvent::LineReceived(line)) => {
                    // Decode failures are recovered (and logged) inside the
                    // use case; only injection failures surface here, and
                    // they are per-event: the loop keeps going.
                    if let Err(e) = use_case.handle_line(&line) {
                        error!(line = %line, "key injection failed: {e}");
                    }
                }
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
