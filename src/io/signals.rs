//! Signal handling for the background instance.
//!
//! A dedicated thread turns POSIX signals into [`SignalMessage`]s on a channel.
//! The poll loop waits on that channel between ticks, so a signal interrupts
//! the 30 second sleep immediately.

use anyhow::{Context, Result};
use signal_hook::{
    consts::signal::{SIGHUP, SIGINT, SIGTERM, SIGUSR2},
    iterator::Signals,
};
use std::{
    sync::Arc,
    sync::atomic::{AtomicBool, Ordering},
    sync::mpsc::{Receiver, Sender},
    thread,
};

/// Unified signal message type for all signal-based communication
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalMessage {
    /// Re-apply the active profile now (SIGUSR2)
    Reload,
    /// Leave the poll loop (SIGTERM, SIGINT, SIGHUP)
    Shutdown,
}

/// Signal handling state shared between threads
pub struct SignalState {
    /// Atomic flag indicating if the application should keep running
    pub running: Arc<AtomicBool>,
    /// Channel receiver for unified signal messages
    pub signal_receiver: Receiver<SignalMessage>,
    /// Channel sender, kept so the channel never disconnects while the loop runs
    pub signal_sender: Sender<SignalMessage>,
}

impl SignalState {
    /// A signal state not connected to any OS signals.
    ///
    /// Messages are injected through `signal_sender`; used by tests and by
    /// embedding code that manages its own shutdown.
    pub fn detached() -> Self {
        let (signal_sender, signal_receiver) = std::sync::mpsc::channel();
        Self {
            running: Arc::new(AtomicBool::new(true)),
            signal_receiver,
            signal_sender,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Set up signal handling for the application.
///
/// Returns a SignalState containing the running flag and signal receiver channel.
/// Spawns a background thread that monitors for signals and sends appropriate
/// messages via the channel.
pub fn setup_signal_handler(debug_enabled: bool) -> Result<SignalState> {
    let state = SignalState::detached();

    let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP, SIGUSR2])
        .context("failed to register signal handlers")?;

    let running = state.running.clone();
    let sender = state.signal_sender.clone();

    thread::spawn(move || {
        for sig in signals.forever() {
            if sig == SIGUSR2 {
                if sender.send(SignalMessage::Reload).is_err() {
                    break;
                }
                log_pipe!();
                log_info!("Received reload signal");
                continue;
            }

            let user_message = match sig {
                SIGINT if debug_enabled => {
                    "Received SIGINT (Ctrl+C), initiating graceful shutdown..."
                }
                SIGINT => "Received interrupt signal, initiating graceful shutdown...",
                SIGTERM => "Received termination request, initiating graceful shutdown...",
                _ => "Received hangup signal, initiating graceful shutdown...",
            };

            log_pipe!();
            log_info!("{}", user_message);

            running.store(false, Ordering::SeqCst);

            if let Err(e) = sender.send(SignalMessage::Shutdown) {
                // The main loop is already gone
                log_warning!("Failed to send shutdown message: {e}");
                break;
            }

            // Keep draining so repeated termination requests are not fatal
        }
    });

    Ok(state)
}
