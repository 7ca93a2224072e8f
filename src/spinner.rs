//! A minimal terminal spinner shown while a word is being analyzed.

use std::io::Write;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::events::Event;

/// Braille spinner frames.
const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Frame interval.
const INTERVAL: Duration = Duration::from_millis(80);

/// A terminal spinner that runs in a background task.
///
/// Writes to stderr so it doesn't interfere with the report on stdout.
/// When given an event receiver it also shows how many analyses are
/// still outstanding.
pub struct Spinner {
    handle: JoinHandle<()>,
    cancel: tokio::sync::watch::Sender<bool>,
}

impl Spinner {
    /// Start a spinner with the given message (e.g. `"analyzing"`).
    pub fn start(message: &str, mut events: Option<broadcast::Receiver<Event>>) -> Self {
        let (cancel_tx, mut cancel_rx) = tokio::sync::watch::channel(false);
        let message = message.to_string();

        let handle = tokio::spawn(async move {
            let mut i = 0;
            let mut remaining: Option<usize> = None;
            loop {
                let frame = FRAMES[i % FRAMES.len()];
                eprint!("\x1b[2K\r{}", status_line(frame, &message, remaining));
                let _ = std::io::stderr().flush();

                tokio::select! {
                    _ = tokio::time::sleep(INTERVAL) => {}
                    _ = cancel_rx.changed() => break,
                    Some(event) = next_event(&mut events) => {
                        if let Event::Reported { remaining: left, .. } = event {
                            remaining = Some(left);
                        }
                    }
                }
                i += 1;
            }
            eprint!("\x1b[2K\r");
            let _ = std::io::stderr().flush();
        });

        Self {
            handle,
            cancel: cancel_tx,
        }
    }

    /// Stop the spinner and clear its line.
    pub async fn stop(self) {
        let _ = self.cancel.send(true);
        let _ = self.handle.await;
    }
}

fn status_line(frame: &str, message: &str, remaining: Option<usize>) -> String {
    match remaining {
        Some(left) => format!("{frame} {message} ({left} left)"),
        None => format!("{frame} {message}"),
    }
}

/// Next event, or pending forever once there is no receiver or it closed.
async fn next_event(events: &mut Option<broadcast::Receiver<Event>>) -> Option<Event> {
    let Some(rx) = events else {
        return std::future::pending().await;
    };
    loop {
        match rx.recv().await {
            Ok(event) => return Some(event),
            Err(broadcast::error::RecvError::Lagged(_)) => continue,
            Err(broadcast::error::RecvError::Closed) => {
                *events = None;
                return std::future::pending().await;
            }
        }
    }
}
