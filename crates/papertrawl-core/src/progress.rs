//! Spinner progress for long-running network calls.
//!
//! TTY mode: indicatif spinner with a steady tick.
//! Non-TTY mode: hidden (log lines are the only activity indicator).

use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// Tick interval for the spinner animation.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Central progress context managing the spinner and log bridge.
pub struct ProgressContext {
    multi: MultiProgress,
    is_tty: bool,
}

impl ProgressContext {
    /// Create new context, detecting TTY automatically.
    pub fn new() -> Self {
        let is_tty = std::io::stderr().is_terminal();
        Self {
            multi: MultiProgress::new(),
            is_tty,
        }
    }

    /// Start a spinner with the given message.
    ///
    /// The spinner animates until the returned guard is dropped; dropping
    /// it clears the line, so nothing is left on screen before output is
    /// produced, on success and failure paths alike.
    pub fn spinner(&self, msg: &str) -> SpinnerGuard {
        if !self.is_tty {
            return SpinnerGuard {
                pb: ProgressBar::hidden(),
            };
        }
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(
            ProgressStyle::with_template("{wide_msg} {spinner:.green}")
                .expect("invalid template"),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(TICK_INTERVAL);
        SpinnerGuard { pb }
    }

    /// Whether running in TTY mode.
    pub fn is_tty(&self) -> bool {
        self.is_tty
    }

    /// Get reference to `MultiProgress` for the log bridge.
    pub fn multi(&self) -> &MultiProgress {
        &self.multi
    }
}

impl Default for ProgressContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe wrapper for `ProgressContext`.
pub type SharedProgress = Arc<ProgressContext>;

/// Scoped handle to a running spinner.
pub struct SpinnerGuard {
    pb: ProgressBar,
}

impl SpinnerGuard {
    /// Update the spinner message.
    pub fn set_message(&self, msg: &str) {
        self.pb.set_message(msg.to_string());
    }
}

impl Drop for SpinnerGuard {
    fn drop(&mut self) {
        self.pb.finish_and_clear();
    }
}
