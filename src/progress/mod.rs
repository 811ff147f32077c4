//! Progress display for batch lookups.
//!
//! Reporters are pure observers of iteration: they never change the order,
//! values, or length of a batch result. Whether progress is shown at all is
//! decided once at client construction.

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Observer of batch lookup progress.
pub trait ProgressReporter: Send + Sync {
    /// Called once before the batch starts, with the number of addresses.
    fn start(&self, total: u64);

    /// Called after each address has been processed.
    fn tick(&self);

    /// Called once after the batch completes.
    fn finish(&self);
}

/// Reporter used when progress display is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn start(&self, _total: u64) {}

    fn tick(&self) {}

    fn finish(&self) {}
}

/// Terminal progress bar backed by indicatif.
#[derive(Default)]
pub struct BarProgress {
    bar: Mutex<Option<ProgressBar>>,
}

impl BarProgress {
    /// Creates a new progress bar reporter.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for BarProgress {
    fn start(&self, total: u64) {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(bar);
        }
    }

    fn tick(&self) {
        if let Ok(guard) = self.bar.lock() {
            if let Some(bar) = guard.as_ref() {
                bar.inc(1);
            }
        }
    }

    fn finish(&self) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(bar) = guard.take() {
                bar.finish_and_clear();
            }
        }
    }
}

impl std::fmt::Debug for BarProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BarProgress").finish()
    }
}
