//! Progress reporting for batch extraction.
//!
//! [`ProgressCallback`] keeps the batch driver independent of how progress
//! is rendered. The CLI plugs in an `indicatif` bar; tests and library
//! callers use [`NullProgress`].

use std::sync::Arc;

/// Receives progress updates while a directory of reports is processed.
pub trait ProgressCallback: Send + Sync {
    /// Set the total number of files to process.
    fn set_total(&self, total: u64);

    /// Advance progress by `delta` files.
    fn inc(&self, delta: u64);

    /// Update the message displayed alongside the progress indicator.
    fn set_message(&self, msg: String);

    /// Print a line of output without corrupting the progress indicator.
    fn println(&self, line: &str);

    /// Mark progress as complete with a final message.
    fn finish(&self, msg: String);

    /// Mark progress as complete and remove the progress indicator.
    fn finish_and_clear(&self);
}

/// A [`ProgressCallback`] that ignores updates and prints lines straight
/// to stdout.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn set_total(&self, _total: u64) {}
    fn inc(&self, _delta: u64) {}
    fn set_message(&self, _msg: String) {}
    fn println(&self, line: &str) {
        println!("{line}");
    }
    fn finish(&self, _msg: String) {}
    fn finish_and_clear(&self) {}
}

/// Returns a shared [`NullProgress`] instance.
#[must_use]
pub fn null_progress() -> Arc<dyn ProgressCallback> {
    Arc::new(NullProgress)
}
