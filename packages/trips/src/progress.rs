//! Progress reporting trait for loading a city's file.
//!
//! Decouples the loader from any rendering backend. The CLI supplies an
//! `indicatif` spinner; tests and library callers use [`NullProgress`].

/// Receives progress updates while records are parsed.
pub trait ProgressCallback {
    /// Advance progress by `delta` records.
    fn inc(&self, delta: u64);

    /// Update the message displayed alongside the progress indicator.
    fn set_message(&self, msg: String);

    /// Mark progress as complete with a final message.
    fn finish(&self, msg: String);

    /// Mark progress as complete and remove the progress indicator.
    fn finish_and_clear(&self);
}

/// A no-op [`ProgressCallback`].
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn inc(&self, _delta: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self, _msg: String) {}
    fn finish_and_clear(&self) {}
}
