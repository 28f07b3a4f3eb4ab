//! Tuning parameters for the collector.
//!
//! Scaled down from the teacher's `fgc::GcConfig` (which tunes pause
//! targets, generation ratios, region sizes, and a GC thread pool for a
//! concurrent collector): this collector is stop-the-world and
//! single-generational, so only the threshold that triggers a cycle is
//! configurable.

#[derive(Debug, Clone)]
pub struct GcConfig {
    /// `bytes_allocated` value that triggers the first collection cycle.
    /// Doubled after every sweep (`threshold <- 2 * bytes_allocated`),
    /// so this only bounds how much garbage accumulates before the very
    /// first run.
    pub initial_threshold: usize,
}

impl Default for GcConfig {
    fn default() -> Self {
        Self {
            // Small enough that a test program allocating a handful of
            // objects/strings will actually exercise a collection cycle,
            // large enough that `console.log`-only scripts never trigger
            // one.
            initial_threshold: 64 * 1024,
        }
    }
}
