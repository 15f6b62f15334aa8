//! Progress display for exhaustive variant export

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static VARIANT_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] {{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks how many variants have been written
///
/// Draws nothing when created hidden, so callers can report unconditionally.
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a visible progress bar for `total` variants of `pattern`
    pub fn new(pattern: &str, total: u64) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(VARIANT_STYLE.clone());
        bar.set_message(pattern.to_string());
        Self { bar }
    }

    /// Create a progress tracker that never draws
    pub fn hidden(total: u64) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(total);
        Self { bar }
    }

    /// Record one written variant
    pub fn advance(&self) {
        self.bar.inc(1);
    }

    /// Variants recorded so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Clean up the display
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
