// file: src/pipeline/progress.rs
// description: walk statistics and progress reporting
// reference: uses indicatif for progress bars

use indicatif::{ProgressBar, ProgressStyle};

/// Outcome tallies for one archive walk. The five counters are disjoint:
/// every classified entry lands in exactly one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub included: usize,
    pub skipped_ignored: usize,
    pub skipped_binary: usize,
    pub skipped_invalid_text: usize,
    pub skipped_errors: usize,
}

impl WalkStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skipped(&self) -> usize {
        self.skipped_ignored + self.skipped_binary + self.skipped_invalid_text + self.skipped_errors
    }

    pub fn total(&self) -> usize {
        self.included + self.skipped()
    }

    pub fn inclusion_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.included as f64 / total as f64) * 100.0
    }
}

pub struct ProgressTracker {
    bar: ProgressBar,
}

impl ProgressTracker {
    pub fn new(total_files: usize) -> Self {
        Self::with_color(total_files, true)
    }

    pub fn with_color(total_files: usize, colored: bool) -> Self {
        let bar = ProgressBar::new(total_files as u64);

        if colored {
            bar.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
                    )
                    .expect("Failed to create progress bar template")
                    .progress_chars("█▓▒░"),
            );
        } else {
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({eta}) {msg}")
                    .expect("Failed to create progress bar template")
                    .progress_chars("=>-"),
            );
        }

        Self { bar }
    }

    pub fn inc(&self) {
        self.bar.inc(1);
    }

    pub fn set_message(&self, message: String) {
        self.bar.set_message(message);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_stats_totals() {
        let stats = WalkStats {
            included: 3,
            skipped_ignored: 2,
            skipped_binary: 1,
            skipped_invalid_text: 1,
            skipped_errors: 1,
        };

        assert_eq!(stats.skipped(), 5);
        assert_eq!(stats.total(), 8);
        assert!((stats.inclusion_rate() - 37.5).abs() < 0.001);
    }

    #[test]
    fn test_walk_stats_empty() {
        let stats = WalkStats::new();
        assert_eq!(stats.total(), 0);
        assert_eq!(stats.inclusion_rate(), 0.0);
    }

    #[test]
    fn test_progress_tracker_increments() {
        let tracker = ProgressTracker::with_color(10, false);
        tracker.inc();
        tracker.inc();
        tracker.finish();
    }
}
