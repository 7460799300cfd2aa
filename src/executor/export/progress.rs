//! Progress indicator for the JSON save step.
//!
//! The indicator is cosmetic: 100 discrete steps advancing over roughly one
//! second, run before the actual write. It does not measure I/O progress.
//! When disabled (non-interactive output or configuration) the whole delay is
//! skipped.

use std::thread;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Number of discrete progress steps.
const STEPS: u64 = 100;

/// Delay between steps.
const STEP_DELAY: Duration = Duration::from_millis(10);

/// Run the save progress indicator.
///
/// # Arguments
/// * `enabled` - Whether to display the bar; when false this returns
///   immediately with no delay
pub fn run(enabled: bool) {
    if !enabled {
        return;
    }

    let bar = ProgressBar::new(STEPS);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap()
            .progress_chars("#>-"),
    );

    for _ in 0..STEPS {
        bar.inc(1);
        thread::sleep(STEP_DELAY);
    }

    bar.finish_and_clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_disabled_progress_skips_the_delay() {
        let start = Instant::now();
        run(false);
        assert!(start.elapsed() < Duration::from_millis(100));
    }
}
