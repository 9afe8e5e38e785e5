// src/window.rs
//! Descending, contiguous time windows walked backward from a fixed "now".

use serde::{Deserialize, Serialize};

/// Default window length: 30 minutes.
pub const DEFAULT_WINDOW_SECS: u32 = 30 * 60;
/// Default number of windows walked per run.
pub const DEFAULT_ITERATIONS: usize = 500;
/// Upper bound on windows per run.
pub const MAX_ITERATIONS: usize = 5_000;

/// Window bounds, both sent to the service as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: i64, // unix seconds
    pub end: i64,   // unix seconds
}

impl TimeWindow {
    pub fn len_secs(&self) -> i64 {
        self.end - self.start
    }
}

/// Iterator over windows: `[now-step, now]`, `[now-2*step, now-step]`, ...
#[derive(Debug, Clone)]
pub struct TimeWindows {
    cursor: i64,
    step: i64,
    remaining: usize,
}

impl TimeWindows {
    pub fn new(now: i64, step_secs: u32, count: usize) -> Self {
        Self {
            cursor: now,
            step: i64::from(step_secs),
            remaining: count,
        }
    }

    /// Anchors the sequence at the current wall clock.
    pub fn ending_now(step_secs: u32, count: usize) -> Self {
        Self::new(chrono::Utc::now().timestamp(), step_secs, count)
    }
}

impl Iterator for TimeWindows {
    type Item = TimeWindow;

    fn next(&mut self) -> Option<TimeWindow> {
        if self.remaining == 0 {
            return None;
        }
        let window = TimeWindow {
            start: self.cursor - self.step,
            end: self.cursor,
        };
        self.cursor = window.start;
        self.remaining -= 1;
        Some(window)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for TimeWindows {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_two_windows_walk_back_from_now() {
        let now = 1_700_000_000;
        let w: Vec<TimeWindow> = TimeWindows::new(now, 1800, 2).collect();
        assert_eq!(
            w,
            vec![
                TimeWindow {
                    start: now - 1800,
                    end: now
                },
                TimeWindow {
                    start: now - 3600,
                    end: now - 1800
                },
            ]
        );
    }

    #[test]
    fn windows_are_contiguous_and_descending() {
        let windows: Vec<TimeWindow> = TimeWindows::new(10_000, 60, 50).collect();
        assert_eq!(windows.len(), 50);
        for pair in windows.windows(2) {
            assert_eq!(pair[1].end, pair[0].start);
            assert!(pair[1].start < pair[0].start);
        }
        assert!(windows.iter().all(|w| w.len_secs() == 60));
    }

    #[test]
    fn zero_iterations_yields_nothing() {
        let mut it = TimeWindows::new(1_000, 1800, 0);
        assert_eq!(it.len(), 0);
        assert!(it.next().is_none());
    }
}
