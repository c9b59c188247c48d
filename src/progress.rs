//! Progress milestones for a sort run
//!
//! The reporter watches the size of every merge output and records one
//! timestamped entry the first time each threshold is exceeded. Merge sizes
//! rise and fall as the recursion unwinds, so the merge that reports a
//! threshold is simply the first one (in completion order) that goes past
//! it, not necessarily the final merge.

use std::fmt;
use std::time::{Duration, Instant};
use tracing::info;

/// Default sizes at which merge progress is reported
pub const DEFAULT_THRESHOLDS: [usize; 11] = [
    10, 30, 100, 300, 1_000, 3_000, 10_000, 30_000, 100_000, 300_000, 1_000_000,
];

/// Source of elapsed time since the start of a run
pub trait Clock {
    fn elapsed(&self) -> Duration;
}

/// Wall clock backed by `Instant`, started when constructed
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// One line of the run log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogEntry {
    /// Input has been read and split into lines
    ReadComplete { lines: usize, elapsed: Duration },
    /// A merge produced more elements than the next threshold
    Merged { elements: usize, elapsed: Duration },
}

impl LogEntry {
    /// Element count of a merge milestone
    pub fn merged_elements(&self) -> Option<usize> {
        match self {
            LogEntry::Merged { elements, .. } => Some(*elements),
            LogEntry::ReadComplete { .. } => None,
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogEntry::ReadComplete { elapsed, .. } => {
                write!(f, "Finished reading file: {:.6}", elapsed.as_secs_f64())
            }
            LogEntry::Merged { elements, elapsed } => {
                write!(f, "{} elements: {:.6}", elements, elapsed.as_secs_f64())
            }
        }
    }
}

/// Threshold-driven merge progress reporter
#[derive(Debug)]
pub struct ProgressReporter<C: Clock = MonotonicClock> {
    thresholds: Vec<usize>,
    /// Index of the next threshold to watch for
    cursor: usize,
    enabled: bool,
    clock: C,
    log: Vec<LogEntry>,
}

impl ProgressReporter<MonotonicClock> {
    /// Reporter over custom thresholds, clock starting now.
    ///
    /// The list is expected to be strictly ascending; `SortConfig::validate`
    /// enforces that for configured runs.
    pub fn with_thresholds(thresholds: Vec<usize>) -> Self {
        Self::with_clock(thresholds, MonotonicClock::start())
    }
}

impl<C: Clock> ProgressReporter<C> {
    pub fn with_clock(thresholds: Vec<usize>, clock: C) -> Self {
        let enabled = !thresholds.is_empty();
        Self {
            thresholds,
            cursor: 0,
            enabled,
            clock,
            log: Vec::new(),
        }
    }

    /// Record the size of a completed merge
    #[inline]
    pub fn observe_merge(&mut self, output_size: usize) {
        if !self.enabled {
            return;
        }

        // Only the threshold under the cursor is checked; a single large
        // merge advances past at most one threshold.
        if output_size > self.thresholds[self.cursor] {
            self.report(output_size);
        }
    }

    fn report(&mut self, size: usize) {
        let elapsed = self.clock.elapsed();
        info!(elements = size, elapsed_secs = elapsed.as_secs_f64(), "merge milestone");
        self.log.push(LogEntry::Merged {
            elements: size,
            elapsed,
        });

        self.cursor += 1;
        if self.cursor >= self.thresholds.len() {
            self.enabled = false;
        }
    }

    /// Record that the input has been read
    pub fn record_read(&mut self, lines: usize) {
        let elapsed = self.clock.elapsed();
        info!(lines, elapsed_secs = elapsed.as_secs_f64(), "finished reading input");
        self.log.push(LogEntry::ReadComplete { lines, elapsed });
    }

    /// The threshold the next report is waiting for
    pub fn next_threshold(&self) -> Option<usize> {
        if self.enabled {
            self.thresholds.get(self.cursor).copied()
        } else {
            None
        }
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    /// Consume the reporter, returning the accumulated log
    pub fn into_log(self) -> Vec<LogEntry> {
        self.log
    }
}
