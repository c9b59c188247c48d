//! Case-insensitive merge sort of text file lines
//!
//! Reads a file, keeps its trimmed non-empty lines, sorts them with a
//! top-down merge sort that ignores ASCII case, and records timing
//! milestones the first time merge outputs grow past each of a list of
//! size thresholds.
//!
//! ```
//! use file_merge_sort::{sort_lines, Traversal};
//!
//! let input = vec!["banana".to_string(), "Apple".to_string(), "cherry".to_string()];
//! let outcome = sort_lines(input, &[10, 30], Traversal::Recursive);
//! assert_eq!(outcome.lines, vec!["Apple", "banana", "cherry"]);
//! assert!(outcome.log.is_empty());
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]

pub mod error;
pub mod config;

pub mod compare;
pub mod merge_sort;
pub mod progress;

pub mod input;
pub mod output;

// Re-export commonly used types
pub use config::{InputSource, OutputFormat, SortConfig, SortConfigBuilder, Traversal};
pub use error::{SortError, SortResult};
pub use progress::{LogEntry, ProgressReporter, DEFAULT_THRESHOLDS};

use output::ReportOptions;
use tracing::debug;

/// Exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const SORT_FAILURE: i32 = 2;

/// Sorted lines together with the log produced while sorting them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOutcome {
    pub lines: Vec<String>,
    pub log: Vec<LogEntry>,
}

/// Sort already-read lines, reporting against `thresholds`
pub fn sort_lines(lines: Vec<String>, thresholds: &[usize], traversal: Traversal) -> SortOutcome {
    let mut reporter = ProgressReporter::with_thresholds(thresholds.to_vec());
    let lines = merge_sort::merge_sort(lines, traversal, &mut reporter);
    SortOutcome {
        lines,
        log: reporter.into_log(),
    }
}

/// Read, sort and report according to `config`
pub fn run(config: &SortConfig) -> SortResult<i32> {
    config.validate()?;

    // The clock starts before reading so the log covers the whole run
    let mut reporter = ProgressReporter::with_thresholds(config.thresholds.clone());

    let lines = input::read_lines(&config.input)?;
    reporter.record_read(lines.len());

    let sorted = merge_sort::merge_sort(lines, config.traversal, &mut reporter);
    let milestones = reporter
        .log()
        .iter()
        .filter_map(LogEntry::merged_elements)
        .count();
    debug!(
        lines = sorted.len(),
        milestones,
        next_threshold = ?reporter.next_threshold(),
        "sort finished"
    );

    let options = ReportOptions {
        format: config.format,
        show_log: config.show_log,
    };
    output::emit_report(
        config.output_file.as_deref(),
        &sorted,
        reporter.log(),
        options,
    )?;

    Ok(EXIT_SUCCESS)
}
