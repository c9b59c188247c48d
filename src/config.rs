//! Configuration management for sort runs

use crate::error::{SortError, SortResult};
use crate::progress::DEFAULT_THRESHOLDS;
use itertools::Itertools;
use std::path::PathBuf;
use std::str::FromStr;

/// Where input lines come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// `-` means stdin, anything else is a path
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(PathBuf::from(arg))
        }
    }

    /// Name used in messages and errors
    pub fn display_name(&self) -> String {
        match self {
            InputSource::Stdin => "-".to_string(),
            InputSource::File(path) => path.display().to_string(),
        }
    }
}

/// How the split tree is walked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// Plain call-stack recursion
    Recursive,
    /// Explicit heap-allocated work stack, no recursion
    WorkStack,
}

/// Layout of the sorted lines in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per element
    Lines,
    /// Indexed array dump: `[0] => line`
    Indexed,
}

/// Main configuration structure for a sort run
#[derive(Debug, Clone)]
pub struct SortConfig {
    /// Input to read lines from
    pub input: InputSource,
    /// Output file path (stdout when unset)
    pub output_file: Option<String>,
    /// Merge sizes that trigger a progress entry, strictly ascending
    pub thresholds: Vec<usize>,
    pub traversal: Traversal,
    pub format: OutputFormat,
    /// Print the timing log after the sorted lines
    pub show_log: bool,
    /// Diagnostic verbosity (0 = warnings only)
    pub verbose: u8,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            input: InputSource::Stdin,
            output_file: None,
            thresholds: DEFAULT_THRESHOLDS.to_vec(),
            traversal: Traversal::Recursive,
            format: OutputFormat::Lines,
            show_log: true,
            verbose: 0,
        }
    }
}

impl SortConfig {
    /// Validate configuration for consistency
    pub fn validate(&self) -> SortResult<()> {
        if let Some((a, b)) = self
            .thresholds
            .iter()
            .tuple_windows()
            .find(|(a, b)| a >= b)
        {
            return Err(SortError::invalid_thresholds(&format!(
                "thresholds must be strictly ascending ({a} is followed by {b})"
            )));
        }

        if let Some(output) = &self.output_file {
            if output.is_empty() {
                return Err(SortError::parse_error("output file name is empty"));
            }
        }

        Ok(())
    }
}

/// Parse a comma separated threshold list.
///
/// An empty (or all-blank) list is valid and disables progress reporting.
pub fn parse_thresholds(list: &str) -> SortResult<Vec<usize>> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.replace('_', "")
                .parse::<usize>()
                .map_err(|_| SortError::parse_error(&format!("invalid threshold: {item}")))
        })
        .collect()
}

impl FromStr for Traversal {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "recursive" | "recursion" => Ok(Traversal::Recursive),
            "stack" | "work-stack" | "iterative" => Ok(Traversal::WorkStack),
            _ => Err(SortError::parse_error(&format!("unknown traversal: {s}"))),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lines" | "plain" => Ok(OutputFormat::Lines),
            "indexed" | "array" => Ok(OutputFormat::Indexed),
            _ => Err(SortError::parse_error(&format!("unknown output format: {s}"))),
        }
    }
}

/// Builder pattern for creating configurations
pub struct SortConfigBuilder {
    config: SortConfig,
}

impl SortConfigBuilder {
    /// Start building a new configuration
    pub fn new() -> Self {
        Self {
            config: SortConfig::default(),
        }
    }

    pub fn input(mut self, input: InputSource) -> Self {
        self.config.input = input;
        self
    }

    /// Set output file
    pub fn output_file(mut self, file: String) -> Self {
        self.config.output_file = Some(file);
        self
    }

    pub fn thresholds(mut self, thresholds: Vec<usize>) -> Self {
        self.config.thresholds = thresholds;
        self
    }

    pub fn traversal(mut self, traversal: Traversal) -> Self {
        self.config.traversal = traversal;
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.config.format = format;
        self
    }

    /// Suppress the timing log
    pub fn hide_log(mut self) -> Self {
        self.config.show_log = false;
        self
    }

    pub fn verbose(mut self, level: u8) -> Self {
        self.config.verbose = level;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> SortResult<SortConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for SortConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
