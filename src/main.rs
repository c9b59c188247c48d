//! Command-line front end for the case-insensitive file merge sort

use clap::{Arg, ArgAction, Command};
use std::process;
use tracing_subscriber::EnvFilter;

use file_merge_sort::{
    config::{
        parse_thresholds, InputSource, OutputFormat, SortConfig, SortConfigBuilder, Traversal,
    },
    error::SortResult,
    run,
};

fn main() {
    let result = run_cli();
    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("mergesort: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn run_cli() -> SortResult<i32> {
    let matches = build_cli().get_matches();

    let config = parse_config_from_matches(&matches)?;
    init_tracing(config.verbose);

    run(&config)
}

fn build_cli() -> Command {
    Command::new("mergesort")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Sort the lines of a text file, ignoring case")
        .long_about("Sort the non-empty lines of a text file case-insensitively with a merge sort. \n\nAfter the sorted lines a timing log is printed, with one entry when the file has been read and one the first time a merge produces more elements than each progress threshold.")
        .arg(Arg::new("file")
            .help("Input file (use '-' or omit for stdin)")
            .value_name("FILE"))
        .arg(Arg::new("output")
            .short('o')
            .long("output")
            .help("Write result to FILE instead of standard output")
            .value_name("FILE"))
        .arg(Arg::new("thresholds")
            .long("thresholds")
            .help("Comma separated merge sizes that trigger a log entry")
            .long_help("Comma separated, strictly ascending merge sizes. A log entry is written the first time a merge produces more elements than the next size in the list. An empty list disables progress entries.")
            .value_name("LIST"))
        .arg(Arg::new("traversal")
            .long("traversal")
            .help("How to walk the split tree")
            .value_name("MODE")
            .value_parser(["recursive", "stack"])
            .default_value("recursive"))
        .arg(Arg::new("format")
            .long("format")
            .help("Layout of the sorted lines")
            .value_name("FORMAT")
            .value_parser(["lines", "indexed"])
            .default_value("lines"))
        .arg(Arg::new("no-log")
            .short('q')
            .long("no-log")
            .help("Do not print the timing log")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .help("Print diagnostics to stderr (repeat for more)")
            .action(ArgAction::Count))
}

/// Parse configuration from command line matches
fn parse_config_from_matches(matches: &clap::ArgMatches) -> SortResult<SortConfig> {
    let mut builder = SortConfigBuilder::new();

    if let Some(file) = matches.get_one::<String>("file") {
        builder = builder.input(InputSource::from_arg(file));
    }

    if let Some(output) = matches.get_one::<String>("output") {
        builder = builder.output_file(output.clone());
    }

    if let Some(list) = matches.get_one::<String>("thresholds") {
        builder = builder.thresholds(parse_thresholds(list)?);
    }

    if let Some(traversal) = matches.get_one::<String>("traversal") {
        builder = builder.traversal(traversal.parse::<Traversal>()?);
    }

    if let Some(format) = matches.get_one::<String>("format") {
        builder = builder.format(format.parse::<OutputFormat>()?);
    }

    if matches.get_flag("no-log") {
        builder = builder.hide_log();
    }

    // Validates the final configuration
    builder.verbose(matches.get_count("verbose")).build()
}

/// Install the stderr subscriber; `RUST_LOG` wins over `-v`
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("file_merge_sort={default_level}")));

    // A subscriber may already be installed when embedded; keep that one
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_basic_config() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(["mergesort", "words.txt"])
            .expect("Failed to parse test arguments");

        let config = parse_config_from_matches(&matches).expect("Failed to parse test config");

        assert_eq!(config.input, InputSource::File(PathBuf::from("words.txt")));
        assert_eq!(config.traversal, Traversal::Recursive);
        assert_eq!(config.format, OutputFormat::Lines);
        assert!(config.show_log);
        assert_eq!(config.output_file, None);
    }

    #[test]
    fn test_parse_complex_config() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from([
                "mergesort",
                "--thresholds",
                "5,50,500",
                "--traversal",
                "stack",
                "--format",
                "indexed",
                "-q",
                "-vv",
                "-o",
                "output.txt",
                "-",
            ])
            .expect("Failed to parse test arguments");

        let config = parse_config_from_matches(&matches).expect("Failed to parse test config");

        assert_eq!(config.input, InputSource::Stdin);
        assert_eq!(config.thresholds, vec![5, 50, 500]);
        assert_eq!(config.traversal, Traversal::WorkStack);
        assert_eq!(config.format, OutputFormat::Indexed);
        assert!(!config.show_log);
        assert_eq!(config.verbose, 2);
        assert_eq!(config.output_file, Some("output.txt".to_string()));
    }

    #[test]
    fn test_unordered_thresholds_rejected() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(["mergesort", "--thresholds", "100,10"])
            .expect("Failed to parse test arguments");

        assert!(parse_config_from_matches(&matches).is_err());
    }

    #[test]
    fn test_bad_threshold_number_rejected() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(["mergesort", "--thresholds", "10,lots"])
            .expect("Failed to parse test arguments");

        assert!(parse_config_from_matches(&matches).is_err());
    }

    #[test]
    fn test_empty_threshold_list_accepted() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(["mergesort", "--thresholds", ""])
            .expect("Failed to parse test arguments");

        let config = parse_config_from_matches(&matches).expect("Failed to parse test config");
        assert!(config.thresholds.is_empty());
    }

    #[test]
    fn test_unknown_traversal_rejected_by_cli() {
        let app = build_cli();
        assert!(app
            .try_get_matches_from(["mergesort", "--traversal", "sideways"])
            .is_err());
    }
}
