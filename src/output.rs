//! Presentation of a finished run: sorted lines, then the timing log

use crate::config::OutputFormat;
use crate::error::{SortContext, SortResult};
use crate::progress::LogEntry;
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// What to print and how
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub format: OutputFormat,
    pub show_log: bool,
}

/// Write the sorted lines and, if requested, the log to `output`
pub fn write_report<W: Write>(
    output: &mut W,
    lines: &[String],
    log: &[LogEntry],
    options: ReportOptions,
) -> io::Result<()> {
    match options.format {
        OutputFormat::Lines => {
            for line in lines {
                output.write_all(line.as_bytes())?;
                output.write_all(b"\n")?;
            }
        }
        OutputFormat::Indexed => {
            writeln!(output, "Array")?;
            writeln!(output, "(")?;
            for (index, line) in lines.iter().enumerate() {
                writeln!(output, "    [{index}] => {line}")?;
            }
            writeln!(output, ")")?;
        }
    }

    if options.show_log {
        writeln!(output)?;
        for entry in log {
            writeln!(output, "{entry}")?;
        }
    }

    output.flush()
}

/// Write the report to a file, or to stdout when no file is given.
///
/// A reader closing stdout early is not an error.
pub fn emit_report(
    output_file: Option<&str>,
    lines: &[String],
    log: &[LogEntry],
    options: ReportOptions,
) -> SortResult<()> {
    match output_file {
        Some(path) => {
            let file = File::create(path).with_file_context(path)?;
            let mut output = BufWriter::new(file);
            write_report(&mut output, lines, log, options)
                .with_context(|| format!("writing {path}"))
        }
        None => {
            let mut output = BufWriter::new(io::stdout().lock());
            match write_report(&mut output, lines, log, options) {
                Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
                result => result.with_context(|| "writing standard output".to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    fn sample_log() -> Vec<LogEntry> {
        vec![
            LogEntry::ReadComplete {
                lines: 3,
                elapsed: Duration::from_millis(2),
            },
            LogEntry::Merged {
                elements: 16,
                elapsed: Duration::from_millis(5),
            },
        ]
    }

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn render(lines: &[String], log: &[LogEntry], options: ReportOptions) -> String {
        let mut buffer = Vec::new();
        write_report(&mut buffer, lines, log, options).expect("Failed to write report");
        String::from_utf8(buffer).expect("report is not UTF-8")
    }

    #[test]
    fn test_plain_lines_with_log() {
        let options = ReportOptions {
            format: OutputFormat::Lines,
            show_log: true,
        };
        let rendered = render(&lines(&["apple", "Apple", "banana"]), &sample_log(), options);
        assert_eq!(
            rendered,
            "apple\nApple\nbanana\n\nFinished reading file: 0.002000\n16 elements: 0.005000\n"
        );
    }

    #[test]
    fn test_log_hidden() {
        let options = ReportOptions {
            format: OutputFormat::Lines,
            show_log: false,
        };
        let rendered = render(&lines(&["a", "b"]), &sample_log(), options);
        assert_eq!(rendered, "a\nb\n");
    }

    #[test]
    fn test_indexed_format() {
        let options = ReportOptions {
            format: OutputFormat::Indexed,
            show_log: false,
        };
        let rendered = render(&lines(&["apple", "cherry"]), &[], options);
        assert_eq!(rendered, "Array\n(\n    [0] => apple\n    [1] => cherry\n)\n");
    }

    #[test]
    fn test_empty_result() {
        let options = ReportOptions {
            format: OutputFormat::Lines,
            show_log: true,
        };
        assert_eq!(render(&[], &[], options), "\n");
    }

    #[test]
    fn test_emit_report_to_file() -> SortResult<()> {
        let temp_dir = TempDir::new()?;
        let output_file = temp_dir.path().join("sorted.txt");
        let path = output_file.to_string_lossy().to_string();

        let options = ReportOptions {
            format: OutputFormat::Lines,
            show_log: false,
        };
        emit_report(Some(&path), &lines(&["x", "y"]), &sample_log(), options)?;

        assert_eq!(fs::read_to_string(&output_file)?, "x\ny\n");
        Ok(())
    }
}
