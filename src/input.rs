use crate::config::InputSource;
use crate::error::{SortContext, SortError, SortResult};
use memmap2::Mmap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

/// Characters stripped from both ends of every line
const TRIM_CHARS: [char; 6] = [' ', '\t', '\n', '\r', '\0', '\x0B'];

/// Read the input and return its trimmed, non-empty lines in source order
pub fn read_lines(source: &InputSource) -> SortResult<Vec<String>> {
    let lines = match source {
        InputSource::Stdin => {
            let mut contents = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut contents)
                .with_context(|| "reading standard input".to_string())?;
            split_lines(&contents, "-")?
        }
        InputSource::File(path) => read_file_lines(path)?,
    };

    debug!(input = %source.display_name(), lines = lines.len(), "read input");
    Ok(lines)
}

/// Read a file through a memory map
fn read_file_lines(path: &Path) -> SortResult<Vec<String>> {
    let name = path.display().to_string();

    if path.is_dir() {
        return Err(SortError::is_directory(&name));
    }

    let file = File::open(path).with_file_context(&name)?;
    let len = file.metadata().with_file_context(&name)?.len();
    if len == 0 {
        return Ok(Vec::new());
    }

    // SAFETY: the map is only read while this function runs and every line is
    // copied into an owned String before the map is dropped.
    let mmap = unsafe { Mmap::map(&file) }.with_file_context(&name)?;
    split_lines(&mmap, &name)
}

/// Split raw bytes into trimmed, non-empty lines
pub fn split_lines(data: &[u8], name: &str) -> SortResult<Vec<String>> {
    let text = std::str::from_utf8(data).map_err(|_| SortError::invalid_utf8(name))?;

    Ok(text
        .split('\n')
        .map(|line| line.trim_matches(&TRIM_CHARS[..]))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
