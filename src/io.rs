//! File I/O for documents.

use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

// Suggested capacity of internal buffers for readers and writers.
const BUFFER_SIZE: usize = 65_536;

/// Suffix appended to a path to form the temporary file written during a save.
const TMP_SUFFIX: &str = ".tmp";

/// Reads the file at `path` and returns its lines without line terminators.
///
/// A final line terminator does not produce an additional empty line.
pub fn read_file(path: &str) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    BufReader::with_capacity(BUFFER_SIZE, file)
        .lines()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::io(path, e))
}

/// Writes `content` to the file at `path`, returning the number of bytes written.
///
/// Content is first written to a temporary file alongside `path`, which is then
/// renamed to `path` once all bytes have been flushed. The file at `path` is left
/// untouched if any step fails.
pub fn write_file(path: &str, content: &str) -> Result<usize> {
    let tmp_path = format!("{path}{TMP_SUFFIX}");
    let file = File::create(&tmp_path).map_err(|e| Error::io(&tmp_path, e))?;
    let mut writer = BufWriter::with_capacity(BUFFER_SIZE, file);
    writer
        .write_all(content.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| Error::io(&tmp_path, e))?;
    drop(writer);
    fs::rename(&tmp_path, Path::new(path)).map_err(|e| Error::io(path, e))?;
    Ok(content.len())
}
