//! Input helpers shared by every sub-command.

use std::fs;
use std::io::{self, Read as _};
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

/// Read the whole input: the file at `path`, or stdin when `path` is `-`.
///
/// # Errors
///
/// Returns an error if the file or stdin cannot be read.
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    let bytes = if path == Path::new("-") {
        let mut buf = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut buf)
            .context("cannot read stdin")?;
        buf
    } else {
        fs::read(path).with_context(|| format!("cannot read {}", path.display()))?
    };
    debug!("read {} bytes from {}", bytes.len(), display_name(path));
    Ok(bytes)
}

/// Human-readable name for an input path.
pub fn display_name(path: &Path) -> String {
    if path == Path::new("-") {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}
