//! File system helpers for reading inputs and writing outputs

use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Marker path that reads from stdin
pub const STDIN: &str = "-";

/// Read an input file, or stdin when the path is `-`
pub fn read_input(input: &Path) -> Result<Vec<u8>> {
    if input == Path::new(STDIN) {
        let mut buffer = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buffer)
            .context("Failed to read stdin")?;
        return Ok(buffer);
    }

    fs::read(input).with_context(|| format!("Failed to read {}", input.display()))
}

/// Write a file, creating parent directories as needed
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

/// Collect files under a directory tree whose extension matches, sorted by path
///
/// Extension should not include the dot (e.g., "json" not ".json").
pub fn collect_files_with_extension(path: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in walkdir::WalkDir::new(path).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", path.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let matches = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| extensions.iter().any(|ext| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false);

        if matches {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
