//! Convert command handlers

use anyhow::{bail, Result};
use loadout::{ConvertError, ConvertOptions, ErrorKind};
use std::path::{Path, PathBuf};

use crate::file_utils::{collect_files_with_extension, read_input, write_output};

/// Handle `convert`: a single file goes to `output` or stdout, a directory
/// is converted file by file
pub fn handle(input: &Path, output: Option<&Path>, options: &ConvertOptions) -> Result<()> {
    if input.is_dir() {
        return convert_dir(input, output, options);
    }

    let xml = convert_file(input, options)?;
    match output {
        Some(path) => {
            write_output(path, &xml)?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{}", xml),
    }

    Ok(())
}

/// Read and convert one loadout file
pub fn convert_file(input: &Path, options: &ConvertOptions) -> Result<String> {
    let bytes = read_input(input)?;
    tracing::debug!(input = %input.display(), bytes = bytes.len(), "converting");

    loadout::convert_bytes(&bytes, options).map_err(|e| describe(e, input))
}

fn describe(error: ConvertError, input: &Path) -> anyhow::Error {
    let summary = match error.kind() {
        ErrorKind::Parse => "is not valid JSON",
        ErrorKind::Schema => "is not a loadout export",
        ErrorKind::Structure => "cannot be laid out as XML",
    };
    anyhow::Error::new(error).context(format!("{} {}", input.display(), summary))
}

fn convert_dir(dir: &Path, output_dir: Option<&Path>, options: &ConvertOptions) -> Result<()> {
    let files = collect_files_with_extension(dir, &["json"])?;
    if files.is_empty() {
        bail!("No .json files found in {}", dir.display());
    }

    let mut failed = 0usize;
    for file in &files {
        let target = xml_target(file, dir, output_dir);
        let result = convert_file(file, options).and_then(|xml| write_output(&target, &xml));

        match result {
            Ok(()) => eprintln!("{} -> {}", file.display(), target.display()),
            Err(e) => {
                eprintln!("  Failed: {:#}", e);
                failed += 1;
            }
        }
    }

    eprintln!("Converted {} of {} files", files.len() - failed, files.len());

    if failed > 0 {
        bail!("{} file(s) failed to convert", failed);
    }
    Ok(())
}

/// Where the XML for `file` goes: next to it, or mirrored under `output_dir`
fn xml_target(file: &Path, root: &Path, output_dir: Option<&Path>) -> PathBuf {
    match output_dir {
        Some(out) => out
            .join(file.strip_prefix(root).unwrap_or(file))
            .with_extension("xml"),
        None => file.with_extension("xml"),
    }
}
