use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Open a PCHR input file and return it with its size in bytes.
///
/// The size is read from the open handle so it describes the file that is
/// actually parsed, even if the path is replaced in the meantime.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The file metadata cannot be read
/// - The path is not a regular file
pub fn open_input(path: &Path) -> Result<(File, u64)> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open PCHR file: {}", path.display()))?;
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    if !metadata.is_file() {
        bail!("Not a regular file: {}", path.display());
    }

    Ok((file, metadata.len()))
}
