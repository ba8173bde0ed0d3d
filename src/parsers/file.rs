use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use crate::models::Record;
use crate::parsers::record::{ParseStats, PchrParser};
use crate::utils::{open_input, readable_file_size};

/// Records and counters from one PCHR file
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub path: PathBuf,
    /// Size in bytes at the time the file was opened
    pub size: u64,
    pub records: Vec<Record>,
    pub stats: ParseStats,
}

/// Parse a PCHR file into its records
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read, or if the first
/// structural problem is found (missing start marker, unclosed record). The
/// underlying [`PchrError`](crate::PchrError) can be recovered with
/// `downcast_ref`. No partial record list is returned for a failed file.
pub fn parse_pchr_file(path: &Path, parser: &PchrParser) -> Result<ParsedFile> {
    let (file, size) = open_input(path)?;
    info!("Parsing file {}\tFile size: {}", path.display(), readable_file_size(size));

    let mut records_iter = parser.records(BufReader::new(file));
    let mut records = Vec::new();
    for record in records_iter.by_ref() {
        let record = record.with_context(|| format!("Failed to parse {}", path.display()))?;
        records.push(record);
    }
    let stats = *records_iter.stats();

    info!(
        "Parsed {}: {} records, {} leaves ({} dropped)",
        path.display(),
        stats.records,
        stats.leaves,
        stats.dropped_leaves
    );

    Ok(ParsedFile { path: path.to_path_buf(), size, records, stats })
}
