//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

/// Builder for the text of one PCHR record
pub struct RecordBuilder {
    version: String,
    lines: Vec<String>,
    closed: bool,
}

impl RecordBuilder {
    /// Create a new record with version "1.0" and no body
    pub fn new() -> Self {
        Self { version: "1.0".to_string(), lines: Vec::new(), closed: true }
    }

    /// Set the version text written after the start marker
    pub fn version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    /// Add a `key: value` line at the given depth
    pub fn leaf(mut self, depth: usize, key: &str, value: &str) -> Self {
        self.lines.push(format!("{}{}: {}", " ".repeat(depth), key, value));
        self
    }

    /// Add a nested block line at the given depth
    pub fn block(mut self, depth: usize, name: &str) -> Self {
        self.lines.push(format!("{}{}", " ".repeat(depth), name));
        self
    }

    /// Add an indexed collection header (`name index`) at the given depth
    pub fn header(mut self, depth: usize, name: &str, index: usize) -> Self {
        self.lines.push(format!("{}{} {}", " ".repeat(depth), name, index));
        self
    }

    /// Add a line verbatim
    pub fn raw(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    /// Leave out the end marker
    pub fn unclosed(mut self) -> Self {
        self.closed = false;
        self
    }

    /// Render to PCHR text, newline-terminated
    pub fn to_text(&self) -> String {
        let mut text = format!("---------version:{}\n", self.version);
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        if self.closed {
            text.push_str("-----------------\n");
        }
        text
    }
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Concatenate records into file content
pub fn pchr_text(records: &[RecordBuilder]) -> String {
    records.iter().map(RecordBuilder::to_text).collect()
}

/// Write content to a temporary file
pub fn write_pchr_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes()).expect("Failed to write temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

/// A record exercising every construct of the format
pub fn realistic_record() -> RecordBuilder {
    RecordBuilder::new()
        .version("V100R010")
        .leaf(1, "Label", "CHR")
        .leaf(1, "IMSI", "460001234567890")
        .leaf(1, "CallStartTime", "2014-05-20 13:45:07.089")
        .leaf(1, "CallEndTime", "NULL")
        .leaf(1, "CellId", "12345")
        .block(1, "NetOptInfo")
        .block(1, "RrcInfo")
        .leaf(2, "RrcActCellId", "201")
        .leaf(2, "RrcRFRscp", "-95")
        .leaf(2, "RrcRFEc_N0", "-7.5")
        .leaf(2, "RrcMsgKeyIe", "0A1F")
        .block(1, "ShoInfo")
        .leaf(2, "ShoLabel", "sho1")
        .leaf(2, "ShoActCellId", "301")
        .header(2, "Neighbor", 1)
        .leaf(3, "ConnNCellId", "401")
        .leaf(3, "ConnNCellRscp", "-101")
        .leaf(3, "ConnNCellEc_N0", "-12")
        .header(2, "Neighbor", 2)
        .leaf(3, "ConnNCellId", "402")
        .leaf(3, "ConnNCellRscp", "-103")
        .leaf(3, "ConnNCellEc_N0", "-14.5")
        .block(1, "ShoInfo")
        .leaf(2, "ShoLabel", "sho2")
        .leaf(2, "ShoActCellId", "302")
        .block(1, "Release")
        .leaf(2, "Cause", "NORMAL")
        .leaf(2, "IsDropped", "FALSE")
}
