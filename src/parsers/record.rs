//! Record assembly: splits a PCHR stream into start-marker ... end-marker
//! units and builds one tree per unit.

use std::io::{BufRead, Cursor};
use std::iter::FusedIterator;

use log::debug;

use crate::error::{PchrError, Result};
use crate::models::{FieldRegistry, Record};
use crate::parsers::cursor::{DEFAULT_REWIND_LIMIT, LineCursor};
use crate::parsers::lines::{is_blank, is_end_marker, start_marker_version};
use crate::parsers::tree::{DEFAULT_MAX_DEPTH, TreeBuilder};

/// Counters collected while parsing one input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub records: usize,
    /// Leaves stored in a record (including text fallbacks)
    pub leaves: usize,
    /// Leaves stored as raw text after a failed timestamp parse
    pub fallback_leaves: usize,
    /// Leaves omitted because of an empty or unparseable value
    pub dropped_leaves: usize,
    pub lines: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Maximum bytes the line cursor retains for a rewind
    pub rewind_limit: usize,
    /// Maximum number of nested blocks in one record, the root included
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self { rewind_limit: DEFAULT_REWIND_LIMIT, max_depth: DEFAULT_MAX_DEPTH }
    }
}

/// Parser for PCHR text. Holds only read-only configuration, so one
/// instance can serve any number of inputs, including concurrently.
#[derive(Debug, Clone)]
pub struct PchrParser {
    registry: FieldRegistry,
    options: ParserOptions,
}

impl PchrParser {
    pub fn new(registry: FieldRegistry) -> Self {
        Self::with_options(registry, ParserOptions::default())
    }

    pub fn with_options(registry: FieldRegistry, options: ParserOptions) -> Self {
        Self { registry, options }
    }

    /// Parser using [`FieldRegistry::standard`]
    pub fn standard() -> Self {
        Self::new(FieldRegistry::standard())
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// Lazily parse records from `reader`
    pub fn records<R: BufRead>(&self, reader: R) -> Records<'_, R> {
        Records {
            parser: self,
            cursor: LineCursor::with_rewind_limit(reader, self.options.rewind_limit),
            stats: ParseStats::default(),
            done: false,
        }
    }

    /// Parse every record in `reader`.
    ///
    /// # Errors
    ///
    /// Returns the first structural error; records parsed before it are discarded.
    pub fn parse<R: BufRead>(&self, reader: R) -> Result<Vec<Record>> {
        self.records(reader).collect()
    }

    pub fn parse_str(&self, input: &str) -> Result<Vec<Record>> {
        self.parse(Cursor::new(input.as_bytes()))
    }
}

/// Iterator over the records of one input.
///
/// Yields each record as soon as its end marker is read. After an error the
/// iterator yields nothing more.
pub struct Records<'p, R> {
    parser: &'p PchrParser,
    cursor: LineCursor<R>,
    stats: ParseStats,
    done: bool,
}

impl<R: BufRead> Records<'_, R> {
    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    fn read_record(&mut self) -> Result<Option<Record>> {
        let start = loop {
            match self.cursor.next()? {
                None => return Ok(None),
                Some(line) if is_blank(&line) => continue,
                Some(line) => break line,
            }
        };
        let start_line = self.cursor.line_number();

        let Some(version) = start_marker_version(&start).map(str::to_string) else {
            return Err(PchrError::MissingStartMarker { line: start_line, found: start });
        };

        let data =
            TreeBuilder::new(&mut self.cursor, &self.parser.registry, &mut self.stats, start_line)
                .with_max_depth(self.parser.options.max_depth)
                .build(None)?;

        match self.cursor.next()? {
            Some(line) if is_end_marker(&line) => {}
            _ => return Err(PchrError::TruncatedRecord { start_line }),
        }

        self.stats.records += 1;
        self.stats.lines = self.cursor.line_number();
        debug!(
            "Record {} (version {}) spans lines {}-{}",
            self.stats.records, version, start_line, self.stats.lines
        );

        Ok(Some(Record { version, data }))
    }
}

impl<R: BufRead> Iterator for Records<'_, R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                self.stats.lines = self.cursor.line_number();
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: BufRead> FusedIterator for Records<'_, R> {}
