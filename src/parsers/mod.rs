//! Parser for PCHR (call history record) text dumps
//!
//! A file is a sequence of records, each opened by a `---------version:` line
//! and closed by a `-----------------` line. Inside a record, nesting is
//! carried only by leading whitespace.
//!
//! # Error Handling Strategy
//!
//! - **Leaf-level problems**: An empty value, an unparseable forced-numeric
//!   value, or an unrecognized timestamp is logged at `trace` level. The leaf
//!   is dropped (or kept as text for timestamps) and parsing continues. Counts
//!   are kept in [`ParseStats`].
//!
//! - **Structural problems**: A missing start marker, a record left open at
//!   end of input, or a rewind beyond the cursor's limit abort the parse of
//!   the whole input with a [`PchrError`](crate::PchrError). Records parsed
//!   before the failure are not returned by [`PchrParser::parse`]; use
//!   [`PchrParser::records`] to consume records as they complete.
//!
//! - **File-level entry point**: [`parse_pchr_file`] wraps structural errors
//!   with `anyhow` context naming the file.

pub mod cursor;
pub mod file;
pub mod leaf;
pub mod lines;
pub mod record;
pub mod tree;

pub use file::{ParsedFile, parse_pchr_file};
pub use record::{ParseStats, ParserOptions, PchrParser, Records};
