//! PCHR Parser - Convert call history record text dumps into typed trees
//!
//! This library parses PCHR files, an indentation-structured text format
//! holding one call history record per `---------version:` ... `-----------------`
//! block. It supports:
//!
//! - Building a [`Node`] tree per record from leading-whitespace depth
//! - Typing leaf values (integer, float, boolean, null, timestamp, text)
//! - Forcing leaf types per field name through a [`FieldRegistry`]
//! - Collapsing repeated sibling blocks (`Name 1`, `Name 2`, ...) into lists
//!
//! # Example
//!
//! ```
//! use pchr_parser::{PchrParser, Value};
//!
//! let input = "---------version:1.0
//!  Label: Demo
//!  CellId: 123
//! -----------------
//! ";
//!
//! let records = PchrParser::standard().parse_str(input)?;
//! assert_eq!(records[0].data.get("CellId"), Some(&Value::Int(123)));
//! # Ok::<(), pchr_parser::PchrError>(())
//! ```

pub mod cli;
pub mod error;
pub mod models;
pub mod parsers;
pub mod utils;

// Re-export commonly used types
pub use error::{LeafNotice, PchrError};
pub use models::{FieldRegistry, Node, Record, Value};
pub use parsers::{ParseStats, ParsedFile, ParserOptions, PchrParser, parse_pchr_file};
pub use utils::readable_file_size;
