//! Error types for PCHR parsing.
//!
//! Structural problems ([`PchrError`]) abort the parse of the current input.
//! Per-leaf problems ([`LeafNotice`]) are absorbed where they happen: the
//! affected leaf is dropped or kept as raw text and parsing continues.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PchrError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(
        "Missing start marker at line {line}: expected '---------version:', found '{found}'"
    )]
    MissingStartMarker { line: usize, found: String },

    #[error(
        "Truncated record: input ended before the record opened at line {start_line} was closed"
    )]
    TruncatedRecord { start_line: usize },

    #[error("Unexpected start marker at line {line}: record at line {start_line} was never closed")]
    UnexpectedStartMarker { line: usize, start_line: usize },

    #[error("Nesting too deep at line {line}: more than {limit} levels")]
    NestingTooDeep { line: usize, limit: usize },

    #[error("Line cursor rewound without a mark")]
    RewindWithoutMark,

    #[error("Line cursor rewind limit exceeded: {buffered} bytes buffered, limit is {limit}")]
    RewindLimitExceeded { limit: usize, buffered: usize },

    #[error("Invalid field registry: {0}")]
    InvalidRegistry(String),
}

/// Numeric type a forced field was expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    Int,
    Float,
}

/// Non-fatal problem with a single leaf line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LeafNotice {
    #[error("leaf '{key}' has no value")]
    EmptyValue { key: String },

    #[error("leaf '{key}' expected {kind:?} but found '{value}'")]
    InvalidNumber { key: String, value: String, kind: NumericKind },

    #[error("leaf '{key}' has unrecognized timestamp '{value}', kept as text")]
    InvalidTimestamp { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, PchrError>;
