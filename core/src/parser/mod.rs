//! Line-oriented reader for frequency/angle scattering-response files.
//!
//! Files are scanned once, top to bottom. A `#FREQUENCY` header opens a new
//! block and closes the previous one; other `#` lines are comments; lines
//! starting with a digit or sign carry `theta phi re im ...` samples.

pub mod line;
pub mod reader;

use serde::{Deserialize, Serialize};
use std::path::Path;

pub use line::LineKind;
pub use reader::ScatteringParser;

use crate::scattering::ScatteringMatrix;

/// Shape a parsed file is validated against. Unset counts are not checked,
/// except that every block must match the angle count of block 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedLayout {
    pub frequencies: Option<usize>,
    pub angles: Option<usize>,
}

impl ExpectedLayout {
    pub fn new(frequencies: usize, angles: usize) -> Self {
        Self {
            frequencies: Some(frequencies),
            angles: Some(angles),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("failed to read {origin}: {source}")]
    Io {
        origin: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid header pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("line {line}: frequency header carries no numeric value")]
    MalformedFrequency { line: usize },
    #[error("line {line}: data line appears before any frequency header")]
    OrphanData { line: usize },
    #[error(
        "incomplete data in frequency block {block}, line {row} (file line {line}): \
         expected at least 4 values, found {found}"
    )]
    IncompleteData {
        block: usize,
        row: usize,
        line: usize,
        found: usize,
    },
    #[error("frequency count mismatch: expected {expected}, found {found}")]
    FrequencyCountMismatch { expected: usize, found: usize },
    #[error("angle count mismatch in frequency block {block}: expected {expected}, found {found}")]
    AngleCountMismatch {
        block: usize,
        expected: usize,
        found: usize,
    },
    #[error("no frequency block found")]
    Empty,
    #[error("inconsistent matrix shape: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Parse one scattering-response file.
pub fn parse_file(path: impl AsRef<Path>, layout: ExpectedLayout) -> ParseResult<ScatteringMatrix> {
    ScatteringParser::new(layout)?.parse_file(path)
}
