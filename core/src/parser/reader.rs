use log::debug;
use ndarray::Array2;
use num_complex::Complex64;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::line::{leading_values, LineKind};
use super::{ExpectedLayout, ParseError, ParseResult};
use crate::scattering::{FrequencyBlock, ScatteringMatrix};

const FLOAT_PATTERN: &str = r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?";
const DATA_COLUMNS: usize = 4;

/// Single-pass parser for scattering-response text.
pub struct ScatteringParser {
    layout: ExpectedLayout,
    float: Regex,
}

/// Rows accumulated so far; the open block is finalised into it.
#[derive(Default)]
struct ScanState {
    current: Option<FrequencyBlock>,
    frequencies: Vec<f64>,
    angles: Option<Vec<f64>>,
    amplitudes: Vec<Complex64>,
}

impl ScatteringParser {
    pub fn new(layout: ExpectedLayout) -> ParseResult<Self> {
        Ok(Self {
            layout,
            float: Regex::new(FLOAT_PATTERN)?,
        })
    }

    pub fn layout(&self) -> ExpectedLayout {
        self.layout
    }

    pub fn parse_file(&self, path: impl AsRef<Path>) -> ParseResult<ScatteringMatrix> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let file = File::open(path).map_err(|source| ParseError::Io {
            origin: origin.clone(),
            source,
        })?;
        // The handle lives in the reader and is dropped on every return path.
        self.parse_reader(BufReader::new(file), &origin)
    }

    pub fn parse_str(&self, content: &str) -> ParseResult<ScatteringMatrix> {
        self.parse_reader(content.as_bytes(), "<memory>")
    }

    pub fn parse_reader<R: BufRead>(&self, reader: R, origin: &str) -> ParseResult<ScatteringMatrix> {
        let mut state = ScanState::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| ParseError::Io {
                origin: origin.to_string(),
                source,
            })?;
            let line_number = index + 1;

            match LineKind::classify(&line) {
                LineKind::FrequencyHeader(payload) => {
                    let frequency = self
                        .float
                        .find(payload)
                        .and_then(|token| token.as_str().parse::<f64>().ok())
                        .ok_or(ParseError::MalformedFrequency { line: line_number })?;
                    if let Some(block) = state.current.take() {
                        self.finalize(&mut state, block)?;
                    }
                    state.current = Some(FrequencyBlock::new(frequency));
                }
                LineKind::Data(payload) => {
                    let block_index = state.frequencies.len();
                    let block = state
                        .current
                        .as_mut()
                        .ok_or(ParseError::OrphanData { line: line_number })?;
                    let values = leading_values(payload, DATA_COLUMNS);
                    if values.len() < DATA_COLUMNS {
                        return Err(ParseError::IncompleteData {
                            block: block_index,
                            row: block.len(),
                            line: line_number,
                            found: values.len(),
                        });
                    }
                    block.push(values[0], values[2], values[3]);
                }
                LineKind::Comment | LineKind::Ignored => {}
            }
        }

        if let Some(block) = state.current.take() {
            self.finalize(&mut state, block)?;
        }
        self.assemble(state, origin)
    }

    fn finalize(&self, state: &mut ScanState, block: FrequencyBlock) -> ParseResult<()> {
        let index = state.frequencies.len();
        let expected = self
            .layout
            .angles
            .or_else(|| state.angles.as_ref().map(Vec::len))
            .unwrap_or(block.len());
        if block.len() != expected {
            return Err(ParseError::AngleCountMismatch {
                block: index,
                expected,
                found: block.len(),
            });
        }

        if state.angles.is_none() {
            state.angles = Some(block.angles_deg.clone());
        }
        state.amplitudes.extend(block.amplitudes());
        state.frequencies.push(block.frequency_hz);
        Ok(())
    }

    fn assemble(&self, state: ScanState, origin: &str) -> ParseResult<ScatteringMatrix> {
        let found = state.frequencies.len();
        if let Some(expected) = self.layout.frequencies {
            if found != expected {
                return Err(ParseError::FrequencyCountMismatch { expected, found });
            }
        }
        let angles = state.angles.ok_or(ParseError::Empty)?;

        let data = Array2::from_shape_vec((found, angles.len()), state.amplitudes)?;
        debug!(
            "parsed {}: {} frequencies x {} angles",
            origin,
            found,
            angles.len()
        );
        Ok(ScatteringMatrix::new(data, state.frequencies, angles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const THREE_BY_FOUR: &str = "\
##File Type: Far field
#Request Name: FarField1
#FREQUENCY = 1.0E+09
#\"Theta\" \"Phi\" \"Re(Etheta)\" \"Im(Etheta)\" \"Re(Ephi)\" \"Im(Ephi)\"
0.0   90.0  1.0  0.5  0.0 0.0
10.0  90.0  2.0  0.0  0.0 0.0
20.0  90.0  3.0 -1.0  0.0 0.0
30.0  90.0  4.0  1.0  0.0 0.0

#FREQUENCY = 1.1E+09
0.0   90.0  5.0  0.0  0.0 0.0
10.0  90.0  6.0  0.0  0.0 0.0
20.0  90.0  7.0  0.0  0.0 0.0
30.0  90.0  8.0  0.0  0.0 0.0
#FREQUENCY = 1.2E+09
0.0   90.0  9.0  0.0  0.0 0.0
10.0  90.0 10.0  0.0  0.0 0.0
20.0  90.0 11.0  0.0  0.0 0.0
30.0  90.0 12.0 -2.5  0.0 0.0
";

    fn parser(layout: ExpectedLayout) -> ScatteringParser {
        ScatteringParser::new(layout).unwrap()
    }

    #[test]
    fn well_formed_file_yields_frequency_by_angle_matrix() {
        let matrix = parser(ExpectedLayout::new(3, 4))
            .parse_str(THREE_BY_FOUR)
            .unwrap();

        assert_eq!(matrix.shape(), (3, 4));
        assert_eq!(matrix.frequencies_hz, vec![1.0e9, 1.1e9, 1.2e9]);
        assert_eq!(matrix.angles_deg, vec![0.0, 10.0, 20.0, 30.0]);
        assert_eq!(matrix.data[(0, 0)], Complex64::new(1.0, 0.5));
        assert_eq!(matrix.data[(0, 2)], Complex64::new(3.0, -1.0));
        assert_eq!(matrix.data[(1, 3)], Complex64::new(8.0, 0.0));
        assert_eq!(matrix.data[(2, 3)], Complex64::new(12.0, -2.5));
    }

    #[test]
    fn final_block_without_trailing_header_is_kept() {
        let matrix = parser(ExpectedLayout::default())
            .parse_str(THREE_BY_FOUR)
            .unwrap();
        assert_eq!(matrix.shape().0, 3);
        assert_eq!(matrix.data[(2, 0)], Complex64::new(9.0, 0.0));
    }

    #[test]
    fn short_data_line_reports_block_and_row() {
        let content = "#FREQUENCY = 1e9\n0 90 1 0\n10 90 1 0\n#FREQUENCY = 2e9\n0 90 1 0\n10 90 1\n";
        let err = parser(ExpectedLayout::default())
            .parse_str(content)
            .unwrap_err();

        match err {
            ParseError::IncompleteData {
                block,
                row,
                line,
                found,
            } => {
                assert_eq!((block, row, line, found), (1, 1, 6, 3));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn frequency_count_mismatch_names_both_counts() {
        let err = parser(ExpectedLayout::new(5, 4))
            .parse_str(THREE_BY_FOUR)
            .unwrap_err();
        assert!(matches!(
            err,
            ParseError::FrequencyCountMismatch {
                expected: 5,
                found: 3
            }
        ));
    }

    #[test]
    fn angle_count_mismatch_against_configured_layout() {
        let err = parser(ExpectedLayout::new(3, 6))
            .parse_str(THREE_BY_FOUR)
            .unwrap_err();
        assert!(matches!(
            err,
            ParseError::AngleCountMismatch {
                block: 0,
                expected: 6,
                found: 4
            }
        ));
    }

    #[test]
    fn angles_come_from_first_block_only() {
        let content = "\
#FREQUENCY = 1e9
0 90 1 0
10 90 2 0
20 90 3 0
30 90 4 0
#FREQUENCY = 2e9
5 90 5 0
15 90 6 0
25 90 7 0
35 90 8 0
";
        let matrix = parser(ExpectedLayout::default())
            .parse_str(content)
            .unwrap();
        assert_eq!(matrix.angles_deg, vec![0.0, 10.0, 20.0, 30.0]);
        assert_eq!(matrix.data[(1, 0)], Complex64::new(5.0, 0.0));
    }

    #[test]
    fn later_block_must_match_first_block_angle_count() {
        let content = "#FREQUENCY = 1e9\n0 0 1 0\n10 0 1 0\n#FREQUENCY = 2e9\n0 0 1 0\n";
        let err = parser(ExpectedLayout::default())
            .parse_str(content)
            .unwrap_err();
        assert!(matches!(
            err,
            ParseError::AngleCountMismatch {
                block: 1,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn data_before_header_is_rejected() {
        let err = parser(ExpectedLayout::default())
            .parse_str("# comment\n0 0 1 0\n")
            .unwrap_err();
        assert!(matches!(err, ParseError::OrphanData { line: 2 }));
    }

    #[test]
    fn header_without_value_is_rejected() {
        let err = parser(ExpectedLayout::default())
            .parse_str("#FREQUENCY = unknown\n")
            .unwrap_err();
        assert!(matches!(err, ParseError::MalformedFrequency { line: 1 }));
    }

    #[test]
    fn file_without_blocks_is_empty() {
        let err = parser(ExpectedLayout::default())
            .parse_str("##File Type: Far field\n\n")
            .unwrap_err();
        assert!(matches!(err, ParseError::Empty));
    }

    #[test]
    fn parse_file_reads_from_disk() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(THREE_BY_FOUR.as_bytes()).unwrap();

        let matrix = super::super::parse_file(temp.path(), ExpectedLayout::new(3, 4)).unwrap();
        assert_eq!(matrix.shape(), (3, 4));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = parser(ExpectedLayout::default())
            .parse_file(dir.path().join("absent.ffe"))
            .unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
    }
}
