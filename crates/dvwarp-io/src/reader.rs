//! CSV trace-pair reader with full input validation.

use std::path::{Path, PathBuf};

use dvwarp_dtw::Trace;
use tracing::{debug, info, instrument};

use crate::IoError;
use crate::domain::TracePair;

const COLUMNS: [&str; 3] = ["time", "reference", "current"];

/// Relative tolerance on the sampling interval.
const SAMPLING_TOLERANCE: f64 = 1e-6;

/// Reads a reference/current trace pair from a CSV file.
///
/// Expected CSV format:
/// - Header row required, naming the columns `time`, `reference` and
///   `current` in any order (extra columns are ignored)
/// - One row per sample, time in seconds, uniformly sampled
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::MissingColumn`] | Header lacks `time`, `reference` or `current` |
/// | [`IoError::EmptyDataset`] | Zero data rows after header |
/// | [`IoError::TooFewSamples`] | Fewer than 2 data rows |
/// | [`IoError::InconsistentRowLength`] | Row has different column count than header |
/// | [`IoError::NonFiniteValue`] | Cell is NaN, Inf, or unparseable float |
/// | [`IoError::NonIncreasingTime`] | Time does not strictly increase |
/// | [`IoError::IrregularSampling`] | Time step deviates from the first step |
pub struct TraceReader {
    path: PathBuf,
}

impl TraceReader {
    /// Create a new reader for the given CSV file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read and validate the CSV file, returning a [`TracePair`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<TracePair, IoError> {
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        // flexible(true) so that short rows surface as InconsistentRowLength
        // rather than a generic CsvParse error.
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let header = rdr.headers().map_err(|e| self.csv_error(e))?;
        let expected_cols = header.len();
        let mut positions = [0usize; 3];
        for (slot, column) in positions.iter_mut().zip(COLUMNS) {
            *slot = header
                .iter()
                .position(|h| h.eq_ignore_ascii_case(column))
                .ok_or(IoError::MissingColumn {
                    path: self.path.clone(),
                    column,
                })?;
        }
        debug!(expected_cols, ?positions, "read CSV header");

        let mut columns: [Vec<f64>; 3] = Default::default();
        for (row_index, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| self.csv_error(e))?;
            if record.len() != expected_cols {
                return Err(IoError::InconsistentRowLength {
                    path: self.path.clone(),
                    row_index,
                    expected: expected_cols,
                    got: record.len(),
                });
            }
            for ((values, &pos), column) in columns.iter_mut().zip(&positions).zip(COLUMNS) {
                let raw = record.get(pos).unwrap_or("");
                values.push(self.parse_finite(raw, row_index, column)?);
            }
        }

        let [time, reference, current] = columns;
        match time.len() {
            0 => {
                return Err(IoError::EmptyDataset {
                    path: self.path.clone(),
                });
            }
            1 => {
                return Err(IoError::TooFewSamples {
                    path: self.path.clone(),
                    n_samples: 1,
                });
            }
            _ => {}
        }
        let sampling_rate = self.check_sampling(&time)?;

        info!(n_samples = time.len(), sampling_rate, "trace pair loaded");

        Ok(TracePair {
            time,
            reference: Trace::new(reference)?,
            current: Trace::new(current)?,
            sampling_rate,
        })
    }

    fn csv_error(&self, e: csv::Error) -> IoError {
        IoError::CsvParse {
            path: self.path.clone(),
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        }
    }

    fn parse_finite(&self, raw: &str, row_index: usize, column: &'static str) -> Result<f64, IoError> {
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(IoError::NonFiniteValue {
                path: self.path.clone(),
                row_index,
                column,
                raw: raw.to_string(),
            }),
        }
    }

    /// Check strictly increasing, uniform time and return the sampling rate.
    fn check_sampling(&self, time: &[f64]) -> Result<f64, IoError> {
        let dt = time[1] - time[0];
        for (k, pair) in time.windows(2).enumerate() {
            let step = pair[1] - pair[0];
            if step <= 0.0 {
                return Err(IoError::NonIncreasingTime {
                    path: self.path.clone(),
                    row_index: k + 1,
                });
            }
            if (step - dt).abs() > SAMPLING_TOLERANCE * dt {
                return Err(IoError::IrregularSampling {
                    path: self.path.clone(),
                    row_index: k + 1,
                    expected: dt,
                    got: step,
                });
            }
        }
        let span = time[time.len() - 1] - time[0];
        Ok((time.len() - 1) as f64 / span)
    }
}
