//! JSON result writer for warp and dv/v outputs.

use std::fs;
use std::path::{Path, PathBuf};

use dvwarp_dtw::{Warp, WarpResult};
use dvwarp_dvv::DvvResult;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::IoError;
use crate::domain::ExperimentName;

/// Writes warp and dv/v results to JSON files.
///
/// Creates the output directory on construction if it does not exist.
/// Output files are named `{experiment}_warp.json` and `{experiment}_dvv.json`.
pub struct ResultWriter {
    output_dir: PathBuf,
    experiment: ExperimentName,
}

impl ResultWriter {
    /// Create a new writer targeting the given directory and experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::OutputDirCreate`] if the directory cannot be created.
    #[instrument(skip_all, fields(dir = %output_dir.display(), experiment = %experiment))]
    pub fn new(output_dir: &Path, experiment: ExperimentName) -> Result<Self, IoError> {
        fs::create_dir_all(output_dir).map_err(|e| IoError::OutputDirCreate {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        debug!("output directory ready");
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            experiment,
        })
    }

    /// Write a single warp to `{experiment}_warp.json` and return its path.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::Serialize`] | The result cannot be encoded |
    /// | [`IoError::WriteFile`] | The file cannot be written |
    #[instrument(skip_all)]
    pub fn write_warp(&self, warp: &Warp, sampling_rate: f64, result: &WarpResult) -> Result<PathBuf, IoError> {
        let path = self.artifact_path("warp");
        let artifact = WarpArtifact {
            experiment: self.experiment.as_str(),
            config: WarpConfigEntry::new(warp, sampling_rate),
            fit_error: result.fit_error.value(),
            samples: result.window.indices(),
            window_time: &result.window_time,
            lags: result.lags.lags(),
            time_shift: &result.time_shift,
            warped_time: &result.warped_time,
        };
        self.write_json(&path, &artifact)?;
        info!(path = %path.display(), "warp result written");
        Ok(path)
    }

    /// Write per-band dv/v estimates to `{experiment}_dvv.json` and return its path.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::Serialize`] | The result cannot be encoded |
    /// | [`IoError::WriteFile`] | The file cannot be written |
    #[instrument(skip_all)]
    pub fn write_dvv(&self, warp: &Warp, sampling_rate: f64, result: &DvvResult) -> Result<PathBuf, IoError> {
        let path = self.artifact_path("dvv");
        let bands = result
            .bands
            .iter()
            .map(|b| BandEntry {
                low: b.band.low(),
                high: b.band.high(),
                dvv: b.dvv,
                dvv_err: b.dvv_err,
                intercept: b.intercept,
                intercept_err: b.intercept_err,
                dvv0: b.dvv0,
                dvv0_err: b.dvv0_err,
                fit_error: b.warp.fit_error.value(),
                time_shift: &b.warp.time_shift,
            })
            .collect();
        let artifact = DvvArtifact {
            experiment: self.experiment.as_str(),
            config: WarpConfigEntry::new(warp, sampling_rate),
            window_time: result.bands.first().map_or(&[][..], |b| b.warp.window_time.as_slice()),
            bands,
        };
        self.write_json(&path, &artifact)?;
        info!(path = %path.display(), n_bands = result.bands.len(), "dv/v result written");
        Ok(path)
    }

    fn artifact_path(&self, kind: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_{kind}.json", self.experiment.as_str()))
    }

    fn write_json<T: Serialize>(&self, path: &Path, artifact: &T) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(artifact).map_err(|e| IoError::Serialize {
            path: path.to_path_buf(),
            source: e,
        })?;
        fs::write(path, &json).map_err(|e| IoError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

// --- Shadow structs for JSON serialization ---

#[derive(Serialize)]
struct WarpConfigEntry {
    max_lag: usize,
    strain: usize,
    direction: String,
    norm: String,
    sampling_rate: f64,
}

impl WarpConfigEntry {
    fn new(warp: &Warp, sampling_rate: f64) -> Self {
        Self {
            max_lag: warp.max_lag(),
            strain: warp.strain().get(),
            direction: warp.direction().to_string(),
            norm: warp.norm().to_string(),
            sampling_rate,
        }
    }
}

#[derive(Serialize)]
struct WarpArtifact<'a> {
    experiment: &'a str,
    config: WarpConfigEntry,
    fit_error: f64,
    samples: &'a [usize],
    window_time: &'a [f64],
    lags: &'a [isize],
    time_shift: &'a [f64],
    warped_time: &'a [f64],
}

#[derive(Serialize)]
struct DvvArtifact<'a> {
    experiment: &'a str,
    config: WarpConfigEntry,
    window_time: &'a [f64],
    bands: Vec<BandEntry<'a>>,
}

#[derive(Serialize)]
struct BandEntry<'a> {
    low: f64,
    high: f64,
    dvv: f64,
    dvv_err: f64,
    intercept: f64,
    intercept_err: f64,
    dvv0: f64,
    dvv0_err: f64,
    fit_error: f64,
    time_shift: &'a [f64],
}

#[cfg(test)]
mod tests {
    use super::*;
    use dvwarp_dtw::{Direction, Strain, Trace, Window};
    use dvwarp_dvv::{Broadband, DvvConfig, FrequencyBand};
    use tempfile::TempDir;

    fn shifted_pair() -> (Trace, Trace, Vec<f64>) {
        let reference: Vec<f64> = (0..12).map(|i| f64::from(i % 5)).collect();
        let current: Vec<f64> = (0..12).map(|i| f64::from((i.max(1) - 1) % 5)).collect();
        let time = (0..12).map(|i| f64::from(i) * 0.1).collect();
        (Trace::new(reference).unwrap(), Trace::new(current).unwrap(), time)
    }

    fn warp() -> Warp {
        Warp::new(2)
            .unwrap()
            .with_strain(Strain::new(2).unwrap())
            .with_direction(Direction::Symmetric)
    }

    fn read_json(path: &Path) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn write_warp_json_structure() {
        let dir = TempDir::new().unwrap();
        let experiment = ExperimentName::new("test_run".into()).unwrap();
        let writer = ResultWriter::new(dir.path(), experiment).unwrap();

        let (reference, current, time) = shifted_pair();
        let window = Window::range(2..10).unwrap();
        let result = warp()
            .warp(reference.as_view(), current.as_view(), &time, &window, 10.0)
            .unwrap();
        let path = writer.write_warp(&warp(), 10.0, &result).unwrap();

        assert_eq!(path, dir.path().join("test_run_warp.json"));
        let content = read_json(&path);
        assert_eq!(content["experiment"], "test_run");
        assert_eq!(content["config"]["max_lag"], 2);
        assert_eq!(content["config"]["strain"], 2);
        assert_eq!(content["config"]["direction"], "symmetric");
        assert_eq!(content["config"]["norm"], "l2");
        assert!(content["fit_error"].is_number());
        assert_eq!(content["samples"].as_array().unwrap().len(), 8);
        assert_eq!(content["lags"].as_array().unwrap().len(), 8);
        assert_eq!(content["time_shift"].as_array().unwrap().len(), 8);
        assert_eq!(content["warped_time"].as_array().unwrap().len(), 8);
    }

    #[test]
    fn write_dvv_json_structure() {
        let dir = TempDir::new().unwrap();
        let experiment = ExperimentName::new("dvv_test".into()).unwrap();
        let writer = ResultWriter::new(dir.path(), experiment).unwrap();

        let (reference, current, time) = shifted_pair();
        let window = Window::range(2..10).unwrap();
        let bands = vec![
            FrequencyBand::new(0.5, 1.0).unwrap(),
            FrequencyBand::new(1.0, 2.0).unwrap(),
        ];
        let cfg = DvvConfig::new(warp(), bands).unwrap();
        let result = cfg
            .estimate(reference.as_view(), current.as_view(), &time, &window, 10.0, &Broadband)
            .unwrap();
        let path = writer.write_dvv(&warp(), 10.0, &result).unwrap();

        let content = read_json(&path);
        assert_eq!(content["experiment"], "dvv_test");
        assert_eq!(content["window_time"].as_array().unwrap().len(), 8);
        let bands = content["bands"].as_array().unwrap();
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0]["low"], 0.5);
        assert_eq!(bands[1]["high"], 2.0);
        for band in bands {
            for key in ["dvv", "dvv_err", "intercept", "intercept_err", "dvv0", "dvv0_err", "fit_error"] {
                assert!(band[key].is_number(), "{key}");
            }
        }
    }

    #[test]
    fn creates_output_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested").join("deep");
        let experiment = ExperimentName::new("nested_test".into()).unwrap();
        ResultWriter::new(&nested, experiment).unwrap();
        assert!(nested.is_dir());
    }
}
