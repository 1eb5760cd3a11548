//! End-to-end integration tests: CSV -> warp / dv/v -> JSON -> deserialize.

use std::fs;
use std::path::Path;

use dvwarp_dtw::{Strain, Warp};
use dvwarp_dvv::{Broadband, DvvConfig, FrequencyBand};
use dvwarp_io::{ExperimentName, IoError, ResultWriter, TraceReader};
use tempfile::TempDir;

/// Path to the test fixture directory.
fn fixture_path(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn warp() -> Warp {
    Warp::new(8).unwrap().with_strain(Strain::new(5).unwrap())
}

#[test]
fn warp_round_trip() {
    // 1. Read CSV
    let pair = TraceReader::new(&fixture_path("stretched_sine.csv"))
        .read()
        .expect("fixture should parse");
    assert_eq!(pair.len(), 240);
    assert!((pair.sampling_rate - 20.0).abs() < 1e-9);

    // 2. Warp over 1 s ..= 11 s
    let window = pair.window(Some(1.0), Some(11.0)).unwrap();
    assert_eq!(window.len(), 201);
    let result = warp()
        .warp(
            pair.reference.as_view(),
            pair.current.as_view(),
            &pair.time,
            &window,
            pair.sampling_rate,
        )
        .unwrap();

    // 3. Write JSON artifact
    let dir = TempDir::new().unwrap();
    let experiment = ExperimentName::new("warp_rt".into()).unwrap();
    let writer = ResultWriter::new(dir.path(), experiment).unwrap();
    let path = writer.write_warp(&warp(), pair.sampling_rate, &result).unwrap();

    // 4. Deserialize back and verify
    let content: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(content["experiment"], "warp_rt");
    assert!((content["config"]["sampling_rate"].as_f64().unwrap() - 20.0).abs() < 1e-9);

    let lags: Vec<i64> = content["lags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_i64().unwrap())
        .collect();
    assert_eq!(lags.len(), 201);
    // The stretch delays the current trace progressively.
    assert!(lags[0] <= 1, "first lag {}", lags[0]);
    assert!((4..=5).contains(&lags[200]), "last lag {}", lags[200]);
    assert!(lags.windows(2).all(|w| (w[1] - w[0]).abs() <= 1));

    let shifts = content["time_shift"].as_array().unwrap();
    let warped = content["warped_time"].as_array().unwrap();
    let times = content["window_time"].as_array().unwrap();
    for k in 0..lags.len() {
        let shift = shifts[k].as_f64().unwrap();
        assert!((shift - lags[k] as f64 / 20.0).abs() < 1e-12);
        let expected = times[k].as_f64().unwrap() + shift;
        assert!((warped[k].as_f64().unwrap() - expected).abs() < 1e-12);
    }
}

#[test]
fn dvv_round_trip() {
    let pair = TraceReader::new(&fixture_path("stretched_sine.csv"))
        .read()
        .unwrap();
    let window = pair.window(Some(1.0), Some(11.0)).unwrap();
    let bands = vec![
        FrequencyBand::new(0.4, 1.6).unwrap(),
        FrequencyBand::new(0.2, 0.8).unwrap(),
    ];
    let cfg = DvvConfig::new(warp(), bands).unwrap();
    let result = cfg
        .estimate(
            pair.reference.as_view(),
            pair.current.as_view(),
            &pair.time,
            &window,
            pair.sampling_rate,
            &Broadband,
        )
        .unwrap();

    let dir = TempDir::new().unwrap();
    let experiment = ExperimentName::new("dvv_rt".into()).unwrap();
    let writer = ResultWriter::new(dir.path(), experiment).unwrap();
    let path = writer.write_dvv(&warp(), pair.sampling_rate, &result).unwrap();
    assert_eq!(path, dir.path().join("dvv_rt_dvv.json"));

    let content: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let bands = content["bands"].as_array().unwrap();
    assert_eq!(bands.len(), 2);
    assert_eq!(bands[0]["low"], 0.4);
    assert_eq!(bands[1]["low"], 0.2);
    for band in bands {
        // 2 % stretch of the current trace: velocity dropped by about 2 %.
        let dvv = band["dvv"].as_f64().unwrap();
        assert!((dvv + 2.0).abs() < 0.5, "dvv = {dvv}");
        assert!(band["dvv_err"].as_f64().unwrap() >= 0.0);
        assert_eq!(band["time_shift"].as_array().unwrap().len(), 201);
    }
}

#[test]
fn irregular_fixture_rejected() {
    let result = TraceReader::new(&fixture_path("irregular.csv")).read();
    assert!(matches!(
        result,
        Err(IoError::IrregularSampling { row_index: 3, .. })
    ));
}
