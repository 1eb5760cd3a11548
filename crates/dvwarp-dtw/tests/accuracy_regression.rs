//! Accuracy regression tests for dvwarp-dtw.
//!
//! Fixed scenarios with hand-checked expected paths and fit errors, guarding
//! the accumulation recurrence, corner extrapolation and backtracking rules.

use dvwarp_dtw::{
    Direction, ErrorSurface, Norm, Strain, Sweep, Trace, Warp, WarpError, Window, accumulate,
    accumulate_symmetric, backtrack,
};

// ---------------------------------------------------------------------------
// Helper
// ---------------------------------------------------------------------------

fn trace(values: &[f64]) -> Trace {
    Trace::new(values.to_vec()).expect("valid test trace")
}

fn unit_time(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

// ---------------------------------------------------------------------------
// a) identical_periodic_traces
// ---------------------------------------------------------------------------

/// u0 == u1 over the whole trace: zero path, zero fit error.
#[test]
fn identical_periodic_traces() {
    let u = trace(&[1.0, 2.0, 3.0, 2.0, 1.0, 2.0, 3.0, 2.0, 1.0, 2.0]);
    let window = Window::range(0..10).unwrap();
    let warp = Warp::new(2)
        .unwrap()
        .with_strain(Strain::UNIT)
        .with_direction(Direction::Forward)
        .with_norm(Norm::L2);

    let result = warp
        .warp(u.as_view(), u.as_view(), &unit_time(10), &window, 1.0)
        .unwrap();

    assert_eq!(result.lags.lags(), &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(result.fit_error.value(), 0.0);
}

// ---------------------------------------------------------------------------
// b) pure_shift_interior_window
// ---------------------------------------------------------------------------

/// A ramp and its one-sample-delayed copy, measured away from the edges.
#[test]
fn pure_shift_interior_window() {
    let u0: Vec<f64> = (0..10).map(f64::from).collect();
    // shifted right by one sample, first sample repeated
    let mut u1 = vec![u0[0]];
    u1.extend_from_slice(&u0[..9]);

    // 1-based samples 3..=7
    let window = Window::from_indices(vec![2, 3, 4, 5, 6]).unwrap();
    let warp = Warp::new(3).unwrap();

    // u1 is warped onto u0: u1[i] = u0[i - 1]
    let result = warp
        .warp(trace(&u1).as_view(), trace(&u0).as_view(), &unit_time(10), &window, 1.0)
        .unwrap();

    assert_eq!(result.lags.lags(), &[-1, -1, -1, -1, -1]);
    assert_eq!(result.fit_error.value(), 0.0);
    assert_eq!(result.time_shift, vec![-1.0; 5]);
}

// ---------------------------------------------------------------------------
// c) max_lag_equal_to_sample_count_rejected
// ---------------------------------------------------------------------------

#[test]
fn max_lag_equal_to_sample_count_rejected() {
    let u = trace(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let window = Window::range(0..5).unwrap();
    let warp = Warp::new(5).unwrap();
    let result = warp.warp(u.as_view(), u.as_view(), &unit_time(5), &window, 1.0);
    assert!(matches!(
        result,
        Err(WarpError::LagTooLarge {
            max_lag: 5,
            n_samples: 5
        })
    ));
}

// ---------------------------------------------------------------------------
// d) error_surface_known_values
// ---------------------------------------------------------------------------

/// Full 4 × 3 L2 surface with corners, computed by hand.
#[test]
fn error_surface_known_values() {
    let u1 = [1.0, 3.0, 2.0, 0.0];
    let u0 = [2.0, 2.0, 0.0, 1.0];
    let err = ErrorSurface::compute(&u1, &u0, 1, Norm::L2).unwrap();

    #[rustfmt::skip]
    let expected = [
        // lag -1  lag 0  lag +1
        1.0,       1.0,   1.0, // sample 0: corner copies sample 1 at lag -1
        1.0,       1.0,   9.0,
        0.0,       4.0,   1.0,
        0.0,       1.0,   1.0, // sample 3: corner copies sample 2 at lag +1
    ];
    assert_eq!(err.as_slice(), &expected);
}

// ---------------------------------------------------------------------------
// e) distance_surface_known_values
// ---------------------------------------------------------------------------

/// Forward accumulation of the surface above at b = 1.
#[test]
fn distance_surface_known_values() {
    let u1 = [1.0, 3.0, 2.0, 0.0];
    let u0 = [2.0, 2.0, 0.0, 1.0];
    let err = ErrorSurface::compute(&u1, &u0, 1, Norm::L2).unwrap();
    let dist = accumulate(&err, Strain::UNIT, Sweep::Forward);

    #[rustfmt::skip]
    let expected = [
        1.0, 1.0, 1.0,
        2.0, 2.0, 10.0,
        2.0, 6.0, 3.0,
        2.0, 3.0, 4.0,
    ];
    assert_eq!(dist.as_slice(), &expected);

    let path = backtrack(&dist, &err, Strain::UNIT, Sweep::Backward).unwrap();
    assert_eq!(path.lags(), &[-1, -1, -1, -1]);
    assert_eq!(path.cost(&err).unwrap().value(), 2.0);
}

// ---------------------------------------------------------------------------
// f) symmetric_surface_combines_both_sweeps
// ---------------------------------------------------------------------------

#[test]
fn symmetric_surface_combines_both_sweeps() {
    let u1 = [1.0, 3.0, 2.0, 0.0];
    let u0 = [2.0, 2.0, 0.0, 1.0];
    let err = ErrorSurface::compute(&u1, &u0, 1, Norm::L2).unwrap();
    let fwd = accumulate(&err, Strain::UNIT, Sweep::Forward);
    let bwd = accumulate(&err, Strain::UNIT, Sweep::Backward);
    let sym = accumulate_symmetric(&err, Strain::UNIT);

    let expected: Vec<f64> = fwd
        .as_slice()
        .iter()
        .zip(bwd.as_slice())
        .zip(err.as_slice())
        .map(|((f, b), e)| f + b - e)
        .collect();
    assert_eq!(sym.as_slice(), expected.as_slice());
}

// ---------------------------------------------------------------------------
// g) strained_shift_ramp
// ---------------------------------------------------------------------------

/// A slowly growing delay is followed in steps no closer than `b` samples.
#[test]
fn strained_shift_ramp() {
    let n = 120;
    let fs = 20.0;
    let time: Vec<f64> = (0..n).map(|i| i as f64 / fs).collect();
    let reference: Vec<f64> = time.iter().map(|t| (2.0 * std::f64::consts::PI * 0.8 * t).sin()).collect();
    // delay grows linearly to about 3 samples at the end
    let current: Vec<f64> = time
        .iter()
        .map(|t| (2.0 * std::f64::consts::PI * 0.8 * (t - 0.025 * t)).sin())
        .collect();

    let window = Window::range(10..110).unwrap();
    let strain = Strain::new(5).unwrap();
    let warp = Warp::new(6).unwrap().with_strain(strain);
    let result = warp
        .warp(trace(&reference).as_view(), trace(&current).as_view(), &time, &window, fs)
        .unwrap();

    assert!(result.lags.respects_strain(strain));
    let lags = result.lags.lags();
    assert!(lags.iter().all(|&l| (0..=4).contains(&l)), "{lags:?}");
    assert!(lags[lags.len() - 1] >= lags[0]);
}
