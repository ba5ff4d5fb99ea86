use trapezoid_core::control::trajectory::{PlannerConfig, ProfileShape};
use trapezoid_core::{
    compute_path, Path, Point3, ProfileParameters, TrajectoryError, TrajectoryPlanner,
};

const TOL: f64 = 1e-6;

fn point0() -> Point3 {
    Point3::new(0.0, 0.0, 0.0)
}

fn point1() -> Point3 {
    Point3::new(5.0, 5.0, 5.0)
}

fn step_lengths(path: &[Point3]) -> Vec<f64> {
    path.windows(2).map(|w| (w[1] - w[0]).norm()).collect()
}

fn assert_close(a: Point3, b: Point3) {
    assert!((a - b).norm() < TOL, "{:?} != {:?}", a, b);
}

#[test]
fn negative_parameters_return_empty() {
    assert!(compute_path(point0(), point1(), -1.0, 1.0, 1.0, 0.1).is_empty());
    assert!(compute_path(point0(), point1(), 1.0, -1.0, 1.0, 0.1).is_empty());
    assert!(compute_path(point0(), point1(), 1.0, 1.0, -1.0, 0.1).is_empty());
    assert!(compute_path(point0(), point1(), 1.0, 1.0, 1.0, -0.1).is_empty());
}

#[test]
fn negligible_parameters_return_empty() {
    let tiny = f64::MIN_POSITIVE;
    assert!(compute_path(point0(), point1(), tiny, 1.0, 1.0, 0.1).is_empty());
    assert!(compute_path(point0(), point1(), 1.0, tiny, 1.0, 0.1).is_empty());
    assert!(compute_path(point0(), point1(), 1.0, 1.0, tiny, 0.1).is_empty());
    assert!(compute_path(point0(), point1(), 1.0, 1.0, 1.0, tiny).is_empty());

    assert!(compute_path(point0(), point1(), 0.0, 1.0, 1.0, 0.1).is_empty());
    assert!(compute_path(point0(), point1(), 1.0, 1.0, 1.0, 1e-5).is_empty());
}

#[test]
fn invalid_parameters_win_over_stationary() {
    assert!(compute_path(point1(), point1(), 1.0, 1.0, 0.0, 0.1).is_empty());
}

#[test]
fn huge_endpoints_return_empty() {
    let start = Point3::new(1e200, 0.0, 0.0);
    let end = Point3::new(-1e200, 0.0, 0.0);
    assert!(compute_path(start, end, 1.0, 1.0, 1.0, 0.1).is_empty());

    let params = ProfileParameters::new(1.0, 1.0, 1.0, 0.1);
    assert!(matches!(
        TrajectoryPlanner::new().samples(start, end, &params),
        Err(TrajectoryError::UnboundedProfile { .. })
    ));
}

#[test]
fn too_many_samples_return_empty() {
    // finite distance, but more steps than an f64 index can count exactly
    let end = Point3::new(1e150, 0.0, 0.0);
    assert!(compute_path(point0(), end, 1.0, 1.0, 1.0, 0.1).is_empty());
}

#[test]
fn nan_endpoints_return_empty() {
    let nan = Point3::new(f64::NAN, 0.0, 0.0);
    assert!(compute_path(point0(), nan, 1.0, 1.0, 1.0, 0.1).is_empty());
    assert!(compute_path(nan, point0(), 1.0, 1.0, 1.0, 0.1).is_empty());
    assert!(compute_path(nan, nan, 1.0, 1.0, 1.0, 0.1).is_empty());
}

#[test]
fn no_movement_is_single_point() {
    let path = compute_path(point1(), point1(), 1.0, 1.0, 1.0, 0.1);
    assert_eq!(path, vec![point1()]);
}

#[test]
fn trapezoidal_velocity() {
    let end = Point3::new(0.0, 5.0, 0.0);
    let path = compute_path(point0(), end, 1.0, 1.0, 1.0, 1.0);

    let expected: Path = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(0.0, 0.5, 0.0),
        Point3::new(0.0, 1.5, 0.0),
        Point3::new(0.0, 2.5, 0.0),
        Point3::new(0.0, 3.5, 0.0),
        Point3::new(0.0, 4.5, 0.0),
        Point3::new(0.0, 5.0, 0.0),
    ];
    assert_eq!(path, expected);
}

#[test]
fn trapezoidal_velocity_finer_grain() {
    let path = compute_path(point1(), point0(), 3.0, 2.0, 1.0, 0.1);

    assert!(path.len() > 4);
    assert_eq!(path[0], point1());
    assert_eq!(path[path.len() - 1], point0());

    let steps = step_lengths(&path);
    assert!(steps[0] < steps[1], "first step should be smaller than second");
    let n = steps.len();
    assert!(steps[n - 1] < steps[n - 2], "last step should be smaller than second last");

    let mid = path.len() / 2;
    let before = (path[mid] - path[mid - 1]).norm();
    let after = (path[mid + 1] - path[mid]).norm();
    assert!((before - after).abs() < 1e-4, "middle should cruise at constant speed");
}

#[test]
fn no_constant_velocity() {
    let end = Point3::new(0.0, 0.0, 6.0);
    let path = compute_path(point0(), end, 1.0, 3.0, 5.0, 1.0);

    assert_eq!(path.len(), 5);
    assert_eq!(path[0], point0());
    assert_close(path[1], Point3::new(0.0, 0.0, 0.5));
    assert_close(path[2], Point3::new(0.0, 0.0, 2.0));
    assert_close(path[3], Point3::new(0.0, 0.0, 4.5));
    assert_eq!(path[4], end);
}

#[test]
fn step_spacing_follows_phases() {
    let params = ProfileParameters::new(2.0, 0.5, 1.5, 0.05);
    let start = Point3::new(-2.0, 1.0, 3.0);
    let end = Point3::new(4.0, -3.0, 10.0);
    let planner = TrajectoryPlanner::new();
    let profile = planner.profile(start, end, &params).unwrap();
    assert_eq!(profile.shape, ProfileShape::Trapezoidal);

    let path = planner.compute_path(start, end, &params);
    let steps = step_lengths(&path);
    let dt = params.step_duration;
    let cruise_step = params.max_speed * dt;

    for (k, pair) in steps.windows(2).enumerate() {
        // pair[0] spans samples k..k+1, pair[1] spans k+1..k+2
        let t_next = (k + 2) as f64 * dt;
        if t_next <= profile.accel_duration {
            assert!(pair[1] > pair[0], "accelerating at step {}", k);
        } else if (k as f64) * dt >= profile.accel_duration && t_next <= profile.cruise_end_time() {
            assert!((pair[1] - cruise_step).abs() < 1e-9, "cruising at step {}", k);
            assert!((pair[0] - cruise_step).abs() < 1e-9, "cruising at step {}", k);
        } else if (k as f64) * dt >= profile.cruise_end_time() {
            assert!(pair[1] < pair[0], "decelerating at step {}", k);
        }
    }
}

#[test]
fn travelled_length_matches_distance() {
    let start = Point3::new(1.0, 2.0, 3.0);
    let end = Point3::new(-4.0, 0.5, 9.0);
    let path = compute_path(start, end, 1.5, 2.5, 2.0, 0.02);

    let travelled: f64 = step_lengths(&path).iter().sum();
    assert!((travelled - (end - start).norm()).abs() < 1e-9);

    let direction = (end - start).normalize();
    for p in &path {
        let offset = p - start;
        assert!((offset - direction * offset.dot(&direction)).norm() < 1e-9);
    }
}

#[test]
fn triangular_profile_never_reaches_requested_speed() {
    let params = ProfileParameters::new(1.0, 3.0, 5.0, 0.1);
    let start = point0();
    let end = Point3::new(0.0, 0.0, 6.0);
    let planner = TrajectoryPlanner::new();

    let profile = planner.profile(start, end, &params).unwrap();
    assert_eq!(profile.shape, ProfileShape::Triangular);
    let expected_peak = (2.0_f64 * 6.0 / (1.0 / 1.0 + 1.0 / 3.0)).sqrt();
    assert_eq!(profile.peak_speed, expected_peak);

    let path = planner.compute_path(start, end, &params);
    let requested_step = params.max_speed * params.step_duration;
    let steps = step_lengths(&path);
    for pair in steps.windows(2) {
        let at_requested = |s: f64| (s - requested_step).abs() < 1e-9;
        assert!(!(at_requested(pair[0]) && at_requested(pair[1])));
    }
    assert!(steps.iter().all(|&s| s <= expected_peak * params.step_duration + 1e-9));
}

#[test]
fn uneven_final_step_is_kept() {
    // total duration 6s, step 0.4s: last sample at 5.6s is close to the end
    let end = Point3::new(0.0, 5.0, 0.0);
    let path = compute_path(point0(), end, 1.0, 1.0, 1.0, 0.4);

    assert_eq!(path.len(), 16);
    let steps = step_lengths(&path);
    assert!(steps[steps.len() - 1] < steps[steps.len() - 2]);
    assert_eq!(path[path.len() - 1], end);
}

#[test]
fn identical_inputs_give_identical_paths() {
    let planner = TrajectoryPlanner::with_config(PlannerConfig::default());
    let params = ProfileParameters::new(3.0, 2.0, 1.0, 0.1);
    let first = planner.compute_path(point1(), point0(), &params);
    let second = planner.compute_path(point1(), point0(), &params);
    assert_eq!(first, second);
}

#[test]
fn planner_is_shareable_across_threads() {
    let planner = std::sync::Arc::new(TrajectoryPlanner::new());
    let params = ProfileParameters::new(1.0, 1.0, 1.0, 1.0);
    let expected = planner.compute_path(point0(), Point3::new(0.0, 5.0, 0.0), &params);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let planner = planner.clone();
            std::thread::spawn(move || {
                planner.compute_path(point0(), Point3::new(0.0, 5.0, 0.0), &params)
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
