//! End to end scenarios on the planar arm with links of 0.5 m and 0.3 m.

use crate::kinematics_impl::{ee_position, fk, fk_chain};
use crate::kinematic_traits::{translation, Position};
use crate::parameters::RobotModel;
use crate::parameters_from_file::RobotConfig;
use crate::solver::{solve_ik, IkConfig};
use crate::trajectory::{move_trajectory, range_trajectory};

fn planar() -> RobotModel {
    RobotConfig::from_yaml_file("src/tests/data/planar_two_link.yaml")
        .expect("Failed to load planar arm")
        .model
}

/// Targets inside the annulus [0.2, 0.8] m around the base.
const REACHABLE: [[f64; 3]; 15] = [
    [0.4, 0.3, 0.0], [0.6, 0.2, 0.0], [0.3, 0.5, 0.0], [0.7, 0.0, 0.0], [0.5, -0.3, 0.0],
    [0.25, 0.1, 0.0], [0.0, 0.6, 0.0], [0.3, 0.3, 0.0], [0.2, 0.6, 0.0], [0.6, 0.4, 0.0],
    [0.45, 0.0, 0.0], [0.35, -0.2, 0.0], [0.5, 0.5, 0.0], [0.1, 0.7, 0.0], [0.75, 0.1, 0.0],
];

#[test]
fn reachable_targets_converge_from_default_pose() {
    let model = planar();
    let config = IkConfig::default();
    for target in REACHABLE {
        let distance = Position::from(target).norm();
        assert!((0.2..=0.8).contains(&distance));

        let solution = solve_ik(&model, &target, None, &config).unwrap();
        assert!(solution.converged, "target {target:?}: {solution:?}");
        assert!(solution.iterations <= 120);

        let reached = ee_position(&model, &solution.joints).unwrap();
        assert!((reached - Position::from(target)).norm() < 1e-3, "target {target:?}");
        assert!(model.within_limits(&solution.joints).unwrap());
    }
}

#[test]
fn unreachable_target_is_reported_not_thrown() {
    let model = planar();
    let solution = solve_ik(&model, &[1.5, 0.5, 0.0], None, &IkConfig::default()).unwrap();
    assert!(!solution.converged);
    assert!(model.within_limits(&solution.joints).unwrap());
    let reached = ee_position(&model, &solution.joints).unwrap();
    assert!((solution.position_error - (reached - Position::new(1.5, 0.5, 0.0)).norm()).abs() < 1e-12);
}

#[test]
fn accessors_agree() {
    let model = planar();
    for q in [[0.0, 0.0], [45.0, -30.0], [-170.0, 170.0], [12.3, 98.7]] {
        let pose = fk(&model, &q).unwrap();
        let points = fk_chain(&model, &q).unwrap();
        assert_eq!(translation(&pose), ee_position(&model, &q).unwrap());
        assert_eq!(points.len(), 3);
        assert!((points[2] - translation(&pose)).norm() < 1e-12);
        assert!(((points[1] - points[0]).norm() - 0.5).abs() < 1e-12);
        assert!(((points[2] - points[1]).norm() - 0.3).abs() < 1e-12);
    }
}

#[test]
fn sweep_covers_limits() {
    let model = planar();
    let sweep: Vec<_> = range_trajectory(&model, 100).collect();
    assert_eq!(sweep.len(), 100);
    assert_eq!(sweep[0], vec![-170.0, -170.0]);
    assert_eq!(sweep[99], vec![170.0, 170.0]);
}

#[test]
fn move_to_ik_solution() {
    let model = planar();
    let start = model.default_pose();
    let solution = solve_ik(&model, &[0.3, 0.5, 0.0], Some(&start[..]), &IkConfig::default()).unwrap();
    assert!(solution.converged);

    let path: Vec<_> = move_trajectory(&model, &start, &solution.joints).unwrap().collect();
    assert!(path.len() >= 25);
    assert_eq!(path.first(), Some(&start));
    assert_eq!(path.last(), Some(&solution.joints));
}
