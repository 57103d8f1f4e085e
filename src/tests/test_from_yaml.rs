#[cfg(test)]
mod tests {
    use crate::parameter_error::KinematicsError;
    use crate::parameters::{JointType, RobotModel};
    use crate::parameters_from_file::RobotConfig;
    use crate::solver::IkConfig;

    const READ_ERROR: &'static str = "Failed to load robot from file";

    fn expect_configuration(filename: &str, index: usize, joint: &str, fragment: &str) {
        match RobotConfig::from_yaml_file(filename) {
            Err(KinematicsError::Configuration { index: i, joint: j, reason }) => {
                assert_eq!(i, index, "{reason}");
                assert_eq!(j, joint, "{reason}");
                assert!(reason.contains(fragment), "{reason}");
            }
            other => panic!("Expected configuration error from {filename}, got {other:?}"),
        }
    }

    #[test]
    fn test_planar_from_yaml() {
        let config = RobotConfig::from_yaml_file("src/tests/data/planar_two_link.yaml")
            .expect(READ_ERROR);

        assert_eq!(config.model, RobotModel::planar_two_link());
        assert_eq!(config.ik, IkConfig::default());
        assert_eq!(config.control.dt_s, 0.01);
    }

    #[test]
    fn test_desk_arm_from_yaml_with_degrees() {
        let config = RobotConfig::from_yaml_file("src/tests/data/desk_arm.yaml")
            .expect(READ_ERROR);
        let expected = RobotModel::desk_arm();

        assert_eq!(config.model.name(), "desk_arm");
        assert_eq!(config.model.dof(), expected.dof());
        for (loaded, expected) in config.model.joints().iter().zip(expected.joints()) {
            assert_eq!(loaded.name, expected.name);
            assert!((loaded.alpha - expected.alpha).abs() < 1e-12, "{}", loaded.name);
            assert!((loaded.theta_offset - expected.theta_offset).abs() < 1e-12, "{}", loaded.name);
            assert_eq!(loaded.a, expected.a);
            assert_eq!(loaded.d, expected.d);
            assert_eq!(loaded.initial_deg, expected.initial_deg);
            assert_eq!((loaded.min_deg, loaded.max_deg), (expected.min_deg, expected.max_deg));
        }

        assert_eq!(config.ik.max_iters, 200);
        assert_eq!(config.ik.damping, 0.05);
        assert_eq!(config.ik.tolerance_m, IkConfig::default().tolerance_m);
    }

    #[test]
    fn test_model_only_from_yaml() {
        let model = RobotModel::from_yaml_file("src/tests/data/planar_two_link.yaml")
            .expect(READ_ERROR);
        assert_eq!(model.dof(), 2);
    }

    #[test]
    fn test_yaml_output_reads_back() {
        let model = RobotModel::desk_arm();
        let config = RobotConfig::from_yaml_str(&model.to_yaml()).expect(READ_ERROR);
        assert_eq!(config.model.name(), model.name());
        for (loaded, expected) in config.model.joints().iter().zip(model.joints()) {
            assert!((loaded.alpha - expected.alpha).abs() < 1e-6);
            assert!((loaded.theta_offset - expected.theta_offset).abs() < 1e-6);
            assert_eq!(loaded.min_deg, expected.min_deg);
        }
    }

    #[test]
    fn test_prismatic_loads() {
        let model = RobotModel::from_yaml_file("src/tests/data/prismatic.yaml").expect(READ_ERROR);
        assert_eq!(model.name(), "gantry");
        assert_eq!(model.joints()[0].joint_type, JointType::Prismatic);
    }

    #[test]
    fn test_rejects_missing_field() {
        expect_configuration("src/tests/data/invalid/missing_d.yaml", 1, "elbow", "d_m");
    }

    #[test]
    fn test_rejects_min_above_max() {
        expect_configuration("src/tests/data/invalid/min_above_max.yaml", 0, "wrist", "exceeds");
    }

    #[test]
    fn test_rejects_unknown_type() {
        expect_configuration("src/tests/data/invalid/unknown_type.yaml", 1, "ball", "spherical");
    }

    #[test]
    fn test_rejects_malformed_number() {
        expect_configuration("src/tests/data/invalid/not_a_number.yaml", 1, "elbow", "a_m is not a number");
    }

    #[test]
    fn test_missing_file() {
        let err = RobotConfig::from_yaml_file("src/tests/data/no_such_robot.yaml").unwrap_err();
        assert!(matches!(err, KinematicsError::Io(_)), "{err}");
    }
}
