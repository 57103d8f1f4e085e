//! Helper functions

use crate::kinematic_traits::{translation, Pose};

/// Checks if all joint values are finite
pub fn is_valid(qs: &[f64]) -> bool {
    qs.iter().all(|&q| q.is_finite())
}

/// Formats joint angles (degrees) as a bracketed row.
pub fn format_joints(qs: &[f64]) -> String {
    let row: Vec<String> = qs.iter().map(|q| format!("{:5.2}", q)).collect();
    format!("[{}]", row.join(" "))
}

/// Print joint values in degrees.
pub fn dump_joints(qs: &[f64]) {
    println!("{}", format_joints(qs));
}

/// Print the translation and the rotation block of the pose.
pub fn dump_pose(pose: &Pose) {
    let p = translation(pose);
    println!("x: {:.5}, y: {:.5}, z: {:.5}", p.x, p.y, p.z);
    for row in 0..3 {
        println!("  [{:8.5} {:8.5} {:8.5}]", pose[(row, 0)], pose[(row, 1)], pose[(row, 2)]);
    }
}

/// formatting for YAML output
pub(crate) fn deg(x: &f64) -> String {
    if *x == 0.0 {
        return "0".to_string();
    }
    format!("deg({:.4})", x.to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_with_all_finite() {
        assert!(is_valid(&[0.0, 1.0, -1.0, 0.5, 180.0]));
    }

    #[test]
    fn test_is_valid_with_nan() {
        assert!(!is_valid(&[0.0, f64::NAN, 1.0]));
    }

    #[test]
    fn test_is_valid_with_infinity() {
        assert!(!is_valid(&[f64::INFINITY]));
    }

    #[test]
    fn test_format_joints() {
        assert_eq!(format_joints(&[1.0, -20.5]), "[ 1.00 -20.50]");
    }

    #[test]
    fn test_dump_does_not_panic() {
        dump_joints(&[]);
        dump_pose(&Pose::identity());
    }

    #[test]
    fn test_deg() {
        assert_eq!(deg(&0.0), "0");
        assert_eq!(deg(&std::f64::consts::FRAC_PI_2), "deg(90.0000)");
    }
}
