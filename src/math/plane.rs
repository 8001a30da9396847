//! Vector projection and rejection against a plane normal

use crate::core::error::Error;
use crate::core::types::{Result, Vec3};

/// Below this length a projected axis is treated as degenerate.
pub const DEGENERATE_EPSILON: f32 = 1e-6;

/// Component of `v` along `normal`.
pub fn project_onto(v: Vec3, normal: Vec3) -> Vec3 {
    normal * (v.dot(normal) / normal.length_squared())
}

/// Component of `v` perpendicular to `normal`, i.e. lying in the plane.
pub fn reject_from(v: Vec3, normal: Vec3) -> Vec3 {
    v - project_onto(v, normal)
}

/// Unit vector of `axis` flattened into the plane with the given normal.
///
/// Fails when `axis` is parallel to the normal.
pub fn plane_relative_axis(axis: Vec3, normal: Vec3) -> Result<Vec3> {
    check_normal(normal)?;
    normalize_checked(reject_from(axis, normal), "axis is parallel to the plane normal")
}

/// Unit vector of `axis` reduced to its normal-aligned component.
///
/// Fails when `axis` lies in the plane.
pub fn normal_aligned_axis(axis: Vec3, normal: Vec3) -> Result<Vec3> {
    check_normal(normal)?;
    normalize_checked(project_onto(axis, normal), "axis lies in the plane")
}

fn check_normal(normal: Vec3) -> Result<()> {
    if normal.length_squared() < DEGENERATE_EPSILON * DEGENERATE_EPSILON || !normal.is_finite() {
        return Err(Error::DegenerateGeometry(format!("invalid plane normal {:?}", normal)));
    }
    Ok(())
}

fn normalize_checked(v: Vec3, what: &str) -> Result<Vec3> {
    let len = v.length();
    if len < DEGENERATE_EPSILON || !len.is_finite() {
        return Err(Error::DegenerateGeometry(what.to_string()));
    }
    Ok(v / len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_removes_normal_component() {
        let axis = plane_relative_axis(Vec3::new(1.0, 0.0, 1.0), Vec3::Z).unwrap();
        assert!((axis - Vec3::X).length() < 1e-6);
        assert_eq!(axis.z, 0.0);
    }

    #[test]
    fn test_unnormalized_normal() {
        let axis = plane_relative_axis(Vec3::new(0.0, 3.0, 4.0), Vec3::new(0.0, 0.0, 10.0)).unwrap();
        assert!((axis - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_parallel_axis_is_degenerate() {
        let err = plane_relative_axis(Vec3::new(0.0, 0.0, -2.0), Vec3::Z).unwrap_err();
        assert!(matches!(err, Error::DegenerateGeometry(_)));
    }

    #[test]
    fn test_normal_aligned_keeps_sign() {
        let up = normal_aligned_axis(Vec3::new(0.3, 0.2, -0.5), Vec3::Z).unwrap();
        assert!((up - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_in_plane_axis_has_no_normal_component() {
        let err = normal_aligned_axis(Vec3::X, Vec3::Z).unwrap_err();
        assert!(matches!(err, Error::DegenerateGeometry(_)));
    }

    #[test]
    fn test_zero_normal_rejected() {
        assert!(plane_relative_axis(Vec3::X, Vec3::ZERO).is_err());
    }
}
