//! Shared numeric tolerances.
//!
//! Every near-zero test in intersection and shading code goes through
//! [`align_zero`] so the whole engine agrees on what "zero" means.

use nalgebra::{Unit, Vector3};

use crate::error::GeometryError;

/// Values closer to zero than this are treated as exactly zero.
pub const EPSILON: f64 = 1e-10;

/// Snaps `value` to `0.0` when it lies within [`EPSILON`] of zero.
#[inline]
pub fn align_zero(value: f64) -> f64 {
    if value.abs() < EPSILON {
        0.0
    } else {
        value
    }
}

#[inline]
pub fn is_zero(value: f64) -> bool {
    align_zero(value) == 0.0
}

/// True when `t` is strictly ahead of the ray origin and not past `max_distance`.
#[inline]
pub fn ahead_within(t: f64, max_distance: f64) -> bool {
    align_zero(t) > 0.0 && align_zero(t - max_distance) <= 0.0
}

/// Normalizes `v`, failing on a zero-length vector.
pub fn unit(v: Vector3<f64>) -> Result<Unit<Vector3<f64>>, GeometryError> {
    Unit::try_new(v, EPSILON).ok_or(GeometryError::ZeroVector)
}

/// True when every channel of `k` is below `threshold`.
#[inline]
pub fn lower_than(k: &Vector3<f64>, threshold: f64) -> bool {
    k.iter().all(|&c| c < threshold)
}

/// Some unit vector perpendicular to `v`.
pub fn orthogonal(v: &Unit<Vector3<f64>>) -> Unit<Vector3<f64>> {
    // cross with the axis v is least aligned with
    let axis = if v.x.abs() <= v.y.abs() && v.x.abs() <= v.z.abs() {
        Vector3::x()
    } else if v.y.abs() <= v.z.abs() {
        Vector3::y()
    } else {
        Vector3::z()
    };
    Unit::new_normalize(v.cross(&axis))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_zero_snaps_noise() {
        assert_eq!(align_zero(1e-12), 0.0);
        assert_eq!(align_zero(-1e-12), 0.0);
        assert_eq!(align_zero(0.5), 0.5);
        assert!(is_zero(-3e-11));
        assert!(!is_zero(1e-9));
    }

    #[test]
    fn test_ahead_within() {
        assert!(ahead_within(1.0, 2.0));
        assert!(ahead_within(2.0 + 1e-12, 2.0));
        assert!(!ahead_within(1e-12, 2.0));
        assert!(!ahead_within(-1.0, 2.0));
        assert!(!ahead_within(3.0, 2.0));
        assert!(ahead_within(1e9, f64::INFINITY));
    }

    #[test]
    fn test_unit_rejects_zero_vector() {
        assert_eq!(unit(Vector3::zeros()), Err(GeometryError::ZeroVector));
        assert!(unit(Vector3::new(0.0, 3.0, 0.0)).is_ok());
    }

    #[test]
    fn test_orthogonal() {
        for v in [Vector3::x(), Vector3::new(1.0, 2.0, 3.0), Vector3::new(-0.2, 0.0, 5.0)] {
            let v = Unit::new_normalize(v);
            let o = orthogonal(&v);
            assert!(v.dot(o.as_ref()).abs() < 1e-12);
            assert!((o.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_lower_than() {
        assert!(lower_than(&Vector3::new(0.0, 0.0005, 0.0009), 0.001));
        assert!(!lower_than(&Vector3::new(0.0, 0.0005, 0.002), 0.001));
    }
}
