use crate::SwError;

/// Floating point type used throughout system
pub type Real = f64;

/// Absolute/relative tolerance pair for float comparisons.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-9,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, SwError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(SwError::NonFinite { what, value: v })
    }
}

/// Wrap an angle in degrees into `[0, 360)`.
///
/// Negative inputs wrap the same way as positive ones (`-30` becomes `330`).
pub fn wrap_degrees(deg: Real) -> Real {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs due to rounding
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Smallest absolute difference between two headings, in `[0, 180]`.
pub fn heading_difference(a_deg: Real, b_deg: Real) -> Real {
    let diff = wrap_degrees(a_deg - b_deg);
    diff.min(360.0 - diff)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn wrap_degrees_cases() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(370.0), 10.0);
        assert_eq!(wrap_degrees(-30.0), 330.0);
        assert_eq!(wrap_degrees(-1e-18), 0.0);
    }

    #[test]
    fn heading_difference_takes_short_way() {
        assert_eq!(heading_difference(10.0, 350.0), 20.0);
        assert_eq!(heading_difference(90.0, 270.0), 180.0);
        assert_eq!(heading_difference(45.0, 45.0), 0.0);
    }
}
