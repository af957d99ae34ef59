//! # Guarded Arithmetic
//!
//! Arithmetic helpers that never return NaN or ±Infinity. Every guard falls
//! back to `0.0` when the operation is undefined, so iterative solvers keep
//! running on finite numbers and report problems through warnings instead.
//!
//! ```rust
//! use pave_core::safe_math::{safe_divide, safe_log10, safe_pow};
//!
//! assert_eq!(safe_divide(1.0, 0.0), 0.0);
//! assert_eq!(safe_log10(-5.0), 0.0);
//! assert_eq!(safe_pow(-8.0, 0.75), 0.0);
//! assert_eq!(safe_pow(-2.0, 2.0), 4.0);
//! ```

/// `numerator / denominator`, or 0 when the denominator is zero or either
/// operand is non-finite.
pub fn safe_divide(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() || !numerator.is_finite() {
        return 0.0;
    }
    finite_or_zero(numerator / denominator)
}

/// `base ^ exponent`, or 0 for a fractional power of a negative base.
///
/// Integer exponents of negative bases are well defined and pass through.
pub fn safe_pow(base: f64, exponent: f64) -> f64 {
    if !base.is_finite() || !exponent.is_finite() {
        return 0.0;
    }
    if base < 0.0 && exponent.fract() != 0.0 {
        return 0.0;
    }
    finite_or_zero(base.powf(exponent))
}

/// Logarithm of `value` in an arbitrary `base`.
///
/// Returns 0 for a non-positive operand, a non-positive base, or base 1.
pub fn safe_log(value: f64, base: f64) -> f64 {
    if !value.is_finite() || !base.is_finite() || value <= 0.0 || base <= 0.0 || base == 1.0 {
        return 0.0;
    }
    finite_or_zero(value.ln() / base.ln())
}

/// Base-10 logarithm, or 0 for a non-positive operand.
pub fn safe_log10(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 0.0;
    }
    value.log10()
}

fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_divide_guards() {
        assert_eq!(safe_divide(10.0, 4.0), 2.5);
        assert_eq!(safe_divide(10.0, 0.0), 0.0);
        assert_eq!(safe_divide(10.0, f64::INFINITY), 0.0);
        assert_eq!(safe_divide(f64::NAN, 2.0), 0.0);
        assert_eq!(safe_divide(f64::MAX, 1e-300), 0.0);
    }

    #[test]
    fn test_pow_guards() {
        assert!((safe_pow(16.0, 0.75) - 8.0).abs() < 1e-12);
        assert_eq!(safe_pow(-16.0, 0.75), 0.0);
        assert_eq!(safe_pow(-3.0, 3.0), -27.0);
        assert_eq!(safe_pow(0.0, -1.0), 0.0);
    }

    #[test]
    fn test_log_guards() {
        assert!((safe_log(8.0, 2.0) - 3.0).abs() < 1e-12);
        assert_eq!(safe_log(0.0, 10.0), 0.0);
        assert_eq!(safe_log(-1.0, 10.0), 0.0);
        assert_eq!(safe_log(10.0, 1.0), 0.0);
        assert_eq!(safe_log(10.0, -2.0), 0.0);
        assert_eq!(safe_log10(1000.0), 3.0);
        assert_eq!(safe_log10(0.0), 0.0);
    }

    proptest! {
        #[test]
        fn guards_always_finite(a in any::<f64>(), b in any::<f64>()) {
            prop_assert!(safe_divide(a, b).is_finite());
            prop_assert!(safe_pow(a, b).is_finite());
            prop_assert!(safe_log(a, b).is_finite());
            prop_assert!(safe_log10(a).is_finite());
        }
    }
}
