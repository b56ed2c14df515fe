//! Range mapping, clamping and integer power helpers.

/// Linearly map `x` from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// Integer division truncates toward zero. Values outside the input range
/// extrapolate; clamp with [`constrain`] when needed. A degenerate input
/// range maps everything to `out_min`.
pub fn map_range(x: i64, in_min: i64, in_max: i64, out_min: i64, out_max: i64) -> i64 {
    if in_max == in_min {
        return out_min;
    }
    let (x, in_min, in_max) = (i128::from(x), i128::from(in_min), i128::from(in_max));
    let span = i128::from(out_max) - i128::from(out_min);
    // Only a saturated i128::MIN over -1 overflows; its true sign is positive
    let scaled = (x - in_min)
        .saturating_mul(span)
        .checked_div(in_max - in_min)
        .unwrap_or(i128::MAX);
    scaled
        .saturating_add(i128::from(out_min))
        .clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

/// Floating point [`map_range`]
pub fn map_range_f32(x: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    if in_max == in_min {
        return out_min;
    }
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Clamp `x` to `[min, max]`
pub fn constrain<T: PartialOrd>(x: T, min: T, max: T) -> T {
    if x < min {
        min
    } else if x > max {
        max
    } else {
        x
    }
}

/// `base` raised to `exp`, wrapping on overflow like the 16-bit registers it
/// feeds. Iterative square-and-multiply.
pub fn power(base: u16, exp: u16) -> u16 {
    let mut result: u16 = 1;
    let mut base = base;
    let mut exp = exp;

    while exp > 0 {
        if exp & 1 == 1 {
            result = result.wrapping_mul(base);
        }
        base = base.wrapping_mul(base);
        exp >>= 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_range() {
        assert_eq!(map_range(512, 0, 1023, 0, 255), 127);
        assert_eq!(map_range(0, 0, 1023, 0, 255), 0);
        assert_eq!(map_range(1023, 0, 1023, 0, 255), 255);
        // Reversed output range
        assert_eq!(map_range(25, 0, 100, 100, 0), 75);
    }

    #[test]
    fn test_map_range_extreme_arguments() {
        assert_eq!(
            map_range(i64::MIN, i64::MAX, i64::MAX - 1, i64::MIN, i64::MAX),
            i64::MAX
        );
        assert_eq!(map_range(i64::MIN, 0, 1, 0, i64::MAX), i64::MIN);
    }

    #[test]
    fn test_map_range_degenerate_input() {
        assert_eq!(map_range(7, 5, 5, 10, 20), 10);
        assert_eq!(map_range_f32(7.0, 5.0, 5.0, 10.0, 20.0), 10.0);
    }

    #[test]
    fn test_map_range_f32() {
        let v = map_range_f32(0.5, 0.0, 1.0, 1000.0, 2000.0);
        assert!((v - 1500.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_constrain() {
        assert_eq!(constrain(5, 0, 10), 5);
        assert_eq!(constrain(-3, 0, 10), 0);
        assert_eq!(constrain(42u32, 0, 10), 10);
        assert_eq!(constrain(1.5f32, 0.0, 1.0), 1.0);
    }

    #[test]
    fn test_power() {
        assert_eq!(power(2, 0), 1);
        assert_eq!(power(2, 7), 128);
        assert_eq!(power(3, 4), 81);
        assert_eq!(power(0, 0), 1);
        // Wraps instead of overflowing
        assert_eq!(power(2, 16), 0);
        assert_eq!(power(10, 5), 100_000u32 as u16);
    }

    #[test]
    fn test_power_large_exponent() {
        assert_eq!(power(1, u16::MAX), 1);
        assert_eq!(power(2, u16::MAX), 0);
    }
}
