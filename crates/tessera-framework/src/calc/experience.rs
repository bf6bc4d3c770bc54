//! Experience arithmetic.

/// Experience needed to go from `level` to `level + 1`.
pub fn experience_for_level(level: i32) -> i64 {
    let level = i64::from(level);
    match level {
        ..=15 => 2 * level + 7,
        16..=30 => 5 * level - 38,
        _ => 9 * level - 158,
    }
}

/// Experience needed to reach `level` from zero, saturating at `i64::MAX`.
///
/// Closed form of the per-segment sums; coefficients are doubled so the
/// arithmetic stays integral.
pub fn experience_to_reach(level: i32) -> i64 {
    let l = i128::from(level.max(0));
    let doubled = match l {
        ..=16 => 2 * (l * l + 6 * l),
        17..=31 => 5 * l * l - 81 * l + 720,
        _ => 9 * l * l - 325 * l + 4440,
    };
    i64::try_from(doubled / 2).unwrap_or(i64::MAX)
}

/// Total experience held at `level` with `progress` (0.0 to 1.0) towards
/// the next level. Never negative.
pub fn total_experience(level: i32, progress: f32) -> i64 {
    let partial = (experience_for_level(level) as f64 * f64::from(progress) + 0.5).floor() as i64;
    experience_to_reach(level).saturating_add(partial).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_boundaries() {
        assert_eq!(experience_for_level(0), 7);
        assert_eq!(experience_for_level(15), 37);
        assert_eq!(experience_for_level(16), 42);
        assert_eq!(experience_for_level(30), 112);
        assert_eq!(experience_for_level(31), 121);
    }

    #[test]
    fn test_total_experience() {
        assert_eq!(total_experience(0, 0.0), 0);
        assert_eq!(total_experience(16, 0.0), 352);
        assert_eq!(total_experience(1, 0.5), 12);
        assert_eq!(total_experience(30, 0.0), 1395);
    }

    #[test]
    fn test_closed_form_matches_level_sums() {
        let mut sum = 0;
        for level in 0..=200 {
            assert_eq!(experience_to_reach(level), sum, "level {level}");
            sum += experience_for_level(level);
        }
    }

    #[test]
    fn test_huge_levels_saturate() {
        assert_eq!(total_experience(i32::MAX, 0.0), i64::MAX);
        assert_eq!(total_experience(i32::MAX, 1.0), i64::MAX);
        assert_eq!(experience_to_reach(1_000_000), 4_499_837_502_220);
    }

    #[test]
    fn test_total_experience_is_floored_at_zero() {
        assert_eq!(total_experience(-10, 1.0), 0);
    }
}
