//! Level calculator
//!
//! Pure functions mapping accumulated points or streamed hours to a level number.
//! Callers persist levels through [`raise_level`] so a stored level never goes down.

use crate::entities::{AccountRole, LevelTier};

/// Streamed hours needed for each automatic level-up
pub const HOURS_PER_LEVEL: f64 = 5.0;

/// Level reached by `points` under a streamer's tier table
///
/// Tiers are scanned by `required_points` descending and the first qualifying tier
/// wins, so a table whose thresholds do not grow with the level number still yields a
/// deterministic answer. Returns `None` when no tier qualifies or the table is empty.
pub fn tier_level(tiers: &[LevelTier], points: i64) -> Option<i32> {
    let mut ordered: Vec<&LevelTier> = tiers.iter().collect();
    ordered.sort_by(|a, b| {
        b.required_points
            .cmp(&a.required_points)
            .then(b.level_number.cmp(&a.level_number))
    });

    ordered
        .into_iter()
        .find(|tier| tier.required_points <= points)
        .map(|tier| tier.level_number)
}

/// `floor(points / divisor) + 1`, with the divisor chosen by role
pub fn default_level(points: i64, role: AccountRole) -> i32 {
    let level = points.max(0) / role.points_per_level() + 1;
    i32::try_from(level).unwrap_or(i32::MAX)
}

/// Level for `points`: the tier table when one exists, otherwise the default formula
pub fn level_for_points(points: i64, role: AccountRole, tiers: &[LevelTier]) -> i32 {
    if tiers.is_empty() {
        return default_level(points, role);
    }
    tier_level(tiers, points).unwrap_or(1)
}

/// Incremental hours leveling: each completed block of [`HOURS_PER_LEVEL`] crossed
/// between `old_hours` and `new_hours` adds one level to `current_level`
pub fn level_for_hours(current_level: i32, old_hours: f64, new_hours: f64) -> i32 {
    let blocks = |hours: f64| (hours.max(0.0) / HOURS_PER_LEVEL).floor() as i64;
    let gained = (blocks(new_hours) - blocks(old_hours)).max(0);
    let gained = i32::try_from(gained).unwrap_or(i32::MAX);
    current_level.saturating_add(gained)
}

/// Monotonic level update
#[inline]
pub fn raise_level(current: i32, computed: i32) -> i32 {
    current.max(computed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::Snowflake;

    fn tier(level: i32, required: i64) -> LevelTier {
        LevelTier::new(
            Snowflake::new(i64::from(level)),
            Snowflake::new(1),
            level,
            format!("L{level}"),
            required,
        )
    }

    #[test]
    fn test_tier_table_picks_highest_qualifying() {
        let tiers = vec![tier(1, 0), tier(2, 100), tier(3, 500)];
        assert_eq!(level_for_points(150, AccountRole::Spectator, &tiers), 2);
        assert_eq!(level_for_points(500, AccountRole::Spectator, &tiers), 3);
        assert_eq!(level_for_points(0, AccountRole::Spectator, &tiers), 1);
    }

    #[test]
    fn test_tier_table_without_qualifying_row_is_level_one() {
        let tiers = vec![tier(2, 100), tier(3, 500)];
        assert_eq!(level_for_points(99, AccountRole::Streamer, &tiers), 1);
    }

    #[test]
    fn test_malformed_table_uses_descending_scan() {
        // level 5 needs fewer points than level 4
        let tiers = vec![tier(4, 300), tier(5, 200)];
        assert_eq!(tier_level(&tiers, 250), Some(5));
        assert_eq!(tier_level(&tiers, 350), Some(4));
    }

    #[test]
    fn test_default_formula_divisors() {
        assert_eq!(level_for_points(0, AccountRole::Spectator, &[]), 1);
        assert_eq!(level_for_points(49, AccountRole::Spectator, &[]), 1);
        assert_eq!(level_for_points(50, AccountRole::Spectator, &[]), 2);
        assert_eq!(level_for_points(99, AccountRole::Streamer, &[]), 1);
        assert_eq!(level_for_points(250, AccountRole::Streamer, &[]), 3);
        assert_eq!(default_level(-10, AccountRole::Streamer), 1);
    }

    #[test]
    fn test_hours_are_incremental() {
        assert_eq!(level_for_hours(3, 4.0, 5.0), 4);
        assert_eq!(level_for_hours(3, 5.5, 9.9), 3);
        assert_eq!(level_for_hours(1, 0.0, 12.0), 3);
        // a manually raised level is kept and built upon
        assert_eq!(level_for_hours(10, 9.0, 10.0), 11);
    }

    #[test]
    fn test_raise_level_never_lowers() {
        assert_eq!(raise_level(4, 2), 4);
        assert_eq!(raise_level(2, 4), 4);
    }

    #[test]
    fn test_level_monotonic_under_any_award_order() {
        let tiers = vec![tier(1, 0), tier(2, 100), tier(3, 500)];
        let awards = [400, 10, 90, 7, 300];
        let mut points = 0;
        let mut level = 1;
        for award in awards {
            points += award;
            let next = raise_level(level, level_for_points(points, AccountRole::Streamer, &tiers));
            assert!(next >= level);
            level = next;
        }
        assert_eq!(level, 3);
    }
}
