use serde::{Deserialize, Serialize};

/// XP required to advance from level 1 to level 2.
pub const BASE_XP_PER_LEVEL: u64 = 1000;

/// Per-level growth multiplier on the requirement.
pub const LEVEL_GROWTH: f64 = 1.2;

/// Position of a learner on the level curve, derived from total XP.
///
/// Never persisted as independent truth; re-derive from XP instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub level: u32,
    pub xp_in_level: u64,
    pub xp_to_next_level: u64,
    pub progress_percent: u8,
}

/// XP required to advance past `level` (1-based).
pub fn xp_requirement(level: u32) -> u64 {
    (BASE_XP_PER_LEVEL as f64 * LEVEL_GROWTH.powi(level as i32 - 1)).floor() as u64
}

/// Map total accumulated XP to a level and in-level progress.
///
/// Walks the curve from level 1, consuming the requirement for each level
/// while the remainder covers it. Total and idempotent: every XP value maps
/// to exactly one (level, xp_in_level) pair, and level is non-decreasing in
/// total XP.
pub fn level_for_xp(total_xp: u64) -> LevelProgress {
    let mut level = 1u32;
    let mut remainder = total_xp;
    let mut requirement = xp_requirement(level);

    while remainder >= requirement {
        remainder -= requirement;
        level += 1;
        requirement = xp_requirement(level);
    }

    // remainder < requirement, so the percentage is always below 100
    let progress_percent = ((remainder as u128 * 100) / requirement as u128) as u8;

    LevelProgress {
        level,
        xp_in_level: remainder,
        xp_to_next_level: requirement,
        progress_percent,
    }
}

/// Total XP needed to stand at the start of `level` with nothing banked.
pub fn xp_to_reach(level: u32) -> u64 {
    (1..level).map(xp_requirement).sum()
}

/// Display title for a level band.
pub fn level_title(level: u32) -> &'static str {
    match level {
        0..=4 => "Beginner",
        5..=9 => "Explorer",
        10..=19 => "Adventurer",
        20..=29 => "Expert",
        30..=49 => "Master",
        50..=99 => "Legend",
        _ => "Grandmaster",
    }
}
