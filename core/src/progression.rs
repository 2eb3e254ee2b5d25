use rand::Rng;

use crate::{Level, PALETTE_LEN};

/// How many palette colors are in play at `level`: the active subset is the
/// first `active_colors(level)` slots. Non-decreasing in `level` and bounded
/// by [`PALETTE_LEN`].
pub const fn active_colors(level: Level) -> u8 {
    match level {
        0..=3 => 3,
        4..=6 => 4,
        7..=9 => 5,
        _ => PALETTE_LEN,
    }
}

/// Rolls the turn budget for `level`: the maximum number of effective moves
/// before the level ends in a game over. Re-rolled once per level, at level
/// start.
pub fn roll_turn_budget<R: Rng + ?Sized>(level: Level, rng: &mut R) -> u32 {
    match level {
        0..=3 => rng.random_range(11..=15),
        4..=6 => rng.random_range(12..=15),
        7..=9 => rng.random_range(14..=15),
        _ => rng.random_range(15..=16),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    #[test]
    fn active_colors_follows_the_level_bands() {
        assert_eq!(active_colors(1), 3);
        assert_eq!(active_colors(3), 3);
        assert_eq!(active_colors(4), 4);
        assert_eq!(active_colors(6), 4);
        assert_eq!(active_colors(7), 5);
        assert_eq!(active_colors(9), 5);
        assert_eq!(active_colors(10), 6);
        assert_eq!(active_colors(1000), 6);
    }

    #[test]
    fn active_colors_is_non_decreasing_and_bounded() {
        let mut prev = 0;
        for level in 1..=32 {
            let colors = active_colors(level);
            assert!(colors >= prev);
            assert!(colors <= PALETTE_LEN);
            prev = colors;
        }
    }

    #[test]
    fn turn_budget_stays_inside_the_level_bands() {
        let mut rng = SmallRng::seed_from_u64(0);
        for _ in 0..64 {
            assert!((11..=15).contains(&roll_turn_budget(1, &mut rng)));
            assert!((12..=15).contains(&roll_turn_budget(5, &mut rng)));
            assert!((14..=15).contains(&roll_turn_budget(8, &mut rng)));
            assert!((15..=16).contains(&roll_turn_budget(12, &mut rng)));
        }
    }
}
