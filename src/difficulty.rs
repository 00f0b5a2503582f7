use rand::Rng;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Difficulty chosen before a round starts. Only affects how often enemies shoot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn get_name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    /// Position in [`Difficulty::ALL`], used by the difficulty screen cursor.
    pub fn index(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Normal => 1,
            Difficulty::Hard => 2,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.get_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty `{0}` (expected easy, normal or hard)")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

/// Inclusive range of ticks between two enemy shots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownRange {
    pub min: i32,
    pub max: i32,
}

impl CooldownRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Draws a cooldown uniformly from `[min, max]`.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> i32 {
        rng.random_range(self.min..=self.max)
    }

    pub fn contains(&self, ticks: i32) -> bool {
        (self.min..=self.max).contains(&ticks)
    }
}

/// Difficulty -> cooldown range lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownTable {
    pub easy: CooldownRange,
    pub normal: CooldownRange,
    pub hard: CooldownRange,
}

impl CooldownTable {
    pub fn range(&self, difficulty: Difficulty) -> CooldownRange {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Normal => self.normal,
            Difficulty::Hard => self.hard,
        }
    }
}

impl Default for CooldownTable {
    fn default() -> Self {
        Self {
            easy: CooldownRange::new(60, 120),
            normal: CooldownRange::new(30, 90),
            hard: CooldownRange::new(15, 45),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_difficulty_default_is_normal() {
        assert_eq!(Difficulty::default(), Difficulty::Normal);
    }

    #[test]
    fn test_difficulty_parse_is_case_insensitive() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!("Normal".parse::<Difficulty>(), Ok(Difficulty::Normal));
        assert_eq!(" HARD ".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("nightmare".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_difficulty_display_round_trips_through_parse() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.to_string().parse::<Difficulty>(), Ok(difficulty));
        }
    }

    #[test]
    fn test_difficulty_index_matches_all_order() {
        for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
            assert_eq!(difficulty.index(), i);
        }
    }

    #[test]
    fn test_default_cooldown_table() {
        let table = CooldownTable::default();
        assert_eq!(table.range(Difficulty::Easy), CooldownRange::new(60, 120));
        assert_eq!(table.range(Difficulty::Normal), CooldownRange::new(30, 90));
        assert_eq!(table.range(Difficulty::Hard), CooldownRange::new(15, 45));
    }

    #[test]
    fn test_single_value_range_always_draws_that_value() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = CooldownRange::new(12, 12);
        for _ in 0..20 {
            assert_eq!(range.draw(&mut rng), 12);
        }
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_drawn_cooldown_within_difficulty_range(
                seed in any::<u64>(),
                difficulty in prop::sample::select(Difficulty::ALL.to_vec())
            ) {
                let mut rng = StdRng::seed_from_u64(seed);
                let range = CooldownTable::default().range(difficulty);
                for _ in 0..50 {
                    prop_assert!(range.contains(range.draw(&mut rng)));
                }
            }
        }
    }
}
