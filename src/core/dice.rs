//! Dice expression parsing and rolling.
//!
//! Supports the classic `NdM` notation (e.g. `2d6`): N independent uniform
//! rolls of an M-sided die. Parsing is strict - two positive integers around
//! a literal `d` - and parse failure is a value, never a panic, so the
//! command layer can answer with a usage message.

use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// A parsed dice expression: `count` rolls of a `sides`-sided die.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceRoll {
    /// Number of independent rolls (at least 1)
    pub count: u32,
    /// Number of sides per die (at least 1)
    pub sides: u32,
}

/// Returned when a dice expression does not match `NdM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseDiceError;

impl fmt::Display for ParseDiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Format has to be NdM, e.g. 2d6")
    }
}

impl std::error::Error for ParseDiceError {}

impl FromStr for DiceRoll {
    type Err = ParseDiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let (count, sides) = lowered.split_once('d').ok_or(ParseDiceError)?;
        let count: u32 = count.parse().map_err(|_| ParseDiceError)?;
        let sides: u32 = sides.parse().map_err(|_| ParseDiceError)?;
        if count == 0 || sides == 0 {
            return Err(ParseDiceError);
        }
        Ok(Self { count, sides })
    }
}

/// The individual values and total of one executed roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollOutcome {
    /// Each die's value, in roll order, each in `1..=sides`
    pub values: Vec<u32>,
    /// Sum of all values
    pub total: u64,
}

impl DiceRoll {
    /// Rolls with a caller-supplied RNG, so tests can seed deterministically.
    pub fn roll_with<R: Rng>(&self, rng: &mut R) -> RollOutcome {
        let values: Vec<u32> = (0..self.count).map(|_| rng.gen_range(1..=self.sides)).collect();
        let total = values.iter().map(|&v| u64::from(v)).sum();
        RollOutcome { values, total }
    }

    /// Rolls with the thread-local RNG.
    #[must_use]
    pub fn roll(&self) -> RollOutcome {
        self.roll_with(&mut rand::thread_rng())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_parse_valid_expression() {
        let roll: DiceRoll = "2d6".parse().unwrap();
        assert_eq!(roll, DiceRoll { count: 2, sides: 6 });
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trims() {
        let roll: DiceRoll = " 3D20 ".parse().unwrap();
        assert_eq!(roll, DiceRoll { count: 3, sides: 20 });
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("bad".parse::<DiceRoll>().is_err());
        assert!("2x6".parse::<DiceRoll>().is_err());
        assert!("d6".parse::<DiceRoll>().is_err());
        assert!("2d".parse::<DiceRoll>().is_err());
        assert!("".parse::<DiceRoll>().is_err());
        assert!("-2d6".parse::<DiceRoll>().is_err());
    }

    #[test]
    fn test_parse_rejects_zero_counts_and_sides() {
        assert!("0d6".parse::<DiceRoll>().is_err());
        assert!("2d0".parse::<DiceRoll>().is_err());
    }

    #[test]
    fn test_roll_two_d6_bounds_and_sum() {
        let roll: DiceRoll = "2d6".parse().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let outcome = roll.roll_with(&mut rng);

        assert_eq!(outcome.values.len(), 2);
        for &value in &outcome.values {
            assert!((1..=6).contains(&value));
        }
        let expected: u64 = outcome.values.iter().map(|&v| u64::from(v)).sum();
        assert_eq!(outcome.total, expected);
    }

    #[test]
    fn test_roll_one_sided_die_is_always_one() {
        let roll: DiceRoll = "5d1".parse().unwrap();
        let outcome = roll.roll();
        assert_eq!(outcome.values, vec![1, 1, 1, 1, 1]);
        assert_eq!(outcome.total, 5);
    }
}
