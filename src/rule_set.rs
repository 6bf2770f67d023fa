use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Decides the next state of a single cell.
///
/// A rule only ever sees one cell's current state and how many of its eight neighbors are
/// alive. It takes `&mut self` so that stateful rules (see [`crate::noise::Noisy`]) can draw
/// from a random source.
pub trait Rule {
    fn next_state(&mut self, alive: bool, live_neighbors: u8) -> bool;

    /// Human readable name, shown in the status line
    fn name(&self) -> String {
        String::from("custom")
    }
}

impl<R: Rule + ?Sized> Rule for Box<R> {
    fn next_state(&mut self, alive: bool, live_neighbors: u8) -> bool {
        (**self).next_state(alive, live_neighbors)
    }

    fn name(&self) -> String {
        (**self).name()
    }
}

/// Rules of Conway's Game of Life.
pub const STANDARD: RuleSet = RuleSet::new(0b1000, 0b1100);

/// Births on two neighbors. Unlike textbook Seeds (B2/S), live cells survive on two or three
/// neighbors, exactly like [`STANDARD`].
pub const SEEDS: RuleSet = RuleSet::new(0b100, 0b1100);

/// A life-like rule.
///
/// # Representation
/// Life rules are represented as
/// ```notrust
/// |------birth------|
/// 0000_0000_0000_0000_0000_0000_0000_0000
///                     |----survival-----|
/// ```
///
/// # Examples
/// ```notrust
/// b3s23:                0000_0000_0000_1000_0000_0000_0000_1100
///
/// b0s0:                 0000_0000_0000_0000_0000_0000_0000_0000
/// b012345678s012345678: 0000_0001_1111_1111_0000_0001_1111_1111
/// ```
///
/// See: https://conwaylife.com/wiki/Rulestring
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RuleSet {
    rule: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        STANDARD
    }
}

impl RuleSet {
    /// Create a new `RuleSet` for the given births and survivals. For both `b` and
    /// `s`, numbers are set on a bit basis. For instance if bit `i` in `b` is on, it
    /// means `i` is included in the set of births. Any bit past the 8th is ignored.
    pub const fn new(b: u16, s: u16) -> Self {
        let b = b & 0x1FF;
        let s = s & 0x1FF;

        Self {
            rule: (b as u32) << 16 | s as u32,
        }
    }

    pub const fn standard() -> Self {
        STANDARD
    }

    pub const fn seeds() -> Self {
        SEEDS
    }

    pub fn births(&self) -> u16 {
        ((self.rule & 0x1FF0000) >> 0x10) as u16
    }

    pub fn survivals(&self) -> u16 {
        (self.rule & 0x1FF) as u16
    }

    /// Whether a cell with the given state and live neighbor count is alive next generation.
    pub fn apply(&self, alive: bool, live_neighbors: u8) -> bool {
        if live_neighbors > 8 {
            return false;
        }

        let mask = 1 << live_neighbors;

        if alive {
            self.survivals() & mask == mask
        } else {
            self.births() & mask == mask
        }
    }
}

impl Rule for RuleSet {
    fn next_state(&mut self, alive: bool, live_neighbors: u8) -> bool {
        self.apply(alive, live_neighbors)
    }

    fn name(&self) -> String {
        match *self {
            STANDARD => String::from("standard"),
            SEEDS => String::from("seeds"),
            set => set.to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleSetError {
    #[error("Rulestring must start with 'b' or 'B', got {0:?}")]
    MissingBirth(String),

    #[error("Rulestring is missing the 's' or 'S' survival section")]
    MissingSurvival,

    #[error("Unexpected character '{0}' in rulestring")]
    InvalidChar(char),

    #[error("Neighbor count {0} is larger than 8")]
    CountTooLarge(u32),
}

/// Accepts `B3/S23`, `b3s23` and `B3/S` style rulestrings.
impl FromStr for RuleSet {
    type Err = RuleSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        enum State {
            Birth,
            Survival,
        }

        let mut chars = s.trim().chars();

        let (Some('b' | 'B'), rest) = (chars.next(), chars.as_str()) else {
            return Err(RuleSetError::MissingBirth(s.to_string()));
        };

        let mut state = State::Birth;
        let mut seen_survival = false;
        let (mut b, mut sv) = (0u16, 0u16);

        for c in rest.chars() {
            match c {
                's' | 'S' if !seen_survival => {
                    state = State::Survival;
                    seen_survival = true;
                }
                '/' if !seen_survival => {}
                n => {
                    let n = n.to_digit(10).ok_or(RuleSetError::InvalidChar(n))?;

                    if n > 8 {
                        return Err(RuleSetError::CountTooLarge(n));
                    }

                    match state {
                        State::Birth => b |= 1 << n,
                        State::Survival => sv |= 1 << n,
                    }
                }
            }
        }

        if !seen_survival {
            return Err(RuleSetError::MissingSurvival);
        }

        Ok(RuleSet::new(b, sv))
    }
}

/// Writes the rule in `B3/S23` notation.
impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn digits(f: &mut fmt::Formatter<'_>, mask: u16) -> fmt::Result {
            for n in 0..=8 {
                if mask & (1 << n) != 0 {
                    write!(f, "{n}")?;
                }
            }

            Ok(())
        }

        f.write_str("B")?;
        digits(f, self.births())?;
        f.write_str("/S")?;
        digits(f, self.survivals())
    }
}

#[cfg(test)]
mod tests {
    use super::Rule;
    use super::RuleSet;
    use super::RuleSetError;
    use super::SEEDS;
    use super::STANDARD;

    #[test]
    fn standard_truth_table() {
        for n in 0..=8 {
            assert_eq!(STANDARD.apply(true, n), n == 2 || n == 3, "alive with {n}");
            assert_eq!(STANDARD.apply(false, n), n == 3, "dead with {n}");
        }
    }

    #[test]
    fn seeds_truth_table() {
        for n in 0..=8 {
            assert_eq!(SEEDS.apply(true, n), n == 2 || n == 3, "alive with {n}");
            assert_eq!(SEEDS.apply(false, n), n == 2, "dead with {n}");
        }
    }

    #[test]
    fn rule_trait_matches_apply() {
        let mut rule = RuleSet::seeds();

        assert!(rule.next_state(false, 2));
        assert!(!rule.next_state(false, 3));
        assert_eq!(rule.name(), "seeds");
        assert_eq!(RuleSet::standard().name(), "standard");
    }

    #[test]
    fn parse_rulestrings() {
        assert_eq!("B3/S23".parse::<RuleSet>(), Ok(STANDARD));
        assert_eq!("b3s23".parse::<RuleSet>(), Ok(STANDARD));
        assert_eq!("B2/S23".parse::<RuleSet>(), Ok(SEEDS));
        assert_eq!("B2/S".parse::<RuleSet>(), Ok(RuleSet::new(0b100, 0)));
        assert_eq!("B36/S23".parse::<RuleSet>(), Ok(RuleSet::new(0b100_1000, 0b1100)));
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            "3/23".parse::<RuleSet>(),
            Err(RuleSetError::MissingBirth(_))
        ));
        assert_eq!("B3".parse::<RuleSet>(), Err(RuleSetError::MissingSurvival));
        assert_eq!("B9/S23".parse::<RuleSet>(), Err(RuleSetError::CountTooLarge(9)));
        assert_eq!("B3/S2x".parse::<RuleSet>(), Err(RuleSetError::InvalidChar('x')));
    }

    #[test]
    fn display_round_trips_custom_rules() {
        let highlife = RuleSet::new(0b100_1000, 0b1100);

        assert_eq!(highlife.to_string(), "B36/S23");
        assert_eq!(highlife.name(), "B36/S23");
    }

    #[test]
    fn bits_past_eight_are_ignored() {
        let set = RuleSet::new(0xFFFF, 0xFFFF);

        assert_eq!(set.births(), 0x1FF);
        assert_eq!(set.survivals(), 0x1FF);
    }
}
