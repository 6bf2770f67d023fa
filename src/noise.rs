use rand::Rng;

use crate::rule_set::Rule;

/// Default odds of a spontaneous birth: one in this many cells per generation.
pub const NOISE_ODDS: u32 = 2382;

/// Wraps a [`Rule`] and occasionally forces cells alive.
///
/// After the base rule has decided, each cell independently becomes alive with probability
/// `1 / odds`, whatever the base rule said. The random source is owned by the rule, so seed it
/// once per process and hand it in here.
pub struct Noisy<R, G> {
    base: R,
    rng: G,
    odds: u32,
}

impl<R: Rule, G: Rng> Noisy<R, G> {
    pub fn new(base: R, rng: G) -> Self {
        Self::with_odds(base, rng, NOISE_ODDS)
    }

    /// `odds` of zero is treated as one, i.e. every cell is forced alive.
    pub fn with_odds(base: R, rng: G, odds: u32) -> Self {
        Self {
            base,
            rng,
            odds: odds.max(1),
        }
    }

    pub fn odds(&self) -> u32 {
        self.odds
    }

    pub fn base(&self) -> &R {
        &self.base
    }

    pub fn into_inner(self) -> R {
        self.base
    }
}

impl<R: Rule, G: Rng> Rule for Noisy<R, G> {
    fn next_state(&mut self, alive: bool, live_neighbors: u8) -> bool {
        let next = self.base.next_state(alive, live_neighbors);

        // always draw, so the random sequence doesn't depend on the base rule's answer
        let spark = self.rng.gen_ratio(1, self.odds);

        next || spark
    }

    fn name(&self) -> String {
        format!("{} + noise", self.base.name())
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::Noisy;
    use crate::rule_set::Rule;
    use crate::rule_set::STANDARD;

    #[test]
    fn odds_of_one_always_sparks() {
        let mut rule = Noisy::with_odds(STANDARD, StdRng::seed_from_u64(7), 1);

        for n in 0..=8 {
            assert!(rule.next_state(false, n));
            assert!(rule.next_state(true, n));
        }
    }

    #[test]
    fn zero_odds_is_clamped() {
        let rule = Noisy::with_odds(STANDARD, StdRng::seed_from_u64(7), 0);

        assert_eq!(rule.odds(), 1);
    }

    #[test]
    fn noise_never_kills() {
        let mut rule = Noisy::new(STANDARD, StdRng::seed_from_u64(1));

        for _ in 0..10_000 {
            assert!(rule.next_state(true, 3));
            assert!(rule.next_state(false, 3));
        }
    }

    #[test]
    fn same_seed_same_sparks() {
        let mut a = Noisy::with_odds(STANDARD, StdRng::seed_from_u64(42), 10);
        let mut b = Noisy::with_odds(STANDARD, StdRng::seed_from_u64(42), 10);

        for _ in 0..1_000 {
            assert_eq!(a.next_state(false, 0), b.next_state(false, 0));
        }
    }

    #[test]
    fn sparks_are_rare() {
        let mut rule = Noisy::new(STANDARD, StdRng::seed_from_u64(3));

        let sparks = (0..100_000).filter(|_| rule.next_state(false, 0)).count();

        // about 42 expected
        assert!(sparks > 5 && sparks < 150, "got {sparks} sparks");
    }

    #[test]
    fn name_mentions_base() {
        let rule = Noisy::new(STANDARD, StdRng::seed_from_u64(0));

        assert_eq!(rule.name(), "standard + noise");
        assert_eq!(rule.base().name(), "standard");
    }
}
