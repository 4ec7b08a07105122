use rand::Rng;
use super::tiers::{Reward, Tier};

pub const REEL_COUNT: usize = 3;
/// Entries per reel strip
pub const REEL_LENGTH: usize = 60;
/// The only position that matters: every reel stops here
pub const STOP_INDEX: usize = 45;

/// Source of uniform numbers in `[0, 1)`.
///
/// Any `rand::Rng` is a `Dice`; tests script the values instead.
pub trait Dice {
    fn unit(&mut self) -> f64;

    /// Uniform index in `0..len`, `Math.floor(random() * len)` style
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((self.unit() * len as f64) as usize).min(len - 1)
    }
}

impl<R: Rng + ?Sized> Dice for R {
    fn unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Three strips of filler rewards drawn from one tier's pool
#[derive(Debug, Clone, PartialEq)]
pub struct ReelSet {
    pub tier_id: &'static str,
    pub reels: [Vec<Reward>; REEL_COUNT],
}

impl ReelSet {
    pub fn generate<D: Dice + ?Sized>(tier: &'static Tier, dice: &mut D) -> Self {
        let reels = std::array::from_fn(|_| {
            (0..REEL_LENGTH)
                .map(|_| tier.rewards[dice.pick(tier.rewards.len())].clone())
                .collect()
        });

        Self { tier_id: tier.id, reels }
    }

    /// Entries visible on the pay line once all reels have stopped
    pub fn stopped(&self) -> [&Reward; REEL_COUNT] {
        std::array::from_fn(|i| &self.reels[i][STOP_INDEX])
    }

    /// Every reel lands on `reward`
    pub fn inject_win(&mut self, reward: &Reward) {
        for reel in self.reels.iter_mut() {
            reel[STOP_INDEX] = reward.clone();
        }
    }

    /// Puts entries on the pay line that never read as three of a kind
    /// (as long as the pool has more than one reward).
    pub fn inject_loss<D: Dice + ?Sized>(&mut self, tier: &'static Tier, dice: &mut D) {
        let pool = tier.rewards;
        let first = dice.pick(pool.len());
        let second = dice.pick(pool.len());
        let mut third = dice.pick(pool.len());

        if first == second && third == first && pool.len() > 1 {
            third = (first + 1 + dice.pick(pool.len() - 1)) % pool.len();
        }

        for (reel, index) in self.reels.iter_mut().zip([first, second, third]) {
            reel[STOP_INDEX] = pool[index].clone();
        }
    }

    pub fn is_winning_line(&self) -> bool {
        let [a, b, c] = self.stopped();
        a == b && b == c
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::shared_gacha::tiers::{tier, TIERS};

    /// Replays a fixed list of values, cycling when exhausted
    pub(crate) struct ScriptedDice {
        values: Vec<f64>,
        cursor: usize,
    }

    impl ScriptedDice {
        pub(crate) fn new(values: &[f64]) -> Self {
            Self { values: values.to_vec(), cursor: 0 }
        }
    }

    impl Dice for ScriptedDice {
        fn unit(&mut self) -> f64 {
            let value = self.values[self.cursor % self.values.len()];
            self.cursor += 1;
            value
        }
    }

    #[test]
    fn pick_stays_in_bounds() {
        let mut dice = ScriptedDice::new(&[0.0, 0.5, 0.999_999, 1.0]);
        for _ in 0..4 {
            assert!(dice.pick(5) < 5);
        }
        assert_eq!(dice.pick(0), 0);
    }

    #[test]
    fn generates_three_full_reels_from_the_pool() {
        let mut rng = rand::thread_rng();
        for tier in TIERS.iter() {
            let set = ReelSet::generate(tier, &mut rng);
            assert_eq!(set.tier_id, tier.id);
            for reel in set.reels.iter() {
                assert_eq!(reel.len(), REEL_LENGTH);
                assert!(reel.iter().all(|r| tier.rewards.contains(r)));
            }
        }
    }

    #[test]
    fn win_lands_every_reel_on_the_reward() {
        let silver = tier("silver").unwrap();
        let mut set = ReelSet::generate(silver, &mut rand::thread_rng());
        let reward = &silver.rewards[3];
        set.inject_win(reward);
        assert!(set.stopped().iter().all(|r| *r == reward));
        assert!(set.is_winning_line());
    }

    #[test]
    fn loss_never_shows_three_of_a_kind() {
        let gold = tier("gold").unwrap();
        // the same pick for every reel forces the reroll branch
        let mut dice = ScriptedDice::new(&[0.1]);
        let mut set = ReelSet::generate(gold, &mut dice);
        set.inject_loss(gold, &mut dice);
        assert!(!set.is_winning_line());

        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            set.inject_loss(gold, &mut rng);
            assert!(!set.is_winning_line());
        }
    }
}
