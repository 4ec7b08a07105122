use std::fmt;
use super::api::{RollResponse, RollResult, CODE_NO_WIN};
use super::orchestrator::RollTicket;
use super::reels::Dice;
use super::tiers::Tier;
use crate::constants::NO_WIN_MESSAGE;

/// Share of rolls that win when resolved locally
pub const LOCAL_WIN_RATE: f64 = 0.7;

#[derive(Debug, Clone, PartialEq)]
pub enum ResolveError {
    /// The endpoint answered with something other than JSON
    Unavailable(String),
    /// The request never completed
    Transport(String),
    /// Non-OK HTTP status
    Status(u16),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(detail) => write!(f, "Roll endpoint unavailable: {}", detail),
            Self::Transport(detail) => write!(f, "Network error: {}", detail),
            Self::Status(status) => write!(f, "Error status: {}", status),
        }
    }
}

impl std::error::Error for ResolveError {}

/// Turns a paid-for ticket into a roll outcome
#[allow(async_fn_in_trait)]
pub trait RollResolver {
    async fn resolve(&mut self, ticket: &RollTicket) -> Result<RollResponse, ResolveError>;
}

/// Pseudo-random stand-in for the roll endpoint
#[derive(Debug, Clone)]
pub struct LocalResolver<D> {
    dice: D,
    win_rate: f64,
    sequence: u64,
}

impl<D: Dice> LocalResolver<D> {
    pub fn new(dice: D) -> Self {
        Self::with_win_rate(dice, LOCAL_WIN_RATE)
    }

    pub fn with_win_rate(dice: D, win_rate: f64) -> Self {
        Self { dice, win_rate: win_rate.clamp(0.0, 1.0), sequence: 0 }
    }

    /// One unit draw decides win or loss (`unit < 1 - win_rate` loses), a
    /// second picks the reward uniformly from the pool.
    pub fn draw(&mut self, tier: &Tier, created_at: &str) -> RollResponse {
        if self.dice.unit() < 1.0 - self.win_rate {
            return RollResponse::failed(CODE_NO_WIN, NO_WIN_MESSAGE);
        }

        let reward = &tier.rewards[self.dice.pick(tier.rewards.len())];
        self.sequence += 1;

        RollResponse::won(RollResult {
            id: format!("local-{}-{}", tier.id, self.sequence),
            reward_id: reward.id.to_string(),
            reward_name: reward.name.to_string(),
            rarity: reward.rarity,
            created_at: created_at.to_string(),
        })
    }
}

impl<D: Dice> RollResolver for LocalResolver<D> {
    async fn resolve(&mut self, ticket: &RollTicket) -> Result<RollResponse, ResolveError> {
        Ok(self.draw(ticket.tier, &ticket.requested_at))
    }
}

/// Asks `primary` first and hands the ticket to `fallback` only when the
/// primary reports itself unavailable.
#[derive(Debug, Clone)]
pub struct FallbackResolver<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> FallbackResolver<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: RollResolver, F: RollResolver> RollResolver for FallbackResolver<P, F> {
    async fn resolve(&mut self, ticket: &RollTicket) -> Result<RollResponse, ResolveError> {
        match self.primary.resolve(ticket).await {
            Err(ResolveError::Unavailable(detail)) => {
                log::warn!("roll endpoint unavailable ({}), resolving locally", detail);
                self.fallback.resolve(ticket).await
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use crate::shared_gacha::reels::tests::ScriptedDice;
    use crate::shared_gacha::tiers::tier;

    struct Offline;

    impl RollResolver for Offline {
        async fn resolve(&mut self, _ticket: &RollTicket) -> Result<RollResponse, ResolveError> {
            Err(ResolveError::Unavailable("text/html".into()))
        }
    }

    struct Broken;

    impl RollResolver for Broken {
        async fn resolve(&mut self, _ticket: &RollTicket) -> Result<RollResponse, ResolveError> {
            Err(ResolveError::Status(502))
        }
    }

    #[test]
    fn low_draw_loses() {
        let silver = tier("silver").unwrap();
        let mut resolver = LocalResolver::new(ScriptedDice::new(&[0.1]));
        let response = resolver.draw(silver, "2026-01-01T00:00:00Z");
        assert!(!response.success);
        assert_eq!(response.code.as_deref(), Some(CODE_NO_WIN));
        assert!(response.data.is_none());
    }

    #[test]
    fn high_draw_wins_from_the_pool() {
        let silver = tier("silver").unwrap();
        let mut resolver = LocalResolver::new(ScriptedDice::new(&[0.9]));
        let response = resolver.draw(silver, "2026-01-01T00:00:00Z");
        let data = response.data.expect("winning roll carries data");
        assert!(response.success);
        // floor(0.9 * 5) = 4
        assert_eq!(data.reward_id, silver.rewards[4].id);
        assert_eq!(data.created_at, "2026-01-01T00:00:00Z");
    }

    #[test]
    fn win_rate_is_roughly_seventy_percent() {
        let gold = tier("gold").unwrap();
        let mut resolver = LocalResolver::new(rand::thread_rng());
        let wins = (0..10_000).filter(|_| resolver.draw(gold, "").success).count();
        assert!((6_500..7_500).contains(&wins), "{} wins", wins);
    }

    #[test]
    fn fallback_only_on_unavailable() {
        let ticket = RollTicket::for_tests(tier("silver").unwrap());

        let mut resolver = FallbackResolver::new(Offline, LocalResolver::new(ScriptedDice::new(&[0.9])));
        let response = block_on(resolver.resolve(&ticket)).unwrap();
        assert!(response.success);

        let mut resolver = FallbackResolver::new(Broken, LocalResolver::new(ScriptedDice::new(&[0.9])));
        assert_eq!(block_on(resolver.resolve(&ticket)), Err(ResolveError::Status(502)));
    }
}
