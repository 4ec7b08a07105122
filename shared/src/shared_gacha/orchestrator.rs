use std::fmt;
use super::api::{RollResponse, RollResult, CODE_NO_WIN};
use super::celebration::Celebration;
use super::reels::{Dice, ReelSet};
use super::resolver::{ResolveError, RollResolver};
use super::session::GachaSession;
use super::tiers::{Reward, Tier};
use super::timeline::RollTimeline;
use crate::constants::{
    cooldown_error, ACCOUNT_NOT_LINKED_ERROR, GENERIC_ROLL_ERROR, INSUFFICIENT_BALANCE_ERROR,
    NO_WIN_MESSAGE, ROLL_COOLDOWN_MS, ROLL_IN_PROGRESS_ERROR,
};

/// Why a roll was refused before anything was charged or sent
#[derive(Debug, Clone, PartialEq)]
pub enum RollBlocked {
    AlreadyRolling,
    Cooldown { remaining_ms: u64 },
    NotLinked,
    InsufficientBalance,
}

impl fmt::Display for RollBlocked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyRolling => f.write_str(ROLL_IN_PROGRESS_ERROR),
            Self::Cooldown { remaining_ms } => f.write_str(&cooldown_error(remaining_ms.div_ceil(1000))),
            Self::NotLinked => f.write_str(ACCOUNT_NOT_LINKED_ERROR),
            Self::InsufficientBalance => f.write_str(INSUFFICIENT_BALANCE_ERROR),
        }
    }
}

impl std::error::Error for RollBlocked {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payment {
    Balance(u64),
    FreeRoll,
}

/// Proof that a roll was paid for. Consumed by `land` or `abort`.
#[derive(Debug, PartialEq)]
pub struct RollTicket {
    pub sequence: u64,
    pub user_id: String,
    pub tier: &'static Tier,
    pub payment: Payment,
    pub requested_at: String,
}

#[cfg(test)]
impl RollTicket {
    pub(crate) fn for_tests(tier: &'static Tier) -> Self {
        Self {
            sequence: 0,
            user_id: "test-user".into(),
            tier,
            payment: Payment::Balance(tier.cost),
            requested_at: "2026-01-01T00:00:00Z".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Win { result: RollResult, reward: Reward },
    Loss { message: String, refund: bool },
}

/// A resolved roll with its reels already arranged, waiting for the
/// animation to finish.
#[derive(Debug, PartialEq)]
pub struct RollLanding {
    pub ticket: RollTicket,
    pub verdict: Verdict,
    pub reels: ReelSet,
    pub timeline: RollTimeline,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RollOutcome {
    Won { result: RollResult, reward: Reward, celebration: Celebration },
    Lost { message: String },
    Failed { message: String },
}

/// Owns the session and funnels every roll through
/// `start_roll` -> `land` -> `settle` (or `abort`).
#[derive(Debug, Clone)]
pub struct GachaMachine {
    session: GachaSession,
    cooldown_ms: u64,
    next_sequence: u64,
}

impl GachaMachine {
    pub fn new(session: GachaSession) -> Self {
        Self::with_cooldown(session, ROLL_COOLDOWN_MS)
    }

    pub fn with_cooldown(session: GachaSession, cooldown_ms: u64) -> Self {
        Self { session, cooldown_ms, next_sequence: 1 }
    }

    pub fn session(&self) -> &GachaSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GachaSession {
        &mut self.session
    }

    /// Checks the preconditions in order (in flight, cooldown, link,
    /// funds), then charges the roll and marks it in flight.
    pub fn start_roll(
        &mut self,
        tier: &'static Tier,
        user_id: &str,
        linked: bool,
        now_ms: u64,
        requested_at: impl Into<String>,
    ) -> Result<RollTicket, RollBlocked> {
        if self.session.is_opening() {
            return Err(RollBlocked::AlreadyRolling);
        }
        if let Some(remaining_ms) = self.session.cooldown_remaining_ms(now_ms) {
            return Err(RollBlocked::Cooldown { remaining_ms });
        }
        if !linked {
            return Err(RollBlocked::NotLinked);
        }

        let payment = if self.session.debit(tier.cost) {
            Payment::Balance(tier.cost)
        } else if self.session.take_free_roll(tier.id) {
            Payment::FreeRoll
        } else {
            return Err(RollBlocked::InsufficientBalance);
        };

        self.session.set_opening(true);
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        log::debug!("roll #{} on {} paid with {:?}", sequence, tier.id, payment);

        Ok(RollTicket {
            sequence,
            user_id: user_id.to_string(),
            tier,
            payment,
            requested_at: requested_at.into(),
        })
    }

    /// Arranges the reels so their pay line shows the verdict.
    pub fn land<D: Dice + ?Sized>(
        &self,
        ticket: RollTicket,
        response: RollResponse,
        reels: &ReelSet,
        dice: &mut D,
    ) -> RollLanding {
        let tier = ticket.tier;
        let mut reels = if reels.tier_id == tier.id {
            reels.clone()
        } else {
            ReelSet::generate(tier, dice)
        };

        let verdict = match (response.success, response.data) {
            (true, Some(result)) => {
                let reward = tier
                    .reward(&result.reward_id)
                    .or_else(|| tier.reward_by_name(&result.reward_name))
                    .cloned()
                    .unwrap_or_else(|| {
                        Reward::owned(result.reward_id.clone(), result.reward_name.clone(), result.rarity)
                    });
                reels.inject_win(&reward);
                Verdict::Win { result, reward }
            }
            (true, None) => {
                reels.inject_loss(tier, dice);
                Verdict::Loss { message: GENERIC_ROLL_ERROR.to_string(), refund: true }
            }
            (false, _) => {
                reels.inject_loss(tier, dice);
                let refund = response.code.as_deref().is_some_and(|code| code != CODE_NO_WIN);
                Verdict::Loss {
                    message: response.message.unwrap_or_else(|| NO_WIN_MESSAGE.to_string()),
                    refund,
                }
            }
        };

        RollLanding { ticket, verdict, reels, timeline: RollTimeline::new() }
    }

    /// Called once the timeline has run out.
    pub fn settle(&mut self, landing: RollLanding, now_ms: u64) -> RollOutcome {
        self.session.set_opening(false);
        self.session.start_cooldown(now_ms, self.cooldown_ms);

        match landing.verdict {
            Verdict::Win { result, reward } => {
                log::info!("roll #{} won {} ({})", landing.ticket.sequence, reward.name, reward.rarity.as_str());
                self.session.remember(result.clone());
                let celebration = Celebration::for_rarity(reward.rarity);
                RollOutcome::Won { result, reward, celebration }
            }
            Verdict::Loss { message, refund } => {
                if refund {
                    self.refund(&landing.ticket);
                }
                RollOutcome::Lost { message }
            }
        }
    }

    /// Gives the charge back after a transport or server failure.
    pub fn abort(&mut self, ticket: RollTicket, error: &ResolveError) -> RollOutcome {
        log::error!("roll #{} failed: {}", ticket.sequence, error);
        self.refund(&ticket);
        self.session.set_opening(false);
        RollOutcome::Failed { message: GENERIC_ROLL_ERROR.to_string() }
    }

    /// Runs a whole roll without animation: start, resolve, land, settle.
    pub async fn play<R: RollResolver, D: Dice + ?Sized>(
        &mut self,
        tier: &'static Tier,
        user_id: &str,
        linked: bool,
        now_ms: u64,
        resolver: &mut R,
        reels: &ReelSet,
        dice: &mut D,
    ) -> Result<(RollOutcome, Option<ReelSet>), RollBlocked> {
        let ticket = self.start_roll(tier, user_id, linked, now_ms, now_ms.to_string())?;
        match resolver.resolve(&ticket).await {
            Ok(response) => {
                let landing = self.land(ticket, response, reels, dice);
                let stopped = landing.reels.clone();
                let settle_at = now_ms + landing.timeline.total_duration_ms() as u64;
                Ok((self.settle(landing, settle_at), Some(stopped)))
            }
            Err(error) => Ok((self.abort(ticket, &error), None)),
        }
    }

    fn refund(&mut self, ticket: &RollTicket) {
        match ticket.payment {
            Payment::Balance(amount) => self.session.refund(amount),
            Payment::FreeRoll => self.session.return_free_roll(ticket.tier.id),
        }
    }
}

impl Default for GachaMachine {
    fn default() -> Self {
        Self::new(GachaSession::default())
    }
}
