use std::collections::{BTreeMap, BTreeSet, VecDeque};
use super::api::RollResult;
use super::celebration::Celebration;
use super::tiers::{Tier, TIERS};
use crate::constants::RECENT_ROLLS_LIMIT;

/// Emitted once per tier, the first time the balance reaches its cost
#[derive(Debug, Clone, PartialEq)]
pub struct TierUnlocked {
    pub tier_id: &'static str,
    pub celebration: Celebration,
}

/// Currency and unlock state of one player for the lifetime of the page.
///
/// Not synchronized with any backend ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct GachaSession {
    balance: u64,
    unlocked: BTreeSet<&'static str>,
    free_rolls: BTreeMap<&'static str, u32>,
    is_opening: bool,
    cooldown_until_ms: Option<u64>,
    recent: VecDeque<RollResult>,
}

impl GachaSession {
    /// Starts with `balance` and nothing unlocked; call `watch_unlocks`
    /// to evaluate the initial balance.
    pub fn new(balance: u64) -> Self {
        Self {
            balance,
            unlocked: BTreeSet::new(),
            free_rolls: BTreeMap::new(),
            is_opening: false,
            cooldown_until_ms: None,
            recent: VecDeque::new(),
        }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn is_unlocked(&self, tier_id: &str) -> bool {
        self.unlocked.contains(tier_id)
    }

    pub fn unlocked(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.unlocked.iter().copied()
    }

    pub fn free_rolls(&self, tier_id: &str) -> u32 {
        self.free_rolls.get(tier_id).copied().unwrap_or(0)
    }

    pub fn is_opening(&self) -> bool {
        self.is_opening
    }

    pub fn recent(&self) -> impl Iterator<Item = &RollResult> {
        self.recent.iter()
    }

    /// Milliseconds left before the next roll is allowed
    pub fn cooldown_remaining_ms(&self, now_ms: u64) -> Option<u64> {
        self.cooldown_until_ms
            .filter(|until| *until > now_ms)
            .map(|until| until - now_ms)
    }

    pub fn can_afford(&self, tier: &Tier) -> bool {
        self.balance >= tier.cost || self.free_rolls(tier.id) > 0
    }

    pub fn set_balance(&mut self, balance: u64) -> Vec<TierUnlocked> {
        self.balance = balance;
        self.watch_unlocks()
    }

    pub fn credit(&mut self, amount: u64) -> Vec<TierUnlocked> {
        self.balance = self.balance.saturating_add(amount);
        self.watch_unlocks()
    }

    /// Unlocks every tier the balance now covers and grants it one free
    /// roll. Tiers are never locked again.
    pub fn watch_unlocks(&mut self) -> Vec<TierUnlocked> {
        let mut events = Vec::new();
        for tier in TIERS.iter() {
            if tier.cost <= self.balance && self.unlocked.insert(tier.id) {
                *self.free_rolls.entry(tier.id).or_insert(0) += 1;
                log::debug!("tier {} unlocked at balance {}", tier.id, self.balance);
                events.push(TierUnlocked {
                    tier_id: tier.id,
                    celebration: Celebration::unlock(),
                });
            }
        }
        events
    }

    pub(crate) fn debit(&mut self, amount: u64) -> bool {
        match self.balance.checked_sub(amount) {
            Some(rest) => {
                self.balance = rest;
                true
            }
            None => false,
        }
    }

    pub(crate) fn take_free_roll(&mut self, tier_id: &'static str) -> bool {
        match self.free_rolls.get_mut(tier_id) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn return_free_roll(&mut self, tier_id: &'static str) {
        *self.free_rolls.entry(tier_id).or_insert(0) += 1;
    }

    pub(crate) fn refund(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
    }

    pub(crate) fn set_opening(&mut self, opening: bool) {
        self.is_opening = opening;
    }

    pub(crate) fn start_cooldown(&mut self, now_ms: u64, cooldown_ms: u64) {
        self.cooldown_until_ms = (cooldown_ms > 0).then(|| now_ms + cooldown_ms);
    }

    pub(crate) fn remember(&mut self, result: RollResult) {
        self.recent.push_front(result);
        self.recent.truncate(RECENT_ROLLS_LIMIT);
    }
}

impl Default for GachaSession {
    fn default() -> Self {
        Self::new(crate::constants::STARTING_BALANCE)
    }
}
