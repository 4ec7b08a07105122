use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};
use rand::rngs::OsRng;
use shared::constants::HISTORY_LIMIT;
use shared::shared_gacha::{HistoryItem, LocalResolver, RollResponse, Tier};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// In-process roll history and per-user cooldowns.
#[derive(Default)]
pub struct GachaStore {
    history: RwLock<HashMap<Uuid, VecDeque<HistoryItem>>>,
    cooldowns: Mutex<HashMap<Uuid, Instant>>,
}

impl GachaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the user's next roll slot, or returns how long is left
    pub async fn try_begin_roll(&self, user_id: Uuid, cooldown: Duration, now: Instant) -> Result<(), Duration> {
        let mut cooldowns = self.cooldowns.lock().await;
        if let Some(ready_at) = cooldowns.get(&user_id) {
            if *ready_at > now {
                return Err(*ready_at - now);
            }
        }
        cooldowns.insert(user_id, now + cooldown);
        Ok(())
    }

    pub async fn record(&self, user_id: Uuid, item: HistoryItem) {
        let mut history = self.history.write().await;
        let entries = history.entry(user_id).or_default();
        entries.push_front(item);
        entries.truncate(HISTORY_LIMIT);
    }

    /// Newest first
    pub async fn history(&self, user_id: Uuid) -> Vec<HistoryItem> {
        self.history
            .read()
            .await
            .get(&user_id)
            .map(|entries| entries.iter().cloned().collect())
            .unwrap_or_default()
    }
}

/// Server-side draw: same rules as the local resolver, at the configured
/// win rate, with a real id on every win.
pub fn resolve_roll(tier: &Tier, win_rate: f64, created_at: &str) -> RollResponse {
    let mut response = LocalResolver::with_win_rate(OsRng, win_rate).draw(tier, created_at);
    if let Some(result) = response.data.as_mut() {
        result.id = Uuid::new_v4().to_string();
    }
    response
}
