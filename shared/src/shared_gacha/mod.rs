//! Gacha machine: tier catalog, session state, reels and roll flow.
//!
//! Everything here is free of I/O so the page and the server resolve,
//! arrange and celebrate rolls the same way.

pub mod api;
pub mod celebration;
pub mod orchestrator;
pub mod reels;
pub mod resolver;
pub mod session;
pub mod tiers;
pub mod timeline;

pub use api::*;
pub use celebration::{Celebration, RevealAnimation, REWARD_REVEAL};
pub use orchestrator::{GachaMachine, Payment, RollBlocked, RollLanding, RollOutcome, RollTicket, Verdict};
pub use reels::{Dice, ReelSet, REEL_COUNT, REEL_LENGTH, STOP_INDEX};
pub use resolver::{FallbackResolver, LocalResolver, ResolveError, RollResolver, LOCAL_WIN_RATE};
pub use session::{GachaSession, TierUnlocked};
pub use tiers::{default_tier, tier, Rarity, Reward, Tier, TIERS};
pub use timeline::{ReelFrame, RollTimeline, ITEM_HEIGHT};
