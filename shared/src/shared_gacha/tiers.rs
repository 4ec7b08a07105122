use std::borrow::Cow;
use std::collections::HashMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Reward classification, drives card styling and celebration size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Common => "Común",
            Self::Rare => "Raro",
            Self::Epic => "Épico",
            Self::Legendary => "Legendario",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Common => "#9ca3af",
            Self::Rare => "#3b82f6",
            Self::Epic => "#a855f7",
            Self::Legendary => "#f59e0b",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "common" => Some(Self::Common),
            "rare" => Some(Self::Rare),
            "epic" => Some(Self::Epic),
            "legendary" => Some(Self::Legendary),
            _ => None,
        }
    }
}

/// One entry of a tier's fixed reward pool.
///
/// Catalog rewards borrow their strings; rewards rebuilt from a server
/// response own them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub id: Cow<'static, str>,
    pub name: Cow<'static, str>,
    pub rarity: Rarity,
    pub color: Cow<'static, str>,
}

impl Reward {
    pub fn owned(id: String, name: String, rarity: Rarity) -> Self {
        Self {
            id: Cow::Owned(id),
            name: Cow::Owned(name),
            rarity,
            color: Cow::Borrowed(rarity.color()),
        }
    }
}

const fn reward(id: &'static str, name: &'static str, rarity: Rarity, color: &'static str) -> Reward {
    Reward {
        id: Cow::Borrowed(id),
        name: Cow::Borrowed(name),
        rarity,
        color: Cow::Borrowed(color),
    }
}

#[derive(Debug, PartialEq)]
pub struct Tier {
    pub id: &'static str,
    pub name: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
    pub cost: u64,
    pub rewards: &'static [Reward],
}

impl Tier {
    pub fn reward(&self, reward_id: &str) -> Option<&'static Reward> {
        self.rewards.iter().find(|r| r.id == reward_id)
    }

    pub fn reward_by_name(&self, name: &str) -> Option<&'static Reward> {
        self.rewards.iter().find(|r| r.name == name)
    }
}

static BRONZE_REWARDS: [Reward; 4] = [
    reward("bronze_hat_leather", "Gorro de Cuero", Rarity::Common, "#a16207"),
    reward("bronze_trail_dust", "Estela de Polvo", Rarity::Common, "#d6d3d1"),
    reward("bronze_title_novice", "Título: Novato", Rarity::Common, "#9ca3af"),
    reward("bronze_pet_chick", "Mascota: Pollito", Rarity::Rare, "#facc15"),
];

static SILVER_REWARDS: [Reward; 5] = [
    reward("silver_hat_iron", "Casco de Hierro", Rarity::Common, "#d1d5db"),
    reward("silver_trail_snow", "Estela de Nieve", Rarity::Common, "#e0f2fe"),
    reward("silver_title_explorer", "Título: Explorador", Rarity::Common, "#9ca3af"),
    reward("silver_pet_rabbit", "Mascota: Conejo", Rarity::Rare, "#f5f5f4"),
    reward("silver_wings_feather", "Alas de Pluma", Rarity::Rare, "#cbd5e1"),
];

static GOLD_REWARDS: [Reward; 5] = [
    reward("gold_crown", "Corona Dorada", Rarity::Rare, "#facc15"),
    reward("gold_trail_sparks", "Estela de Chispas", Rarity::Common, "#fde047"),
    reward("gold_title_noble", "Título: Noble", Rarity::Rare, "#eab308"),
    reward("gold_pet_fox", "Mascota: Zorro", Rarity::Epic, "#f97316"),
    reward("gold_cape_sun", "Capa Solar", Rarity::Epic, "#f59e0b"),
];

static PLATINUM_REWARDS: [Reward; 5] = [
    reward("platinum_halo", "Halo de Platino", Rarity::Rare, "#e5e7eb"),
    reward("platinum_trail_stars", "Estela Estelar", Rarity::Rare, "#c7d2fe"),
    reward("platinum_title_knight", "Título: Caballero", Rarity::Rare, "#94a3b8"),
    reward("platinum_pet_wolf", "Mascota: Lobo", Rarity::Epic, "#cbd5e1"),
    reward("platinum_wings_angel", "Alas de Ángel", Rarity::Legendary, "#f8fafc"),
];

static DIAMOND_REWARDS: [Reward; 5] = [
    reward("diamond_helmet", "Casco de Diamante", Rarity::Rare, "#67e8f9"),
    reward("diamond_trail_crystal", "Estela de Cristal", Rarity::Rare, "#22d3ee"),
    reward("diamond_title_champion", "Título: Campeón", Rarity::Epic, "#06b6d4"),
    reward("diamond_pet_axolotl", "Mascota: Ajolote", Rarity::Epic, "#f472b6"),
    reward("diamond_aura_frost", "Aura Glacial", Rarity::Legendary, "#a5f3fc"),
];

static EMERALD_REWARDS: [Reward; 5] = [
    reward("emerald_mask", "Máscara Esmeralda", Rarity::Epic, "#10b981"),
    reward("emerald_trail_leaves", "Estela de Hojas", Rarity::Rare, "#22c55e"),
    reward("emerald_title_merchant", "Título: Mercader", Rarity::Epic, "#059669"),
    reward("emerald_pet_parrot", "Mascota: Loro", Rarity::Epic, "#84cc16"),
    reward("emerald_cape_villager", "Capa del Aldeano", Rarity::Legendary, "#34d399"),
];

static ULTRA_GEM_REWARDS: [Reward; 5] = [
    reward("ultra_crown_void", "Corona del Vacío", Rarity::Epic, "#7c3aed"),
    reward("ultra_trail_end", "Estela del End", Rarity::Epic, "#a855f7"),
    reward("ultra_title_legend", "Título: Leyenda", Rarity::Legendary, "#f59e0b"),
    reward("ultra_pet_dragon", "Mascota: Dragón", Rarity::Legendary, "#9333ea"),
    reward("ultra_wings_elytra", "Élitros Prismáticos", Rarity::Legendary, "#ec4899"),
];

/// The seven machines, cheapest first
pub static TIERS: [Tier; 7] = [
    Tier { id: "bronze", name: "Bronce", color: "#cd7f32", icon: "🥉", cost: 1, rewards: &BRONZE_REWARDS },
    Tier { id: "silver", name: "Plata", color: "#c0c0c0", icon: "🥈", cost: 100, rewards: &SILVER_REWARDS },
    Tier { id: "gold", name: "Oro", color: "#ffd700", icon: "🥇", cost: 500, rewards: &GOLD_REWARDS },
    Tier { id: "platinum", name: "Platino", color: "#e5e4e2", icon: "💠", cost: 1_000, rewards: &PLATINUM_REWARDS },
    Tier { id: "diamond", name: "Diamante", color: "#b9f2ff", icon: "💎", cost: 5_000, rewards: &DIAMOND_REWARDS },
    Tier { id: "emerald", name: "Esmeralda", color: "#50c878", icon: "🟢", cost: 10_000, rewards: &EMERALD_REWARDS },
    Tier { id: "ultra_gem", name: "Ultra Gema", color: "#9b59ff", icon: "🔮", cost: 50_000, rewards: &ULTRA_GEM_REWARDS },
];

pub const DEFAULT_TIER_ID: &str = "bronze";

static TIER_INDEX: Lazy<HashMap<&'static str, &'static Tier>> =
    Lazy::new(|| TIERS.iter().map(|tier| (tier.id, tier)).collect());

pub fn tier(id: &str) -> Option<&'static Tier> {
    TIER_INDEX.get(id).copied()
}

pub fn default_tier() -> &'static Tier {
    &TIERS[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tier_has_rewards() {
        for tier in TIERS.iter() {
            assert!(!tier.rewards.is_empty(), "{} has an empty pool", tier.id);
        }
    }

    #[test]
    fn tiers_are_sorted_by_cost_and_unique() {
        let costs: Vec<u64> = TIERS.iter().map(|t| t.cost).collect();
        let mut sorted = costs.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(costs, sorted);
        assert_eq!(TIER_INDEX.len(), TIERS.len());
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(tier("silver").map(|t| t.cost), Some(100));
        assert_eq!(tier("bronze").map(|t| t.cost), Some(1));
        assert!(tier("obsidian").is_none());
        assert_eq!(default_tier().id, DEFAULT_TIER_ID);
    }

    #[test]
    fn reward_ids_are_unique_across_catalog() {
        let mut ids: Vec<&str> = TIERS
            .iter()
            .flat_map(|t| t.rewards.iter().map(|r| r.id.as_ref()))
            .collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn rarity_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Rarity::Legendary).unwrap(), "\"legendary\"");
        assert_eq!(Rarity::parse(" Epic "), Some(Rarity::Epic));
        assert_eq!(Rarity::parse("mythic"), None);
    }
}
