use super::tiers::Rarity;

/// Particle burst parameters handed to the confetti renderer
#[derive(Debug, Clone, PartialEq)]
pub struct Celebration {
    pub particle_count: u32,
    /// Cone width in degrees
    pub spread: f64,
    pub start_velocity: f64,
    /// Vertical origin as a fraction of the viewport height
    pub origin_y: f64,
    /// Number of successive bursts, 250ms apart
    pub bursts: u32,
    pub colors: &'static [&'static str],
}

const STANDARD_COLORS: &[&str] = &["#60a5fa", "#34d399", "#fbbf24", "#f472b6"];
const EPIC_COLORS: &[&str] = &["#a855f7", "#c084fc", "#e879f9", "#fbbf24"];
const LEGENDARY_COLORS: &[&str] = &["#f59e0b", "#fde047", "#fb923c", "#ffffff", "#a855f7"];
const UNLOCK_COLORS: &[&str] = &["#cd7f32", "#c0c0c0", "#ffd700"];

pub const BURST_INTERVAL_MS: u32 = 250;

impl Celebration {
    pub fn for_rarity(rarity: Rarity) -> Self {
        match rarity {
            Rarity::Common | Rarity::Rare => Self {
                particle_count: 100,
                spread: 70.0,
                start_velocity: 30.0,
                origin_y: 0.6,
                bursts: 1,
                colors: STANDARD_COLORS,
            },
            Rarity::Epic => Self {
                particle_count: 150,
                spread: 100.0,
                start_velocity: 40.0,
                origin_y: 0.6,
                bursts: 2,
                colors: EPIC_COLORS,
            },
            Rarity::Legendary => Self {
                particle_count: 250,
                spread: 160.0,
                start_velocity: 55.0,
                origin_y: 0.5,
                bursts: 4,
                colors: LEGENDARY_COLORS,
            },
        }
    }

    /// Small burst fired when a balance milestone unlocks a tier
    pub fn unlock() -> Self {
        Self {
            particle_count: 50,
            spread: 60.0,
            start_velocity: 25.0,
            origin_y: 0.7,
            bursts: 1,
            colors: UNLOCK_COLORS,
        }
    }

    pub fn total_particles(&self) -> u32 {
        self.particle_count * self.bursts
    }
}

/// Entrance of the reward card: grows and straightens into place
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealAnimation {
    pub from_scale: f64,
    pub from_rotation_deg: f64,
    pub duration_ms: u32,
}

pub const REWARD_REVEAL: RevealAnimation = RevealAnimation {
    from_scale: 0.5,
    from_rotation_deg: -10.0,
    duration_ms: 600,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intensity_grows_with_rarity() {
        let common = Celebration::for_rarity(Rarity::Common);
        let rare = Celebration::for_rarity(Rarity::Rare);
        let epic = Celebration::for_rarity(Rarity::Epic);
        let legendary = Celebration::for_rarity(Rarity::Legendary);

        assert_eq!(common, rare);
        assert!(epic.total_particles() > rare.total_particles());
        assert!(legendary.total_particles() > epic.total_particles());
        assert!(legendary.spread > epic.spread);
    }

    #[test]
    fn unlock_burst_is_the_smallest() {
        let unlock = Celebration::unlock();
        assert!(unlock.total_particles() < Celebration::for_rarity(Rarity::Common).total_particles());
    }
}
