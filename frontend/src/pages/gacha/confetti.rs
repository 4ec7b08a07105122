use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use shared::shared_gacha::celebration::BURST_INTERVAL_MS;
use shared::shared_gacha::Celebration;
use yew::prelude::*;

/// Scales start velocity into travelled pixels
const DISTANCE_PER_VELOCITY: f64 = 12.0;
const FLIGHT_MS: u32 = 1_600;

pub const CONFETTI_CSS: &str = r#"
@keyframes confetti-fly {
    0% { transform: translate(0, 0) rotate(0deg); opacity: 1; }
    100% { transform: translate(var(--dx), calc(var(--dy) + 40vh)) rotate(var(--spin)); opacity: 0; }
}
.confetti-particle {
    position: absolute;
    border-radius: 2px;
    animation-name: confetti-fly;
    animation-timing-function: cubic-bezier(0.15, 0.6, 0.4, 1);
    animation-fill-mode: forwards;
}
"#;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub dx: f64,
    pub dy: f64,
    pub spin: f64,
    pub size: f64,
    pub delay_ms: u32,
    pub color: &'static str,
}

/// Lays out every burst of a celebration, aimed upward inside its spread cone
pub fn particles<R: Rng + ?Sized>(celebration: &Celebration, rng: &mut R) -> Vec<Particle> {
    let half_spread = celebration.spread / 2.0;
    (0..celebration.bursts)
        .flat_map(|burst| (0..celebration.particle_count).map(move |_| burst))
        .map(|burst| {
            let angle = rng.gen_range(-half_spread..=half_spread).to_radians();
            let speed = celebration.start_velocity * rng.gen_range(0.5..1.0) * DISTANCE_PER_VELOCITY;
            let color = celebration.colors[rng.gen_range(0..celebration.colors.len())];
            Particle {
                dx: angle.sin() * speed,
                dy: -angle.cos() * speed,
                spin: rng.gen_range(-540.0..540.0),
                size: rng.gen_range(6.0..11.0),
                delay_ms: burst * BURST_INTERVAL_MS,
                color,
            }
        })
        .collect()
}

pub fn duration_ms(celebration: &Celebration) -> u32 {
    celebration.bursts.saturating_sub(1) * BURST_INTERVAL_MS + FLIGHT_MS
}

#[derive(Properties, PartialEq)]
pub struct ConfettiProps {
    pub celebration: Celebration,
    pub seed: u64,
}

#[function_component(Confetti)]
pub fn confetti(props: &ConfettiProps) -> Html {
    let pieces = use_memo((props.celebration.clone(), props.seed), |(celebration, seed)| {
        particles(celebration, &mut SmallRng::seed_from_u64(*seed))
    });

    html! {
        <div class="pointer-events-none fixed inset-0 overflow-hidden z-50">
            { for pieces.iter().map(|p| html! {
                <div class="confetti-particle" style={format!(
                    "left: 50%; top: {:.0}%; width: {:.0}px; height: {:.0}px; background: {}; \
                     --dx: {:.0}px; --dy: {:.0}px; --spin: {:.0}deg; \
                     animation-duration: {}ms; animation-delay: {}ms;",
                    props.celebration.origin_y * 100.0, p.size, p.size * 0.6, p.color,
                    p.dx, p.dy, p.spin, FLIGHT_MS, p.delay_ms
                )} />
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::shared_gacha::Rarity;

    #[test]
    fn legendary_fires_every_burst() {
        let celebration = Celebration::for_rarity(Rarity::Legendary);
        let pieces = particles(&celebration, &mut SmallRng::seed_from_u64(1));
        assert_eq!(pieces.len() as u32, celebration.total_particles());
        let last_burst = (celebration.bursts - 1) * BURST_INTERVAL_MS;
        assert!(pieces.iter().any(|p| p.delay_ms == last_burst));
        assert_eq!(duration_ms(&celebration), last_burst + FLIGHT_MS);
    }

    #[test]
    fn particles_fly_upward_within_the_cone() {
        let celebration = Celebration::for_rarity(Rarity::Common);
        let max_tilt = (celebration.spread / 2.0).to_radians().tan();
        for p in particles(&celebration, &mut SmallRng::seed_from_u64(9)) {
            assert!(p.dy < 0.0);
            assert!((p.dx / -p.dy).abs() <= max_tilt + 1e-9);
            assert!(celebration.colors.contains(&p.color));
        }
    }
}
