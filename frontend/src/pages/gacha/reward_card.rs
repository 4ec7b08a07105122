use shared::shared_gacha::{RevealAnimation, Reward, REWARD_REVEAL};
use yew::prelude::*;
use crate::styles;

pub fn reveal_css(reveal: &RevealAnimation) -> String {
    format!(
        "@keyframes reward-reveal {{ \
            0% {{ transform: scale({}) rotate({}deg); opacity: 0; }} \
            100% {{ transform: scale(1) rotate(0deg); opacity: 1; }} \
        }} \
        .reward-reveal {{ animation: reward-reveal {}ms cubic-bezier(0.34, 1.56, 0.64, 1) both; }}",
        reveal.from_scale, reveal.from_rotation_deg, reveal.duration_ms
    )
}

#[derive(Properties, PartialEq)]
pub struct RewardCardProps {
    pub reward: Reward,
    pub on_close: Callback<()>,
}

#[function_component(RewardCard)]
pub fn reward_card(props: &RewardCardProps) -> Html {
    let reward = &props.reward;
    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class="fixed inset-0 z-40 flex items-center justify-center bg-black/60 backdrop-blur-sm">
            <style>{reveal_css(&REWARD_REVEAL)}</style>
            <div class={classes!(styles::REWARD_CARD, "reward-reveal")}
                style={format!("border-color: {}; box-shadow: 0 0 40px {};", reward.rarity.color(), reward.color)}>
                <span class="text-xs font-bold uppercase tracking-widest" style={format!("color: {};", reward.rarity.color())}>
                    {reward.rarity.label()}
                </span>
                <div class="my-6 h-24 w-24 rounded-full" style={format!("background: radial-gradient(circle, {} 0%, transparent 70%);", reward.color)} />
                <h3 class={styles::TEXT_H2}>{reward.name.to_string()}</h3>
                <p class={classes!(styles::TEXT_SMALL, "mt-2")}>{"¡Recompensa obtenida!"}</p>
                <button onclick={close} class={classes!(styles::BUTTON_PRIMARY, "mt-6", "w-full")}>
                    {"Continuar"}
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_starts_small_and_tilted() {
        let css = reveal_css(&REWARD_REVEAL);
        assert!(css.contains("scale(0.5) rotate(-10deg)"));
        assert!(css.contains("600ms"));
    }
}
