use shared::shared_gacha::{Tier, TIERS};
use yew::prelude::*;
use crate::styles;

#[derive(Clone, PartialEq)]
pub struct TierView {
    pub tier: &'static Tier,
    pub unlocked: bool,
    pub free_rolls: u32,
    pub affordable: bool,
}

#[derive(Properties, PartialEq)]
pub struct TierSelectorProps {
    pub tiers: Vec<TierView>,
    pub selected: &'static str,
    pub disabled: bool,
    pub on_select: Callback<&'static str>,
}

pub fn format_cost(cost: u64) -> String {
    let digits = cost.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

#[function_component(TierSelector)]
pub fn tier_selector(props: &TierSelectorProps) -> Html {
    html! {
        <div class="grid grid-cols-2 sm:grid-cols-4 lg:grid-cols-7 gap-3">
            { for props.tiers.iter().map(|view| {
                let tier = view.tier;
                let is_selected = tier.id == props.selected;
                let onclick = {
                    let on_select = props.on_select.clone();
                    Callback::from(move |_: MouseEvent| on_select.emit(tier.id))
                };
                html! {
                    <button
                        {onclick}
                        disabled={props.disabled || !view.unlocked}
                        class={classes!(
                            styles::TIER_BUTTON,
                            is_selected.then_some(styles::TIER_BUTTON_SELECTED),
                            (!view.unlocked).then_some("opacity-40 cursor-not-allowed"),
                        )}
                        style={format!("border-color: {};", tier.color)}
                    >
                        <span class="text-2xl">{tier.icon}</span>
                        <span class="font-semibold text-gray-900 dark:text-white">{tier.name}</span>
                        <span class={if view.affordable { styles::TEXT_SMALL } else { styles::TEXT_ERROR }}>
                            {format_cost(tier.cost)}
                        </span>
                        if view.free_rolls > 0 {
                            <span class={styles::FREE_ROLL_BADGE}>{format!("{} gratis", view.free_rolls)}</span>
                        }
                        if !view.unlocked {
                            <span class="text-xs">{"🔒"}</span>
                        }
                    </button>
                }
            }) }
        </div>
    }
}

/// Snapshot of every tier for the selector
pub fn tier_views(session: &shared::shared_gacha::GachaSession) -> Vec<TierView> {
    TIERS
        .iter()
        .map(|tier| TierView {
            tier,
            unlocked: session.is_unlocked(tier.id),
            free_rolls: session.free_rolls(tier.id),
            affordable: session.can_afford(tier),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::shared_gacha::GachaSession;

    #[test]
    fn costs_use_dot_separators() {
        assert_eq!(format_cost(1), "1");
        assert_eq!(format_cost(1_000), "1.000");
        assert_eq!(format_cost(50_000), "50.000");
        assert_eq!(format_cost(1_234_567), "1.234.567");
    }

    #[test]
    fn views_follow_the_session() {
        let mut session = GachaSession::new(600);
        session.watch_unlocks();
        let views = tier_views(&session);
        assert_eq!(views.len(), 7);
        assert!(views[2].unlocked && views[2].affordable && views[2].free_rolls == 1);
        assert!(!views[3].unlocked);
    }
}
