use shared::shared_gacha::{tier, HistoryItem, Rarity};
use yew::prelude::*;
use crate::styles;

#[derive(Properties, PartialEq)]
pub struct HistoryPanelProps {
    pub items: Vec<HistoryItem>,
    pub loading: bool,
}

/// `2026-03-01T18:04:09Z` -> `01/03 18:04`
pub fn short_date(created_at: &str) -> String {
    let (date, time) = created_at.split_once('T').unwrap_or((created_at, ""));
    let mut parts = date.split('-').skip(1);
    match (parts.next(), parts.next(), time.get(..5)) {
        (Some(month), Some(day), Some(hm)) => format!("{}/{} {}", day, month, hm),
        _ => created_at.to_string(),
    }
}

fn rarity_badge(rarity: Rarity) -> Html {
    html! {
        <span class="px-2 py-0.5 rounded-full text-xs font-medium text-white" style={format!("background: {};", rarity.color())}>
            {rarity.label()}
        </span>
    }
}

#[function_component(HistoryPanel)]
pub fn history_panel(props: &HistoryPanelProps) -> Html {
    html! {
        <div class={styles::CARD}>
            <h3 class={classes!(styles::CARD_TITLE, "mb-4")}>{"Historial de premios"}</h3>
            if props.loading {
                <div class="flex justify-center py-4">
                    <div class={styles::LOADING_SPINNER}></div>
                </div>
            } else if props.items.is_empty() {
                <p class={styles::TEXT_SMALL}>{"Todavía no has ganado nada."}</p>
            } else {
                <ul class="divide-y divide-gray-100 dark:divide-gray-700">
                    { for props.items.iter().map(|item| {
                        let machine = item
                            .tier_id
                            .as_deref()
                            .and_then(tier)
                            .map(|t| format!("{} {}", t.icon, t.name))
                            .unwrap_or_default();
                        html! {
                            <li key={item.id.clone()} class="py-2 flex items-center justify-between gap-3">
                                <div class="flex flex-col">
                                    <span class="font-medium text-gray-900 dark:text-white">{&item.reward_name}</span>
                                    <span class={styles::TEXT_HINT}>{machine}{" · "}{short_date(&item.created_at)}</span>
                                </div>
                                {rarity_badge(item.rarity)}
                            </li>
                        }
                    }) }
                </ul>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_date_formats_rfc3339() {
        assert_eq!(short_date("2026-03-01T18:04:09Z"), "01/03 18:04");
        assert_eq!(short_date("ayer"), "ayer");
    }
}
