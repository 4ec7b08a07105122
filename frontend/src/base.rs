use yew::prelude::*;
use yew_router::prelude::*;
use web_sys::{window, MouseEvent};
use crate::hooks::use_balance::use_balance;
use crate::pages::gacha::format_cost;
use crate::{Route, styles};

const THEME_KEY: &str = "theme";

#[derive(Properties, PartialEq)]
pub struct BaseProps {
    pub children: Html,
}

fn stored_dark_mode() -> bool {
    window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(THEME_KEY).ok().flatten())
        .map_or(true, |theme| theme == "dark")
}

fn apply_theme(dark_mode: bool) {
    let Some(window) = window() else { return };
    let theme = if dark_mode { "dark" } else { "light" };

    if let Some(html) = window.document().and_then(|d| d.document_element()) {
        html.set_class_name(theme);
    }
    if let Ok(Some(storage)) = window.local_storage() {
        let _ = storage.set_item(THEME_KEY, theme);
    }
}

#[function_component(Base)]
pub fn base(props: &BaseProps) -> Html {
    let dark_mode = use_state(stored_dark_mode);
    let balance = use_balance();

    {
        let dark_mode = *dark_mode;
        use_effect_with(dark_mode, move |dark_mode| {
            apply_theme(*dark_mode);
            || ()
        });
    }

    let toggle_theme = {
        let dark_mode = dark_mode.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            dark_mode.set(!*dark_mode);
        })
    };

    html! {
        <div class={if *dark_mode { "dark min-h-screen bg-gray-900" } else { "min-h-screen bg-gray-50" }}>
            <nav class={styles::NAV}>
                <div class={styles::NAV_INNER}>
                    <div class={styles::NAV_CONTENT}>
                        <Link<Route> to={Route::Gacha} classes={styles::NAV_BRAND}>{"CrystalTides"}</Link<Route>>
                        <div class={styles::NAV_ITEMS}>
                            <div class={styles::BALANCE_PILL}>
                                <span>{format_cost(*balance)}</span>
                                <span>{"💰"}</span>
                            </div>
                            <button onclick={toggle_theme} class={styles::BUTTON_ICON}>
                                {if *dark_mode { "☀️" } else { "🌙" }}
                            </button>
                        </div>
                    </div>
                </div>
            </nav>
            <main class="pt-20">
                {props.children.clone()}
            </main>
        </div>
    }
}
