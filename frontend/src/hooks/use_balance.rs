use shared::constants::STARTING_BALANCE;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, CustomEvent, CustomEventInit};
use yew::prelude::*;

pub const BALANCE_UPDATE_EVENT: &str = "currencyUpdate";
const BALANCE_KEY: &str = "gacha_balance";

pub fn load_balance() -> u64 {
    window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(BALANCE_KEY).ok().flatten())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(STARTING_BALANCE)
}

/// Persists the balance and tells every `use_balance` about it
pub fn store_balance(balance: u64) {
    let Some(window) = window() else { return };

    if let Ok(Some(storage)) = window.local_storage() {
        let _ = storage.set_item(BALANCE_KEY, &balance.to_string());
    }

    let event_init = CustomEventInit::new();
    event_init.set_detail(&JsValue::from_f64(balance as f64));
    if let Ok(event) = CustomEvent::new_with_event_init_dict(BALANCE_UPDATE_EVENT, &event_init) {
        let _ = window.dispatch_event(&event);
    }
}

#[hook]
pub fn use_balance() -> UseStateHandle<u64> {
    let balance = use_state(load_balance);

    {
        let balance = balance.clone();
        use_effect_with((), move |_| {
            let listener = Closure::wrap(Box::new(move |e: CustomEvent| {
                if let Some(total) = e.detail().as_f64() {
                    balance.set(total as u64);
                }
            }) as Box<dyn FnMut(CustomEvent)>);

            if let Some(window) = window() {
                let _ = window.add_event_listener_with_callback(
                    BALANCE_UPDATE_EVENT,
                    listener.as_ref().unchecked_ref(),
                );
            }

            move || {
                if let Some(window) = window() {
                    let _ = window.remove_event_listener_with_callback(
                        BALANCE_UPDATE_EVENT,
                        listener.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    balance
}
