mod confetti;
mod history_panel;
mod link_panel;
mod reel_strip;
mod reward_card;
mod tier_selector;

use std::cell::RefCell;
use std::rc::Rc;
use gloo_timers::callback::{Interval, Timeout};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use shared::shared_gacha::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use crate::api::{fetch_history, RemoteResolver};
use crate::hooks::{load_balance, store_balance, use_balance, use_link_status, use_session, Session};
use crate::styles;

use confetti::{Confetti, CONFETTI_CSS};
use history_panel::HistoryPanel;
use link_panel::LinkPanel;
use reel_strip::ReelStrip;
use reward_card::RewardCard;
use tier_selector::{tier_views, TierSelector};

pub use tier_selector::format_cost;

const RESTING_FRAMES: [ReelFrame; REEL_COUNT] = [ReelFrame { offset: 0.0, blur: 0.0, done: true }; REEL_COUNT];

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

#[derive(Clone, PartialEq)]
enum Notice {
    Info(String),
    Error(String),
}

fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

fn now_iso() -> String {
    js_sys::Date::new_0().to_iso_string().into()
}

fn request_frame(callback: &FrameCallback) {
    if let (Some(window), Some(closure)) = (web_sys::window(), callback.borrow().as_ref()) {
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    }
}

/// Folds an observed balance into the session. The page's own writes echo
/// back unchanged and only re-run the watcher.
fn sync_balance(session: &mut GachaSession, balance: u64) -> Vec<TierUnlocked> {
    if session.balance() != balance {
        session.set_balance(balance)
    } else {
        session.watch_unlocks()
    }
}

/// State handles that show a finished roll
#[derive(Clone)]
struct Presenter {
    machine: Rc<RefCell<GachaMachine>>,
    session: Option<Session>,
    notice: UseStateHandle<Option<Notice>>,
    revealed: UseStateHandle<Option<Reward>>,
    celebration: UseStateHandle<Option<(Celebration, u64)>>,
    history: UseStateHandle<Vec<HistoryItem>>,
    history_loading: UseStateHandle<bool>,
    redraw: UseForceUpdateHandle,
}

impl Presenter {
    fn present(&self, outcome: RollOutcome) {
        store_balance(self.machine.borrow().session().balance());

        match outcome {
            RollOutcome::Won { reward, celebration, .. } => {
                self.revealed.set(Some(reward));
                self.celebrate(celebration);
                self.load_history();
            }
            RollOutcome::Lost { message } => self.notice.set(Some(Notice::Info(message))),
            RollOutcome::Failed { message } => self.notice.set(Some(Notice::Error(message))),
        }
        self.redraw.force_update();
    }

    fn celebrate(&self, celebration: Celebration) {
        let cleared = self.celebration.clone();
        let duration = confetti::duration_ms(&celebration);
        self.celebration.set(Some((celebration, now_ms())));
        Timeout::new(duration, move || cleared.set(None)).forget();
    }

    fn load_history(&self) {
        let Some(session) = self.session.clone() else { return };
        let history = self.history.clone();
        let loading = self.history_loading.clone();
        loading.set(true);
        spawn_local(async move {
            match fetch_history(&session).await {
                Ok(items) => history.set(items),
                Err(err) => log::warn!("history unavailable: {}", err),
            }
            loading.set(false);
        });
    }
}

#[function_component(GachaPage)]
pub fn gacha_page() -> Html {
    let session = use_session();
    let balance = use_balance();
    let (link, refresh_link) = use_link_status(session.clone());
    let machine = use_mut_ref(|| GachaMachine::new(GachaSession::new(load_balance())));
    let dice = use_mut_ref(SmallRng::from_entropy);
    let selected = use_state(|| default_tier().id);
    let reels = use_state(|| ReelSet::generate(default_tier(), &mut SmallRng::from_entropy()));
    let frames = use_state(|| RESTING_FRAMES);
    let notice = use_state(|| None::<Notice>);
    let revealed = use_state(|| None::<Reward>);
    let celebration = use_state(|| None::<(Celebration, u64)>);
    let history = use_state(Vec::<HistoryItem>::new);
    let history_loading = use_state(|| false);
    let redraw = use_force_update();

    let presenter = Presenter {
        machine: machine.clone(),
        session: session.clone(),
        notice: notice.clone(),
        revealed: revealed.clone(),
        celebration: celebration.clone(),
        history: history.clone(),
        history_loading: history_loading.clone(),
        redraw: redraw.clone(),
    };

    // Any balance change, ours or another component's, re-runs the unlock watcher
    {
        let presenter = presenter.clone();
        use_effect_with(*balance, move |balance| {
            let unlocked = sync_balance(presenter.machine.borrow_mut().session_mut(), *balance);
            if let Some(first) = unlocked.first() {
                log::info!("{} tier(s) unlocked, first {}", unlocked.len(), first.tier_id);
                presenter.celebrate(first.celebration.clone());
            }
            presenter.redraw.force_update();
            || ()
        });
    }

    {
        let presenter = presenter.clone();
        use_effect_with((), move |_| {
            presenter.load_history();
            || ()
        });
    }

    // Keeps the cooldown countdown on the button current
    {
        let machine = machine.clone();
        let redraw = redraw.clone();
        use_effect_with((), move |_| {
            let interval = Interval::new(500, move || {
                if machine.borrow().session().cooldown_remaining_ms(now_ms()).is_some() {
                    redraw.force_update();
                }
            });
            move || drop(interval)
        });
    }

    let on_select = {
        let selected = selected.clone();
        let reels = reels.clone();
        let frames = frames.clone();
        let notice = notice.clone();
        let dice = dice.clone();
        Callback::from(move |tier_id: &'static str| {
            if let Some(tier) = tier(tier_id) {
                if *selected != tier.id {
                    reels.set(ReelSet::generate(tier, &mut *dice.borrow_mut()));
                    frames.set(RESTING_FRAMES);
                }
                selected.set(tier.id);
                notice.set(None);
            }
        })
    };

    let on_roll = {
        let presenter = presenter.clone();
        let selected = selected.clone();
        let reels = reels.clone();
        let frames = frames.clone();
        let dice = dice.clone();
        let linked = link.linked;

        Callback::from(move |_: MouseEvent| {
            let Some(tier) = tier(*selected) else { return };
            let user_id = presenter.session.as_ref().map(|s| s.user_id.clone()).unwrap_or_default();

            let started = presenter
                .machine
                .borrow_mut()
                .start_roll(tier, &user_id, linked, now_ms(), now_iso());
            let ticket = match started {
                Ok(ticket) => ticket,
                Err(blocked) => {
                    presenter.notice.set(Some(Notice::Error(blocked.to_string())));
                    return;
                }
            };

            store_balance(presenter.machine.borrow().session().balance());
            presenter.notice.set(None);
            presenter.revealed.set(None);
            presenter.redraw.force_update();

            let presenter = presenter.clone();
            let current_reels = (*reels).clone();
            let reels = reels.clone();
            let frames = frames.clone();
            let dice = dice.clone();

            spawn_local(async move {
                let mut resolver = FallbackResolver::new(
                    RemoteResolver::new(presenter.session.clone()),
                    LocalResolver::new(SmallRng::from_entropy()),
                );

                let response = match resolver.resolve(&ticket).await {
                    Ok(response) => response,
                    Err(error) => {
                        let outcome = presenter.machine.borrow_mut().abort(ticket, &error);
                        presenter.present(outcome);
                        return;
                    }
                };

                let landing = presenter
                    .machine
                    .borrow()
                    .land(ticket, response, &current_reels, &mut *dice.borrow_mut());
                let timeline = landing.timeline.clone();
                reels.set(landing.reels.clone());
                frames.set(timeline.sample(0.0));

                let landing = RefCell::new(Some(landing));
                let start = js_sys::Date::now();
                let f: FrameCallback = Rc::new(RefCell::new(None));
                let g = f.clone();

                *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                    let elapsed = js_sys::Date::now() - start;
                    frames.set(timeline.sample(elapsed));

                    if !timeline.is_complete(elapsed) {
                        request_frame(&f);
                        return;
                    }
                    if let Some(landing) = landing.borrow_mut().take() {
                        let outcome = presenter.machine.borrow_mut().settle(landing, now_ms());
                        presenter.present(outcome);
                    }
                    // release the loop so the closure is freed once it returns
                    let _ = f.borrow_mut().take();
                }) as Box<dyn FnMut()>));

                request_frame(&g);
            });
        })
    };

    let on_close_reward = {
        let revealed = revealed.clone();
        Callback::from(move |_| revealed.set(None))
    };

    let machine_ref = machine.borrow();
    let state = machine_ref.session();
    let selected_tier = tier(*selected).unwrap_or_else(default_tier);
    let is_opening = state.is_opening();
    let cooldown = state.cooldown_remaining_ms(now_ms());
    let button_label = if is_opening {
        "Girando...".to_string()
    } else if let Some(ms) = cooldown {
        format!("Espera {}s", ms.div_ceil(1000))
    } else if state.balance() < selected_tier.cost && state.free_rolls(selected_tier.id) > 0 {
        "Tirada gratis".to_string()
    } else {
        format!("Girar · {}", tier_selector::format_cost(selected_tier.cost))
    };

    // Local wins stand in until the server history loads
    let shown_history: Vec<HistoryItem> = if history.is_empty() {
        state
            .recent()
            .map(|result| HistoryItem {
                id: result.id.clone(),
                reward_id: result.reward_id.clone(),
                reward_name: result.reward_name.clone(),
                rarity: result.rarity,
                tier_id: None,
                created_at: result.created_at.clone(),
            })
            .collect()
    } else {
        (*history).clone()
    };

    let roll_blocked = is_opening || cooldown.is_some();
    let action = if link.loading {
        html! { <div class={styles::LOADING_SPINNER}></div> }
    } else {
        match (link.linked, session.clone()) {
            (false, Some(session)) => html! {
                <LinkPanel session={session} on_check={refresh_link.clone()} />
            },
            _ => html! {
                <button
                    onclick={on_roll}
                    disabled={roll_blocked}
                    class={classes!(styles::ROLL_BUTTON, roll_blocked.then_some("opacity-60 cursor-not-allowed"))}
                >
                    {button_label}
                </button>
            },
        }
    };

    html! {
        <div class={styles::CONTAINER_LG}>
            <style>{CONFETTI_CSS}</style>
            <h1 class={classes!(styles::TEXT_H1, "text-center", "mb-2")}>
                <span class="bg-clip-text text-transparent bg-gradient-to-r from-purple-400 to-emerald-400">{"Gacha CrystalTides"}</span>
            </h1>
            <p class={classes!(styles::TEXT_BODY, "text-center", "mb-8")}>
                {format!("Saldo: {}", tier_selector::format_cost(state.balance()))}
            </p>

            <TierSelector
                tiers={tier_views(state)}
                selected={selected_tier.id}
                disabled={is_opening}
                on_select={on_select}
            />

            <div class={classes!(styles::CARD, "mt-8")} style={format!("border-top: 4px solid {};", selected_tier.color)}>
                <ReelStrip reels={(*reels).clone()} frames={*frames} />

                if let Some(notice) = &*notice {
                    <div class="mt-6">
                        {match notice {
                            Notice::Info(text) => html! { <p class={styles::ALERT_WARNING}>{text}</p> },
                            Notice::Error(text) => html! { <p class={styles::ALERT_ERROR}>{text}</p> },
                        }}
                    </div>
                }

                <div class="mt-6 flex justify-center">
                    {action}
                </div>
                if session.is_none() {
                    <p class={classes!(styles::TEXT_SMALL, "text-center", "mt-3")}>{"Inicia sesión en la web para jugar."}</p>
                }
                if link.local_mode {
                    <p class={classes!(styles::TEXT_HINT, "text-center")}>{"Modo local: las tiradas se resuelven en el navegador."}</p>
                }
                if let Some(username) = &link.minecraft_username {
                    <p class={classes!(styles::TEXT_HINT, "text-center")}>{format!("Jugando como {}", username)}</p>
                }
            </div>

            <div class="mt-8">
                <HistoryPanel items={shown_history} loading={*history_loading} />
            </div>

            if let Some(reward) = &*revealed {
                <RewardCard reward={reward.clone()} on_close={on_close_reward} />
            }
            if let Some((celebration, seed)) = &*celebration {
                <Confetti celebration={celebration.clone()} seed={*seed} />
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::constants::STARTING_BALANCE;

    #[test]
    fn raised_balance_unlocks_and_grants_a_free_roll() {
        let bronze = tier("bronze").unwrap();
        let mut session = GachaSession::new(0);
        assert!(sync_balance(&mut session, 0).is_empty());

        let unlocked = sync_balance(&mut session, bronze.cost);
        assert!(unlocked.iter().any(|event| event.tier_id == "bronze"));
        assert!(session.is_unlocked("bronze"));
        assert_eq!(session.free_rolls("bronze"), 1);

        // the page's own write-back is not a second unlock
        assert!(sync_balance(&mut session, bronze.cost).is_empty());
        assert_eq!(session.free_rolls("bronze"), 1);
    }

    #[test]
    fn stored_balance_is_evaluated_on_first_sync() {
        let mut session = GachaSession::new(STARTING_BALANCE);
        assert!(!sync_balance(&mut session, STARTING_BALANCE).is_empty());
        assert!(session.is_unlocked("bronze"));
    }
}
