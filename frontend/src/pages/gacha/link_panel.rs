use shared::shared_gacha::LinkInitResponse;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use crate::api::init_link;
use crate::hooks::auth_state::Session;
use crate::styles;

#[derive(Properties, PartialEq)]
pub struct LinkPanelProps {
    pub session: Session,
    /// Re-checks the link after the player typed the code
    pub on_check: Callback<()>,
}

pub fn link_command(code: &str) -> String {
    format!("/link {}", code)
}

#[function_component(LinkPanel)]
pub fn link_panel(props: &LinkPanelProps) -> Html {
    let issued = use_state(|| None::<LinkInitResponse>);
    let loading = use_state(|| false);
    let error_message = use_state(String::new);

    let request_code = {
        let session = props.session.clone();
        let issued = issued.clone();
        let loading = loading.clone();
        let error_message = error_message.clone();
        Callback::from(move |_: MouseEvent| {
            if *loading {
                return;
            }
            loading.set(true);
            error_message.set(String::new());

            let session = session.clone();
            let issued = issued.clone();
            let loading = loading.clone();
            let error_message = error_message.clone();
            spawn_local(async move {
                match init_link(&session).await {
                    Ok(response) => issued.set(Some(response)),
                    Err(err) => error_message.set(err),
                }
                loading.set(false);
            });
        })
    };

    let check = {
        let on_check = props.on_check.clone();
        Callback::from(move |_: MouseEvent| on_check.emit(()))
    };

    html! {
        <div class={classes!(styles::CARD, "text-center")}>
            <h3 class={styles::CARD_TITLE}>{"Vincula tu cuenta de Minecraft"}</h3>
            <p class={classes!(styles::CARD_TEXT, "mt-2")}>
                {"Las recompensas se entregan en el servidor. Genera un código y escríbelo en el chat del juego."}
            </p>
            if let Some(issued) = &*issued {
                <div class="mt-4">
                    <code class={styles::LINK_CODE}>{link_command(&issued.code)}</code>
                    <p class={styles::TEXT_HINT}>{format!("Válido hasta {}", issued.expires_at)}</p>
                    <button onclick={check} class={classes!(styles::BUTTON_SECONDARY, "mt-4")}>
                        {"Ya lo he escrito"}
                    </button>
                </div>
            } else {
                <button onclick={request_code} disabled={*loading} class={classes!(styles::BUTTON_PRIMARY, "mt-4")}>
                    if *loading {
                        <div class={classes!(styles::LOADING_SPINNER, "mr-2")}></div>
                    }
                    {"Generar código"}
                </button>
            }
            if !error_message.is_empty() {
                <p class={classes!(styles::TEXT_ERROR, "mt-3")}>{&*error_message}</p>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_to_type_in_game() {
        assert_eq!(link_command("AB3K9Z"), "/link AB3K9Z");
    }
}
