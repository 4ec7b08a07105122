use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use crate::api::{check_link, LinkCheck};
use crate::hooks::auth_state::Session;

#[derive(Clone, PartialEq, Default)]
pub struct LinkStatus {
    pub loading: bool,
    pub linked: bool,
    pub minecraft_username: Option<String>,
    /// No API answers; rolls resolve locally, so the link gate is open too
    pub local_mode: bool,
    pub error: Option<String>,
}

impl LinkStatus {
    pub fn from_check(result: Result<LinkCheck, String>) -> Self {
        match result {
            Ok(LinkCheck::Known(response)) => Self {
                linked: response.linked,
                minecraft_username: response.minecraft_username,
                ..Default::default()
            },
            Ok(LinkCheck::Unavailable) => Self { linked: true, local_mode: true, ..Default::default() },
            Err(err) => Self { error: Some(err), ..Default::default() },
        }
    }
}

/// Link state of the signed-in player plus a callback to re-check it
#[hook]
pub fn use_link_status(session: Option<Session>) -> (LinkStatus, Callback<()>) {
    let status = use_state(|| LinkStatus { loading: session.is_some(), ..Default::default() });
    let generation = use_state(|| 0u32);

    {
        let status = status.clone();
        use_effect_with((session, *generation), move |(session, _)| {
            if let Some(session) = session.clone() {
                spawn_local(async move {
                    let result = check_link(&session).await;
                    if let Err(err) = &result {
                        log::warn!("link check failed: {}", err);
                    }
                    status.set(LinkStatus::from_check(result));
                });
            }
            || ()
        });
    }

    let refresh = {
        let generation = generation.clone();
        Callback::from(move |_| generation.set(*generation + 1))
    };

    ((*status).clone(), refresh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::shared_gacha::LinkCheckResponse;

    #[test]
    fn unavailable_api_opens_local_mode() {
        let status = LinkStatus::from_check(Ok(LinkCheck::Unavailable));
        assert!(status.linked);
        assert!(status.local_mode);
        assert!(status.error.is_none());
    }

    #[test]
    fn server_answer_is_taken_as_is() {
        let status = LinkStatus::from_check(Ok(LinkCheck::Known(LinkCheckResponse {
            success: true,
            linked: false,
            minecraft_username: None,
        })));
        assert!(!status.linked);
        assert!(!status.local_mode);
    }

    #[test]
    fn failures_keep_the_gate_closed() {
        let status = LinkStatus::from_check(Err("Error status: 500".to_string()));
        assert!(!status.linked);
        assert!(!status.local_mode);
        assert_eq!(status.error.as_deref(), Some("Error status: 500"));
    }
}
