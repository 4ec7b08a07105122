use web_sys::{window, Storage};
use yew::prelude::*;

const TOKEN_KEY: &str = "token";
const USER_ID_KEY: &str = "user_id";

fn storages() -> impl Iterator<Item = Storage> {
    let window = window();
    let local = window.as_ref().and_then(|w| w.local_storage().ok().flatten());
    let session = window.as_ref().and_then(|w| w.session_storage().ok().flatten());
    [local, session].into_iter().flatten()
}

fn stored(key: &str) -> Option<String> {
    storages()
        .find_map(|s| s.get_item(key).ok().flatten())
        .filter(|value| !value.is_empty())
}

pub fn get_token() -> Option<String> {
    stored(TOKEN_KEY)
}

pub fn get_user_id() -> Option<String> {
    stored(USER_ID_KEY)
}

/// Drops a session the API no longer accepts
pub fn clear_session() {
    for storage in storages() {
        storage.remove_item(TOKEN_KEY).ok();
        storage.remove_item(USER_ID_KEY).ok();
    }
}

#[derive(Clone, PartialEq, Default)]
pub struct Session {
    pub token: String,
    pub user_id: String,
}

impl Session {
    pub fn load() -> Option<Self> {
        get_token().zip(get_user_id()).map(|(token, user_id)| Self { token, user_id })
    }
}

#[hook]
pub fn use_session() -> Option<Session> {
    let session = use_state(Session::load);
    (*session).clone()
}
