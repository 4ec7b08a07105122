use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::constants::{NETWORK_ERROR, SESSION_EXPIRED_ERROR};
use shared::shared_gacha::*;
use crate::config::api_url;
use crate::hooks::auth_state::{clear_session, Session};

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if response.status() == 401 {
        clear_session();
        return Err(SESSION_EXPIRED_ERROR.to_string());
    }
    if !response.ok() {
        return Err(format!("Error status: {}", response.status()));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| format!("Error parsing response: {:?}", e))
}

pub async fn fetch_history(session: &Session) -> Result<Vec<HistoryItem>, String> {
    let response = Request::get(&api_url(&history_path(&session.user_id)))
        .header("Authorization", &format!("Bearer {}", session.token))
        .send()
        .await
        .map_err(|_| NETWORK_ERROR.to_string())?;

    let history: HistoryResponse = read_json(response).await?;
    Ok(history.data)
}

/// Result of the link check; `Unavailable` pairs with the local roll fallback
#[derive(Debug, Clone, PartialEq)]
pub enum LinkCheck {
    Known(LinkCheckResponse),
    /// The endpoint answered with something other than JSON
    Unavailable,
}

pub async fn check_link(session: &Session) -> Result<LinkCheck, String> {
    let response = Request::get(&api_url(&link_check_path(&session.user_id)))
        .header("Authorization", &format!("Bearer {}", session.token))
        .send()
        .await
        .map_err(|_| NETWORK_ERROR.to_string())?;

    if response.status() == 401 {
        clear_session();
        return Err(SESSION_EXPIRED_ERROR.to_string());
    }
    if !response.ok() {
        return Err(format!("Error status: {}", response.status()));
    }

    let text = response
        .text()
        .await
        .map_err(|e| format!("Error reading response: {:?}", e))?;
    Ok(parse_link_check(&text))
}

pub fn parse_link_check(text: &str) -> LinkCheck {
    match serde_json::from_str::<LinkCheckResponse>(text) {
        Ok(response) => LinkCheck::Known(response),
        Err(_) => {
            log::warn!("link endpoint unavailable, playing in local mode");
            LinkCheck::Unavailable
        }
    }
}

pub async fn init_link(session: &Session) -> Result<LinkInitResponse, String> {
    let body = LinkInitRequest { user_id: session.user_id.clone() };
    let response = Request::post(&api_url(LINK_INIT_ENDPOINT))
        .header("Authorization", &format!("Bearer {}", session.token))
        .json(&body)
        .map_err(|e| format!("Failed to build request: {:?}", e))?
        .send()
        .await
        .map_err(|_| NETWORK_ERROR.to_string())?;

    read_json(response).await
}

/// Resolves rolls against `POST /gacha/roll`
pub struct RemoteResolver {
    session: Option<Session>,
}

impl RemoteResolver {
    pub fn new(session: Option<Session>) -> Self {
        Self { session }
    }
}

impl RollResolver for RemoteResolver {
    async fn resolve(&mut self, ticket: &RollTicket) -> Result<RollResponse, ResolveError> {
        let session = self.session.as_ref().ok_or(ResolveError::Status(401))?;
        let body = RollRequest {
            user_id: ticket.user_id.clone(),
            tier_id: Some(ticket.tier.id.to_string()),
        };

        let response = Request::post(&api_url(ROLL_ENDPOINT))
            .header("Authorization", &format!("Bearer {}", session.token))
            .json(&body)
            .map_err(|e| ResolveError::Transport(format!("{:?}", e)))?
            .send()
            .await
            .map_err(|e| ResolveError::Transport(format!("{:?}", e)))?;

        if response.status() == 401 {
            clear_session();
        }
        if !response.ok() {
            return Err(ResolveError::Status(response.status()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ResolveError::Transport(format!("{:?}", e)))?;
        parse_roll_response(&text)
    }
}

/// Anything that isn't a roll response means the endpoint isn't there
pub fn parse_roll_response(text: &str) -> Result<RollResponse, ResolveError> {
    serde_json::from_str(text).map_err(|_| {
        let preview: String = text.chars().take(40).collect();
        ResolveError::Unavailable(preview)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_page_means_unavailable() {
        let err = parse_roll_response("<!DOCTYPE html><html>").unwrap_err();
        assert!(matches!(err, ResolveError::Unavailable(_)));
    }

    #[test]
    fn link_check_parses_or_reports_unavailable() {
        assert_eq!(parse_link_check("<!DOCTYPE html><html>"), LinkCheck::Unavailable);
        assert_eq!(parse_link_check(""), LinkCheck::Unavailable);

        let known = parse_link_check(r#"{"success":true,"linked":true,"minecraft_username":"Steve"}"#);
        assert_eq!(
            known,
            LinkCheck::Known(LinkCheckResponse {
                success: true,
                linked: true,
                minecraft_username: Some("Steve".to_string()),
            })
        );
    }

    #[test]
    fn roll_response_parses() {
        let text = r#"{"success":true,"data":{"id":"r1","reward_id":"silver_sword","reward_name":"Espada","rarity":"rare","created_at":"2026-01-01T00:00:00Z"}}"#;
        let response = parse_roll_response(text).unwrap();
        assert_eq!(response.data.unwrap().rarity, Rarity::Rare);
    }
}
