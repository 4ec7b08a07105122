use serde::{Deserialize, Serialize};
use super::tiers::Rarity;

// === Endpoints ===

pub const ROLL_ENDPOINT: &str = "/gacha/roll";
pub const HISTORY_ENDPOINT: &str = "/gacha/history";
pub const LINK_CHECK_ENDPOINT: &str = "/minecraft/link/check";
pub const LINK_INIT_ENDPOINT: &str = "/minecraft/link/init";
pub const LINK_CONFIRM_ENDPOINT: &str = "/minecraft/link/confirm";

pub fn history_path(user_id: &str) -> String {
    format!("{}/{}", HISTORY_ENDPOINT, user_id)
}

pub fn link_check_path(user_id: &str) -> String {
    format!("{}?userId={}", LINK_CHECK_ENDPOINT, user_id)
}

// === Failure codes carried in `RollResponse::code` ===

pub const CODE_NO_WIN: &str = "NO_WIN";
pub const CODE_COOLDOWN: &str = "COOLDOWN";
pub const CODE_NOT_LINKED: &str = "NOT_LINKED";
pub const CODE_UNKNOWN_TIER: &str = "UNKNOWN_TIER";

// === Gacha ===

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RollRequest {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RollResult {
    pub id: String,
    pub reward_id: String,
    pub reward_name: String,
    pub rarity: Rarity,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RollResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<RollResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl RollResponse {
    pub fn won(result: RollResult) -> Self {
        Self { success: true, data: Some(result), message: None, code: None }
    }

    pub fn failed(code: &str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            code: Some(code.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryItem {
    pub id: String,
    pub reward_id: String,
    pub reward_name: String,
    pub rarity: Rarity,
    #[serde(default)]
    pub tier_id: Option<String>,
    pub created_at: String,
}

impl HistoryItem {
    pub fn from_result(result: &RollResult, tier_id: &str) -> Self {
        Self {
            id: result.id.clone(),
            reward_id: result.reward_id.clone(),
            reward_name: result.reward_name.clone(),
            rarity: result.rarity,
            tier_id: Some(tier_id.to_string()),
            created_at: result.created_at.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<HistoryItem>,
}

// === Minecraft account link ===

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkCheckResponse {
    pub success: bool,
    pub linked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minecraft_username: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LinkInitRequest {
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkInitResponse {
    pub success: bool,
    pub code: String,
    pub expires_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LinkConfirmRequest {
    pub code: String,
    pub minecraft_username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkConfirmResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roll_request_uses_camel_case() {
        let body = RollRequest { user_id: "u1".into(), tier_id: None };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"userId":"u1"}"#);

        let parsed: RollRequest = serde_json::from_str(r#"{"userId":"u1","tierId":"gold"}"#).unwrap();
        assert_eq!(parsed.tier_id.as_deref(), Some("gold"));
    }

    #[test]
    fn failure_response_parses_without_data() {
        let parsed: RollResponse =
            serde_json::from_str(r#"{"success":false,"message":"nope","code":"NO_WIN"}"#).unwrap();
        assert!(!parsed.success);
        assert!(parsed.data.is_none());
        assert_eq!(parsed.code.as_deref(), Some(CODE_NO_WIN));
    }

    #[test]
    fn paths() {
        assert_eq!(history_path("abc"), "/gacha/history/abc");
        assert_eq!(link_check_path("abc"), "/minecraft/link/check?userId=abc");
    }
}
