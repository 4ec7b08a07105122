use std::collections::HashMap;
use rand::Rng;
use shared::constants::{LINK_CODE_LENGTH, LINK_CODE_TTL_SECS};
use time::{Duration, OffsetDateTime};
use tokio::sync::RwLock;
use uuid::Uuid;

/// No 0/O or 1/I, codes are typed by hand in game chat
const CODE_CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

#[derive(Debug, Clone)]
struct PendingCode {
    user_id: Uuid,
    expires_at: OffsetDateTime,
}

#[derive(Debug, PartialEq)]
pub enum LinkError {
    AlreadyLinked,
    UnknownCode,
    CodeExpired,
    UsernameTaken,
}

impl std::fmt::Display for LinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyLinked => write!(f, "La cuenta ya está vinculada"),
            Self::UnknownCode => write!(f, "Código de vinculación no válido"),
            Self::CodeExpired => write!(f, "El código de vinculación ha expirado"),
            Self::UsernameTaken => write!(f, "Ese jugador ya está vinculado a otra cuenta"),
        }
    }
}

impl std::error::Error for LinkError {}

/// Site account to Minecraft username bindings plus outstanding one-time codes.
#[derive(Default)]
pub struct LinkStore {
    links: RwLock<HashMap<Uuid, String>>,
    pending: RwLock<HashMap<String, PendingCode>>,
}

pub fn generate_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..LINK_CODE_LENGTH)
        .map(|_| CODE_CHARSET[rng.gen_range(0..CODE_CHARSET.len())] as char)
        .collect()
}

pub fn is_valid_username(name: &str) -> bool {
    (3..=16).contains(&name.len())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl LinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_linked(&self, user_id: Uuid) -> bool {
        self.links.read().await.contains_key(&user_id)
    }

    pub async fn username(&self, user_id: Uuid) -> Option<String> {
        self.links.read().await.get(&user_id).cloned()
    }

    /// Issues a fresh code for the user, replacing any earlier one.
    /// Returns the code and when it stops being accepted.
    pub async fn issue_code(&self, user_id: Uuid, now: OffsetDateTime) -> Result<(String, OffsetDateTime), LinkError> {
        if self.is_linked(user_id).await {
            return Err(LinkError::AlreadyLinked);
        }

        let mut pending = self.pending.write().await;
        pending.retain(|_, entry| entry.user_id != user_id && entry.expires_at > now);

        let mut rng = rand::thread_rng();
        let code = loop {
            let candidate = generate_code(&mut rng);
            if !pending.contains_key(&candidate) {
                break candidate;
            }
        };

        let expires_at = now + Duration::seconds(LINK_CODE_TTL_SECS);
        pending.insert(code.clone(), PendingCode { user_id, expires_at });
        tracing::debug!("link code issued for {}", user_id);

        Ok((code, expires_at))
    }

    /// Consumes a code typed in game and binds the account. Returns the site user.
    pub async fn confirm(&self, code: &str, username: &str, now: OffsetDateTime) -> Result<Uuid, LinkError> {
        let code = code.trim().to_ascii_uppercase();
        let mut pending = self.pending.write().await;
        let (user_id, expires_at) = pending
            .get(&code)
            .map(|entry| (entry.user_id, entry.expires_at))
            .ok_or(LinkError::UnknownCode)?;
        if expires_at <= now {
            pending.remove(&code);
            return Err(LinkError::CodeExpired);
        }

        // a rejected confirmation leaves the code usable
        let mut links = self.links.write().await;
        if links.contains_key(&user_id) {
            return Err(LinkError::AlreadyLinked);
        }
        if links.values().any(|linked| linked.eq_ignore_ascii_case(username)) {
            return Err(LinkError::UsernameTaken);
        }
        links.insert(user_id, username.to_string());
        pending.remove(&code);

        Ok(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn at(secs: i64) -> OffsetDateTime {
        OffsetDateTime::UNIX_EPOCH + Duration::seconds(1_700_000_000 + secs)
    }

    #[test]
    fn codes_use_the_unambiguous_charset() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let code = generate_code(&mut rng);
            assert_eq!(code.len(), LINK_CODE_LENGTH);
            assert!(code.bytes().all(|b| CODE_CHARSET.contains(&b)));
        }
    }

    #[test]
    fn username_rules() {
        assert!(is_valid_username("Steve_01"));
        assert!(!is_valid_username("ab"));
        assert!(!is_valid_username("seventeen_chars__"));
        assert!(!is_valid_username("bad name"));
    }

    #[tokio::test]
    async fn code_links_the_account_once() {
        let store = LinkStore::new();
        let user = Uuid::new_v4();
        let (code, expires_at) = store.issue_code(user, at(0)).await.unwrap();
        assert_eq!(expires_at, at(LINK_CODE_TTL_SECS));

        assert_eq!(store.confirm(&code.to_lowercase(), "Steve", at(30)).await, Ok(user));
        assert_eq!(store.username(user).await.as_deref(), Some("Steve"));
        assert_eq!(store.confirm(&code, "Steve", at(31)).await, Err(LinkError::UnknownCode));
        assert_eq!(store.issue_code(user, at(40)).await.unwrap_err(), LinkError::AlreadyLinked);
    }

    #[tokio::test]
    async fn expired_code_is_rejected() {
        let store = LinkStore::new();
        let user = Uuid::new_v4();
        let (code, _) = store.issue_code(user, at(0)).await.unwrap();
        assert_eq!(store.confirm(&code, "Alex", at(LINK_CODE_TTL_SECS)).await, Err(LinkError::CodeExpired));
        assert!(!store.is_linked(user).await);
    }

    #[tokio::test]
    async fn reissuing_replaces_the_old_code() {
        let store = LinkStore::new();
        let user = Uuid::new_v4();
        let (first, _) = store.issue_code(user, at(0)).await.unwrap();
        let (second, _) = store.issue_code(user, at(5)).await.unwrap();
        if first != second {
            assert_eq!(store.confirm(&first, "Alex", at(6)).await, Err(LinkError::UnknownCode));
        }
        assert_eq!(store.confirm(&second, "Alex", at(6)).await, Ok(user));
    }

    #[tokio::test]
    async fn one_player_per_account() {
        let store = LinkStore::new();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let (code_a, _) = store.issue_code(a, at(0)).await.unwrap();
        let (code_b, _) = store.issue_code(b, at(0)).await.unwrap();
        store.confirm(&code_a, "Notch", at(1)).await.unwrap();
        assert_eq!(store.confirm(&code_b, "notch", at(1)).await, Err(LinkError::UsernameTaken));
        assert_eq!(store.confirm(&code_b, "Jeb_", at(2)).await, Ok(b));
    }
}
