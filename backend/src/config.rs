use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;
use shared::constants::ROLL_COOLDOWN_MS;
use shared::shared_gacha::LOCAL_WIN_RATE;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_ORIGINS: &str = "http://127.0.0.1:8080,http://localhost:8080,https://crystaltides.net";

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(key) => write!(f, "{} must be set", key),
            Self::Invalid(key, value) => write!(f, "{} has an invalid value: {}", key, value),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Secret the session provider signs access tokens with (HS256)
    pub jwt_secret: String,
    pub allowed_origins: Vec<String>,
    pub win_rate: f64,
    pub roll_cooldown: Duration,
    /// Shared with the Minecraft server plugin; link confirmation is off when unset
    pub link_server_secret: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = env::var("JWT_SECRET_KEY").map_err(|_| ConfigError::Missing("JWT_SECRET_KEY"))?;

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse()
            .map_err(|_| ConfigError::Invalid("BIND_ADDR", bind_addr.clone()))?;

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let win_rate = match env::var("GACHA_WIN_RATE") {
            Ok(raw) => match raw.parse::<f64>() {
                Ok(rate) if (0.0..=1.0).contains(&rate) => rate,
                _ => return Err(ConfigError::Invalid("GACHA_WIN_RATE", raw)),
            },
            Err(_) => LOCAL_WIN_RATE,
        };

        let roll_cooldown = match env::var("GACHA_COOLDOWN_SECS") {
            Ok(raw) => Duration::from_secs(
                raw.parse().map_err(|_| ConfigError::Invalid("GACHA_COOLDOWN_SECS", raw.clone()))?,
            ),
            Err(_) => Duration::from_millis(ROLL_COOLDOWN_MS),
        };

        let link_server_secret = env::var("LINK_SERVER_SECRET").ok().filter(|s| !s.is_empty());

        Ok(Self {
            bind_addr,
            jwt_secret,
            allowed_origins,
            win_rate,
            roll_cooldown,
            link_server_secret,
        })
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.parse().unwrap(),
            jwt_secret: "test-secret".to_string(),
            allowed_origins: vec!["http://127.0.0.1:8080".to_string()],
            win_rate: 1.0,
            roll_cooldown: Duration::from_secs(3),
            link_server_secret: Some("plugin-secret".to_string()),
        }
    }
}
