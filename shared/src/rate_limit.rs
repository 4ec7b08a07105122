use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const API_WINDOW: Duration = Duration::from_secs(60);
pub const ROLL_WINDOW: Duration = Duration::from_secs(60);
pub const LINK_INIT_WINDOW: Duration = Duration::from_secs(15 * 60);

pub const API_MAX_REQUESTS: u32 = 600;
pub const ROLL_MAX_REQUESTS: u32 = 30;
pub const LINK_INIT_MAX_ATTEMPTS: u32 = 5;

pub const API_RATE_LIMIT_ERROR: &str = "Demasiadas peticiones";
pub const ROLL_RATE_LIMIT_ERROR: &str = "Demasiadas tiradas seguidas. Espera un minuto.";
pub const LINK_INIT_RATE_LIMIT_ERROR: &str = "Demasiados códigos solicitados. Inténtalo en 15 minutos.";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateLimitType {
    Api,
    Roll,
    LinkInit,
}

impl RateLimitType {
    pub fn get_window(&self) -> Duration {
        match self {
            Self::Api => API_WINDOW,
            Self::Roll => ROLL_WINDOW,
            Self::LinkInit => LINK_INIT_WINDOW,
        }
    }

    pub fn get_max_attempts(&self) -> u32 {
        match self {
            Self::Api => API_MAX_REQUESTS,
            Self::Roll => ROLL_MAX_REQUESTS,
            Self::LinkInit => LINK_INIT_MAX_ATTEMPTS,
        }
    }

    pub fn get_error_message(&self) -> &'static str {
        match self {
            Self::Api => API_RATE_LIMIT_ERROR,
            Self::Roll => ROLL_RATE_LIMIT_ERROR,
            Self::LinkInit => LINK_INIT_RATE_LIMIT_ERROR,
        }
    }

    /// Picks the bucket a request path counts against
    pub fn for_path(path: &str) -> Self {
        if path.ends_with("/gacha/roll") {
            Self::Roll
        } else if path.ends_with("/minecraft/link/init") {
            Self::LinkInit
        } else {
            Self::Api
        }
    }
}
