pub const API_BASE_URL: &str = "http://localhost:3000";

pub const INSUFFICIENT_BALANCE_ERROR: &str = "Saldo insuficiente para esta máquina";
pub const ROLL_IN_PROGRESS_ERROR: &str = "Ya hay una tirada en curso";
pub const ACCOUNT_NOT_LINKED_ERROR: &str = "Vincula tu cuenta de Minecraft para jugar";
pub const GENERIC_ROLL_ERROR: &str = "Error al procesar la tirada. Inténtalo de nuevo.";
pub const NO_WIN_MESSAGE: &str = "¡Sin suerte esta vez! Inténtalo de nuevo.";
pub const NETWORK_ERROR: &str = "Error de red. Inténtalo de nuevo";
pub const SESSION_EXPIRED_ERROR: &str = "Tu sesión ha expirado, inicia sesión de nuevo";

pub fn cooldown_error(remaining_secs: u64) -> String {
    format!("Espera {}s antes de volver a girar", remaining_secs)
}

/// Balance a fresh browser session starts with while the ledger is not wired
pub const STARTING_BALANCE: u64 = 100_000;
/// Pause between two rolls of the same player
pub const ROLL_COOLDOWN_MS: u64 = 3_000;
/// Rolls kept in the session's recent list
pub const RECENT_ROLLS_LIMIT: usize = 10;
/// Items returned by the history endpoint
pub const HISTORY_LIMIT: usize = 50;

pub const LINK_CODE_LENGTH: usize = 6;
pub const LINK_CODE_TTL_SECS: i64 = 600;
