pub mod gacha;
pub mod not_found;
