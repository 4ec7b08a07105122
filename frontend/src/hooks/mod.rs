pub mod auth_state;
pub mod use_balance;
pub mod use_link_status;

pub use auth_state::*;
pub use use_balance::*;
pub use use_link_status::*;
