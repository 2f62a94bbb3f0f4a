pub mod gateway_callbacks;
pub mod initialize;
pub mod mint_nft;
pub mod reserve_token_id;
pub mod set_connected;
pub mod transfer_cross_chain;
pub mod update_config;

pub use gateway_callbacks::*;
pub use initialize::*;
pub use mint_nft::*;
pub use reserve_token_id::*;
pub use set_connected::*;
pub use transfer_cross_chain::*;
pub use update_config::*;
