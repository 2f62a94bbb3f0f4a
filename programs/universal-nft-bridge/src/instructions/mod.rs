pub mod gateway_callbacks;
pub mod initialize;
pub mod mint_nft;
pub mod reserve_token_id;
pub mod set_connected;
pub mod transfer_cross_chain;
pub mod update_config;
