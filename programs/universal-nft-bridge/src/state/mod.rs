pub mod config;
pub mod connected;
pub mod mint_ticket;
pub mod nft_origin;
pub mod processed_message;

pub use config::*;
pub use connected::*;
pub use mint_ticket::*;
pub use nft_origin::*;
pub use processed_message::*;
