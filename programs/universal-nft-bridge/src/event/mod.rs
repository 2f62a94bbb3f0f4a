pub mod config;
pub mod cross_chain;
pub mod nft_lifecycle;

pub use config::*;
pub use cross_chain::*;
pub use nft_lifecycle::*;
