//! Solana bindings for the protocol traits.

pub mod account_ledgers;
pub mod gateway_operations;
pub mod metadata_operations;
pub mod token_operations;
pub mod treasury;

pub use account_ledgers::*;
pub use gateway_operations::*;
pub use token_operations::*;
pub use treasury::*;
