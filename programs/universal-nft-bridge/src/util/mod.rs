pub mod address;
pub mod constants;
pub mod gateway_helpers;
pub mod pda;
pub mod validation;

pub use address::*;
pub use constants::*;
