//! Chain-independent core of the bridge.
//!
//! Everything here operates on explicit state objects and collaborator
//! traits. The Anchor instructions bind these traits to Solana accounts; the
//! integration tests bind them to an in-memory network.

pub mod admin;
pub mod custody;
pub mod engine;
pub mod gas;
pub mod gateway;
pub mod identity;
pub mod message;
pub mod origin;
pub mod peers;
pub mod replay;
