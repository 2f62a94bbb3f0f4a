use anchor_lang::prelude::*;

use crate::util::address::ChainAddress;

/// Cross-chain transfer events
#[event]
pub struct TokenTransfer {
    /// Universal token ID being transferred
    pub token_id: [u8; 32],
    /// Channel the transfer leaves on
    pub destination_channel: [u8; 20],
    /// Recipient on the final chain
    pub receiver: ChainAddress,
    /// Owner whose token was burned
    pub sender: ChainAddress,
    pub uri: String,
    /// Nonce of the outbound message
    pub nonce: u64,
    /// Fee consumed by the hop
    pub fee: u64,
    /// Value carried to pay for onward hops
    pub carried_value: u64,
}

#[event]
pub struct TokenTransferReceived {
    pub token_id: [u8; 32],
    pub source_channel: [u8; 20],
    pub sender: ChainAddress,
    pub receiver: ChainAddress,
    pub uri: String,
    pub nonce: u64,
    /// Whether this is the token's first appearance on this chain
    pub first_arrival: bool,
    pub chain_of_origin: u64,
}

/// A hub relayed a transfer onward without minting
#[event]
pub struct TokenForwarded {
    pub token_id: [u8; 32],
    pub source_channel: [u8; 20],
    pub next_channel: [u8; 20],
    pub receiver: ChainAddress,
    pub nonce: u64,
    pub fee: u64,
    pub carried_value: u64,
}

#[event]
pub struct TokenTransferReverted {
    pub token_id: [u8; 32],
    pub recipient: ChainAddress,
    pub uri: String,
    /// Value refunded alongside the token
    pub refunded: u64,
}

#[event]
pub struct TokenTransferAborted {
    pub token_id: [u8; 32],
    pub recipient: ChainAddress,
    pub uri: String,
    pub refunded: u64,
}

#[event]
pub struct CrossChainMessageRejected {
    pub channel: [u8; 20],
    pub sender: ChainAddress,
}
