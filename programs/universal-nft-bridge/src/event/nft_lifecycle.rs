use anchor_lang::prelude::*;

use crate::util::address::ChainAddress;

#[event]
pub struct TokenIdReserved {
    pub token_id: [u8; 32],
    pub authority: Pubkey,
    pub slot: u64,
}

/// A chain-native token was minted
#[event]
pub struct TokenMinted {
    pub token_id: [u8; 32],
    pub owner: ChainAddress,
    pub uri: String,
    pub chain_id: u64,
}
