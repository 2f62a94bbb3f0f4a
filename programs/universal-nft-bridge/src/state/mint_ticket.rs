use anchor_lang::prelude::*;

use crate::protocol::identity::TokenId;

/// Token id reserved for a local mint. The id mixes in the slot, so it is
/// allocated in one instruction and consumed by `mint_nft` in the next.
#[account]
#[derive(Debug)]
pub struct MintTicket {
    pub authority: Pubkey,
    pub token_id: TokenId,
    pub reserved_at_slot: u64,
    pub bump: u8,
}

impl MintTicket {
    /// Payload length in bytes (excludes the 8-byte Anchor discriminator).
    pub const LEN: usize = 32  // authority
        + TokenId::LEN        // token_id
        + 8                   // reserved_at_slot
        + 1;                  // bump
    /// Total on-chain space in bytes (discriminator + payload). Use this for allocations.
    pub const SPACE: usize = 8 + Self::LEN;
}
