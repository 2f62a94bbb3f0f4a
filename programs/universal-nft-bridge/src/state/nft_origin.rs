use anchor_lang::prelude::*;

use crate::protocol::identity::TokenId;
use crate::util::address::ChainAddress;
use crate::util::constants::{MAX_URI_LENGTH, NFT_ORIGIN_SEED};

/// Where a token was first minted. Travels with every transfer message so
/// later hops never need to look it up.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Provenance {
    pub chain_of_origin: u64,
    pub original_reference: ChainAddress,
}

/// Provenance record of a token, written once on first appearance on this chain
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct NftOrigin {
    pub token_id: TokenId,
    pub chain_of_origin: u64,
    pub original_reference: ChainAddress,
    pub original_uri: String,
    pub is_native: bool,
    pub recorded_at_slot: u64,
    pub bump: u8,
}

impl NftOrigin {
    pub const LEN: usize = TokenId::LEN // token_id
        + 8                            // chain_of_origin
        + ChainAddress::SPACE          // original_reference
        + 4 + MAX_URI_LENGTH           // original_uri
        + 1                            // is_native
        + 8                            // recorded_at_slot
        + 1;                           // bump
    pub const SPACE: usize = 8 + Self::LEN;

    pub fn new(
        token_id: TokenId,
        provenance: Provenance,
        original_uri: String,
        local_chain: u64,
        recorded_at_slot: u64,
    ) -> Self {
        Self {
            token_id,
            chain_of_origin: provenance.chain_of_origin,
            original_reference: provenance.original_reference,
            original_uri,
            is_native: provenance.chain_of_origin == local_chain,
            recorded_at_slot,
            bump: 0,
        }
    }

    pub fn provenance(&self) -> Provenance {
        Provenance {
            chain_of_origin: self.chain_of_origin,
            original_reference: self.original_reference,
        }
    }

    pub fn find_pda(token_id: &TokenId) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[NFT_ORIGIN_SEED, token_id.as_ref()], &crate::ID)
    }
}
