use anchor_lang::prelude::*;

use crate::protocol::identity::TokenId;
use crate::protocol::replay::MessageKey;
use crate::util::address::ChainAddress;
use crate::util::constants::PROCESSED_MESSAGE_SEED;

/// Replay marker: existence of the account means the message was applied.
#[account]
#[derive(Debug)]
pub struct ProcessedMessage {
    pub sender: ChainAddress,
    pub nonce: u64,
    pub token_id: TokenId,
    pub processed_at_slot: u64,
    pub bump: u8,
}

impl ProcessedMessage {
    pub const LEN: usize = ChainAddress::SPACE // sender
        + 8                                    // nonce
        + TokenId::LEN                         // token_id
        + 8                                    // processed_at_slot
        + 1;                                   // bump
    pub const SPACE: usize = 8 + Self::LEN;

    pub fn find_pda(key: &MessageKey) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[
                PROCESSED_MESSAGE_SEED,
                key.sender.as_bytes(),
                &key.nonce.to_le_bytes(),
            ],
            &crate::ID,
        )
    }
}
