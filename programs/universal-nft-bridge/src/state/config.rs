use anchor_lang::prelude::*;

use crate::error::UniversalNftError;
use crate::util::address::ChainAddress;

/// Program configuration account
/// Stores global settings and counters for the Universal NFT bridge
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct UniversalNftConfig {
    /// Chain id of this deployment
    pub chain_id: u64,
    /// This deployment's identity on the network (program id on Solana)
    pub issuer: ChainAddress,
    /// Authority allowed to manage peers and settings
    pub authority: ChainAddress,
    /// Principal that delivers gateway callbacks
    pub gateway: ChainAddress,
    /// ZetaChain gateway program for outbound deposits
    pub gateway_program: Pubkey,
    /// Counter mixed into every derived token id
    pub next_token_id: u64,
    /// Nonce of the next outbound message
    pub message_sequence: u64,
    /// Gas limit requested for destination execution
    pub gas_limit: u64,
    /// Native amount the gateway charges per hop
    pub hop_fee: u64,
    /// Whether outbound transfers and local mints are halted
    pub paused: bool,
    /// Held while a transfer path executes
    pub transfer_locked: bool,
    /// Bump seed for PDA
    pub bump: u8,
}

/// Deployment settings supplied at initialization.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ConfigSettings {
    pub chain_id: u64,
    pub issuer: ChainAddress,
    pub authority: ChainAddress,
    pub gateway: ChainAddress,
    pub gateway_program: Pubkey,
    pub gas_limit: u64,
    pub hop_fee: u64,
}

impl UniversalNftConfig {
    pub const LEN: usize = 8  // chain_id
        + ChainAddress::SPACE // issuer
        + ChainAddress::SPACE // authority
        + ChainAddress::SPACE // gateway
        + 32                  // gateway_program
        + 8                   // next_token_id
        + 8                   // message_sequence
        + 8                   // gas_limit
        + 8                   // hop_fee
        + 1                   // paused
        + 1                   // transfer_locked
        + 1;                  // bump
    pub const SPACE: usize = 8 + Self::LEN;

    pub fn new(settings: ConfigSettings, bump: u8) -> Self {
        Self {
            chain_id: settings.chain_id,
            issuer: settings.issuer,
            authority: settings.authority,
            gateway: settings.gateway,
            gateway_program: settings.gateway_program,
            next_token_id: 0,
            message_sequence: 0,
            gas_limit: settings.gas_limit,
            hop_fee: settings.hop_fee,
            paused: false,
            transfer_locked: false,
            bump,
        }
    }

    pub fn is_authority(&self, caller: &ChainAddress) -> bool {
        self.authority == *caller
    }

    /// Returns the nonce for a new outbound message and advances the sequence.
    pub fn next_message_nonce(&mut self) -> Result<u64> {
        let nonce = self.message_sequence;
        self.message_sequence = nonce
            .checked_add(1)
            .ok_or(UniversalNftError::ArithmeticOverflow)?;
        Ok(nonce)
    }
}
