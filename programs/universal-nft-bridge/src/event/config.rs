use anchor_lang::prelude::*;

use crate::util::address::ChainAddress;

#[event]
pub struct ProgramInitialized {
    pub chain_id: u64,
    pub authority: ChainAddress,
    pub gateway: ChainAddress,
    pub gateway_program: Pubkey,
}

/// A channel was bound to a remote principal
#[event]
pub struct SetConnected {
    pub channel: [u8; 20],
    pub remote_chain: u64,
    pub remote_principal: ChainAddress,
    pub forward_channel: Option<[u8; 20]>,
}

#[event]
pub struct ConfigUpdated {
    pub authority: ChainAddress,
    pub gas_limit: u64,
    pub hop_fee: u64,
    pub paused: bool,
}
