use anchor_lang::prelude::*;

use crate::error::UniversalNftError;
use crate::protocol::peers::PeerRegistry;
use crate::state::{Connected, UniversalNftConfig};
use crate::util::address::{ChainAddress, Channel};

/// Binding requested by the authority for one channel.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PeerBinding {
    pub channel: Channel,
    pub remote_chain: u64,
    pub remote_principal: ChainAddress,
    pub forward_channel: Option<Channel>,
}

/// Optional changes applied by `update_config`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigUpdate {
    pub authority: Option<ChainAddress>,
    pub gas_limit: Option<u64>,
    pub hop_fee: Option<u64>,
}

fn require_authority(config: &UniversalNftConfig, caller: &ChainAddress) -> Result<()> {
    if !config.is_authority(caller) {
        msg!("Caller {} is not the authority", caller);
        return err!(UniversalNftError::Unauthorized);
    }
    Ok(())
}

/// Bind `binding.channel` to a remote principal, replacing any previous peer.
pub fn set_peer<P: PeerRegistry + ?Sized>(
    config: &UniversalNftConfig,
    peers: &mut P,
    caller: &ChainAddress,
    binding: PeerBinding,
    bump: u8,
) -> Result<Connected> {
    require_authority(config, caller)?;
    require!(
        !binding.remote_principal.is_zero(),
        UniversalNftError::InvalidAddress
    );
    require!(
        binding.forward_channel != Some(binding.channel),
        UniversalNftError::InvalidChannel
    );

    let entry = Connected {
        channel: binding.channel,
        remote_chain: binding.remote_chain,
        remote_principal: binding.remote_principal,
        forward_channel: binding.forward_channel,
        bump,
    };
    peers.store(entry.clone())?;

    msg!(
        "Channel {} bound to {} on chain {}",
        entry.channel,
        entry.remote_principal,
        entry.remote_chain
    );
    Ok(entry)
}

pub fn set_paused(
    config: &mut UniversalNftConfig,
    caller: &ChainAddress,
    paused: bool,
) -> Result<()> {
    require_authority(config, caller)?;
    config.paused = paused;
    msg!("Program paused: {}", paused);
    Ok(())
}

pub fn update_config(
    config: &mut UniversalNftConfig,
    caller: &ChainAddress,
    update: ConfigUpdate,
) -> Result<()> {
    require_authority(config, caller)?;
    if let Some(authority) = update.authority {
        require!(!authority.is_zero(), UniversalNftError::InvalidAddress);
        config.authority = authority;
    }
    if let Some(gas_limit) = update.gas_limit {
        config.gas_limit = gas_limit;
    }
    if let Some(hop_fee) = update.hop_fee {
        config.hop_fee = hop_fee;
    }
    Ok(())
}
