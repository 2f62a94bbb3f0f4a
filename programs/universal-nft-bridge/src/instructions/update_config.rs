use anchor_lang::prelude::*;

use crate::context::UpdateConfig;
use crate::event::ConfigUpdated;
use crate::protocol::admin::{self, ConfigUpdate};
use crate::util::address::ChainAddress;

pub fn update_config(ctx: Context<UpdateConfig>, update: ConfigUpdate) -> Result<()> {
    let caller = ChainAddress::from(ctx.accounts.authority.key());
    admin::update_config(&mut ctx.accounts.config, &caller, update)?;
    announce(&ctx.accounts.config);
    Ok(())
}

pub fn set_paused(ctx: Context<UpdateConfig>, paused: bool) -> Result<()> {
    let caller = ChainAddress::from(ctx.accounts.authority.key());
    admin::set_paused(&mut ctx.accounts.config, &caller, paused)?;
    announce(&ctx.accounts.config);
    Ok(())
}

fn announce(config: &crate::state::UniversalNftConfig) {
    emit!(ConfigUpdated {
        authority: config.authority,
        gas_limit: config.gas_limit,
        hop_fee: config.hop_fee,
        paused: config.paused,
    });
}
