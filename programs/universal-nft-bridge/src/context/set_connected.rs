use anchor_lang::prelude::*;

use crate::protocol::admin::PeerBinding;
use crate::state::{Connected, UniversalNftConfig};
use crate::util::constants::{CONNECTED_SEED, UNIVERSAL_NFT_CONFIG_SEED};

#[derive(Accounts)]
#[instruction(binding: PeerBinding)]
pub struct SetConnectedContext<'info> {
    #[account(
        seeds = [UNIVERSAL_NFT_CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, UniversalNftConfig>,

    #[account(
        init_if_needed,
        payer = authority,
        space = Connected::SPACE,
        seeds = [CONNECTED_SEED, binding.channel.0.as_ref()],
        bump
    )]
    pub connected: Account<'info, Connected>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}
