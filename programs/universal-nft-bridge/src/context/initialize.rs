use anchor_lang::prelude::*;

use crate::state::UniversalNftConfig;
use crate::util::constants::UNIVERSAL_NFT_CONFIG_SEED;

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = authority,
        space = UniversalNftConfig::SPACE,
        seeds = [UNIVERSAL_NFT_CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, UniversalNftConfig>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}
