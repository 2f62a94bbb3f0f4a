use anchor_lang::prelude::*;

use crate::state::UniversalNftConfig;
use crate::util::constants::UNIVERSAL_NFT_CONFIG_SEED;

/// Shared by `update_config`, `pause` and `unpause`; authority is checked
/// against the stored config by the handler.
#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    #[account(
        mut,
        seeds = [UNIVERSAL_NFT_CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, UniversalNftConfig>,

    pub authority: Signer<'info>,
}
