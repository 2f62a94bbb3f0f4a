use anchor_lang::prelude::*;

use crate::state::{MintTicket, UniversalNftConfig};
use crate::util::constants::{MINT_TICKET_SEED, UNIVERSAL_NFT_CONFIG_SEED};

#[derive(Accounts)]
pub struct ReserveTokenId<'info> {
    #[account(
        mut,
        seeds = [UNIVERSAL_NFT_CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, UniversalNftConfig>,

    #[account(
        init,
        payer = authority,
        space = MintTicket::SPACE,
        seeds = [MINT_TICKET_SEED, authority.key().as_ref()],
        bump
    )]
    pub ticket: Account<'info, MintTicket>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}
