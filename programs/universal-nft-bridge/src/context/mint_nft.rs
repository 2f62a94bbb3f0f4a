use anchor_lang::prelude::*;
use anchor_spl::{associated_token::AssociatedToken, token::Token};

use crate::error::UniversalNftError;
use crate::state::{MintTicket, UniversalNftConfig};
use crate::util::constants::{MINT_TICKET_SEED, UNIVERSAL_NFT_CONFIG_SEED};

#[derive(Accounts)]
pub struct MintNft<'info> {
    #[account(
        mut,
        seeds = [UNIVERSAL_NFT_CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, UniversalNftConfig>,

    #[account(
        mut,
        close = authority,
        seeds = [MINT_TICKET_SEED, authority.key().as_ref()],
        bump = ticket.bump,
        has_one = authority @ UniversalNftError::InvalidTicket
    )]
    pub ticket: Account<'info, MintTicket>,

    /// CHECK: NftOrigin PDA of the ticket's token id; verified and created by the handler
    #[account(mut)]
    pub nft_origin: UncheckedAccount<'info>,

    /// CHECK: mint PDA of the ticket's token id; verified and created by the handler
    #[account(mut)]
    pub nft_mint: UncheckedAccount<'info>,

    /// CHECK: wallet receiving the token
    pub recipient: UncheckedAccount<'info>,

    /// CHECK: recipient's associated token account; verified and created by the handler
    #[account(mut)]
    pub recipient_token_account: UncheckedAccount<'info>,

    /// CHECK: Metaplex metadata PDA of the mint; verified by the handler
    #[account(mut)]
    pub metadata: UncheckedAccount<'info>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,

    /// CHECK: Metaplex Token Metadata program
    #[account(address = mpl_token_metadata::ID)]
    pub metadata_program: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}
