use anchor_lang::prelude::*;
use anchor_spl::{associated_token::AssociatedToken, token::Token};

use crate::error::UniversalNftError;
use crate::protocol::identity::TokenId;
use crate::state::{Connected, NftOrigin, UniversalNftConfig};
use crate::util::address::Channel;
use crate::util::constants::*;

#[derive(Accounts)]
#[instruction(token_id: TokenId, destination: Channel)]
pub struct TransferCrossChain<'info> {
    #[account(
        mut,
        seeds = [UNIVERSAL_NFT_CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, UniversalNftConfig>,

    #[account(
        seeds = [CONNECTED_SEED, destination.0.as_ref()],
        bump = connected.bump
    )]
    pub connected: Account<'info, Connected>,

    #[account(
        seeds = [NFT_ORIGIN_SEED, token_id.0.as_ref()],
        bump = nft_origin.bump
    )]
    pub nft_origin: Account<'info, NftOrigin>,

    /// CHECK: mint PDA of the token; must hold the live token
    #[account(
        mut,
        seeds = [NFT_MINT_SEED, token_id.0.as_ref()],
        bump
    )]
    pub nft_mint: UncheckedAccount<'info>,

    /// CHECK: sender's associated token account; verified by the handler
    #[account(mut)]
    pub sender_token_account: UncheckedAccount<'info>,

    /// CHECK: Metaplex metadata PDA of the mint; verified by the handler
    #[account(mut)]
    pub metadata: UncheckedAccount<'info>,

    #[account(mut)]
    pub sender: Signer<'info>,

    /// CHECK: ZetaChain gateway program recorded in config
    #[account(address = config.gateway_program @ UniversalNftError::InvalidGatewayProgram)]
    pub gateway_program: UncheckedAccount<'info>,

    /// CHECK: gateway PDA derived under the gateway program
    #[account(
        mut,
        seeds = [GATEWAY_PDA_SEED],
        bump,
        seeds::program = gateway_program.key()
    )]
    pub gateway_pda: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,

    /// CHECK: Metaplex Token Metadata program
    #[account(address = mpl_token_metadata::ID)]
    pub metadata_program: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}
