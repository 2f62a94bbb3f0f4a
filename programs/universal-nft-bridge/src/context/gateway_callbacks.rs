use anchor_lang::prelude::*;
use anchor_spl::{associated_token::AssociatedToken, token::Token};

use crate::state::{Connected, UniversalNftConfig};
use crate::util::constants::UNIVERSAL_NFT_CONFIG_SEED;

/// Accounts for `on_call`. PDAs that depend on the payload (origin, replay
/// marker, mint, metadata) are verified by the handler after decoding.
#[derive(Accounts)]
pub struct OnCall<'info> {
    /// Receives the gateway deposit; pays carried value out
    #[account(
        mut,
        seeds = [UNIVERSAL_NFT_CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, UniversalNftConfig>,

    /// Gateway PDA; must match the configured gateway principal
    pub gateway_pda: Signer<'info>,

    /// Channel the message arrived on
    pub connected: Account<'info, Connected>,

    /// CHECK: NftOrigin PDA of the payload's token id
    #[account(mut)]
    pub nft_origin: UncheckedAccount<'info>,

    /// CHECK: ProcessedMessage PDA of (sender, nonce)
    #[account(mut)]
    pub processed_message: UncheckedAccount<'info>,

    /// CHECK: mint PDA of the payload's token id
    #[account(mut)]
    pub nft_mint: UncheckedAccount<'info>,

    /// CHECK: receiver named in the payload; verified by custody
    #[account(mut)]
    pub recipient: UncheckedAccount<'info>,

    /// CHECK: receiver's associated token account
    #[account(mut)]
    pub recipient_token_account: UncheckedAccount<'info>,

    /// CHECK: Metaplex metadata PDA of the mint
    #[account(mut)]
    pub metadata: UncheckedAccount<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,

    /// CHECK: Metaplex Token Metadata program
    #[account(address = mpl_token_metadata::ID)]
    pub metadata_program: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

/// Accounts for `on_revert` and `on_abort`.
#[derive(Accounts)]
pub struct OnRecovery<'info> {
    #[account(
        mut,
        seeds = [UNIVERSAL_NFT_CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, UniversalNftConfig>,

    /// Gateway PDA; must match the configured gateway principal
    pub gateway_pda: Signer<'info>,

    /// CHECK: NftOrigin PDA of the context's token id
    #[account(mut)]
    pub nft_origin: UncheckedAccount<'info>,

    /// CHECK: ProcessedMessage PDA of (issuer, nonce)
    #[account(mut)]
    pub processed_message: UncheckedAccount<'info>,

    /// CHECK: mint PDA of the context's token id
    #[account(mut)]
    pub nft_mint: UncheckedAccount<'info>,

    /// CHECK: original sender named in the context; verified by custody
    #[account(mut)]
    pub original_sender: UncheckedAccount<'info>,

    /// CHECK: original sender's associated token account
    #[account(mut)]
    pub sender_token_account: UncheckedAccount<'info>,

    /// CHECK: Metaplex metadata PDA of the mint
    #[account(mut)]
    pub metadata: UncheckedAccount<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,

    /// CHECK: Metaplex Token Metadata program
    #[account(address = mpl_token_metadata::ID)]
    pub metadata_program: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}
