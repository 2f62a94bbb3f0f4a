use anchor_lang::prelude::*;

use crate::context::MintNft;
use crate::error::UniversalNftError;
use crate::operations::{CustodyAccounts, ForwardingDisabled, OriginAccount, RetainedRefund, SplCustody};
use crate::protocol::engine::{Host, Ledgers, TransferEngine};
use crate::protocol::gas::DirectGasRouter;
use crate::protocol::peers::PeerBook;
use crate::protocol::replay::ReplayBook;
use crate::util::address::ChainAddress;
use crate::util::validation::{validate_name, validate_symbol};

pub fn handler(ctx: Context<MintNft>, name: String, symbol: String, uri: String) -> Result<()> {
    validate_name(&name)?;
    validate_symbol(&symbol)?;
    let authority = ChainAddress::from(ctx.accounts.authority.key());
    require!(
        ctx.accounts.config.is_authority(&authority),
        UniversalNftError::Unauthorized
    );

    let slot = Clock::get()?.slot;
    let token_id = ctx.accounts.ticket.token_id;
    let owner = ChainAddress::from(ctx.accounts.recipient.key());

    let mut origins = OriginAccount::new(
        ctx.accounts.nft_origin.to_account_info(),
        ctx.accounts.authority.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        token_id,
    )?;
    let mut custody = SplCustody::new(
        CustodyAccounts {
            config: ctx.accounts.config.to_account_info(),
            mint: ctx.accounts.nft_mint.to_account_info(),
            token_account: ctx.accounts.recipient_token_account.to_account_info(),
            holder: ctx.accounts.recipient.to_account_info(),
            metadata: ctx.accounts.metadata.to_account_info(),
            payer: ctx.accounts.authority.to_account_info(),
            token_program: ctx.accounts.token_program.to_account_info(),
            associated_token_program: ctx.accounts.associated_token_program.to_account_info(),
            metadata_program: ctx.accounts.metadata_program.to_account_info(),
            system_program: ctx.accounts.system_program.to_account_info(),
            rent: ctx.accounts.rent.to_account_info(),
        },
        token_id,
        ctx.accounts.config.bump,
        name,
        symbol,
    )?;
    let peers = PeerBook::default();
    let mut replay = ReplayBook::default();
    let mut router = DirectGasRouter;
    let mut gateway = ForwardingDisabled;
    let mut treasury = RetainedRefund::new(ctx.accounts.authority.key());

    let mut engine = TransferEngine::new(
        Ledgers {
            config: &mut ctx.accounts.config,
            origins: &mut origins,
            peers: &peers,
            replay: &mut replay,
        },
        Host {
            custody: &mut custody,
            router: &mut router,
            gateway: &mut gateway,
            treasury: &mut treasury,
        },
        slot,
    );
    engine.mint_reserved(token_id, &owner, &uri)
}
