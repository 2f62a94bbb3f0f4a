use anchor_lang::prelude::*;

use crate::context::ReserveTokenId;
use crate::error::UniversalNftError;
use crate::event::TokenIdReserved;
use crate::protocol::identity::IdentityAllocator;
use crate::state::MintTicket;
use crate::util::address::ChainAddress;

pub fn handler(ctx: Context<ReserveTokenId>) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let config = &mut ctx.accounts.config;
    require!(!config.paused, UniversalNftError::ProgramPaused);
    require!(
        config.is_authority(&ChainAddress::from(authority)),
        UniversalNftError::Unauthorized
    );

    let slot = Clock::get()?.slot;
    let issuer = config.issuer;
    let token_id = IdentityAllocator::new(&mut config.next_token_id).next_candidate(&issuer, slot)?;

    ctx.accounts.ticket.set_inner(MintTicket {
        authority,
        token_id,
        reserved_at_slot: slot,
        bump: ctx.bumps.ticket,
    });

    emit!(TokenIdReserved {
        token_id: token_id.to_bytes(),
        authority,
        slot,
    });
    msg!("Reserved token id {}", token_id);
    Ok(())
}
