use anchor_lang::prelude::*;

use crate::context::SetConnectedContext;
use crate::event::SetConnected;
use crate::protocol::admin::{self, PeerBinding};
use crate::protocol::peers::PeerBook;
use crate::util::address::ChainAddress;

pub fn handler(ctx: Context<SetConnectedContext>, binding: PeerBinding) -> Result<()> {
    let caller = ChainAddress::from(ctx.accounts.authority.key());
    let mut staged = PeerBook::default();
    let entry = admin::set_peer(
        &ctx.accounts.config,
        &mut staged,
        &caller,
        binding,
        ctx.bumps.connected,
    )?;

    emit!(SetConnected {
        channel: entry.channel.0,
        remote_chain: entry.remote_chain,
        remote_principal: entry.remote_principal,
        forward_channel: entry.forward_channel.map(|c| c.0),
    });

    ctx.accounts.connected.set_inner(entry);
    Ok(())
}
