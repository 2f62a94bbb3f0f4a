use anchor_lang::prelude::*;

pub mod context;
pub mod error;
pub mod event;
pub mod instructions;
pub mod operations;
pub mod protocol;
pub mod state;
pub mod util;

pub use context::*;
pub use error::*;
pub use event::*;
pub use protocol::admin::{ConfigUpdate, PeerBinding};
pub use protocol::identity::TokenId;
pub use state::*;
pub use util::address::{ChainAddress, Channel};

declare_id!("53rExAi2c1TftXvS6ZqDtxN2aFVc1RZqjodcidv6am8o");

#[program]
pub mod universal_nft_bridge {
    use super::*;

    /// Create the config PDA. `gas_limit` of zero selects the default.
    pub fn initialize(
        ctx: Context<Initialize>,
        chain_id: u64,
        gateway_program: Pubkey,
        gas_limit: u64,
        hop_fee: u64,
    ) -> Result<()> {
        instructions::initialize::handler(ctx, chain_id, gateway_program, gas_limit, hop_fee)
    }

    pub fn update_config(ctx: Context<UpdateConfig>, update: ConfigUpdate) -> Result<()> {
        instructions::update_config::update_config(ctx, update)
    }

    pub fn pause(ctx: Context<UpdateConfig>) -> Result<()> {
        instructions::update_config::set_paused(ctx, true)
    }

    pub fn unpause(ctx: Context<UpdateConfig>) -> Result<()> {
        instructions::update_config::set_paused(ctx, false)
    }

    pub fn set_connected(ctx: Context<SetConnectedContext>, binding: PeerBinding) -> Result<()> {
        instructions::set_connected::handler(ctx, binding)
    }

    pub fn reserve_token_id(ctx: Context<ReserveTokenId>) -> Result<()> {
        instructions::reserve_token_id::handler(ctx)
    }

    pub fn mint_nft(
        ctx: Context<MintNft>,
        name: String,
        symbol: String,
        uri: String,
    ) -> Result<()> {
        instructions::mint_nft::handler(ctx, name, symbol, uri)
    }

    pub fn transfer_cross_chain(
        ctx: Context<TransferCrossChain>,
        token_id: TokenId,
        destination: Channel,
        receiver: ChainAddress,
        payment: u64,
    ) -> Result<()> {
        instructions::transfer_cross_chain::handler(ctx, token_id, destination, receiver, payment)
    }

    /// Gateway entry for inbound transfers.
    pub fn on_call(
        ctx: Context<OnCall>,
        amount: u64,
        sender: [u8; 20],
        data: Vec<u8>,
    ) -> Result<()> {
        instructions::gateway_callbacks::on_call(ctx, amount, sender, data)
    }

    pub fn on_revert(
        ctx: Context<OnRecovery>,
        amount: u64,
        _sender: Pubkey,
        data: Vec<u8>,
    ) -> Result<()> {
        instructions::gateway_callbacks::on_revert(ctx, amount, data)
    }

    pub fn on_abort(
        ctx: Context<OnRecovery>,
        amount: u64,
        _sender: Pubkey,
        data: Vec<u8>,
    ) -> Result<()> {
        instructions::gateway_callbacks::on_abort(ctx, amount, data)
    }
}
