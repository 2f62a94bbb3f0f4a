use anchor_lang::prelude::*;

use crate::context::TransferCrossChain;
use crate::operations::{CustodyAccounts, GatewayCpi, RetainedRefund, SplCustody};
use crate::protocol::engine::{Host, Ledgers, TransferEngine, TransferRequest};
use crate::protocol::gas::DirectGasRouter;
use crate::protocol::identity::TokenId;
use crate::protocol::origin::OriginBook;
use crate::protocol::peers::PeerBook;
use crate::protocol::replay::ReplayBook;
use crate::util::address::{ChainAddress, Channel};
use crate::util::constants::{DEFAULT_NFT_NAME, DEFAULT_NFT_SYMBOL};

/// Burn the sender's token and deposit the transfer with the gateway.
/// `payment` is the most the sender will spend on the hop, in lamports.
pub fn handler(
    ctx: Context<TransferCrossChain>,
    token_id: TokenId,
    destination: Channel,
    receiver: ChainAddress,
    payment: u64,
) -> Result<()> {
    let slot = Clock::get()?.slot;
    let sender = ctx.accounts.sender.key();

    let mut origins = OriginBook::from_records([(*ctx.accounts.nft_origin).clone()]);
    let peers = PeerBook::from_entries([(*ctx.accounts.connected).clone()]);
    let mut replay = ReplayBook::default();
    let mut custody = SplCustody::new(
        CustodyAccounts {
            config: ctx.accounts.config.to_account_info(),
            mint: ctx.accounts.nft_mint.to_account_info(),
            token_account: ctx.accounts.sender_token_account.to_account_info(),
            holder: ctx.accounts.sender.to_account_info(),
            metadata: ctx.accounts.metadata.to_account_info(),
            payer: ctx.accounts.sender.to_account_info(),
            token_program: ctx.accounts.token_program.to_account_info(),
            associated_token_program: ctx.accounts.associated_token_program.to_account_info(),
            metadata_program: ctx.accounts.metadata_program.to_account_info(),
            system_program: ctx.accounts.system_program.to_account_info(),
            rent: ctx.accounts.rent.to_account_info(),
        },
        token_id,
        ctx.accounts.config.bump,
        DEFAULT_NFT_NAME.to_string(),
        DEFAULT_NFT_SYMBOL.to_string(),
    )?;
    let mut router = DirectGasRouter;
    let mut gateway = GatewayCpi {
        gateway_program: ctx.accounts.gateway_program.to_account_info(),
        gateway_pda: ctx.accounts.gateway_pda.to_account_info(),
        signer: ctx.accounts.sender.to_account_info(),
        system_program: ctx.accounts.system_program.to_account_info(),
        hop_fee: ctx.accounts.config.hop_fee,
        slot,
    };
    let mut treasury = RetainedRefund::new(sender);

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
    let receipt = engine.initiate_transfer(&TransferRequest {
        token_id,
        sender: ChainAddress::from(sender),
        receiver,
        destination,
        payment,
    })?;

    msg!(
        "Transfer of {} is {:?} (nonce {}, fee {}, refund {})",
        token_id,
        receipt.state,
        receipt.nonce,
        receipt.fee_paid,
        receipt.refund
    );
    Ok(())
}
