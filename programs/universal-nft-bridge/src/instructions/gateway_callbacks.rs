use anchor_lang::prelude::*;

use crate::context::{OnCall, OnRecovery};
use crate::operations::{
    CustodyAccounts, ForwardingDisabled, OriginAccount, ProcessedMarker, SplCustody, VaultTreasury,
};
use crate::protocol::engine::{Host, InboundCall, Ledgers, RecoveryKind, TransferEngine};
use crate::protocol::gas::{AssetAmount, DirectGasRouter};
use crate::protocol::message::{RecoveryContext, TransferIntent};
use crate::protocol::peers::PeerBook;
use crate::protocol::replay::MessageKey;
use crate::util::address::ChainAddress;
use crate::util::constants::{DEFAULT_NFT_NAME, DEFAULT_NFT_SYMBOL};

/// Gateway delivery of a transfer from `sender` on the hub.
pub fn on_call(ctx: Context<OnCall>, amount: u64, sender: [u8; 20], data: Vec<u8>) -> Result<()> {
    let slot = Clock::get()?.slot;
    let sender = ChainAddress::Evm(sender);
    // Decoded here only to locate the token's accounts; the engine
    // authenticates before acting on it.
    let intent = TransferIntent::decode(&data)?;
    let caller = ChainAddress::from(ctx.accounts.gateway_pda.key());
    let channel = ctx.accounts.connected.channel;
    let peers = PeerBook::from_entries([(*ctx.accounts.connected).clone()]);

    let accounts = &ctx.accounts;
    let mut origins = OriginAccount::new(
        accounts.nft_origin.to_account_info(),
        accounts.payer.to_account_info(),
        accounts.system_program.to_account_info(),
        intent.token_id,
    )?;
    let mut replay = ProcessedMarker::new(
        accounts.processed_message.to_account_info(),
        accounts.payer.to_account_info(),
        accounts.system_program.to_account_info(),
        MessageKey {
            sender,
            nonce: intent.nonce,
        },
        intent.token_id,
        slot,
    )?;
    let mut custody = SplCustody::new(
        CustodyAccounts {
            config: accounts.config.to_account_info(),
            mint: accounts.nft_mint.to_account_info(),
            token_account: accounts.recipient_token_account.to_account_info(),
            holder: accounts.recipient.to_account_info(),
            metadata: accounts.metadata.to_account_info(),
            payer: accounts.payer.to_account_info(),
            token_program: accounts.token_program.to_account_info(),
            associated_token_program: accounts.associated_token_program.to_account_info(),
            metadata_program: accounts.metadata_program.to_account_info(),
            system_program: accounts.system_program.to_account_info(),
            rent: accounts.rent.to_account_info(),
        },
        intent.token_id,
        accounts.config.bump,
        DEFAULT_NFT_NAME.to_string(),
        DEFAULT_NFT_SYMBOL.to_string(),
    )?;
    let mut treasury = VaultTreasury::new(
        accounts.config.to_account_info(),
        accounts.recipient.to_account_info(),
    );
    let mut router = DirectGasRouter;
    let mut gateway = ForwardingDisabled;

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
    let outcome = engine.on_message(InboundCall {
        caller,
        channel,
        sender,
        payload: data,
        value: AssetAmount::native(amount),
    })?;
    msg!("on_call: {:?}", outcome);
    Ok(())
}

pub fn on_revert(ctx: Context<OnRecovery>, amount: u64, data: Vec<u8>) -> Result<()> {
    restore(ctx, RecoveryKind::Revert, amount, data)
}

pub fn on_abort(ctx: Context<OnRecovery>, amount: u64, data: Vec<u8>) -> Result<()> {
    restore(ctx, RecoveryKind::Abort, amount, data)
}

fn restore(ctx: Context<OnRecovery>, kind: RecoveryKind, amount: u64, data: Vec<u8>) -> Result<()> {
    let slot = Clock::get()?.slot;
    let context = RecoveryContext::decode(&data)?;
    let caller = ChainAddress::from(ctx.accounts.gateway_pda.key());
    let issuer = ctx.accounts.config.issuer;

    let accounts = &ctx.accounts;
    let mut origins = OriginAccount::new(
        accounts.nft_origin.to_account_info(),
        accounts.payer.to_account_info(),
        accounts.system_program.to_account_info(),
        context.token_id,
    )?;
    let mut replay = ProcessedMarker::new(
        accounts.processed_message.to_account_info(),
        accounts.payer.to_account_info(),
        accounts.system_program.to_account_info(),
        MessageKey {
            sender: issuer,
            nonce: context.nonce,
        },
        context.token_id,
        slot,
    )?;
    let mut custody = SplCustody::new(
        CustodyAccounts {
            config: accounts.config.to_account_info(),
            mint: accounts.nft_mint.to_account_info(),
            token_account: accounts.sender_token_account.to_account_info(),
            holder: accounts.original_sender.to_account_info(),
            metadata: accounts.metadata.to_account_info(),
            payer: accounts.payer.to_account_info(),
            token_program: accounts.token_program.to_account_info(),
            associated_token_program: accounts.associated_token_program.to_account_info(),
            metadata_program: accounts.metadata_program.to_account_info(),
            system_program: accounts.system_program.to_account_info(),
            rent: accounts.rent.to_account_info(),
        },
        context.token_id,
        accounts.config.bump,
        DEFAULT_NFT_NAME.to_string(),
        DEFAULT_NFT_SYMBOL.to_string(),
    )?;
    let mut treasury = VaultTreasury::new(
        accounts.config.to_account_info(),
        accounts.original_sender.to_account_info(),
    );
    let peers = PeerBook::default();
    let mut router = DirectGasRouter;
    let mut gateway = ForwardingDisabled;

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
    let returned = AssetAmount::native(amount);
    let outcome = match kind {
        RecoveryKind::Revert => engine.on_revert(&caller, &data, returned)?,
        RecoveryKind::Abort => engine.on_abort(&caller, &data, returned)?,
    };
    msg!("{:?}: {:?}", kind, outcome);
    Ok(())
}
