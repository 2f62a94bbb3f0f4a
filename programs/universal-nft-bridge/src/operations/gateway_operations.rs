use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::invoke;

use crate::error::UniversalNftError;
use crate::protocol::gas::{Asset, FeeQuote};
use crate::protocol::gateway::{Gateway, RelayCall, RelayReceipt};
use crate::util::address::{ChainAddress, Channel};
use crate::util::gateway_helpers::{encode_deposit_and_call_ix_data, GatewayRevertOptions};

/// Outbound delivery through the ZetaChain gateway's `deposit_and_call`.
/// Fees are charged in lamports at the configured per-hop rate.
pub struct GatewayCpi<'info> {
    pub gateway_program: AccountInfo<'info>,
    pub gateway_pda: AccountInfo<'info>,
    /// Depositor; pays fee and carried value
    pub signer: AccountInfo<'info>,
    pub system_program: AccountInfo<'info>,
    pub hop_fee: u64,
    pub slot: u64,
}

impl Gateway for GatewayCpi<'_> {
    fn quote(&self, _channel: &Channel, _gas_limit: u64) -> Result<FeeQuote> {
        Ok(FeeQuote {
            asset: Asset::Native,
            amount: self.hop_fee,
        })
    }

    fn deliver(&mut self, call: RelayCall) -> Result<RelayReceipt> {
        let receiver = match call.receiver {
            ChainAddress::Evm(raw) => raw,
            ChainAddress::Solana(_) => {
                msg!("Gateway deposits address hub contracts only, got {}", call.receiver);
                return err!(UniversalNftError::InvalidRecipientAddress);
            }
        };
        require!(
            *call.fee.asset() == Asset::Native && call.value.asset == Asset::Native,
            UniversalNftError::UnsupportedAsset
        );
        let amount = call
            .fee
            .amount()
            .checked_add(call.value.amount)
            .ok_or(UniversalNftError::ArithmeticOverflow)?;

        let revert_options = GatewayRevertOptions {
            revert_address: call.revert_options.revert_address.to_pubkey()?,
            abort_address: call.revert_options.abort_address.to_pubkey()?,
            call_on_revert: call.revert_options.call_on_revert,
            revert_message: call.revert_options.revert_message,
            on_revert_gas_limit: call.revert_options.on_revert_gas_limit,
        };
        let data =
            encode_deposit_and_call_ix_data(amount, receiver, &call.message, Some(&revert_options))?;

        let ix = Instruction {
            program_id: *self.gateway_program.key,
            accounts: vec![
                AccountMeta::new(*self.signer.key, true),
                AccountMeta::new(*self.gateway_pda.key, false),
                AccountMeta::new_readonly(*self.system_program.key, false),
            ],
            data,
        };
        invoke(
            &ix,
            &[
                self.signer.clone(),
                self.gateway_pda.clone(),
                self.system_program.clone(),
                self.gateway_program.clone(),
            ],
        )
        .map_err(|e| {
            msg!("Gateway deposit_and_call failed: {}", e);
            error!(UniversalNftError::CrossChainTransferFailed)
        })?;

        msg!(
            "Deposited {} lamports to gateway for {}",
            amount,
            call.receiver
        );
        Ok(RelayReceipt {
            reference: self.slot,
        })
    }
}

/// Gateway binding for instructions that only ever terminate a transfer.
pub struct ForwardingDisabled;

impl Gateway for ForwardingDisabled {
    fn quote(&self, channel: &Channel, _gas_limit: u64) -> Result<FeeQuote> {
        msg!("Cannot forward to {} from this deployment", channel);
        err!(UniversalNftError::ForwardingUnsupported)
    }

    fn deliver(&mut self, _call: RelayCall) -> Result<RelayReceipt> {
        err!(UniversalNftError::ForwardingUnsupported)
    }
}
