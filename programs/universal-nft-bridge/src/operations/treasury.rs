use anchor_lang::prelude::*;

use crate::error::UniversalNftError;
use crate::protocol::custody::Treasury;
use crate::protocol::gas::Asset;
use crate::util::address::ChainAddress;

/// Pays lamports out of a program-owned vault (the config PDA, which receives
/// gateway deposits) to a single beneficiary account.
pub struct VaultTreasury<'info> {
    vault: AccountInfo<'info>,
    beneficiary: AccountInfo<'info>,
}

impl<'info> VaultTreasury<'info> {
    pub fn new(vault: AccountInfo<'info>, beneficiary: AccountInfo<'info>) -> Self {
        Self { vault, beneficiary }
    }
}

impl Treasury for VaultTreasury<'_> {
    fn pay(&mut self, to: &ChainAddress, asset: &Asset, amount: u64) -> Result<()> {
        require!(*asset == Asset::Native, UniversalNftError::UnsupportedAsset);
        require!(
            *to == ChainAddress::from(*self.beneficiary.key),
            UniversalNftError::InvalidRecipientAddress
        );

        let floor = Rent::get()?.minimum_balance(self.vault.data_len());
        let available = self.vault.lamports().saturating_sub(floor);
        require!(available >= amount, UniversalNftError::InsufficientVaultBalance);

        **self.vault.try_borrow_mut_lamports()? -= amount;
        **self.beneficiary.try_borrow_mut_lamports()? += amount;
        msg!("Paid {} lamports to {}", amount, to);
        Ok(())
    }
}

/// Outbound refunds: lamports not deposited to the gateway never leave the
/// sender's wallet, so paying them back is a check and a log line.
pub struct RetainedRefund {
    wallet: Pubkey,
}

impl RetainedRefund {
    pub fn new(wallet: Pubkey) -> Self {
        Self { wallet }
    }
}

impl Treasury for RetainedRefund {
    fn pay(&mut self, to: &ChainAddress, asset: &Asset, amount: u64) -> Result<()> {
        require!(*asset == Asset::Native, UniversalNftError::UnsupportedAsset);
        require!(
            *to == ChainAddress::from(self.wallet),
            UniversalNftError::InvalidRecipientAddress
        );
        msg!("{} lamports retained by {}", amount, self.wallet);
        Ok(())
    }
}
