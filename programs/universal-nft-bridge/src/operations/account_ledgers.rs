use anchor_lang::prelude::*;

use crate::error::UniversalNftError;
use crate::protocol::identity::TokenId;
use crate::protocol::origin::OriginLedger;
use crate::protocol::replay::{MessageKey, ReplayLedger};
use crate::state::{NftOrigin, ProcessedMessage};
use crate::util::constants::{NFT_ORIGIN_SEED, PROCESSED_MESSAGE_SEED};
use crate::util::pda::create_pda_account;

/// Origin ledger backed by the single `NftOrigin` PDA of one token. The
/// account is created on first write.
pub struct OriginAccount<'info> {
    account: AccountInfo<'info>,
    payer: AccountInfo<'info>,
    system_program: AccountInfo<'info>,
    token_id: TokenId,
    bump: u8,
}

impl<'info> OriginAccount<'info> {
    pub fn new(
        account: AccountInfo<'info>,
        payer: AccountInfo<'info>,
        system_program: AccountInfo<'info>,
        token_id: TokenId,
    ) -> Result<Self> {
        let (expected, bump) = NftOrigin::find_pda(&token_id);
        require_keys_eq!(*account.key, expected, UniversalNftError::InvalidOriginAccount);
        Ok(Self {
            account,
            payer,
            system_program,
            token_id,
            bump,
        })
    }
}

impl OriginLedger for OriginAccount<'_> {
    fn get(&self, token_id: &TokenId) -> Option<NftOrigin> {
        if *token_id != self.token_id || self.account.data_is_empty() {
            return None;
        }
        let data = self.account.try_borrow_data().ok()?;
        NftOrigin::try_deserialize(&mut &data[..]).ok()
    }

    fn insert(&mut self, mut record: NftOrigin) -> Result<()> {
        require!(
            record.token_id == self.token_id,
            UniversalNftError::InvalidOriginAccount
        );
        require!(
            self.account.data_is_empty(),
            UniversalNftError::IdentityCollision
        );
        record.bump = self.bump;

        let bump = [self.bump];
        let seeds: [&[u8]; 3] = [NFT_ORIGIN_SEED, self.token_id.as_ref(), &bump];
        create_pda_account(
            &self.payer,
            &self.account,
            &self.system_program,
            &crate::ID,
            NftOrigin::SPACE,
            &seeds,
        )?;
        let mut data = self.account.try_borrow_mut_data()?;
        record.try_serialize(&mut &mut data[..])
    }
}

/// Replay ledger backed by the `ProcessedMessage` PDA of one message.
pub struct ProcessedMarker<'info> {
    account: AccountInfo<'info>,
    payer: AccountInfo<'info>,
    system_program: AccountInfo<'info>,
    key: MessageKey,
    token_id: TokenId,
    slot: u64,
    bump: u8,
}

impl<'info> ProcessedMarker<'info> {
    pub fn new(
        account: AccountInfo<'info>,
        payer: AccountInfo<'info>,
        system_program: AccountInfo<'info>,
        key: MessageKey,
        token_id: TokenId,
        slot: u64,
    ) -> Result<Self> {
        let (expected, bump) = ProcessedMessage::find_pda(&key);
        require_keys_eq!(
            *account.key,
            expected,
            UniversalNftError::InvalidProcessedMessageAccount
        );
        Ok(Self {
            account,
            payer,
            system_program,
            key,
            token_id,
            slot,
            bump,
        })
    }
}

impl ReplayLedger for ProcessedMarker<'_> {
    fn is_processed(&self, key: &MessageKey) -> bool {
        *key == self.key && !self.account.data_is_empty()
    }

    fn mark_processed(&mut self, key: MessageKey) -> Result<()> {
        require!(
            key == self.key,
            UniversalNftError::InvalidProcessedMessageAccount
        );
        if !self.account.data_is_empty() {
            return Ok(());
        }

        let nonce = self.key.nonce.to_le_bytes();
        let bump = [self.bump];
        let seeds: [&[u8]; 4] = [
            PROCESSED_MESSAGE_SEED,
            self.key.sender.as_bytes(),
            &nonce,
            &bump,
        ];
        create_pda_account(
            &self.payer,
            &self.account,
            &self.system_program,
            &crate::ID,
            ProcessedMessage::SPACE,
            &seeds,
        )?;
        let marker = ProcessedMessage {
            sender: self.key.sender,
            nonce: self.key.nonce,
            token_id: self.token_id,
            processed_at_slot: self.slot,
            bump: self.bump,
        };
        let mut data = self.account.try_borrow_mut_data()?;
        marker.try_serialize(&mut &mut data[..])
    }
}
