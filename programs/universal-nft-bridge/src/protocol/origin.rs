use anchor_lang::prelude::*;
use std::collections::BTreeMap;

use crate::error::UniversalNftError;
use crate::protocol::identity::TokenId;
use crate::state::NftOrigin;

/// Token id → provenance. Records are write-once.
pub trait OriginLedger {
    fn get(&self, token_id: &TokenId) -> Option<NftOrigin>;

    /// Store a record for an id that has none.
    fn insert(&mut self, record: NftOrigin) -> Result<()>;

    fn contains(&self, token_id: &TokenId) -> bool {
        self.get(token_id).is_some()
    }

    fn lookup(&self, token_id: &TokenId) -> Result<NftOrigin> {
        self.get(token_id)
            .ok_or_else(|| error!(UniversalNftError::NotFound))
    }

    fn is_native(&self, token_id: &TokenId) -> Result<bool> {
        Ok(self.lookup(token_id)?.is_native)
    }

    /// Idempotent write used on arrival and recovery. Returns whether a new
    /// record was written; an existing record is never touched.
    fn record_if_absent(&mut self, record: NftOrigin) -> Result<bool> {
        if self.contains(&record.token_id) {
            return Ok(false);
        }
        self.insert(record)?;
        Ok(true)
    }

    /// Write used for fresh mints, where an existing record means the id was
    /// already handed out.
    fn record_new(&mut self, record: NftOrigin) -> Result<()> {
        require!(
            !self.contains(&record.token_id),
            UniversalNftError::IdentityCollision
        );
        self.insert(record)
    }
}

/// In-memory ledger.
#[derive(Debug, Default, Clone)]
pub struct OriginBook {
    records: BTreeMap<TokenId, NftOrigin>,
}

impl OriginBook {
    pub fn from_records(records: impl IntoIterator<Item = NftOrigin>) -> Self {
        Self {
            records: records.into_iter().map(|r| (r.token_id, r)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl OriginLedger for OriginBook {
    fn get(&self, token_id: &TokenId) -> Option<NftOrigin> {
        self.records.get(token_id).cloned()
    }

    fn insert(&mut self, record: NftOrigin) -> Result<()> {
        require!(
            !self.records.contains_key(&record.token_id),
            UniversalNftError::IdentityCollision
        );
        self.records.insert(record.token_id, record);
        Ok(())
    }
}
