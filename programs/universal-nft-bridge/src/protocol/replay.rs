use anchor_lang::prelude::*;
use std::collections::BTreeSet;

use crate::util::address::ChainAddress;

/// Identity of a relayed message: the authenticated sender and its nonce.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageKey {
    pub sender: ChainAddress,
    pub nonce: u64,
}

/// Makes at-least-once delivery effectively-once.
pub trait ReplayLedger {
    fn is_processed(&self, key: &MessageKey) -> bool;

    fn mark_processed(&mut self, key: MessageKey) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct ReplayBook {
    processed: BTreeSet<MessageKey>,
}

impl ReplayLedger for ReplayBook {
    fn is_processed(&self, key: &MessageKey) -> bool {
        self.processed.contains(key)
    }

    fn mark_processed(&mut self, key: MessageKey) -> Result<()> {
        self.processed.insert(key);
        Ok(())
    }
}
