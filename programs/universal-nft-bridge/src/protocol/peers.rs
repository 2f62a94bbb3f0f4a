use anchor_lang::prelude::*;
use std::collections::BTreeMap;

use crate::error::UniversalNftError;
use crate::state::Connected;
use crate::util::address::{ChainAddress, Channel};

/// Channel → the remote principal bound to it.
pub trait PeerRegistry {
    fn peer(&self, channel: &Channel) -> Option<Connected>;

    /// Bind or rebind a channel. Authority checks happen in `admin::set_peer`.
    fn store(&mut self, entry: Connected) -> Result<()>;

    fn resolve(&self, channel: &Channel) -> Result<Connected> {
        self.peer(channel).ok_or_else(|| {
            msg!("Channel {} is not configured", channel);
            error!(UniversalNftError::InvalidChannel)
        })
    }

    /// True only when `claimed_sender` is byte-for-byte the principal bound to
    /// `channel`.
    fn authenticate(&self, channel: &Channel, claimed_sender: &ChainAddress) -> bool {
        matches!(self.peer(channel), Some(entry) if entry.remote_principal == *claimed_sender)
    }
}

#[derive(Debug, Default, Clone)]
pub struct PeerBook {
    entries: BTreeMap<Channel, Connected>,
}

impl PeerBook {
    pub fn from_entries(entries: impl IntoIterator<Item = Connected>) -> Self {
        Self {
            entries: entries.into_iter().map(|e| (e.channel, e)).collect(),
        }
    }
}

impl PeerRegistry for PeerBook {
    fn peer(&self, channel: &Channel) -> Option<Connected> {
        self.entries.get(channel).cloned()
    }

    fn store(&mut self, entry: Connected) -> Result<()> {
        self.entries.insert(entry.channel, entry);
        Ok(())
    }
}
