use anchor_lang::prelude::*;

use crate::util::address::{ChainAddress, Channel};

/// Peer bound to a channel: the only principal whose messages are accepted on
/// it, and the only destination outbound transfers on it are addressed to.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct Connected {
    pub channel: Channel,
    pub remote_chain: u64,
    pub remote_principal: ChainAddress,
    /// Set when the peer is a hub that relays onward over its own channel
    pub forward_channel: Option<Channel>,
    pub bump: u8,
}

impl Connected {
    pub const LEN: usize = Channel::LEN // channel
        + 8                             // remote_chain
        + ChainAddress::SPACE           // remote_principal
        + 1 + Channel::LEN              // forward_channel
        + 1;                            // bump
    pub const SPACE: usize = 8 + Self::LEN;
}
