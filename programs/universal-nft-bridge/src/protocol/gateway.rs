//! Boundary to the relay network.

use anchor_lang::prelude::*;

use crate::protocol::gas::{AssetAmount, FeeGrant, FeeQuote};
use crate::util::address::{ChainAddress, Channel};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallOptions {
    pub gas_limit: u64,
    pub is_arbitrary_call: bool,
}

/// Where the relay reports a failed delivery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevertOptions {
    pub revert_address: ChainAddress,
    pub call_on_revert: bool,
    pub abort_address: ChainAddress,
    /// Encoded `RecoveryContext`, handed back verbatim on revert or abort
    pub revert_message: Vec<u8>,
    pub on_revert_gas_limit: u64,
}

/// One hop handed to the relay.
#[derive(Debug)]
pub struct RelayCall {
    pub receiver: ChainAddress,
    /// Channel whose fee asset pays for the hop
    pub channel: Channel,
    pub fee: FeeGrant,
    /// Value transferred with the message
    pub value: AssetAmount,
    pub message: Vec<u8>,
    pub call_options: CallOptions,
    pub revert_options: RevertOptions,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RelayReceipt {
    /// Relay-side reference for tracing the hop
    pub reference: u64,
}

/// The relay as seen by the engine. Delivery is at-least-once and unordered.
pub trait Gateway {
    fn quote(&self, channel: &Channel, gas_limit: u64) -> Result<FeeQuote>;

    fn deliver(&mut self, call: RelayCall) -> Result<RelayReceipt>;
}

/// Callbacks the relay makes into a deployment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GatewayEvent {
    Call {
        caller: ChainAddress,
        channel: Channel,
        sender: ChainAddress,
        payload: Vec<u8>,
        value: AssetAmount,
    },
    Revert {
        caller: ChainAddress,
        context: Vec<u8>,
        returned: AssetAmount,
    },
    Abort {
        caller: ChainAddress,
        context: Vec<u8>,
        returned: AssetAmount,
    },
}
