use anchor_lang::prelude::*;

use crate::error::UniversalNftError;
use crate::protocol::identity::TokenId;
use crate::state::Provenance;
use crate::util::address::{ChainAddress, Channel};
use crate::util::constants::{MAX_URI_LENGTH, MESSAGE_VERSION};

/// What the receiving deployment does with an authenticated message.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destination {
    /// Mint to the receiver here
    Local,
    /// Relay onward over the given channel without minting
    Forward(Channel),
}

/// Payload of a cross-chain transfer.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct TransferIntent {
    pub version: u8,
    pub nonce: u64,
    pub destination: Destination,
    pub receiver: ChainAddress,
    pub token_id: TokenId,
    pub uri: String,
    /// Value sent along to pay for onward hops
    pub carried_value: u64,
    pub original_sender: ChainAddress,
    pub origin: Provenance,
}

/// Everything needed to restore a token on the source chain after a failed
/// delivery. Sent as the gateway revert message.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct RecoveryContext {
    pub version: u8,
    pub nonce: u64,
    pub token_id: TokenId,
    pub uri: String,
    pub original_sender: ChainAddress,
    pub origin: Provenance,
}

impl TransferIntent {
    pub fn encode(&self) -> Result<Vec<u8>> {
        self.try_to_vec()
            .map_err(|_| error!(UniversalNftError::SerializationFailed))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let intent = decode_exact::<Self>(bytes)?;
        check_header(intent.version, &intent.uri)?;
        Ok(intent)
    }

    pub fn recovery_context(&self) -> RecoveryContext {
        RecoveryContext {
            version: MESSAGE_VERSION,
            nonce: self.nonce,
            token_id: self.token_id,
            uri: self.uri.clone(),
            original_sender: self.original_sender,
            origin: self.origin,
        }
    }
}

impl RecoveryContext {
    pub fn encode(&self) -> Result<Vec<u8>> {
        self.try_to_vec()
            .map_err(|_| error!(UniversalNftError::SerializationFailed))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let context = decode_exact::<Self>(bytes)?;
        check_header(context.version, &context.uri)?;
        Ok(context)
    }
}

/// Borsh decode that rejects trailing bytes.
fn decode_exact<T: AnchorDeserialize>(bytes: &[u8]) -> Result<T> {
    T::try_from_slice(bytes).map_err(|e| {
        msg!("Malformed cross-chain payload ({} bytes): {}", bytes.len(), e);
        error!(UniversalNftError::InvalidCrossChainMessage)
    })
}

fn check_header(version: u8, uri: &str) -> Result<()> {
    require!(
        version == MESSAGE_VERSION,
        UniversalNftError::UnsupportedMessageVersion
    );
    require!(uri.len() <= MAX_URI_LENGTH, UniversalNftError::UriTooLong);
    Ok(())
}
