use anchor_lang::prelude::*;
use std::fmt;

use crate::error::UniversalNftError;

/// Address family of a chain.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AddressKind {
    Evm,
    Solana,
}

impl AddressKind {
    pub const fn width(self) -> usize {
        match self {
            AddressKind::Evm => 20,
            AddressKind::Solana => 32,
        }
    }
}

/// An account address on any connected chain.
///
/// Borsh layout is a one-byte tag followed by the fixed-width address bytes,
/// so two addresses compare equal only when both the family and every byte
/// match.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChainAddress {
    Evm([u8; 20]),
    Solana([u8; 32]),
}

impl ChainAddress {
    /// Serialized size of the widest variant (tag + 32 bytes)
    pub const SPACE: usize = 1 + 32;

    pub fn from_bytes(kind: AddressKind, bytes: &[u8]) -> Result<Self> {
        require!(bytes.len() == kind.width(), UniversalNftError::InvalidAddress);
        let address = match kind {
            AddressKind::Evm => {
                let mut raw = [0u8; 20];
                raw.copy_from_slice(bytes);
                ChainAddress::Evm(raw)
            }
            AddressKind::Solana => {
                let mut raw = [0u8; 32];
                raw.copy_from_slice(bytes);
                ChainAddress::Solana(raw)
            }
        };
        Ok(address)
    }

    pub fn kind(&self) -> AddressKind {
        match self {
            ChainAddress::Evm(_) => AddressKind::Evm,
            ChainAddress::Solana(_) => AddressKind::Solana,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ChainAddress::Evm(raw) => raw,
            ChainAddress::Solana(raw) => raw,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.as_bytes().iter().all(|b| *b == 0)
    }

    pub fn to_pubkey(&self) -> Result<Pubkey> {
        match self {
            ChainAddress::Solana(raw) => Ok(Pubkey::new_from_array(*raw)),
            ChainAddress::Evm(_) => err!(UniversalNftError::InvalidAddress),
        }
    }
}

impl From<Pubkey> for ChainAddress {
    fn from(key: Pubkey) -> Self {
        ChainAddress::Solana(key.to_bytes())
    }
}

impl fmt::Display for ChainAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainAddress::Evm(raw) => write!(f, "0x{}", hex::encode(raw)),
            ChainAddress::Solana(raw) => write!(f, "{}", Pubkey::new_from_array(*raw)),
        }
    }
}

impl fmt::Debug for ChainAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.kind(), self)
    }
}

/// Logical channel to a connected chain, identified by the hub-side fee asset
/// of that chain.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Channel(pub [u8; 20]);

impl Channel {
    pub const LEN: usize = 20;

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Channel({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_enforces_family_width() {
        assert!(ChainAddress::from_bytes(AddressKind::Evm, &[1u8; 20]).is_ok());
        assert!(ChainAddress::from_bytes(AddressKind::Solana, &[1u8; 32]).is_ok());

        let err = ChainAddress::from_bytes(AddressKind::Evm, &[1u8; 32]).unwrap_err();
        assert_eq!(err, UniversalNftError::InvalidAddress.into());
        let err = ChainAddress::from_bytes(AddressKind::Solana, &[1u8; 20]).unwrap_err();
        assert_eq!(err, UniversalNftError::InvalidAddress.into());
    }

    #[test]
    fn families_never_compare_equal() {
        let mut wide = [0u8; 32];
        wide[..20].copy_from_slice(&[7u8; 20]);
        assert_ne!(ChainAddress::Evm([7u8; 20]), ChainAddress::Solana(wide));
    }

    #[test]
    fn zero_detection_and_pubkey_conversion() {
        assert!(ChainAddress::Evm([0u8; 20]).is_zero());
        let mut raw = [0u8; 20];
        raw[19] = 1;
        assert!(!ChainAddress::Evm(raw).is_zero());

        let key = Pubkey::new_from_array([9u8; 32]);
        let address = ChainAddress::from(key);
        assert_eq!(address.to_pubkey().unwrap(), key);
        assert!(ChainAddress::Evm([9u8; 20]).to_pubkey().is_err());
    }

    #[test]
    fn borsh_layout_is_tag_then_bytes() {
        let evm = ChainAddress::Evm([0xAB; 20]).try_to_vec().unwrap();
        assert_eq!(evm.len(), 21);
        assert_eq!(evm[0], 0);
        let sol = ChainAddress::Solana([0xCD; 32]).try_to_vec().unwrap();
        assert_eq!(sol.len(), ChainAddress::SPACE);
        assert_eq!(sol[0], 1);
    }
}
