use anchor_lang::prelude::*;
use anchor_lang::solana_program::keccak;
use std::fmt;

use crate::error::UniversalNftError;
use crate::protocol::origin::OriginLedger;
use crate::util::address::ChainAddress;
use crate::util::constants::TOKEN_ID_TRUNCATED_BYTES;

/// Globally unique token identifier. Big-endian when read as an integer.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId(pub [u8; 32]);

impl TokenId {
    pub const LEN: usize = 32;

    /// `keccak256(issuer || slot_le || counter_le)` with the high-order bytes
    /// cleared so the value fits the narrowest connected chain's id type.
    pub fn derive(issuer: &ChainAddress, slot: u64, counter: u64) -> Self {
        let hash = keccak::hashv(&[
            issuer.as_bytes(),
            &slot.to_le_bytes(),
            &counter.to_le_bytes(),
        ]);
        let mut bytes = hash.to_bytes();
        bytes[..TOKEN_ID_TRUNCATED_BYTES].fill(0);
        TokenId(bytes)
    }

    pub fn to_bytes(self) -> [u8; 32] {
        self.0
    }
}

impl AsRef<[u8]> for TokenId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenId({})", self)
    }
}

/// Derives token ids for chain-native mints from the deployment counter.
pub struct IdentityAllocator<'a> {
    counter: &'a mut u64,
}

impl<'a> IdentityAllocator<'a> {
    pub fn new(counter: &'a mut u64) -> Self {
        Self { counter }
    }

    /// Derive the next id and advance the counter. Does not consult the
    /// origin ledger; the caller must reject the id if it is already recorded.
    pub fn next_candidate(&mut self, issuer: &ChainAddress, slot: u64) -> Result<TokenId> {
        let counter = *self.counter;
        *self.counter = counter
            .checked_add(1)
            .ok_or(UniversalNftError::ArithmeticOverflow)?;
        Ok(TokenId::derive(issuer, slot, counter))
    }

    pub fn allocate<L: OriginLedger + ?Sized>(
        &mut self,
        issuer: &ChainAddress,
        slot: u64,
        origins: &L,
    ) -> Result<TokenId> {
        let token_id = self.next_candidate(issuer, slot)?;
        if origins.contains(&token_id) {
            msg!("Derived token id {} is already recorded", token_id);
            return err!(UniversalNftError::IdentityCollision);
        }
        Ok(token_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::origin::OriginBook;
    use crate::state::{NftOrigin, Provenance};
    use std::collections::HashSet;

    fn issuer() -> ChainAddress {
        ChainAddress::Solana([5u8; 32])
    }

    #[test]
    fn ids_in_one_slot_are_distinct() {
        let mut counter = 0u64;
        let mut allocator = IdentityAllocator::new(&mut counter);
        let origins = OriginBook::default();
        let mut seen = HashSet::new();
        for _ in 0..500 {
            let id = allocator.allocate(&issuer(), 77, &origins).unwrap();
            assert!(seen.insert(id));
        }
        assert_eq!(counter, 500);
    }

    #[test]
    fn derivation_clears_high_order_byte() {
        for counter in 0..64 {
            let id = TokenId::derive(&issuer(), 1, counter);
            assert_eq!(id.0[0], 0);
        }
    }

    #[test]
    fn derivation_depends_on_every_input() {
        let base = TokenId::derive(&issuer(), 10, 3);
        assert_eq!(base, TokenId::derive(&issuer(), 10, 3));
        assert_ne!(base, TokenId::derive(&issuer(), 11, 3));
        assert_ne!(base, TokenId::derive(&issuer(), 10, 4));
        assert_ne!(base, TokenId::derive(&ChainAddress::Evm([5u8; 20]), 10, 3));
    }

    #[test]
    fn recorded_id_is_a_collision() {
        let mut origins = OriginBook::default();
        let collide = TokenId::derive(&issuer(), 9, 0);
        let provenance = Provenance {
            chain_of_origin: 1,
            original_reference: issuer(),
        };
        origins
            .record_new(NftOrigin::new(collide, provenance, "ipfs://x".into(), 1, 9))
            .unwrap();

        let mut counter = 0u64;
        let err = IdentityAllocator::new(&mut counter)
            .allocate(&issuer(), 9, &origins)
            .unwrap_err();
        assert_eq!(err, UniversalNftError::IdentityCollision.into());
    }

    #[test]
    fn counter_overflow_is_reported() {
        let mut counter = u64::MAX;
        let err = IdentityAllocator::new(&mut counter)
            .next_candidate(&issuer(), 0)
            .unwrap_err();
        assert_eq!(err, UniversalNftError::ArithmeticOverflow.into());
    }
}
