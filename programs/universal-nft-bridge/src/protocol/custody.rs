use anchor_lang::prelude::*;

use crate::protocol::gas::Asset;
use crate::protocol::identity::TokenId;
use crate::util::address::ChainAddress;

/// The live representation of tokens on this chain.
pub trait NftCustody {
    /// Current holder, or `None` when the token is not live here.
    fn owner_of(&self, token_id: &TokenId) -> Option<ChainAddress>;

    fn token_uri(&self, token_id: &TokenId) -> Result<String>;

    /// Make the token live for `owner`. Fails if it is already live.
    fn mint(&mut self, token_id: &TokenId, owner: &ChainAddress, uri: &str) -> Result<()>;

    fn burn(&mut self, token_id: &TokenId) -> Result<()>;
}

/// Pays out value held or received by the deployment.
pub trait Treasury {
    fn pay(&mut self, to: &ChainAddress, asset: &Asset, amount: u64) -> Result<()>;
}
