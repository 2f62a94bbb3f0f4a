use anchor_lang::prelude::*;

use crate::error::UniversalNftError;
use crate::util::constants::{MAX_NAME_LENGTH, MAX_SYMBOL_LENGTH, MAX_URI_LENGTH};

pub fn validate_uri(uri: &str) -> Result<()> {
    require!(!uri.is_empty(), UniversalNftError::InvalidUri);
    require!(uri.len() <= MAX_URI_LENGTH, UniversalNftError::UriTooLong);
    Ok(())
}

pub fn validate_name(name: &str) -> Result<()> {
    require!(!name.trim().is_empty(), UniversalNftError::InvalidTokenName);
    require!(name.len() <= MAX_NAME_LENGTH, UniversalNftError::NameTooLong);
    Ok(())
}

pub fn validate_symbol(symbol: &str) -> Result<()> {
    require!(symbol.len() <= MAX_SYMBOL_LENGTH, UniversalNftError::SymbolTooLong);
    Ok(())
}
