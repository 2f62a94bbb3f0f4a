use anchor_lang::prelude::*;
use anchor_lang::solana_program::program::invoke_signed;
use mpl_token_metadata::accounts::Metadata;
use mpl_token_metadata::instructions::CreateMetadataAccountV3Builder;
use mpl_token_metadata::types::DataV2;

use crate::error::UniversalNftError;

/// Create the Metaplex metadata account for `mint`, signed by the PDA that is
/// both its mint and update authority.
#[allow(clippy::too_many_arguments)]
pub fn create_metadata_account<'info>(
    metadata: &AccountInfo<'info>,
    mint: &AccountInfo<'info>,
    authority: &AccountInfo<'info>,
    payer: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    rent: &AccountInfo<'info>,
    name: &str,
    symbol: &str,
    uri: &str,
    authority_signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    let data = DataV2 {
        name: name.to_string(),
        symbol: symbol.to_string(),
        uri: uri.to_string(),
        seller_fee_basis_points: 0,
        creators: None,
        collection: None,
        uses: None,
    };

    let ix = CreateMetadataAccountV3Builder::new()
        .metadata(*metadata.key)
        .mint(*mint.key)
        .mint_authority(*authority.key)
        .payer(*payer.key)
        .update_authority(*authority.key, true)
        .system_program(*system_program.key)
        .rent(Some(*rent.key))
        .data(data)
        .is_mutable(true)
        .instruction();

    // [metadata, mint, mint_authority, payer, update_authority, system_program, rent]
    invoke_signed(
        &ix,
        &[
            metadata.clone(),
            mint.clone(),
            authority.clone(),
            payer.clone(),
            authority.clone(),
            system_program.clone(),
            rent.clone(),
        ],
        authority_signer_seeds,
    )
    .map_err(|e| {
        msg!("Metadata creation failed: {}", e);
        error!(UniversalNftError::InvalidMetadataAccount)
    })
}

/// Current URI of a Metaplex metadata account.
pub fn read_metadata_uri(metadata: &AccountInfo) -> Result<String> {
    require!(!metadata.data_is_empty(), UniversalNftError::NftDoesNotExist);
    require_keys_eq!(
        *metadata.owner,
        mpl_token_metadata::ID,
        UniversalNftError::InvalidMetadataAccount
    );
    let data = metadata.try_borrow_data()?;
    let parsed = Metadata::from_bytes(&data)
        .map_err(|_| error!(UniversalNftError::InvalidMetadataAccount))?;
    // Metaplex pads strings with NULs
    Ok(parsed.uri.trim_end_matches('\0').to_string())
}

pub fn metadata_address(mint: &Pubkey) -> Pubkey {
    Metadata::find_pda(mint).0
}
