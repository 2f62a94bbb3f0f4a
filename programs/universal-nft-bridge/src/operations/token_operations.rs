use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_pack::Pack;
use anchor_spl::associated_token::{self, get_associated_token_address, Create};
use anchor_spl::token::{self, spl_token, Burn, InitializeMint2, Mint, MintTo, TokenAccount};

use crate::error::UniversalNftError;
use crate::operations::metadata_operations::{
    create_metadata_account, metadata_address, read_metadata_uri,
};
use crate::protocol::custody::NftCustody;
use crate::protocol::identity::TokenId;
use crate::util::address::ChainAddress;
use crate::util::constants::{NFT_MINT_SEED, UNIVERSAL_NFT_CONFIG_SEED};
use crate::util::pda::create_pda_account;

/// Accounts backing one token's SPL representation.
pub struct CustodyAccounts<'info> {
    /// Config PDA; mint, freeze and metadata update authority
    pub config: AccountInfo<'info>,
    /// Mint PDA `["nft_mint", token_id]`
    pub mint: AccountInfo<'info>,
    /// Holder's associated token account for `mint`
    pub token_account: AccountInfo<'info>,
    pub holder: AccountInfo<'info>,
    pub metadata: AccountInfo<'info>,
    pub payer: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
    pub associated_token_program: AccountInfo<'info>,
    pub metadata_program: AccountInfo<'info>,
    pub system_program: AccountInfo<'info>,
    pub rent: AccountInfo<'info>,
}

/// A token is live when its mint has supply 1 held in the holder's ATA.
/// Burning leaves the mint behind with supply 0 so a later arrival re-mints
/// under the same address and keeps the original metadata.
pub struct SplCustody<'info> {
    accounts: CustodyAccounts<'info>,
    token_id: TokenId,
    mint_bump: u8,
    config_bump: u8,
    name: String,
    symbol: String,
}

impl<'info> SplCustody<'info> {
    pub fn new(
        accounts: CustodyAccounts<'info>,
        token_id: TokenId,
        config_bump: u8,
        name: String,
        symbol: String,
    ) -> Result<Self> {
        let (mint, mint_bump) = Self::find_mint(&token_id);
        require_keys_eq!(*accounts.mint.key, mint, UniversalNftError::InvalidMintAccount);
        require_keys_eq!(
            *accounts.token_account.key,
            get_associated_token_address(accounts.holder.key, &mint),
            UniversalNftError::InvalidTokenAccount
        );
        require_keys_eq!(
            *accounts.metadata.key,
            metadata_address(&mint),
            UniversalNftError::InvalidMetadataAccount
        );
        require_keys_eq!(
            *accounts.metadata_program.key,
            mpl_token_metadata::ID,
            UniversalNftError::InvalidMetadataAccount
        );
        Ok(Self {
            accounts,
            token_id,
            mint_bump,
            config_bump,
            name,
            symbol,
        })
    }

    pub fn find_mint(token_id: &TokenId) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[NFT_MINT_SEED, token_id.as_ref()], &crate::ID)
    }

    fn check_token(&self, token_id: &TokenId) -> Result<()> {
        require!(*token_id == self.token_id, UniversalNftError::InvalidMintAccount);
        Ok(())
    }

    fn create_mint(&self) -> Result<()> {
        let bump = [self.mint_bump];
        let seeds: [&[u8]; 3] = [NFT_MINT_SEED, self.token_id.as_ref(), &bump];
        create_pda_account(
            &self.accounts.payer,
            &self.accounts.mint,
            &self.accounts.system_program,
            &token::ID,
            spl_token::state::Mint::LEN,
            &seeds,
        )?;
        token::initialize_mint2(
            CpiContext::new(
                self.accounts.token_program.clone(),
                InitializeMint2 {
                    mint: self.accounts.mint.clone(),
                },
            ),
            0,
            self.accounts.config.key,
            Some(self.accounts.config.key),
        )
    }

    fn mint_supply(&self) -> Result<u64> {
        let data = self.accounts.mint.try_borrow_data()?;
        Ok(Mint::try_deserialize(&mut &data[..])?.supply)
    }
}

impl NftCustody for SplCustody<'_> {
    fn owner_of(&self, token_id: &TokenId) -> Option<ChainAddress> {
        if *token_id != self.token_id || self.accounts.token_account.data_is_empty() {
            return None;
        }
        let data = self.accounts.token_account.try_borrow_data().ok()?;
        let account = TokenAccount::try_deserialize(&mut &data[..]).ok()?;
        (account.mint == *self.accounts.mint.key && account.amount == 1)
            .then(|| ChainAddress::from(account.owner))
    }

    fn token_uri(&self, token_id: &TokenId) -> Result<String> {
        self.check_token(token_id)?;
        read_metadata_uri(&self.accounts.metadata)
    }

    fn mint(&mut self, token_id: &TokenId, owner: &ChainAddress, uri: &str) -> Result<()> {
        self.check_token(token_id)?;
        require!(
            *owner == ChainAddress::from(*self.accounts.holder.key),
            UniversalNftError::InvalidRecipientAddress
        );

        if self.accounts.mint.data_is_empty() {
            self.create_mint()?;
        } else {
            require!(self.mint_supply()? == 0, UniversalNftError::NftAlreadyExists);
        }

        if self.accounts.token_account.data_is_empty() {
            associated_token::create(CpiContext::new(
                self.accounts.associated_token_program.clone(),
                Create {
                    payer: self.accounts.payer.clone(),
                    associated_token: self.accounts.token_account.clone(),
                    authority: self.accounts.holder.clone(),
                    mint: self.accounts.mint.clone(),
                    system_program: self.accounts.system_program.clone(),
                    token_program: self.accounts.token_program.clone(),
                },
            ))?;
        }

        let bump = [self.config_bump];
        let config_seeds: [&[u8]; 2] = [UNIVERSAL_NFT_CONFIG_SEED, &bump];
        let signer = [&config_seeds[..]];
        token::mint_to(
            CpiContext::new_with_signer(
                self.accounts.token_program.clone(),
                MintTo {
                    mint: self.accounts.mint.clone(),
                    to: self.accounts.token_account.clone(),
                    authority: self.accounts.config.clone(),
                },
                &signer,
            ),
            1,
        )?;

        if self.accounts.metadata.data_is_empty() {
            create_metadata_account(
                &self.accounts.metadata,
                &self.accounts.mint,
                &self.accounts.config,
                &self.accounts.payer,
                &self.accounts.system_program,
                &self.accounts.rent,
                &self.name,
                &self.symbol,
                uri,
                &signer,
            )?;
        }

        msg!("SPL mint {} live for {}", self.accounts.mint.key, owner);
        Ok(())
    }

    fn burn(&mut self, token_id: &TokenId) -> Result<()> {
        self.check_token(token_id)?;
        token::burn(
            CpiContext::new(
                self.accounts.token_program.clone(),
                Burn {
                    mint: self.accounts.mint.clone(),
                    from: self.accounts.token_account.clone(),
                    authority: self.accounts.holder.clone(),
                },
            ),
            1,
        )
    }
}
