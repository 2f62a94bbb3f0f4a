use anchor_lang::prelude::*;

use crate::context::Initialize;
use crate::event::ProgramInitialized;
use crate::state::{ConfigSettings, UniversalNftConfig};
use crate::util::address::ChainAddress;
use crate::util::constants::{DEFAULT_GAS_LIMIT, GATEWAY_PDA_SEED};

pub fn handler(
    ctx: Context<Initialize>,
    chain_id: u64,
    gateway_program: Pubkey,
    gas_limit: u64,
    hop_fee: u64,
) -> Result<()> {
    let (gateway_pda, _) = Pubkey::find_program_address(&[GATEWAY_PDA_SEED], &gateway_program);
    let settings = ConfigSettings {
        chain_id,
        issuer: ChainAddress::from(crate::ID),
        authority: ChainAddress::from(ctx.accounts.authority.key()),
        gateway: ChainAddress::from(gateway_pda),
        gateway_program,
        gas_limit: if gas_limit == 0 { DEFAULT_GAS_LIMIT } else { gas_limit },
        hop_fee,
    };
    let config = UniversalNftConfig::new(settings, ctx.bumps.config);

    emit!(ProgramInitialized {
        chain_id,
        authority: config.authority,
        gateway: config.gateway,
        gateway_program,
    });
    msg!(
        "Universal NFT bridge initialized on chain {} with gateway {}",
        chain_id,
        gateway_program
    );

    ctx.accounts.config.set_inner(config);
    Ok(())
}
