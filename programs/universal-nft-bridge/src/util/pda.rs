use anchor_lang::prelude::*;
use anchor_lang::system_program::{
    allocate, assign, create_account, transfer, Allocate, Assign, CreateAccount, Transfer,
};

/// How an uninitialised PDA gets its lamports and data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Creation {
    /// Nothing at the address yet
    Fresh { lamports: u64 },
    /// Somebody already sent lamports to the address
    Prefunded { top_up: u64 },
}

fn plan(current_lamports: u64, rent_floor: u64) -> Creation {
    if current_lamports == 0 {
        Creation::Fresh {
            lamports: rent_floor,
        }
    } else {
        Creation::Prefunded {
            top_up: rent_floor.saturating_sub(current_lamports),
        }
    }
}

/// Create a program-owned PDA funded by `payer`.
///
/// Used for accounts whose address depends on data only known inside the
/// instruction (token ids and nonces decoded from a payload), where Anchor's
/// `init` constraint cannot derive the seeds. Like `init`, an address that
/// already holds lamports is topped up, allocated and assigned instead of
/// created, so a stray transfer cannot block it.
pub fn create_pda_account<'info>(
    payer: &AccountInfo<'info>,
    target: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    owner: &Pubkey,
    space: usize,
    signer_seeds: &[&[u8]],
) -> Result<()> {
    let rent_floor = Rent::get()?.minimum_balance(space);
    match plan(target.lamports(), rent_floor) {
        Creation::Fresh { lamports } => create_account(
            CpiContext::new_with_signer(
                system_program.clone(),
                CreateAccount {
                    from: payer.clone(),
                    to: target.clone(),
                },
                &[signer_seeds],
            ),
            lamports,
            space as u64,
            owner,
        ),
        Creation::Prefunded { top_up } => {
            msg!("{} already holds lamports; claiming it", target.key);
            if top_up > 0 {
                transfer(
                    CpiContext::new(
                        system_program.clone(),
                        Transfer {
                            from: payer.clone(),
                            to: target.clone(),
                        },
                    ),
                    top_up,
                )?;
            }
            allocate(
                CpiContext::new_with_signer(
                    system_program.clone(),
                    Allocate {
                        account_to_allocate: target.clone(),
                    },
                    &[signer_seeds],
                ),
                space as u64,
            )?;
            assign(
                CpiContext::new_with_signer(
                    system_program.clone(),
                    Assign {
                        account_to_assign: target.clone(),
                    },
                    &[signer_seeds],
                ),
                owner,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_address_is_created() {
        assert_eq!(plan(0, 1_000), Creation::Fresh { lamports: 1_000 });
    }

    #[test]
    fn prefunded_address_is_claimed_not_created() {
        assert_eq!(plan(1, 1_000), Creation::Prefunded { top_up: 999 });
        assert_eq!(plan(5_000, 1_000), Creation::Prefunded { top_up: 0 });
    }
}
