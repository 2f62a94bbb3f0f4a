use anchor_lang::error::Error;
use anchor_lang::prelude::*;

use crate::error::UniversalNftError;
use crate::util::address::Channel;

/// Asset a payment, fee or carried value is denominated in.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Asset {
    /// The local chain's gas asset
    Native,
    /// Hub-side token bound to a channel (the channel's fee asset)
    Token(Channel),
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssetAmount {
    pub asset: Asset,
    pub amount: u64,
}

impl AssetAmount {
    pub fn native(amount: u64) -> Self {
        Self {
            asset: Asset::Native,
            amount,
        }
    }
}

/// Fee required by the relay for one hop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeQuote {
    pub asset: Asset,
    pub amount: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapFill {
    pub spent: u64,
    pub received: u64,
}

/// Exchange venue used to buy hop fees.
pub trait SwapRouter {
    fn wrap_native(&mut self, amount: u64) -> Result<()>;

    fn unwrap_native(&mut self, amount: u64) -> Result<()>;

    /// Buy exactly `amount_out` of `output`, spending at most `max_in` of `input`.
    fn swap_exact_output(
        &mut self,
        input: &Asset,
        output: &Asset,
        amount_out: u64,
        max_in: u64,
    ) -> Result<SwapFill>;
}

/// Exact fee handed to the relay. Not `Clone`: the only way to spend it is to
/// move it into `Gateway::deliver`, so no standing allowance survives a hop.
#[derive(Debug, PartialEq, Eq)]
pub struct FeeGrant {
    asset: Asset,
    amount: u64,
}

impl FeeGrant {
    fn exact(quote: &FeeQuote) -> Self {
        Self {
            asset: quote.asset,
            amount: quote.amount,
        }
    }

    pub fn asset(&self) -> &Asset {
        &self.asset
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }
}

#[derive(Debug)]
pub struct HopFunding {
    pub grant: FeeGrant,
    /// Payment spent on the fee
    pub consumed: u64,
    /// Payment left over, in the payment asset
    pub refund: u64,
}

/// Why a hop could not be funded, and how much of the payment is still held
/// in the payment asset. Converts into the underlying error with `?`.
#[derive(Debug)]
pub struct FundingShortfall {
    pub error: Error,
    pub remaining: u64,
}

impl FundingShortfall {
    fn new(error: Error, remaining: u64) -> Self {
        Self { error, remaining }
    }
}

impl From<FundingShortfall> for Error {
    fn from(shortfall: FundingShortfall) -> Self {
        shortfall.error
    }
}

/// Convert `amount` of `payment` into the fee named by `quote`.
///
/// On failure nothing the router has not already consumed stays wrapped, and
/// the shortfall reports what is left to refund. A partial fill spends part of
/// the payment, so `remaining` can be below `amount`.
pub fn fund_hop<R: SwapRouter + ?Sized>(
    router: &mut R,
    payment: &Asset,
    amount: u64,
    quote: &FeeQuote,
) -> std::result::Result<HopFunding, FundingShortfall> {
    if amount == 0 {
        return Err(FundingShortfall::new(
            error!(UniversalNftError::InsufficientPayment),
            0,
        ));
    }

    if *payment == quote.asset {
        if amount < quote.amount {
            msg!("Payment {} below hop fee {}", amount, quote.amount);
            return Err(FundingShortfall::new(
                error!(UniversalNftError::SwapUnderfunded),
                amount,
            ));
        }
        return Ok(HopFunding {
            grant: FeeGrant::exact(quote),
            consumed: quote.amount,
            refund: amount - quote.amount,
        });
    }

    let wrapped = *payment == Asset::Native;
    if wrapped {
        router
            .wrap_native(amount)
            .map_err(|_| FundingShortfall::new(error!(UniversalNftError::SwapFailed), amount))?;
    }

    let fill = match router.swap_exact_output(payment, &quote.asset, quote.amount, amount) {
        Ok(fill) if fill.received >= quote.amount && fill.spent <= amount => fill,
        Ok(fill) => {
            let remaining = amount.saturating_sub(fill.spent);
            msg!(
                "Swap returned {} for {} spent; hop fee is {}",
                fill.received,
                fill.spent,
                quote.amount
            );
            release(router, wrapped, remaining)?;
            return Err(FundingShortfall::new(
                error!(UniversalNftError::SwapUnderfunded),
                remaining,
            ));
        }
        Err(error) => {
            msg!("Fee swap failed: {}", error);
            release(router, wrapped, amount)?;
            return Err(FundingShortfall::new(
                error!(UniversalNftError::SwapFailed),
                amount,
            ));
        }
    };

    let refund = amount - fill.spent;
    release(router, wrapped, refund)?;

    Ok(HopFunding {
        grant: FeeGrant::exact(quote),
        consumed: fill.spent,
        refund,
    })
}

/// Unwrap whatever of the payment the router left untouched.
fn release<R: SwapRouter + ?Sized>(
    router: &mut R,
    wrapped: bool,
    amount: u64,
) -> std::result::Result<(), FundingShortfall> {
    if wrapped && amount > 0 {
        router
            .unwrap_native(amount)
            .map_err(|_| FundingShortfall::new(error!(UniversalNftError::SwapFailed), 0))?;
    }
    Ok(())
}

/// Router for chains without a swap venue: hop fees are paid directly in the
/// native gas asset, so any request to swap is refused.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectGasRouter;

impl SwapRouter for DirectGasRouter {
    fn wrap_native(&mut self, _amount: u64) -> Result<()> {
        Ok(())
    }

    fn unwrap_native(&mut self, _amount: u64) -> Result<()> {
        Ok(())
    }

    fn swap_exact_output(
        &mut self,
        input: &Asset,
        output: &Asset,
        _amount_out: u64,
        _max_in: u64,
    ) -> Result<SwapFill> {
        msg!("No swap venue for {:?} -> {:?}", input, output);
        err!(UniversalNftError::UnsupportedAsset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sells the fee asset at `price` units of input per unit of output, up to
    /// `depth` units per swap.
    struct FixedPrice {
        price: u64,
        depth: u64,
        fail: bool,
        wrapped: u64,
    }

    impl FixedPrice {
        fn new(price: u64) -> Self {
            Self {
                price,
                depth: u64::MAX,
                fail: false,
                wrapped: 0,
            }
        }
    }

    impl SwapRouter for FixedPrice {
        fn wrap_native(&mut self, amount: u64) -> Result<()> {
            self.wrapped += amount;
            Ok(())
        }

        fn unwrap_native(&mut self, amount: u64) -> Result<()> {
            self.wrapped = self
                .wrapped
                .checked_sub(amount)
                .ok_or_else(|| error!(UniversalNftError::ArithmeticOverflow))?;
            Ok(())
        }

        fn swap_exact_output(
            &mut self,
            _input: &Asset,
            _output: &Asset,
            amount_out: u64,
            max_in: u64,
        ) -> Result<SwapFill> {
            if self.fail {
                return err!(UniversalNftError::SwapFailed);
            }
            let received = amount_out.min(self.depth).min(max_in / self.price);
            let spent = received * self.price;
            self.wrapped -= spent;
            Ok(SwapFill { spent, received })
        }
    }

    fn quote(amount: u64) -> FeeQuote {
        FeeQuote {
            asset: Asset::Token(Channel([2; 20])),
            amount,
        }
    }

    #[test]
    fn swap_refunds_excess() {
        let mut router = FixedPrice::new(3);
        let funding = fund_hop(&mut router, &Asset::Native, 1_000, &quote(100)).unwrap();
        assert_eq!(funding.consumed, 300);
        assert_eq!(funding.refund, 700);
        assert_eq!(funding.grant.amount(), 100);
        assert_eq!(funding.grant.asset(), &Asset::Token(Channel([2; 20])));
        assert_eq!(router.wrapped, 0);
    }

    #[test]
    fn zero_payment_is_rejected() {
        let mut router = FixedPrice::new(1);
        let err = fund_hop(&mut router, &Asset::Native, 0, &quote(1)).unwrap_err();
        assert_eq!(err.error, UniversalNftError::InsufficientPayment.into());
    }

    #[test]
    fn router_failure_unwinds_wrap() {
        let mut router = FixedPrice::new(3);
        router.fail = true;
        let err = fund_hop(&mut router, &Asset::Native, 10_000, &quote(100)).unwrap_err();
        assert_eq!(err.error, UniversalNftError::SwapFailed.into());
        assert_eq!(err.remaining, 10_000);
        assert_eq!(router.wrapped, 0);
    }

    #[test]
    fn payment_below_swap_cost_is_underfunded() {
        let mut router = FixedPrice::new(3);
        let err = fund_hop(&mut router, &Asset::Native, 200, &quote(100)).unwrap_err();
        assert_eq!(err.error, UniversalNftError::SwapUnderfunded.into());
        assert_eq!(err.remaining, 2);
        assert_eq!(router.wrapped, 0);
    }

    #[test]
    fn partial_fill_keeps_only_the_unspent_payment() {
        let mut router = FixedPrice::new(2);
        router.depth = 75;
        let err = fund_hop(&mut router, &Asset::Native, 1_000, &quote(100)).unwrap_err();
        assert_eq!(err.error, UniversalNftError::SwapUnderfunded.into());
        assert_eq!(err.remaining, 850);
        assert_eq!(router.wrapped, 0);

        let as_error: Error = err.into();
        assert_eq!(as_error, UniversalNftError::SwapUnderfunded.into());
    }

    #[test]
    fn same_asset_skips_router() {
        let mut router = FixedPrice::new(1);
        router.fail = true;
        let fee = FeeQuote {
            asset: Asset::Native,
            amount: 50,
        };
        let funding = fund_hop(&mut router, &Asset::Native, 80, &fee).unwrap();
        assert_eq!(funding.consumed, 50);
        assert_eq!(funding.refund, 30);

        let err = fund_hop(&mut router, &Asset::Native, 49, &fee).unwrap_err();
        assert_eq!(err.error, UniversalNftError::SwapUnderfunded.into());
        assert_eq!(err.remaining, 49);
    }

    #[test]
    fn direct_router_refuses_swaps() {
        let err = fund_hop(&mut DirectGasRouter, &Asset::Native, 10, &quote(1)).unwrap_err();
        assert_eq!(err.error, UniversalNftError::SwapFailed.into());
    }
}
