use anchor_lang::prelude::*;
use pyth_solana_receiver_sdk::price_update::PriceUpdateV2;

use crate::constants::*;
use crate::errors::KeelError;
use crate::state::{Config, UserAccount};

/// Read one Pyth price update and return the quote scaled to canonical
/// precision. Rejects accounts not owned by the receiver program, quotes
/// for a different feed, stale quotes and non-positive prices.
pub fn read_price(account: &AccountInfo, feed_id: &[u8; 32]) -> Result<u128> {
    if account.owner != &pyth_solana_receiver_sdk::ID {
        return Err(KeelError::InvalidPriceFeed.into());
    }
    let data = account.try_borrow_data()?;
    let mut slice: &[u8] = &data;
    let update =
        PriceUpdateV2::try_deserialize(&mut slice).map_err(|_| KeelError::InvalidPriceFeed)?;
    let price = update
        .get_price_unchecked(feed_id)
        .map_err(|_| KeelError::InvalidPriceFeed)?;

    let age = Clock::get()?
        .unix_timestamp
        .saturating_sub(price.publish_time);
    if age > MAX_PRICE_AGE as i64 {
        return Err(KeelError::StalePriceData.into());
    }

    scale_price(price.price, price.exponent)
}

/// Scale a raw oracle quote (`price * 10^exponent` USD) to 1e18 precision.
pub fn scale_price(price: i64, exponent: i32) -> Result<u128> {
    if price <= 0 {
        return Err(KeelError::InvalidOraclePrice.into());
    }
    let price = price as u128;
    let shift = 18_i64 + exponent as i64;
    if shift >= 0 {
        let factor = 10u128
            .checked_pow(shift as u32)
            .ok_or(KeelError::MathOverflow)?;
        let scaled = price.checked_mul(factor).ok_or(KeelError::MathOverflow)?;
        Ok(scaled)
    } else {
        let factor = 10u128
            .checked_pow((-shift) as u32)
            .ok_or(KeelError::MathOverflow)?;
        Ok(price / factor)
    }
}

/// USD value (1e18 precision) of `amount` native units of an asset quoted
/// at `price_1e18`. The product is split across the division so the
/// intermediate stays within u128 for any u64 amount.
pub fn usd_value(price_1e18: u128, amount: u64, decimals: u8) -> Result<u128> {
    let unit = 10u128
        .checked_pow(decimals as u32)
        .ok_or(KeelError::MathOverflow)?;
    let quot = price_1e18 / unit;
    let rem = price_1e18 % unit;
    let high = quot
        .checked_mul(amount as u128)
        .ok_or(KeelError::MathOverflow)?;
    let low = rem
        .checked_mul(amount as u128)
        .ok_or(KeelError::MathOverflow)?
        / unit;
    let value = high.checked_add(low).ok_or(KeelError::MathOverflow)?;
    Ok(value)
}

/// USD value (1e18 precision) of raw kUSD units at the $1 peg.
pub fn kusd_usd_value(amount: u64) -> Result<u128> {
    let unit = 10u128.pow(KUSD_DECIMALS as u32);
    let value = (amount as u128)
        .checked_mul(PRECISION)
        .ok_or(KeelError::MathOverflow)?
        / unit;
    Ok(value)
}

/// Native token units worth `usd` (1e18 precision) at `price_1e18`,
/// rounded down. Split like `usd_value` to stay within u128.
pub fn token_amount_from_usd(usd: u128, price_1e18: u128, decimals: u8) -> Result<u64> {
    if price_1e18 == 0 {
        return Err(KeelError::InvalidOraclePrice.into());
    }
    let unit = 10u128
        .checked_pow(decimals as u32)
        .ok_or(KeelError::MathOverflow)?;
    let quot = usd / price_1e18;
    let rem = usd % price_1e18;
    let amount = quot
        .checked_mul(unit)
        .ok_or(KeelError::MathOverflow)?
        .checked_add(rem.checked_mul(unit).ok_or(KeelError::MathOverflow)? / price_1e18)
        .ok_or(KeelError::MathOverflow)?;
    let amount = u64::try_from(amount).map_err(|_| KeelError::MathOverflow)?;
    Ok(amount)
}

/// Collateral seized for repaying `debt_to_cover` kUSD: the USD-equivalent
/// amount of the chosen asset plus the liquidation bonus.
pub fn seizure_for_debt(
    debt_to_cover: u64,
    price_1e18: u128,
    decimals: u8,
) -> Result<(u64, u64)> {
    let usd = kusd_usd_value(debt_to_cover)?;
    let base = token_amount_from_usd(usd, price_1e18, decimals)?;
    let bonus = (base as u128)
        .checked_mul(LIQUIDATION_BONUS)
        .ok_or(KeelError::MathOverflow)?
        / LIQUIDATION_PRECISION;
    Ok((base, bonus as u64))
}

/// Health factor from USD values: threshold-adjusted collateral over debt,
/// 1e18 precision. Debt-free positions cannot be liquidated and report the
/// maximum factor.
pub fn health_factor_value(collateral_usd: u128, debt_usd: u128) -> Result<u128> {
    if debt_usd == 0 {
        return Ok(u128::MAX);
    }
    let adjusted = collateral_usd
        .checked_mul(LIQUIDATION_THRESHOLD)
        .ok_or(KeelError::MathOverflow)?
        / LIQUIDATION_PRECISION;
    let scaled_debt = debt_usd / RATIO_GRANULARITY;
    if scaled_debt == 0 {
        return Ok(u128::MAX);
    }
    let factor = (adjusted / RATIO_GRANULARITY)
        .checked_mul(PRECISION)
        .ok_or(KeelError::MathOverflow)?
        / scaled_debt;
    Ok(factor)
}

/// Sum the USD value of every registered asset held by the user, in
/// registration order. `price_updates` must carry one price update per
/// registered asset, in that same order; zero balances contribute zero
/// and skip the oracle read.
pub fn total_collateral_value(
    config: &Config,
    user_account: &UserAccount,
    price_updates: &[AccountInfo],
) -> Result<u128> {
    if price_updates.len() != config.collaterals.len() {
        return Err(KeelError::InvalidPriceFeed.into());
    }
    let mut total: u128 = 0;
    for (index, asset) in config.collaterals.iter().enumerate() {
        let amount = user_account.deposited(index);
        if amount == 0 {
            continue;
        }
        let price = read_price(&price_updates[index], &asset.feed_id)?;
        let value = usd_value(price, amount, asset.decimals)?;
        total = total.checked_add(value).ok_or(KeelError::MathOverflow)?;
    }
    Ok(total)
}

/// Current health factor of a position at live oracle prices.
pub fn health_factor(
    config: &Config,
    user_account: &UserAccount,
    price_updates: &[AccountInfo],
) -> Result<u128> {
    if user_account.debt == 0 {
        return Ok(u128::MAX);
    }
    let collateral_usd = total_collateral_value(config, user_account, price_updates)?;
    let debt_usd = kusd_usd_value(user_account.debt)?;
    health_factor_value(collateral_usd, debt_usd)
}

/// Fail with `HealthFactorBroken` when the position is below minimum.
pub fn check_health_factor(
    config: &Config,
    user_account: &UserAccount,
    price_updates: &[AccountInfo],
) -> Result<u128> {
    let factor = health_factor(config, user_account, price_updates)?;
    if factor < MIN_HEALTH_FACTOR {
        msg!("health factor {} below minimum {}", factor, MIN_HEALTH_FACTOR);
        return Err(KeelError::HealthFactorBroken.into());
    }
    Ok(factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    const E18: u128 = PRECISION;

    #[test]
    fn scale_adjusts_for_oracle_exponent() {
        // $2000 quoted with 8 decimals, the usual Pyth shape
        assert_eq!(scale_price(200_000_000_000, -8).unwrap(), 2_000 * E18);
        // whole-dollar quote
        assert_eq!(scale_price(2_000, 0).unwrap(), 2_000 * E18);
        // sub-cent asset
        assert_eq!(scale_price(1_234, -8).unwrap(), 12_340_000_000_000);
    }

    #[test]
    fn scale_rejects_non_positive_quotes() {
        assert_eq!(
            scale_price(0, -8),
            Err(KeelError::InvalidOraclePrice.into())
        );
        assert_eq!(
            scale_price(-200_000_000_000, -8),
            Err(KeelError::InvalidOraclePrice.into())
        );
    }

    #[test]
    fn usd_value_at_reference_price() {
        // $2000/unit, 15 units of an 18-decimal asset => $30,000
        let fifteen_units: u64 = 15_000_000_000_000_000_000;
        assert_eq!(
            usd_value(2_000 * E18, fifteen_units, 18).unwrap(),
            30_000 * E18
        );
        // same scenario at native 9-decimal scale
        assert_eq!(
            usd_value(2_000 * E18, 15_000_000_000, 9).unwrap(),
            30_000 * E18
        );
    }

    #[test]
    fn usd_value_truncates_and_handles_zero() {
        assert_eq!(usd_value(2_000 * E18, 0, 9).unwrap(), 0);
        // 1 native unit of a 9-decimal asset floors away sub-unit dust
        let value = usd_value(1_999_999_999_999_999_999, 1, 9).unwrap();
        assert_eq!(value, 1_999_999_999);
    }

    #[test]
    fn token_amount_inverts_valuation() {
        // $100 of a $2000 asset with 9 decimals is 0.05 units
        let amount = token_amount_from_usd(100 * E18, 2_000 * E18, 9).unwrap();
        assert_eq!(amount, 50_000_000);
        assert_eq!(usd_value(2_000 * E18, amount, 9).unwrap(), 100 * E18);
    }

    #[test]
    fn debt_free_position_reports_max_factor() {
        let factor = health_factor_value(123 * E18, 0).unwrap();
        assert_eq!(factor, u128::MAX);
        assert!(factor > MIN_HEALTH_FACTOR);
    }

    #[test]
    fn factor_sits_exactly_on_the_boundary() {
        // $10,000 collateral, 5,000 kUSD debt, 50% threshold => exactly 1.0
        let debt_usd = kusd_usd_value(5_000_000_000).unwrap();
        let factor = health_factor_value(10_000 * E18, debt_usd).unwrap();
        assert_eq!(factor, MIN_HEALTH_FACTOR);

        // one more raw unit of debt tips it under
        let debt_usd = kusd_usd_value(5_000_000_001).unwrap();
        let factor = health_factor_value(10_000 * E18, debt_usd).unwrap();
        assert!(factor < MIN_HEALTH_FACTOR);
    }

    #[test]
    fn factor_moves_monotonically_with_debt() {
        let collateral = 10_000 * E18;
        let mut previous = health_factor_value(collateral, kusd_usd_value(1_000_000).unwrap()).unwrap();
        for debt in [2_000_000u64, 500_000_000, 5_000_000_000, 50_000_000_000] {
            let factor =
                health_factor_value(collateral, kusd_usd_value(debt).unwrap()).unwrap();
            assert!(factor < previous);
            previous = factor;
        }
    }

    #[test]
    fn seizure_includes_ten_percent_bonus() {
        // repay 100 kUSD against a $2000 asset: 0.05 units + 10% bonus
        let (base, bonus) = seizure_for_debt(100_000_000, 2_000 * E18, 9).unwrap();
        assert_eq!(base, 50_000_000);
        assert_eq!(bonus, 5_000_000);
    }

    #[test]
    fn seizure_scales_with_price() {
        // half the price seizes twice the collateral
        let (base, bonus) = seizure_for_debt(100_000_000, 1_000 * E18, 9).unwrap();
        assert_eq!(base, 100_000_000);
        assert_eq!(bonus, 10_000_000);
    }
}
