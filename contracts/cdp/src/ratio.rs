//! Collateralization checks in 256-bit integer fixed-point arithmetic.
//!
//! Prices are quoted in debt units per collateral unit, scaled by
//! `10^price_decimals`. Ratios are expressed in basis points, so `20_000`
//! means the collateral must be worth twice the debt.
//!
//! With every input an `i128` and `price_decimals <= MAX_PRICE_DECIMALS`, no
//! intermediate value below exceeds 2^255, so no input in range can overflow.

use soroban_sdk::{Env, I256};

use crate::Error;

pub const BASIS_POINTS: i128 = 10_000;

/// Feeds quoting with more decimals than this are not supported.
pub const MAX_PRICE_DECIMALS: u32 = 18;

/// Returns whether `collateral` still covers `principal + fees` at
/// `min_ratio` basis points:
///
/// `collateral * price * 10_000 >= (principal + fees) * min_ratio * 10^price_decimals`
///
/// The boundary is inclusive. Without debt any non-negative collateral is safe.
pub fn is_safe(
    env: &Env,
    collateral: i128,
    principal: i128,
    fees: i128,
    price: i128,
    price_decimals: u32,
    min_ratio: u32,
) -> Result<bool, Error> {
    if collateral < 0 {
        return Ok(false);
    }
    let scale = price_scale(price_decimals)?;
    let zero = I256::from_i128(env, 0);
    let debt = I256::from_i128(env, principal).add(&I256::from_i128(env, fees));
    if debt <= zero {
        return Ok(true);
    }
    if price <= 0 {
        return Ok(false);
    }

    // collateral * price < 2^254; the basis points go to the other side as a
    // ceiling division so the product never has to be widened further
    let collateral_value = I256::from_i128(env, collateral).mul(&I256::from_i128(env, price));
    let required_value = debt
        .mul(&I256::from_i128(env, i128::from(min_ratio)))
        .mul(&I256::from_i128(env, scale));
    let bps = I256::from_i128(env, BASIS_POINTS);
    let required_per_bp = required_value
        .add(&bps.sub(&I256::from_i128(env, 1)))
        .div(&bps);

    Ok(collateral_value >= required_per_bp)
}

/// Current collateralization ratio in basis points, rounded down.
/// `u32::MAX` when there is no debt or the ratio does not fit.
pub fn collateralization_ratio(
    env: &Env,
    collateral: i128,
    principal: i128,
    fees: i128,
    price: i128,
    price_decimals: u32,
) -> Result<u32, Error> {
    let scale = price_scale(price_decimals)?;
    let zero = I256::from_i128(env, 0);
    let debt = I256::from_i128(env, principal).add(&I256::from_i128(env, fees));
    if debt <= zero {
        return Ok(u32::MAX);
    }
    if collateral <= 0 || price <= 0 {
        return Ok(0);
    }

    let collateral_value = I256::from_i128(env, collateral).mul(&I256::from_i128(env, price));
    let debt_value = debt.mul(&I256::from_i128(env, scale));
    let bps = I256::from_i128(env, BASIS_POINTS);

    // floor(value * bps / debt) == whole * bps + floor(rest * bps / debt)
    let whole = collateral_value.div(&debt_value);
    if whole > I256::from_i128(env, i128::from(u32::MAX)) {
        return Ok(u32::MAX);
    }
    let rest = collateral_value.sub(&whole.mul(&debt_value));
    let ratio = whole
        .mul(&bps)
        .add(&rest.mul(&bps).div(&debt_value))
        .to_i128()
        .ok_or(Error::ArithmeticError)?;

    Ok(u32::try_from(ratio).unwrap_or(u32::MAX))
}

fn price_scale(price_decimals: u32) -> Result<i128, Error> {
    if price_decimals > MAX_PRICE_DECIMALS {
        return Err(Error::UnsupportedPriceDecimals);
    }
    Ok(10i128.pow(price_decimals))
}
