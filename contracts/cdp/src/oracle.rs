use soroban_sdk::{Address, Env, Symbol, contractclient, contracttype};

use crate::{Error, params::CollateralParam};

/// Quoted asset definition (SEP-40 compatible)
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub enum Asset {
    /// Can be a Stellar Classic or Soroban asset
    Stellar(Address),
    /// For any external tokens/assets/symbols
    Other(Symbol),
}

/// Price record definition (SEP-40 compatible)
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct PriceData {
    pub price: i128,
    pub timestamp: u64,
}

/// The subset of the SEP-40 consumer interface this contract reads.
#[contractclient(name = "PriceFeedClient")]
pub trait PriceFeedInterface {
    fn lastprice(env: Env, asset: Asset) -> Option<PriceData>;

    fn decimals(env: Env) -> u32;
}

/// Price of one collateral unit together with the feed's decimal scaling.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceQuote {
    pub price: i128,
    pub decimals: u32,
}

/// Fetch the current price for a collateral type. Never cached: every
/// operation asks the feed again.
pub fn current_price(env: &Env, param: &CollateralParam) -> Result<PriceQuote, Error> {
    let client = PriceFeedClient::new(env, &param.price_feed);

    let price = match client.try_lastprice(&Asset::Other(param.market_id.clone())) {
        Ok(Ok(Some(PriceData { price, .. }))) if price > 0 => price,
        _ => return Err(Error::PriceNotFound),
    };
    let decimals = match client.try_decimals() {
        Ok(Ok(decimals)) => decimals,
        _ => return Err(Error::PriceNotFound),
    };

    Ok(PriceQuote { price, decimals })
}
