use soroban_sdk::{Address, Env, Symbol, contracttype};

use crate::{
    Error,
    storage::{DataKey, set_and_extend},
};

/// Risk parameters of one collateral type
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CollateralParam {
    /// Stellar Asset Contract of the collateral denomination
    pub token: Address,
    /// SEP-40 price feed quoting the collateral in the unit of account
    pub price_feed: Address,
    /// Symbol the collateral is quoted under on the price feed
    pub market_id: Symbol,
    /// Minimum collateralization ratio, basis points. 20_000 = 200%
    pub liquidation_ratio: u32,
}

impl CollateralParam {
    pub fn validate(&self) -> Result<(), Error> {
        if self.liquidation_ratio == 0 {
            return Err(Error::InvalidParam);
        }
        Ok(())
    }
}

pub struct ParamStore;

impl ParamStore {
    pub fn get(env: &Env, collateral_type: Symbol) -> Result<CollateralParam, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::CollateralParam(collateral_type))
            .ok_or(Error::CollateralTypeNotFound)
    }

    pub fn set(env: &Env, collateral_type: Symbol, param: &CollateralParam) -> Result<(), Error> {
        param.validate()?;
        set_and_extend(env, &DataKey::CollateralParam(collateral_type), param);
        Ok(())
    }
}
