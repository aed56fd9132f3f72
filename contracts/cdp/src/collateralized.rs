use soroban_sdk::{Address, Env, String, Symbol, Vec};

use crate::{
    Error,
    params::CollateralParam,
    storage::{Deposit, Position},
};

/// Interface-only subcontract for the collateral side of Collateralized Debt
/// Positions: any account may fund a position, and each depositor can only
/// take back what they put in.
pub trait IsCollateralLedger {
    /// Move `amount` of the collateral token from `depositor` into escrow and
    /// credit it to the position `owner` holds for `collateral_type`.
    /// The depositor does not need to be the owner. Deposits never need a
    /// ratio check since they can only raise the Collateralization Ratio (CR).
    fn deposit_collateral(
        env: &Env,
        owner: Address,
        depositor: Address,
        amount: i128,
        collateral_type: Symbol,
    ) -> Result<(), Error>;

    /// Return `amount` of the collateral token from escrow to `depositor`,
    /// debiting the depositor's own deposit on the position `owner` holds.
    /// Fails without changing anything if the CR after withdrawal would fall
    /// below the collateral type's minimum.
    fn withdraw_collateral(
        env: &Env,
        owner: Address,
        depositor: Address,
        amount: i128,
        collateral_type: Symbol,
    ) -> Result<(), Error>;

    /// Deposit of `depositor` on a position, if any
    fn get_deposit(env: &Env, position_id: u64, depositor: Address) -> Option<Deposit>;

    /// All deposits on a position, first depositor first
    fn get_deposits(env: &Env, position_id: u64) -> Vec<Deposit>;

    /// Position by collateral type and id
    fn position(env: &Env, collateral_type: Symbol, id: u64) -> Result<Position, Error>;

    /// Position `owner` holds for `collateral_type`
    fn position_by_owner(env: &Env, owner: Address, collateral_type: Symbol)
    -> Result<Position, Error>;

    /// Current CR of the position in basis points, at the latest feed price.
    /// `u32::MAX` for a position without debt.
    fn collateralization_ratio(
        env: &Env,
        owner: Address,
        collateral_type: Symbol,
    ) -> Result<u32, Error>;
}

/// Admin surface. Every mutating function here requires the admin's authorization.
pub trait IsCdpAdmin {
    /// Open a position for `owner`, escrowing the opening collateral and
    /// recording it as the owner's deposit. The opening state must already
    /// satisfy the minimum CR. Returns the new position id.
    fn open_position(
        env: &Env,
        owner: Address,
        collateral_type: Symbol,
        collateral: i128,
        principal: i128,
    ) -> Result<u64, Error>;

    /// Overwrite a position's debt as computed by the debt/fee module.
    fn record_debt(
        env: &Env,
        collateral_type: Symbol,
        id: u64,
        principal: i128,
        accumulated_fees: i128,
    ) -> Result<(), Error>;

    /// Remove a deposit record unconditionally, without a ratio check. Any
    /// amount still on the record is released from escrow back to the
    /// depositor and taken off the position total. Idempotent.
    fn delete_deposit(env: &Env, position_id: u64, depositor: Address) -> Result<(), Error>;

    /// Set the risk parameters of a collateral type
    fn set_collateral_param(
        env: &Env,
        collateral_type: Symbol,
        param: CollateralParam,
    ) -> Result<(), Error>;

    /// Risk parameters of a collateral type
    fn collateral_param(env: &Env, collateral_type: Symbol) -> Result<CollateralParam, Error>;

    /// Report the version of this contract
    fn version(env: &Env) -> String;
}
