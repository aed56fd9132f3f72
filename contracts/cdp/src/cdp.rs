use soroban_sdk::{
    Address, BytesN, Env, String, Symbol, Vec, contract, contractimpl, log, panic_with_error,
    token::TokenClient,
};

use crate::{
    Error,
    collateralized::{IsCdpAdmin, IsCollateralLedger},
    deposit_ledger::DepositLedger,
    events::{
        CollateralDeposited, CollateralParamSet, CollateralWithdrawn, DebtRecorded, DepositDeleted,
        PositionOpened,
    },
    oracle,
    params::{CollateralParam, ParamStore},
    position_store::PositionStore,
    ratio,
    storage::{ADMIN_KEY, CdpStorage, Deposit, Position},
};

const VERSION_STRING: &str = concat!(
    env!("CARGO_PKG_VERSION_MAJOR"),
    ".",
    env!("CARGO_PKG_VERSION_MINOR"),
    ".",
    env!("CARGO_PKG_VERSION_PATCH")
);

/// Ids start at 1 so that 0 never names a position.
const FIRST_POSITION_ID: u64 = 1;

#[contract]
pub struct CdpContract;

#[contractimpl]
impl CdpContract {
    pub fn __constructor(env: &Env, admin: Address) {
        Self::set_admin(env, &admin);
        CdpStorage::set_state(
            env,
            &CdpStorage {
                next_position_id: FIRST_POSITION_ID,
            },
        );
    }

    /// Upgrade the contract to new wasm. Admin-only.
    pub fn upgrade(env: &Env, new_wasm_hash: BytesN<32>) {
        Self::require_admin(env);
        env.deployer().update_current_contract_wasm(new_wasm_hash);
    }

    /// Get the admin address
    fn admin(env: &Env) -> Option<Address> {
        env.storage().instance().get(&ADMIN_KEY)
    }

    /// Set the admin address. Can only be called once.
    fn set_admin(env: &Env, admin: &Address) {
        if env.storage().instance().has(&ADMIN_KEY) {
            panic!("admin already set");
        }
        env.storage().instance().set(&ADMIN_KEY, admin);
    }

    fn require_admin(env: &Env) {
        let admin = Self::admin(env).expect("admin not set");
        admin.require_auth();
    }

    /// Move collateral through the collateral type's SAC. Any failure there,
    /// most commonly an underfunded source, surfaces as `InsufficientFunds`.
    fn transfer_collateral(
        env: &Env,
        param: &CollateralParam,
        from: &Address,
        to: &Address,
        amount: i128,
    ) -> Result<(), Error> {
        let _ = TokenClient::new(env, &param.token)
            .try_transfer(from, to, &amount)
            .map_err(|_| Error::InsufficientFunds)?;
        Ok(())
    }

    fn check_ratio(
        env: &Env,
        param: &CollateralParam,
        collateral: i128,
        principal: i128,
        accumulated_fees: i128,
    ) -> Result<bool, Error> {
        let quote = oracle::current_price(env, param)?;
        ratio::is_safe(
            env,
            collateral,
            principal,
            accumulated_fees,
            quote.price,
            quote.decimals,
            param.liquidation_ratio,
        )
    }
}

#[contractimpl]
impl IsCollateralLedger for CdpContract {
    fn deposit_collateral(
        env: &Env,
        owner: Address,
        depositor: Address,
        amount: i128,
        collateral_type: Symbol,
    ) -> Result<(), Error> {
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        depositor.require_auth();
        let param = ParamStore::get(env, collateral_type.clone())?;
        let mut position = PositionStore::get_by_owner(env, owner, collateral_type)?;

        let mut deposit = DepositLedger::get(env, position.id, depositor.clone())
            .unwrap_or_else(|| Deposit::new(position.id, depositor.clone(), 0));

        // Compute the new totals and check for overflow before we transfer
        let Some(new_collateral) = position.collateral.checked_add(amount) else {
            return Err(Error::ArithmeticError);
        };
        let Some(new_deposit) = deposit.amount.checked_add(amount) else {
            return Err(Error::ArithmeticError);
        };

        Self::transfer_collateral(
            env,
            &param,
            &depositor,
            &env.current_contract_address(),
            amount,
        )?;

        deposit.amount = new_deposit;
        position.collateral = new_collateral;
        DepositLedger::upsert(env, &deposit);
        PositionStore::set(env, &position);

        CollateralDeposited {
            collateral_type: position.collateral_type,
            id: position.id,
            depositor,
            amount,
            collateral: position.collateral,
            ledger: env.ledger().sequence(),
            timestamp: env.ledger().timestamp(),
        }
        .publish(env);
        Ok(())
    }

    fn withdraw_collateral(
        env: &Env,
        owner: Address,
        depositor: Address,
        amount: i128,
        collateral_type: Symbol,
    ) -> Result<(), Error> {
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        depositor.require_auth();
        let param = ParamStore::get(env, collateral_type.clone())?;
        let mut position = PositionStore::get_by_owner(env, owner, collateral_type)?;
        let mut deposit = DepositLedger::get(env, position.id, depositor.clone())
            .ok_or(Error::DepositNotFound)?;

        // A single deposit can never exceed the position it belongs to
        if deposit.amount > position.collateral {
            panic_with_error!(env, Error::CorruptedLedger);
        }

        // Depositors only ever withdraw from their own contribution
        if amount > deposit.amount {
            return Err(Error::InsufficientDeposit);
        }
        let Some(remaining) = position.collateral.checked_sub(amount) else {
            return Err(Error::ArithmeticError);
        };
        if remaining < 0 {
            return Err(Error::InsufficientDeposit);
        }

        if !Self::check_ratio(
            env,
            &param,
            remaining,
            position.principal,
            position.accumulated_fees,
        )? {
            log!(
                env,
                "withdrawal rejected: collateral ratio below minimum",
                position.id,
                amount
            );
            return Err(Error::InvalidCollateralRatio);
        }

        position.collateral = remaining;
        deposit.amount -= amount;

        Self::transfer_collateral(
            env,
            &param,
            &env.current_contract_address(),
            &depositor,
            amount,
        )?;

        // A drained deposit stays on record; only `delete_deposit` removes it
        PositionStore::set(env, &position);
        DepositLedger::upsert(env, &deposit);

        CollateralWithdrawn {
            collateral_type: position.collateral_type,
            id: position.id,
            depositor,
            amount,
            collateral: position.collateral,
            ledger: env.ledger().sequence(),
            timestamp: env.ledger().timestamp(),
        }
        .publish(env);
        Ok(())
    }

    fn get_deposit(env: &Env, position_id: u64, depositor: Address) -> Option<Deposit> {
        DepositLedger::get(env, position_id, depositor)
    }

    fn get_deposits(env: &Env, position_id: u64) -> Vec<Deposit> {
        DepositLedger::list(env, position_id)
    }

    fn position(env: &Env, collateral_type: Symbol, id: u64) -> Result<Position, Error> {
        PositionStore::get(env, collateral_type, id).ok_or(Error::PositionNotFound)
    }

    fn position_by_owner(
        env: &Env,
        owner: Address,
        collateral_type: Symbol,
    ) -> Result<Position, Error> {
        PositionStore::get_by_owner(env, owner, collateral_type)
    }

    fn collateralization_ratio(
        env: &Env,
        owner: Address,
        collateral_type: Symbol,
    ) -> Result<u32, Error> {
        let param = ParamStore::get(env, collateral_type.clone())?;
        let position = PositionStore::get_by_owner(env, owner, collateral_type)?;
        let quote = oracle::current_price(env, &param)?;
        ratio::collateralization_ratio(
            env,
            position.collateral,
            position.principal,
            position.accumulated_fees,
            quote.price,
            quote.decimals,
        )
    }
}

#[contractimpl]
impl IsCdpAdmin for CdpContract {
    fn open_position(
        env: &Env,
        owner: Address,
        collateral_type: Symbol,
        collateral: i128,
        principal: i128,
    ) -> Result<u64, Error> {
        Self::require_admin(env);
        owner.require_auth();
        if collateral <= 0 || principal < 0 {
            return Err(Error::InvalidAmount);
        }
        let param = ParamStore::get(env, collateral_type.clone())?;
        if PositionStore::has_owner(env, owner.clone(), collateral_type.clone()) {
            return Err(Error::PositionAlreadyExists);
        }
        if !Self::check_ratio(env, &param, collateral, principal, 0)? {
            return Err(Error::InvalidCollateralRatio);
        }

        Self::transfer_collateral(
            env,
            &param,
            &owner,
            &env.current_contract_address(),
            collateral,
        )?;

        let position = PositionStore::insert(
            env,
            owner.clone(),
            collateral_type.clone(),
            collateral,
            principal,
        );
        DepositLedger::upsert(env, &Deposit::new(position.id, owner.clone(), collateral));

        PositionOpened {
            collateral_type,
            id: position.id,
            owner,
            collateral,
            principal,
            ledger: env.ledger().sequence(),
            timestamp: env.ledger().timestamp(),
        }
        .publish(env);
        Ok(position.id)
    }

    fn record_debt(
        env: &Env,
        collateral_type: Symbol,
        id: u64,
        principal: i128,
        accumulated_fees: i128,
    ) -> Result<(), Error> {
        Self::require_admin(env);
        if principal < 0 || accumulated_fees < 0 {
            return Err(Error::InvalidAmount);
        }
        let mut position =
            PositionStore::get(env, collateral_type.clone(), id).ok_or(Error::PositionNotFound)?;
        position.principal = principal;
        position.accumulated_fees = accumulated_fees;
        PositionStore::set(env, &position);

        DebtRecorded {
            collateral_type,
            id,
            principal,
            accumulated_fees,
        }
        .publish(env);
        Ok(())
    }

    fn delete_deposit(env: &Env, position_id: u64, depositor: Address) -> Result<(), Error> {
        Self::require_admin(env);
        let Some(deposit) = DepositLedger::get(env, position_id, depositor.clone()) else {
            return Ok(());
        };

        // Whatever the record still holds leaves the position and escrow with it
        if deposit.amount > 0 {
            let mut position = PositionStore::get_by_id(env, position_id)
                .unwrap_or_else(|| panic_with_error!(env, Error::CorruptedLedger));
            if deposit.amount > position.collateral {
                panic_with_error!(env, Error::CorruptedLedger);
            }
            let param = ParamStore::get(env, position.collateral_type.clone())?;
            Self::transfer_collateral(
                env,
                &param,
                &env.current_contract_address(),
                &depositor,
                deposit.amount,
            )?;
            position.collateral -= deposit.amount;
            PositionStore::set(env, &position);
        }
        DepositLedger::delete(env, position_id, depositor.clone());

        DepositDeleted {
            id: position_id,
            depositor,
            amount: deposit.amount,
        }
        .publish(env);
        Ok(())
    }

    fn set_collateral_param(
        env: &Env,
        collateral_type: Symbol,
        param: CollateralParam,
    ) -> Result<(), Error> {
        Self::require_admin(env);
        ParamStore::set(env, collateral_type.clone(), &param)?;

        CollateralParamSet {
            collateral_type,
            liquidation_ratio: param.liquidation_ratio,
        }
        .publish(env);
        Ok(())
    }

    fn collateral_param(env: &Env, collateral_type: Symbol) -> Result<CollateralParam, Error> {
        ParamStore::get(env, collateral_type)
    }

    fn version(env: &Env) -> String {
        String::from_str(env, VERSION_STRING)
    }
}
