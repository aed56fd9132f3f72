use soroban_sdk::{Address, Env, Symbol, panic_with_error};

use crate::{
    Error,
    storage::{CdpStorage, DataKey, Position, set_and_extend},
};

/// Durable positions keyed by `(collateral_type, id)`, with an owner index
/// used to resolve the position a caller acts on.
pub struct PositionStore;

impl PositionStore {
    pub fn get(env: &Env, collateral_type: Symbol, id: u64) -> Option<Position> {
        env.storage()
            .persistent()
            .get(&DataKey::Position(collateral_type, id))
    }

    /// Resolve a position from its id alone, through the id's collateral type.
    pub fn get_by_id(env: &Env, id: u64) -> Option<Position> {
        let collateral_type: Symbol = env
            .storage()
            .persistent()
            .get(&DataKey::PositionType(id))?;
        Self::get(env, collateral_type, id)
    }

    pub fn get_by_owner(
        env: &Env,
        owner: Address,
        collateral_type: Symbol,
    ) -> Result<Position, Error> {
        let id: u64 = env
            .storage()
            .persistent()
            .get(&DataKey::OwnerPosition(owner, collateral_type.clone()))
            .ok_or(Error::PositionNotFound)?;
        // An indexed id without a record means storage was tampered with
        let position = Self::get(env, collateral_type, id)
            .unwrap_or_else(|| panic_with_error!(env, Error::CorruptedLedger));
        Ok(position)
    }

    pub fn has_owner(env: &Env, owner: Address, collateral_type: Symbol) -> bool {
        env.storage()
            .persistent()
            .has(&DataKey::OwnerPosition(owner, collateral_type))
    }

    /// Full replace. Invariants are the caller's responsibility.
    pub fn set(env: &Env, position: &Position) {
        set_and_extend(
            env,
            &DataKey::Position(position.collateral_type.clone(), position.id),
            position,
        );
    }

    /// Allocate the next id and persist a new position together with its owner index entry.
    pub fn insert(
        env: &Env,
        owner: Address,
        collateral_type: Symbol,
        collateral: i128,
        principal: i128,
    ) -> Position {
        let mut state = CdpStorage::get_state(env);
        let id = state.next_position_id;
        let Some(next_id) = id.checked_add(1) else {
            panic_with_error!(env, Error::ArithmeticError);
        };
        state.next_position_id = next_id;
        CdpStorage::set_state(env, &state);

        let position = Position {
            id,
            collateral_type: collateral_type.clone(),
            owner: owner.clone(),
            collateral,
            principal,
            accumulated_fees: 0,
        };
        Self::set(env, &position);
        set_and_extend(env, &DataKey::PositionType(id), &collateral_type);
        set_and_extend(env, &DataKey::OwnerPosition(owner, collateral_type), &id);
        position
    }
}
