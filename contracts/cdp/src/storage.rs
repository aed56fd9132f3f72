use soroban_sdk::{Address, Env, IntoVal, Symbol, Val, contracttype, symbol_short};

pub(crate) const ADMIN_KEY: Symbol = symbol_short!("ADMIN");

// Instance storage
const STORAGE: Symbol = symbol_short!("STORAGE");

// Persistent storage keys
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Position record, keyed by collateral type and position id
    Position(Symbol, u64),
    /// Owner index: each owner holds at most one position per collateral type
    OwnerPosition(Address, Symbol),
    /// Collateral type of a position id
    PositionType(u64),
    /// One depositor's contribution to a position
    Deposit(u64, Address),
    /// Depositors of a position in first-seen order
    Depositors(u64),
    /// Risk parameters of a collateral type
    CollateralParam(Symbol),
}

/// Collateralized Debt Position. `collateral` always equals the sum of the
/// position's deposits.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    pub id: u64,
    pub collateral_type: Symbol,
    pub owner: Address,
    /// Amount of the collateral token held in escrow for this position
    pub collateral: i128,
    /// Outstanding debt, in the unit of account
    pub principal: i128,
    /// Fees accrued on the debt and not yet paid, in the unit of account
    pub accumulated_fees: i128,
}

impl Position {
    /// Debt the collateral must cover: principal plus accrued fees.
    pub fn total_debt(&self) -> Option<i128> {
        self.principal.checked_add(self.accumulated_fees)
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deposit {
    pub position_id: u64,
    pub depositor: Address,
    pub amount: i128,
}

impl Deposit {
    #[must_use]
    pub fn new(position_id: u64, depositor: Address, amount: i128) -> Self {
        Deposit {
            position_id,
            depositor,
            amount,
        }
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CdpStorage {
    /// Id handed to the next opened position
    pub next_position_id: u64,
}

impl CdpStorage {
    /// Get current state of the contract
    pub fn get_state(env: &Env) -> CdpStorage {
        env.storage()
            .instance()
            .get(&STORAGE)
            .expect("contract not initialized")
    }

    pub fn set_state(env: &Env, storage: &CdpStorage) {
        env.storage().instance().set(&STORAGE, storage);
    }
}

/// Write a persistent entry and extend its TTL to the maximum.
pub(crate) fn set_and_extend<V: IntoVal<Env, Val>>(env: &Env, key: &DataKey, value: &V) {
    env.storage().persistent().set(key, value);
    let ttl = env.storage().max_ttl();
    env.storage().persistent().extend_ttl(key, ttl, ttl);
}
