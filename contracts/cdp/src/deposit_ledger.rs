use soroban_sdk::{Address, Env, Vec, panic_with_error};

use crate::{
    Error,
    storage::{DataKey, Deposit, set_and_extend},
};

/// Per-depositor collateral contributions, keyed by `(position_id, depositor)`.
///
/// Enumeration order comes from an explicit append-only index per position:
/// the first depositor seen holds the first slot and later depositors are
/// appended. Updating an existing deposit never moves it. This type performs
/// no business validation; keeping the position total equal to the sum of its
/// deposits is up to the caller.
pub struct DepositLedger;

impl DepositLedger {
    pub fn get(env: &Env, position_id: u64, depositor: Address) -> Option<Deposit> {
        env.storage()
            .persistent()
            .get(&DataKey::Deposit(position_id, depositor))
    }

    /// Deposits of a position in first-seen order. Empty if there are none.
    pub fn list(env: &Env, position_id: u64) -> Vec<Deposit> {
        let mut deposits = Vec::new(env);
        for depositor in Self::depositors(env, position_id).iter() {
            let deposit = Self::get(env, position_id, depositor)
                .unwrap_or_else(|| panic_with_error!(env, Error::CorruptedLedger));
            deposits.push_back(deposit);
        }
        deposits
    }

    /// Create the deposit, appending the depositor to the order index, or
    /// overwrite the amount of an existing one in place.
    pub fn upsert(env: &Env, deposit: &Deposit) {
        let key = DataKey::Deposit(deposit.position_id, deposit.depositor.clone());
        if !env.storage().persistent().has(&key) {
            let mut depositors = Self::depositors(env, deposit.position_id);
            depositors.push_back(deposit.depositor.clone());
            set_and_extend(env, &DataKey::Depositors(deposit.position_id), &depositors);
        }
        set_and_extend(env, &key, deposit);
    }

    /// Remove the deposit and its index entry. No-op when absent.
    pub fn delete(env: &Env, position_id: u64, depositor: Address) {
        let key = DataKey::Deposit(position_id, depositor.clone());
        if !env.storage().persistent().has(&key) {
            return;
        }
        env.storage().persistent().remove(&key);

        let mut depositors = Self::depositors(env, position_id);
        if let Some(index) = depositors.first_index_of(&depositor) {
            depositors.remove(index);
        }
        if depositors.is_empty() {
            env.storage()
                .persistent()
                .remove(&DataKey::Depositors(position_id));
        } else {
            set_and_extend(env, &DataKey::Depositors(position_id), &depositors);
        }
    }

    /// Sum of all deposit amounts for a position. Walks every record, so it is
    /// meant for consistency checks rather than regular reads.
    pub fn total(env: &Env, position_id: u64) -> Option<i128> {
        Self::list(env, position_id)
            .iter()
            .try_fold(0i128, |sum, deposit| sum.checked_add(deposit.amount))
    }

    fn depositors(env: &Env, position_id: u64) -> Vec<Address> {
        env.storage()
            .persistent()
            .get(&DataKey::Depositors(position_id))
            .unwrap_or_else(|| Vec::new(env))
    }
}
