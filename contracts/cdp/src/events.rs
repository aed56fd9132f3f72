use soroban_sdk::{Address, Symbol, contractevent};

#[contractevent(topics = ["cdp_opened"])]
pub struct PositionOpened {
    #[topic]
    pub collateral_type: Symbol,
    #[topic]
    pub id: u64,
    pub owner: Address,
    pub collateral: i128,
    pub principal: i128,
    pub ledger: u32,
    pub timestamp: u64,
}

#[contractevent(topics = ["cdp_deposit"])]
pub struct CollateralDeposited {
    #[topic]
    pub collateral_type: Symbol,
    #[topic]
    pub id: u64,
    pub depositor: Address,
    pub amount: i128,
    /// Position collateral after the deposit
    pub collateral: i128,
    pub ledger: u32,
    pub timestamp: u64,
}

#[contractevent(topics = ["cdp_withdrawal"])]
pub struct CollateralWithdrawn {
    #[topic]
    pub collateral_type: Symbol,
    #[topic]
    pub id: u64,
    pub depositor: Address,
    pub amount: i128,
    /// Position collateral after the withdrawal
    pub collateral: i128,
    pub ledger: u32,
    pub timestamp: u64,
}

#[contractevent(topics = ["deposit_deleted"])]
pub struct DepositDeleted {
    #[topic]
    pub id: u64,
    pub depositor: Address,
    pub amount: i128,
}

#[contractevent(topics = ["debt_recorded"])]
pub struct DebtRecorded {
    #[topic]
    pub collateral_type: Symbol,
    #[topic]
    pub id: u64,
    pub principal: i128,
    pub accumulated_fees: i128,
}

#[contractevent(topics = ["collateral_param"], data_format = "single-value")]
pub struct CollateralParamSet {
    #[topic]
    pub collateral_type: Symbol,
    pub liquidation_ratio: u32,
}
