use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// No position exists for the given owner and collateral type
    PositionNotFound = 1,

    /// Depositor has no recorded contribution to the position
    DepositNotFound = 2,

    /// Withdrawal exceeds the depositor's own deposit or the position's collateral
    InsufficientDeposit = 3,

    /// Resulting collateralization ratio would fall below the minimum
    InvalidCollateralRatio = 4,

    /// Collateral transfer failed, usually because the source account lacks funds
    InsufficientFunds = 5,

    /// Collateral type has no parameters configured
    CollateralTypeNotFound = 6,

    /// Owner already has a position for this collateral type
    PositionAlreadyExists = 7,

    /// Amount must be greater than zero (debt values must not be negative)
    InvalidAmount = 8,

    /// Price feed returned no usable price for the collateral
    PriceNotFound = 9,

    /// Arithmetic overflow or underflow occurred
    ArithmeticError = 10,

    /// Collateral parameters are malformed
    InvalidParam = 11,

    /// Position collateral and deposit records disagree
    CorruptedLedger = 12,

    /// Price feed quotes with more decimals than the ratio check supports
    UnsupportedPriceDecimals = 13,
}
