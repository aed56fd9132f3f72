#![no_std]

pub mod cdp;
pub mod collateralized;
pub mod deposit_ledger;
mod error;
mod events;
pub mod oracle;
pub mod params;
pub mod position_store;
pub mod ratio;
pub mod storage;

pub use cdp::{CdpContract, CdpContractClient};
pub use error::Error;
pub use params::CollateralParam;
pub use storage::{Deposit, Position};
