pub mod initialize;
pub use initialize::*;

pub mod init_collateral_vault;
pub use init_collateral_vault::*;

pub mod deposit_collateral;
pub use deposit_collateral::*;

pub mod borrow;
pub use borrow::*;

pub mod deposit_and_borrow;
pub use deposit_and_borrow::*;

pub mod repay;
pub use repay::*;

pub mod withdraw_collateral;
pub use withdraw_collateral::*;

pub mod repay_and_withdraw;
pub use repay_and_withdraw::*;

pub mod liquidate;
pub use liquidate::*;

pub mod get_health_factor;
pub use get_health_factor::*;

pub mod shared;
pub use shared::*;
