use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod health;
pub mod instructions;
pub mod state;

use instructions::*;

declare_id!("KeeL111111111111111111111111111111111111111");

/// Keel Protocol - over-collateralized kUSD issuance on Solana
///
/// Users lock registered SPL collateral and mint kUSD (a USD-pegged
/// synthetic) against it. Every operation that can reduce solvency
/// re-checks the position's health factor at live oracle prices:
/// - threshold-adjusted collateral value over debt, 1e18 precision
/// - positions below 1.0 can be liquidated by anyone for a 10% bonus
///
/// Instructions that value collateral expect one Pyth price update per
/// registered asset in `remaining_accounts`, in registration order.
#[program]
pub mod keel {
    use super::*;

    /// Register the collateral asset list and create the kUSD mint.
    /// Can only be called once; the list is immutable afterwards.
    ///
    /// # Arguments
    /// * `collateral_mints` - approved collateral mints, in order
    /// * `price_feed_ids` - hex Pyth feed id per mint, same order
    pub fn initialize(
        ctx: Context<Initialize>,
        collateral_mints: Vec<Pubkey>,
        price_feed_ids: Vec<String>,
    ) -> Result<()> {
        instructions::initialize::handler(ctx, collateral_mints, price_feed_ids)
    }

    /// Create the custody vault for a registered collateral mint
    pub fn init_collateral_vault(ctx: Context<InitCollateralVault>) -> Result<()> {
        instructions::init_collateral_vault::handler(ctx)
    }

    /// Deposit registered collateral into the caller's position
    ///
    /// # Arguments
    /// * `amount` - native token units to deposit
    pub fn deposit_collateral(ctx: Context<DepositCollateral>, amount: u64) -> Result<()> {
        instructions::deposit_collateral::handler(ctx, amount)
    }

    /// Mint kUSD against the caller's collateral
    /// Fails if the resulting health factor drops below minimum
    ///
    /// # Arguments
    /// * `amount` - kUSD units to mint (6 decimals)
    pub fn borrow(ctx: Context<Borrow>, amount: u64) -> Result<()> {
        instructions::borrow::handler(ctx, amount)
    }

    /// Deposit collateral and mint kUSD in one transaction; solvency is
    /// checked once, against the net position
    pub fn deposit_and_borrow(
        ctx: Context<DepositAndBorrow>,
        collateral_amount: u64,
        borrow_amount: u64,
    ) -> Result<()> {
        instructions::deposit_and_borrow::handler(ctx, collateral_amount, borrow_amount)
    }

    /// Burn kUSD to reduce the caller's debt
    ///
    /// # Arguments
    /// * `amount` - kUSD units to burn (6 decimals)
    pub fn repay(ctx: Context<Repay>, amount: u64) -> Result<()> {
        instructions::repay::handler(ctx, amount)
    }

    /// Withdraw collateral; the remaining position must stay healthy
    ///
    /// # Arguments
    /// * `amount` - native token units to withdraw
    pub fn withdraw_collateral(ctx: Context<WithdrawCollateral>, amount: u64) -> Result<()> {
        instructions::withdraw_collateral::handler(ctx, amount)
    }

    /// Burn kUSD and withdraw collateral in one transaction; debt is
    /// settled first so the withdrawal sees maximal headroom
    pub fn repay_and_withdraw(
        ctx: Context<RepayAndWithdraw>,
        repay_amount: u64,
        collateral_amount: u64,
    ) -> Result<()> {
        instructions::repay_and_withdraw::handler(ctx, repay_amount, collateral_amount)
    }

    /// Repay part of an unhealthy position's debt in exchange for its
    /// collateral plus a bonus. Anyone can call.
    ///
    /// # Arguments
    /// * `debt_to_cover` - kUSD units to repay on the target's behalf
    pub fn liquidate(ctx: Context<Liquidate>, debt_to_cover: u64) -> Result<()> {
        instructions::liquidate::handler(ctx, debt_to_cover)
    }

    /// Read-only view of a position's current health factor
    pub fn get_health_factor(ctx: Context<GetHealthFactor>) -> Result<u128> {
        instructions::get_health_factor::handler(ctx)
    }
}
