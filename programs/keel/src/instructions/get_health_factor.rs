use anchor_lang::prelude::*;

use crate::constants::*;
use crate::health;
use crate::state::{Config, UserAccount};

/// Read-only view of a position's health factor, e.g. for liquidators
/// deciding whether to act. Remaining accounts must carry one price update
/// per registered asset, in registration order.
#[derive(Accounts)]
pub struct GetHealthFactor<'info> {
    /// Owner of the position being inspected
    /// CHECK: only used for PDA derivation
    pub user: UncheckedAccount<'info>,

    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
        seeds = [USER_SEED, user.key().as_ref()],
        bump = user_account.bump
    )]
    pub user_account: Box<Account<'info, UserAccount>>,
}

pub fn handler(ctx: Context<GetHealthFactor>) -> Result<u128> {
    let factor = health::health_factor(
        &ctx.accounts.config,
        &ctx.accounts.user_account,
        ctx.remaining_accounts,
    )?;

    msg!(
        "health factor for {}: {}",
        ctx.accounts.user_account.owner,
        factor
    );

    Ok(factor)
}
