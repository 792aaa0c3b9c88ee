use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::*;
use crate::errors::KeelError;
use crate::health;
use crate::instructions::shared;
use crate::state::{Config, UserAccount};

/// Withdraw collateral from the caller's position. Remaining accounts must
/// carry one price update per registered asset, in registration order.
#[derive(Accounts)]
pub struct WithdrawCollateral<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Box<Account<'info, Config>>,

    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        seeds = [USER_SEED, owner.key().as_ref()],
        bump = user_account.bump,
        has_one = owner @ KeelError::Unauthorized
    )]
    pub user_account: Box<Account<'info, UserAccount>>,

    /// Receives the withdrawn collateral
    #[account(
        mut,
        token::mint = collateral_mint,
        token::authority = owner,
    )]
    pub owner_token: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [VAULT_SEED, collateral_mint.key().as_ref()],
        bump,
        token::mint = collateral_mint,
        token::authority = config,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn handler(ctx: Context<WithdrawCollateral>, amount: u64) -> Result<()> {
    require!(amount > 0, KeelError::ZeroAmount);

    let mint_key = ctx.accounts.collateral_mint.key();
    let index = ctx
        .accounts
        .config
        .collateral_index(&mint_key)
        .ok_or(KeelError::UnsupportedCollateral)?;

    shared::debit_collateral(
        &mut ctx.accounts.config,
        &mut ctx.accounts.user_account,
        index,
        mint_key,
        ctx.accounts.owner.key(),
        amount,
    )?;

    shared::release_collateral(
        &ctx.accounts.vault,
        &ctx.accounts.owner_token,
        &ctx.accounts.collateral_mint,
        &ctx.accounts.config,
        &ctx.accounts.token_program,
        amount,
    )?;

    // an unhealthy post-withdrawal position aborts the whole operation,
    // ledger debit and transfer included
    health::check_health_factor(
        &ctx.accounts.config,
        &ctx.accounts.user_account,
        ctx.remaining_accounts,
    )?;

    msg!(
        "Withdrew {} of {}, position now holds {}",
        amount,
        mint_key,
        ctx.accounts.user_account.deposited(index)
    );

    Ok(())
}
