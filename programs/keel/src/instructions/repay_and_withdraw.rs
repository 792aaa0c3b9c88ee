use anchor_lang::prelude::*;
use anchor_spl::token_2022::Token2022;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::*;
use crate::errors::KeelError;
use crate::health;
use crate::instructions::shared;
use crate::state::{Config, UserAccount};

/// Burn kUSD and withdraw collateral in one transaction. Debt is settled
/// first so the withdrawal's solvency check sees maximal headroom.
/// Remaining accounts must carry one price update per registered asset,
/// in registration order.
#[derive(Accounts)]
pub struct RepayAndWithdraw<'info> {
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
        seeds = [KUSD_MINT_SEED],
        bump
    )]
    pub kusd_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        seeds = [USER_SEED, owner.key().as_ref()],
        bump = user_account.bump,
        has_one = owner @ KeelError::Unauthorized
    )]
    pub user_account: Box<Account<'info, UserAccount>>,

    /// kUSD is burned from here
    #[account(
        mut,
        token::mint = kusd_mint,
        token::authority = owner,
    )]
    pub owner_kusd: Box<InterfaceAccount<'info, TokenAccount>>,

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

    pub token_program: Program<'info, Token2022>,
    pub collateral_token_program: Interface<'info, TokenInterface>,
}

pub fn handler(
    ctx: Context<RepayAndWithdraw>,
    repay_amount: u64,
    collateral_amount: u64,
) -> Result<()> {
    require!(repay_amount > 0, KeelError::ZeroAmount);
    require!(collateral_amount > 0, KeelError::ZeroAmount);

    let mint_key = ctx.accounts.collateral_mint.key();
    let index = ctx
        .accounts
        .config
        .collateral_index(&mint_key)
        .ok_or(KeelError::UnsupportedCollateral)?;

    shared::remove_debt(
        &mut ctx.accounts.config,
        &mut ctx.accounts.user_account,
        repay_amount,
    )?;
    shared::burn_kusd(
        &ctx.accounts.kusd_mint,
        &ctx.accounts.owner_kusd,
        &ctx.accounts.owner,
        &ctx.accounts.token_program,
        repay_amount,
    )?;

    shared::debit_collateral(
        &mut ctx.accounts.config,
        &mut ctx.accounts.user_account,
        index,
        mint_key,
        ctx.accounts.owner.key(),
        collateral_amount,
    )?;
    shared::release_collateral(
        &ctx.accounts.vault,
        &ctx.accounts.owner_token,
        &ctx.accounts.collateral_mint,
        &ctx.accounts.config,
        &ctx.accounts.collateral_token_program,
        collateral_amount,
    )?;

    health::check_health_factor(
        &ctx.accounts.config,
        &ctx.accounts.user_account,
        ctx.remaining_accounts,
    )?;

    msg!(
        "Repaid {} kUSD and withdrew {} of {}",
        repay_amount,
        collateral_amount,
        mint_key
    );

    Ok(())
}
