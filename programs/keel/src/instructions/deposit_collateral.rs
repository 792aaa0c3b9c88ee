use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::*;
use crate::errors::KeelError;
use crate::instructions::shared;
use crate::state::{Config, UserAccount};

/// Deposit registered collateral into the caller's position
#[derive(Accounts)]
pub struct DepositCollateral<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Box<Account<'info, Config>>,

    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Position ledger, created on first deposit
    #[account(
        init_if_needed,
        payer = owner,
        space = UserAccount::LEN,
        seeds = [USER_SEED, owner.key().as_ref()],
        bump
    )]
    pub user_account: Box<Account<'info, UserAccount>>,

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
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<DepositCollateral>, amount: u64) -> Result<()> {
    require!(amount > 0, KeelError::ZeroAmount);

    let mint_key = ctx.accounts.collateral_mint.key();
    let index = ctx
        .accounts
        .config
        .collateral_index(&mint_key)
        .ok_or(KeelError::UnsupportedCollateral)?;

    let user_account = &mut ctx.accounts.user_account;
    if !user_account.is_initialized {
        user_account.initialize(
            ctx.accounts.owner.key(),
            ctx.accounts.config.collaterals.len(),
            ctx.bumps.user_account,
        );
    }

    shared::credit_collateral(&mut ctx.accounts.config, user_account, index, mint_key, amount)?;

    shared::transfer_to_vault(
        &ctx.accounts.owner_token,
        &ctx.accounts.vault,
        &ctx.accounts.collateral_mint,
        &ctx.accounts.owner,
        &ctx.accounts.token_program,
        amount,
    )?;

    msg!(
        "Deposited {} of {}, position now holds {}",
        amount,
        mint_key,
        ctx.accounts.user_account.deposited(index)
    );

    Ok(())
}
