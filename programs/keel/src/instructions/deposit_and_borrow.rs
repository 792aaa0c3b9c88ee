use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_2022::Token2022;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::*;
use crate::errors::KeelError;
use crate::health;
use crate::instructions::shared;
use crate::state::{Config, UserAccount};

/// Deposit collateral and mint kUSD in one transaction. Remaining accounts
/// must carry one price update per registered asset, in registration order.
#[derive(Accounts)]
pub struct DepositAndBorrow<'info> {
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

    /// Borrower's kUSD token account (receives minted tokens)
    #[account(
        init_if_needed,
        payer = owner,
        associated_token::mint = kusd_mint,
        associated_token::authority = owner,
        associated_token::token_program = token_program,
    )]
    pub owner_kusd: Box<InterfaceAccount<'info, TokenAccount>>,

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
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<DepositAndBorrow>,
    collateral_amount: u64,
    borrow_amount: u64,
) -> Result<()> {
    require!(collateral_amount > 0, KeelError::ZeroAmount);
    require!(borrow_amount > 0, KeelError::ZeroAmount);

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

    shared::credit_collateral(
        &mut ctx.accounts.config,
        user_account,
        index,
        mint_key,
        collateral_amount,
    )?;
    shared::add_debt(
        &mut ctx.accounts.config,
        &mut ctx.accounts.user_account,
        borrow_amount,
    )?;

    // one check against the net position
    health::check_health_factor(
        &ctx.accounts.config,
        &ctx.accounts.user_account,
        ctx.remaining_accounts,
    )?;

    shared::transfer_to_vault(
        &ctx.accounts.owner_token,
        &ctx.accounts.vault,
        &ctx.accounts.collateral_mint,
        &ctx.accounts.owner,
        &ctx.accounts.collateral_token_program,
        collateral_amount,
    )?;
    shared::mint_kusd(
        &ctx.accounts.kusd_mint,
        &ctx.accounts.owner_kusd,
        &ctx.accounts.config,
        &ctx.accounts.token_program,
        borrow_amount,
    )?;

    msg!(
        "Deposited {} of {} and minted {} kUSD",
        collateral_amount,
        mint_key,
        borrow_amount
    );

    Ok(())
}
