use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_2022::Token2022;
use anchor_spl::token_interface::{Mint, TokenAccount};

use crate::constants::*;
use crate::errors::KeelError;
use crate::health;
use crate::instructions::shared;
use crate::state::{Config, UserAccount};

/// Mint kUSD against collateral. Remaining accounts must carry one price
/// update per registered asset, in registration order.
#[derive(Accounts)]
pub struct Borrow<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Box<Account<'info, Config>>,

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

    /// Borrower's kUSD token account (receives minted tokens)
    #[account(
        init_if_needed,
        payer = owner,
        associated_token::mint = kusd_mint,
        associated_token::authority = owner,
        associated_token::token_program = token_program,
    )]
    pub owner_kusd: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Program<'info, Token2022>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Borrow>, amount: u64) -> Result<()> {
    require!(amount > 0, KeelError::ZeroAmount);

    shared::add_debt(&mut ctx.accounts.config, &mut ctx.accounts.user_account, amount)?;

    // validated against the net position; a broken factor aborts the
    // whole transaction, debt increment included
    health::check_health_factor(
        &ctx.accounts.config,
        &ctx.accounts.user_account,
        ctx.remaining_accounts,
    )?;

    shared::mint_kusd(
        &ctx.accounts.kusd_mint,
        &ctx.accounts.owner_kusd,
        &ctx.accounts.config,
        &ctx.accounts.token_program,
        amount,
    )?;

    msg!(
        "Minted {} kUSD, debt now {}",
        amount,
        ctx.accounts.user_account.debt
    );

    Ok(())
}
