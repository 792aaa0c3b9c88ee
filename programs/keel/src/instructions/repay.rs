use anchor_lang::prelude::*;
use anchor_spl::token_2022::Token2022;
use anchor_spl::token_interface::{Mint, TokenAccount};

use crate::constants::*;
use crate::errors::KeelError;
use crate::instructions::shared;
use crate::state::{Config, UserAccount};

/// Burn kUSD to reduce debt
#[derive(Accounts)]
pub struct Repay<'info> {
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

    /// kUSD is burned from here
    #[account(
        mut,
        token::mint = kusd_mint,
        token::authority = owner,
    )]
    pub owner_kusd: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Program<'info, Token2022>,
}

pub fn handler(ctx: Context<Repay>, amount: u64) -> Result<()> {
    require!(amount > 0, KeelError::ZeroAmount);

    shared::remove_debt(&mut ctx.accounts.config, &mut ctx.accounts.user_account, amount)?;

    // repaying can only raise the health factor, so no post-check here
    shared::burn_kusd(
        &ctx.accounts.kusd_mint,
        &ctx.accounts.owner_kusd,
        &ctx.accounts.owner,
        &ctx.accounts.token_program,
        amount,
    )?;

    msg!(
        "Repaid {} kUSD, debt now {}",
        amount,
        ctx.accounts.user_account.debt
    );

    Ok(())
}
