use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::*;
use crate::errors::KeelError;
use crate::state::Config;

/// Create the custody vault for one registered collateral mint. This is
/// account plumbing, not registration: unregistered mints are rejected.
#[derive(Accounts)]
pub struct InitCollateralVault<'info> {
    #[account(
        mut,
        address = config.authority @ KeelError::Unauthorized
    )]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Box<Account<'info, Config>>,

    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Vault token account holding all deposits of this asset
    #[account(
        init,
        payer = authority,
        seeds = [VAULT_SEED, collateral_mint.key().as_ref()],
        bump,
        token::mint = collateral_mint,
        token::authority = config,
        token::token_program = token_program,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitCollateralVault>) -> Result<()> {
    let mint_key = ctx.accounts.collateral_mint.key();
    let config = &mut ctx.accounts.config;
    let index = config
        .collateral_index(&mint_key)
        .ok_or(KeelError::UnsupportedCollateral)?;

    config.collaterals[index].decimals = ctx.accounts.collateral_mint.decimals;

    msg!("vault created for collateral mint {}", mint_key);

    Ok(())
}
