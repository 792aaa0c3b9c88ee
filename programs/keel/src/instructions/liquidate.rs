use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_2022::Token2022;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::*;
use crate::errors::KeelError;
use crate::health;
use crate::instructions::shared::{self, Liquidated};
use crate::state::{Config, UserAccount};

/// Liquidate an undercollateralized position. Anyone can call. Remaining
/// accounts must carry one price update per registered asset, in
/// registration order.
#[derive(Accounts)]
pub struct Liquidate<'info> {
    #[account(mut)]
    pub liquidator: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Box<Account<'info, Config>>,

    /// Collateral asset the liquidator is paid in
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Owner of the position being liquidated
    /// CHECK: only used for PDA derivation
    pub user: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [USER_SEED, user.key().as_ref()],
        bump = user_account.bump
    )]
    pub user_account: Box<Account<'info, UserAccount>>,

    #[account(
        mut,
        seeds = [KUSD_MINT_SEED],
        bump
    )]
    pub kusd_mint: Box<InterfaceAccount<'info, Mint>>,

    /// The repaid debt is burned from here
    #[account(
        mut,
        token::mint = kusd_mint,
        token::authority = liquidator,
    )]
    pub liquidator_kusd: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [VAULT_SEED, collateral_mint.key().as_ref()],
        bump,
        token::mint = collateral_mint,
        token::authority = config,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Receives the seized collateral plus bonus
    #[account(
        init_if_needed,
        payer = liquidator,
        associated_token::mint = collateral_mint,
        associated_token::authority = liquidator,
        associated_token::token_program = collateral_token_program,
    )]
    pub liquidator_token: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Program<'info, Token2022>,
    pub collateral_token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Liquidate>, debt_to_cover: u64) -> Result<()> {
    require!(debt_to_cover > 0, KeelError::ZeroAmount);

    let mint_key = ctx.accounts.collateral_mint.key();
    let index = ctx
        .accounts
        .config
        .collateral_index(&mint_key)
        .ok_or(KeelError::UnsupportedCollateral)?;

    let starting_factor = health::health_factor(
        &ctx.accounts.config,
        &ctx.accounts.user_account,
        ctx.remaining_accounts,
    )?;
    require!(
        starting_factor < MIN_HEALTH_FACTOR,
        KeelError::PositionHealthy
    );
    require!(
        debt_to_cover <= ctx.accounts.user_account.debt,
        KeelError::InsufficientDebt
    );

    let asset = &ctx.accounts.config.collaterals[index];
    let price = health::read_price(&ctx.remaining_accounts[index], &asset.feed_id)?;
    let (base, bonus) = health::seizure_for_debt(debt_to_cover, price, asset.decimals)?;
    let seized = base.checked_add(bonus).ok_or(KeelError::MathOverflow)?;
    require!(
        seized <= ctx.accounts.user_account.deposited(index),
        KeelError::InsufficientCollateralForBonus
    );

    shared::debit_collateral(
        &mut ctx.accounts.config,
        &mut ctx.accounts.user_account,
        index,
        mint_key,
        ctx.accounts.liquidator.key(),
        seized,
    )?;
    shared::remove_debt(
        &mut ctx.accounts.config,
        &mut ctx.accounts.user_account,
        debt_to_cover,
    )?;

    shared::release_collateral(
        &ctx.accounts.vault,
        &ctx.accounts.liquidator_token,
        &ctx.accounts.collateral_mint,
        &ctx.accounts.config,
        &ctx.accounts.collateral_token_program,
        seized,
    )?;
    shared::burn_kusd(
        &ctx.accounts.kusd_mint,
        &ctx.accounts.liquidator_kusd,
        &ctx.accounts.liquidator,
        &ctx.accounts.token_program,
        debt_to_cover,
    )?;

    let ending_factor = health::health_factor(
        &ctx.accounts.config,
        &ctx.accounts.user_account,
        ctx.remaining_accounts,
    )?;
    require!(
        ending_factor >= starting_factor,
        KeelError::LiquidationIneffective
    );

    emit!(Liquidated {
        user: ctx.accounts.user.key(),
        liquidator: ctx.accounts.liquidator.key(),
        mint: mint_key,
        debt_repaid: debt_to_cover,
        collateral_seized: seized,
    });

    msg!(
        "Liquidated {} kUSD of debt for {} collateral, factor {} -> {}",
        debt_to_cover,
        seized,
        starting_factor,
        ending_factor
    );

    Ok(())
}
