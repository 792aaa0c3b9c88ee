use anchor_lang::prelude::*;
use anchor_spl::token_2022::{self, Burn, MintTo, Token2022};
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::constants::CONFIG_SEED;
use crate::errors::KeelError;
use crate::state::{Config, UserAccount};

#[event]
pub struct CollateralDeposited {
    pub user: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
}

#[event]
pub struct CollateralRedeemed {
    pub redeem_from: Pubkey,
    pub redeem_to: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
}

#[event]
pub struct Liquidated {
    pub user: Pubkey,
    pub liquidator: Pubkey,
    pub mint: Pubkey,
    pub debt_repaid: u64,
    pub collateral_seized: u64,
}

/// Credit a deposit to the user and per-asset ledgers.
pub fn credit_collateral(
    config: &mut Config,
    user_account: &mut UserAccount,
    index: usize,
    mint: Pubkey,
    amount: u64,
) -> Result<()> {
    user_account.credit(index, amount)?;
    let asset = config
        .collaterals
        .get_mut(index)
        .ok_or(KeelError::UnsupportedCollateral)?;
    asset.total_deposited = asset
        .total_deposited
        .checked_add(amount)
        .ok_or(KeelError::MathOverflow)?;

    emit!(CollateralDeposited {
        user: user_account.owner,
        mint,
        amount,
    });

    Ok(())
}

/// Debit a redemption (or seizure) from the user and per-asset ledgers.
pub fn debit_collateral(
    config: &mut Config,
    user_account: &mut UserAccount,
    index: usize,
    mint: Pubkey,
    redeem_to: Pubkey,
    amount: u64,
) -> Result<()> {
    user_account.debit(index, amount)?;
    let asset = config
        .collaterals
        .get_mut(index)
        .ok_or(KeelError::UnsupportedCollateral)?;
    asset.total_deposited = asset
        .total_deposited
        .checked_sub(amount)
        .ok_or(KeelError::MathUnderflow)?;

    emit!(CollateralRedeemed {
        redeem_from: user_account.owner,
        redeem_to,
        mint,
        amount,
    });

    Ok(())
}

pub fn add_debt(config: &mut Config, user_account: &mut UserAccount, amount: u64) -> Result<()> {
    user_account.add_debt(amount)?;
    config.total_debt = config
        .total_debt
        .checked_add(amount)
        .ok_or(KeelError::MathOverflow)?;
    Ok(())
}

pub fn remove_debt(config: &mut Config, user_account: &mut UserAccount, amount: u64) -> Result<()> {
    user_account.remove_debt(amount)?;
    config.total_debt = config
        .total_debt
        .checked_sub(amount)
        .ok_or(KeelError::MathUnderflow)?;
    Ok(())
}

/// Pull collateral from the depositor's token account into the vault.
pub fn transfer_to_vault<'info>(
    from: &InterfaceAccount<'info, TokenAccount>,
    vault: &InterfaceAccount<'info, TokenAccount>,
    mint: &InterfaceAccount<'info, Mint>,
    owner: &Signer<'info>,
    token_program: &Interface<'info, TokenInterface>,
    amount: u64,
) -> Result<()> {
    transfer_checked(
        CpiContext::new(
            token_program.to_account_info(),
            TransferChecked {
                from: from.to_account_info(),
                mint: mint.to_account_info(),
                to: vault.to_account_info(),
                authority: owner.to_account_info(),
            },
        ),
        amount,
        mint.decimals,
    )
}

/// Release collateral from the vault, signed by the config PDA.
pub fn release_collateral<'info>(
    vault: &InterfaceAccount<'info, TokenAccount>,
    to: &InterfaceAccount<'info, TokenAccount>,
    mint: &InterfaceAccount<'info, Mint>,
    config: &Account<'info, Config>,
    token_program: &Interface<'info, TokenInterface>,
    amount: u64,
) -> Result<()> {
    let seeds = &[CONFIG_SEED, &[config.bump]];
    let signer_seeds = &[&seeds[..]];

    transfer_checked(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            TransferChecked {
                from: vault.to_account_info(),
                mint: mint.to_account_info(),
                to: to.to_account_info(),
                authority: config.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
        mint.decimals,
    )
}

/// Mint kUSD, signed by the config PDA (the sole mint authority).
pub fn mint_kusd<'info>(
    kusd_mint: &InterfaceAccount<'info, Mint>,
    to: &InterfaceAccount<'info, TokenAccount>,
    config: &Account<'info, Config>,
    token_program: &Program<'info, Token2022>,
    amount: u64,
) -> Result<()> {
    let seeds = &[CONFIG_SEED, &[config.bump]];
    let signer_seeds = &[&seeds[..]];

    token_2022::mint_to(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            MintTo {
                mint: kusd_mint.to_account_info(),
                to: to.to_account_info(),
                authority: config.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )
}

/// Burn kUSD from the holder's token account.
pub fn burn_kusd<'info>(
    kusd_mint: &InterfaceAccount<'info, Mint>,
    from: &InterfaceAccount<'info, TokenAccount>,
    holder: &Signer<'info>,
    token_program: &Program<'info, Token2022>,
    amount: u64,
) -> Result<()> {
    token_2022::burn(
        CpiContext::new(
            token_program.to_account_info(),
            Burn {
                mint: kusd_mint.to_account_info(),
                from: from.to_account_info(),
                authority: holder.to_account_info(),
            },
        ),
        amount,
    )
}
