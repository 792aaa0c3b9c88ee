use anchor_lang::prelude::*;
use anchor_spl::token_2022::Token2022;
use anchor_spl::token_interface::Mint;
use pyth_solana_receiver_sdk::price_update::get_feed_id_from_hex;

use crate::constants::*;
use crate::errors::KeelError;
use crate::state::{CollateralAsset, Config};

/// Create the protocol config and the kUSD mint
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Deployer; recorded as the vault-creation authority
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Global protocol config PDA
    #[account(
        init,
        payer = authority,
        space = Config::LEN,
        seeds = [CONFIG_SEED],
        bump
    )]
    pub config: Box<Account<'info, Config>>,

    /// kUSD stablecoin mint (Token-2022), mint authority = config
    #[account(
        init,
        payer = authority,
        seeds = [KUSD_MINT_SEED],
        bump,
        mint::decimals = KUSD_DECIMALS,
        mint::authority = config,
        mint::token_program = token_program,
    )]
    pub kusd_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Token-2022 program
    pub token_program: Program<'info, Token2022>,

    /// System program
    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<Initialize>,
    collateral_mints: Vec<Pubkey>,
    price_feed_ids: Vec<String>,
) -> Result<()> {
    require!(
        collateral_mints.len() == price_feed_ids.len(),
        KeelError::LengthMismatch
    );
    require!(
        collateral_mints.len() <= MAX_COLLATERAL_ASSETS,
        KeelError::TooManyCollaterals
    );

    // Register every pair, in the order given. The list never changes
    // after this point.
    let mut collaterals: Vec<CollateralAsset> = Vec::with_capacity(collateral_mints.len());
    for (mint, feed) in collateral_mints.iter().zip(price_feed_ids.iter()) {
        require!(
            !collaterals.iter().any(|c| c.mint == *mint),
            KeelError::DuplicateCollateral
        );
        let feed_id = get_feed_id_from_hex(feed).map_err(|_| KeelError::InvalidPriceFeed)?;
        collaterals.push(CollateralAsset {
            mint: *mint,
            feed_id,
            decimals: 0,
            total_deposited: 0,
        });
    }

    let config = &mut ctx.accounts.config;
    config.authority = ctx.accounts.authority.key();
    config.kusd_mint = ctx.accounts.kusd_mint.key();
    config.collaterals = collaterals;
    config.total_debt = 0;
    config.bump = ctx.bumps.config;

    msg!(
        "Keel initialized with {} registered collateral assets",
        config.collaterals.len()
    );

    Ok(())
}
