use anchor_lang::prelude::*;

use crate::constants::MAX_COLLATERAL_ASSETS;

/// One entry of the collateral registration list. The list is fixed at
/// `initialize` and never grows or shrinks afterwards.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct CollateralAsset {
    /// Collateral token mint
    pub mint: Pubkey,

    /// Pyth feed id quoting this asset in USD
    pub feed_id: [u8; 32],

    /// Mint decimals, recorded when the asset's vault is created
    pub decimals: u8,

    /// Total amount of this asset held across all positions
    pub total_deposited: u64,
}

impl CollateralAsset {
    pub const LEN: usize = 32 + // mint
        32 + // feed_id
        1 +  // decimals
        8;   // total_deposited
}

/// Global protocol state - singleton PDA
#[account]
pub struct Config {
    /// Deployer; only gates vault creation
    pub authority: Pubkey,

    /// kUSD mint address
    pub kusd_mint: Pubkey,

    /// Registered collateral assets, in registration order
    pub collaterals: Vec<CollateralAsset>,

    /// Total kUSD debt attributed across all positions
    pub total_debt: u64,

    /// Bump seed for PDA
    pub bump: u8,

    /// Reserved for future use
    pub _reserved: [u8; 32],
}

impl Config {
    pub const LEN: usize = 8 + // discriminator
        32 + // authority
        32 + // kusd_mint
        4 + MAX_COLLATERAL_ASSETS * CollateralAsset::LEN + // collaterals
        8 +  // total_debt
        1 +  // bump
        32;  // reserved

    /// Position of `mint` in the registration list, if registered.
    pub fn collateral_index(&self, mint: &Pubkey) -> Option<usize> {
        self.collaterals.iter().position(|c| c.mint == *mint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(mints: &[Pubkey]) -> Config {
        Config {
            authority: Pubkey::new_unique(),
            kusd_mint: Pubkey::new_unique(),
            collaterals: mints
                .iter()
                .map(|m| CollateralAsset {
                    mint: *m,
                    feed_id: [0u8; 32],
                    decimals: 9,
                    total_deposited: 0,
                })
                .collect(),
            total_debt: 0,
            bump: 255,
            _reserved: [0u8; 32],
        }
    }

    #[test]
    fn collateral_index_follows_registration_order() {
        let mints = [Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique()];
        let config = config_with(&mints);

        assert_eq!(config.collateral_index(&mints[0]), Some(0));
        assert_eq!(config.collateral_index(&mints[2]), Some(2));
        assert_eq!(config.collateral_index(&Pubkey::new_unique()), None);
    }
}
