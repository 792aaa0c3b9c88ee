// Protocol constants for Keel

/// Canonical USD precision (1e18). Oracle quotes and portfolio values are
/// scaled to this before any ratio is taken.
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

/// Share of collateral value that counts toward solvency (50 => a position
/// must hold $2 of collateral per $1 of debt).
pub const LIQUIDATION_THRESHOLD: u128 = 50;

/// Denominator for `LIQUIDATION_THRESHOLD` and `LIQUIDATION_BONUS`.
pub const LIQUIDATION_PRECISION: u128 = 100;

/// Extra collateral awarded to liquidators (10%).
pub const LIQUIDATION_BONUS: u128 = 10;

/// Positions below this health factor are liquidatable (1.0 in 18 decimals).
pub const MIN_HEALTH_FACTOR: u128 = PRECISION;

/// Both sides of the health-factor ratio are floored to this granularity
/// (1e-6 USD) so the multiply stays within u128. One raw kUSD unit is 1e12
/// at canonical precision, so no nonzero debt ever rounds to zero.
pub const RATIO_GRANULARITY: u128 = 1_000_000_000_000;

/// Oracle quotes older than this many seconds are rejected.
pub const MAX_PRICE_AGE: u64 = 60;

/// Upper bound on the collateral registration list.
pub const MAX_COLLATERAL_ASSETS: usize = 8;

/// kUSD decimals
pub const KUSD_DECIMALS: u8 = 6;

/// Seeds for PDA derivation
pub const CONFIG_SEED: &[u8] = b"config";
pub const KUSD_MINT_SEED: &[u8] = b"kusd_mint";
pub const VAULT_SEED: &[u8] = b"vault";
pub const USER_SEED: &[u8] = b"user";
