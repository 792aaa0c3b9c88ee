use anchor_lang::prelude::*;

#[error_code]
pub enum KeelError {
    #[msg("Zero amount not allowed")]
    ZeroAmount,

    #[msg("Mint is not registered as collateral")]
    UnsupportedCollateral,

    #[msg("Collateral mint and price feed lists differ in length")]
    LengthMismatch,

    #[msg("Too many collateral assets")]
    TooManyCollaterals,

    #[msg("Collateral mint registered twice")]
    DuplicateCollateral,

    #[msg("Insufficient collateral")]
    InsufficientCollateral,

    #[msg("Insufficient debt")]
    InsufficientDebt,

    #[msg("Health factor below minimum")]
    HealthFactorBroken,

    #[msg("Cannot liquidate a healthy position")]
    PositionHealthy,

    #[msg("Liquidation must not worsen the position")]
    LiquidationIneffective,

    #[msg("Collateral balance cannot cover seizure plus bonus")]
    InsufficientCollateralForBonus,

    #[msg("Invalid oracle price")]
    InvalidOraclePrice,

    #[msg("Oracle price is stale")]
    StalePriceData,

    #[msg("Price update account missing or not the registered feed")]
    InvalidPriceFeed,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Math underflow")]
    MathUnderflow,

    #[msg("Unauthorized")]
    Unauthorized,
}
