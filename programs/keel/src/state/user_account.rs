use anchor_lang::prelude::*;

use crate::constants::MAX_COLLATERAL_ASSETS;
use crate::errors::KeelError;

/// Individual user position: collateral balances plus attributed kUSD debt.
/// `deposits` has one slot per registered asset, in registration order.
#[account]
#[derive(Default)]
pub struct UserAccount {
    /// Owner of the position
    pub owner: Pubkey,

    /// Deposited amount per registered asset (native smallest units)
    pub deposits: Vec<u64>,

    /// kUSD minted against this position
    pub debt: u64,

    /// Set on first deposit
    pub is_initialized: bool,

    /// Bump seed for PDA
    pub bump: u8,

    /// Reserved for future use
    pub _reserved: [u8; 16],
}

impl UserAccount {
    pub const LEN: usize = 8 + // discriminator
        32 + // owner
        4 + MAX_COLLATERAL_ASSETS * 8 + // deposits
        8 +  // debt
        1 +  // is_initialized
        1 +  // bump
        16;  // reserved

    pub fn initialize(&mut self, owner: Pubkey, asset_count: usize, bump: u8) {
        self.owner = owner;
        self.deposits = vec![0; asset_count];
        self.debt = 0;
        self.is_initialized = true;
        self.bump = bump;
    }

    /// Deposited balance for the asset at `index`; zero when never touched.
    pub fn deposited(&self, index: usize) -> u64 {
        self.deposits.get(index).copied().unwrap_or(0)
    }

    pub fn credit(&mut self, index: usize, amount: u64) -> Result<()> {
        let slot = self
            .deposits
            .get_mut(index)
            .ok_or(KeelError::UnsupportedCollateral)?;
        *slot = slot.checked_add(amount).ok_or(KeelError::MathOverflow)?;
        Ok(())
    }

    /// Balances never go negative: debiting past the held amount is a
    /// precondition violation, not a clamp.
    pub fn debit(&mut self, index: usize, amount: u64) -> Result<()> {
        let slot = self
            .deposits
            .get_mut(index)
            .ok_or(KeelError::UnsupportedCollateral)?;
        *slot = slot
            .checked_sub(amount)
            .ok_or(KeelError::InsufficientCollateral)?;
        Ok(())
    }

    pub fn add_debt(&mut self, amount: u64) -> Result<()> {
        self.debt = self.debt.checked_add(amount).ok_or(KeelError::MathOverflow)?;
        Ok(())
    }

    pub fn remove_debt(&mut self, amount: u64) -> Result<()> {
        self.debt = self
            .debt
            .checked_sub(amount)
            .ok_or(KeelError::InsufficientDebt)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with(asset_count: usize) -> UserAccount {
        let mut user = UserAccount::default();
        user.initialize(Pubkey::new_unique(), asset_count, 254);
        user
    }

    #[test]
    fn deposit_then_withdraw_round_trips() {
        let mut user = user_with(3);

        user.credit(1, 1_000_000_000).unwrap();
        assert_eq!(user.deposited(1), 1_000_000_000);

        user.debit(1, 1_000_000_000).unwrap();
        assert_eq!(user.deposited(1), 0);
        assert_eq!(user.deposited(0), 0);
        assert_eq!(user.deposited(2), 0);
    }

    #[test]
    fn debit_beyond_balance_fails_and_mutates_nothing() {
        let mut user = user_with(2);
        user.credit(0, 500).unwrap();

        assert_eq!(
            user.debit(0, 501),
            Err(KeelError::InsufficientCollateral.into())
        );
        assert_eq!(user.deposited(0), 500);
    }

    #[test]
    fn debt_never_goes_negative() {
        let mut user = user_with(1);
        user.add_debt(100).unwrap();

        assert_eq!(user.remove_debt(101), Err(KeelError::InsufficientDebt.into()));
        assert_eq!(user.debt, 100);

        user.remove_debt(100).unwrap();
        assert_eq!(user.debt, 0);
        assert_eq!(user.remove_debt(1), Err(KeelError::InsufficientDebt.into()));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut user = user_with(2);
        assert_eq!(
            user.credit(2, 1),
            Err(KeelError::UnsupportedCollateral.into())
        );
        assert_eq!(user.deposited(2), 0);
    }
}
