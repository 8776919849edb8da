//! Balance mutation rules for a single account

use thiserror::Error;
use tracing::info;
use super::types::Account;

/// Result of a committed deposit or withdrawal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Receipt {
    /// Amount moved by the operation
    pub amount: f64,
    /// Balance after the operation
    pub balance: f64,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceError {
    #[error("Nah, invalid deposit")]
    InvalidDeposit,
    #[error("Bro, not enough balance")]
    InsufficientFunds,
    #[error("Invalid withdrawal")]
    InvalidWithdrawal,
}

impl Account {
    /// Add `amount` to the balance. Non-positive amounts are rejected.
    pub fn deposit(&mut self, amount: f64) -> Result<Receipt, BalanceError> {
        if amount > 0.0 {
            self.balance += amount;
            info!(amount, balance = self.balance, "deposit committed");
            Ok(Receipt { amount, balance: self.balance })
        } else {
            Err(BalanceError::InvalidDeposit)
        }
    }

    /// Take `amount` from the balance.
    ///
    /// The insufficient-funds check runs only after the positive-and-covered
    /// check fails, so any amount above the balance reports
    /// `InsufficientFunds` and every other rejection reports
    /// `InvalidWithdrawal`.
    pub fn withdraw(&mut self, amount: f64) -> Result<Receipt, BalanceError> {
        if amount > 0.0 && amount <= self.balance {
            self.balance -= amount;
            info!(amount, balance = self.balance, "withdrawal committed");
            Ok(Receipt { amount, balance: self.balance })
        } else if amount > self.balance {
            Err(BalanceError::InsufficientFunds)
        } else {
            Err(BalanceError::InvalidWithdrawal)
        }
    }
}
