//! Account system for the ATM console
//!
//! This module implements the in-memory account model with:
//! - Case-insensitive usernames
//! - Plain 4-digit PIN authentication
//! - Deposit / withdrawal rules over a single balance

pub mod types;
pub mod store;
pub mod balance;
pub mod auth;

pub use types::{Account, Pin, Username};
pub use store::{AccountStore, Registration, StoreError};
pub use balance::{BalanceError, Receipt};
pub use auth::{PinError, PIN_RANGE};
