//! Account storage and lookup

use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info};
use super::auth::{check_range, PinError};
use super::types::{Account, Pin, Username};
use crate::config::SeedAccount;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    #[error("No user detected with that name")]
    AccountNotFound,
    #[error("Pin incorrect")]
    PinIncorrect,
    #[error("Username taken, sorry")]
    UsernameTaken,
    #[error("No negative deposits allowed")]
    NegativeDeposit,
    #[error(transparent)]
    Pin(#[from] PinError),
}

/// Details collected from the registration prompts
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub username: String,
    pub display_name: String,
    pub pin: Pin,
    pub initial_deposit: f64,
}

/// All accounts for the lifetime of the process, keyed by lowercase username
#[derive(Debug, Clone, Default)]
pub struct AccountStore {
    accounts: HashMap<Username, Account>,
}

/// Fold a typed username into its store key
pub fn normalize(username: &str) -> Username {
    username.trim().to_lowercase()
}

impl AccountStore {
    /// Create a new empty account store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given seed accounts
    pub fn seeded(seeds: &[SeedAccount]) -> Self {
        let mut store = Self::new();
        for seed in seeds {
            store.accounts.insert(
                normalize(&seed.username),
                Account::new(seed.display_name.clone(), seed.balance, seed.pin),
            );
        }
        debug!(accounts = store.len(), "account store seeded");
        store
    }

    /// Resolve a typed username to an existing key
    pub fn find(&self, username: &str) -> Result<Username, StoreError> {
        let key = normalize(username);
        if self.accounts.contains_key(&key) {
            Ok(key)
        } else {
            Err(StoreError::AccountNotFound)
        }
    }

    /// Resolve a typed username to a key that is still free
    pub fn ensure_available(&self, username: &str) -> Result<Username, StoreError> {
        let key = normalize(username);
        if self.accounts.contains_key(&key) {
            Err(StoreError::UsernameTaken)
        } else {
            Ok(key)
        }
    }

    /// Authenticate an account with its PIN
    pub fn login(&mut self, username: &str, pin: Pin) -> Result<&mut Account, StoreError> {
        let key = self.find(username)?;
        let account = self.accounts.get_mut(&key)
            .ok_or(StoreError::AccountNotFound)?;

        if !account.authenticate(pin) {
            debug!(user = %key, "login rejected: pin incorrect");
            return Err(StoreError::PinIncorrect);
        }

        info!(user = %key, "login succeeded");
        Ok(account)
    }

    /// Create a new account and return it.
    ///
    /// A negative initial deposit creates nothing. The PIN range is only
    /// checked when `enforce_pin_range` is set.
    pub fn register(
        &mut self,
        registration: Registration,
        enforce_pin_range: bool,
    ) -> Result<&mut Account, StoreError> {
        let key = self.ensure_available(&registration.username)?;

        if registration.initial_deposit < 0.0 {
            return Err(StoreError::NegativeDeposit);
        }
        if enforce_pin_range {
            check_range(registration.pin)?;
        }

        info!(user = %key, "account registered");
        let account = Account::new(
            registration.display_name,
            registration.initial_deposit,
            registration.pin,
        );
        Ok(self.accounts.entry(key).or_insert(account))
    }

    /// Get account by name
    pub fn get(&self, username: &str) -> Option<&Account> {
        self.accounts.get(&normalize(username))
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
