//! Account type definitions

/// Lowercased username used as the store key
pub type Username = String;

/// Numeric PIN as typed at the console
pub type Pin = i32;

/// One user's bank identity: name, balance and PIN
#[derive(Clone, Debug, PartialEq)]
pub struct Account {
    display_name: String,
    pub(super) balance: f64,
    pub(super) pin: Pin,
}

impl Account {
    pub fn new(display_name: impl Into<String>, balance: f64, pin: Pin) -> Self {
        Self {
            display_name: display_name.into(),
            balance,
            pin,
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Current balance. Pure read.
    pub fn check_balance(&self) -> f64 {
        self.balance
    }
}
