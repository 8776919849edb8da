//! Menu screens, command numbers and the fixed console texts

use std::str::FromStr;
use rust_decimal::{Decimal, RoundingStrategy};

pub const ENTRY_SCREEN: &[&str] = &["===== ATM =====", "1. Login", "2. Register"];
pub const ENTRY_PROMPT: &str = "Choose: ";

pub const MENU: &[&str] = &[
    "=== MENU ===",
    "1. Check Balance",
    "2. Deposit",
    "3. Withdraw",
    "4. Change PIN",
    "5. Exit",
];
pub const MENU_PROMPT: &str = "Choice: ";

pub const WRONG_OPTION: &str = "Wrong option, bye!";
pub const REGISTERED: &str = "You are in! Login now.";
pub const PIN_CHANGED: &str = "Pin changed successfully!";
pub const FAREWELL: &str = "Thank you for using! Visit again!";
pub const INVALID_CHOICE: &str = "Nope, try again";

/// First choice of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryChoice {
    Login,
    Register,
}

impl EntryChoice {
    pub fn from_number(n: i32) -> Option<Self> {
        match n {
            1 => Some(Self::Login),
            2 => Some(Self::Register),
            _ => None,
        }
    }
}

/// Authenticated-state commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    CheckBalance,
    Deposit,
    Withdraw,
    ChangePin,
    Exit,
}

impl Command {
    pub fn from_number(n: i32) -> Option<Self> {
        match n {
            1 => Some(Self::CheckBalance),
            2 => Some(Self::Deposit),
            3 => Some(Self::Withdraw),
            4 => Some(Self::ChangePin),
            5 => Some(Self::Exit),
            _ => None,
        }
    }
}

pub fn greeting(display_name: &str) -> String {
    format!("Hey {}!", display_name)
}

/// Two-decimal amount, rounding the shortest decimal form half away from zero
pub fn money(amount: f64) -> String {
    match Decimal::from_str(&amount.to_string()) {
        Ok(value) => {
            let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(2);
            rounded.to_string()
        }
        // Outside Decimal's range
        Err(_) => format!("{:.2}", amount),
    }
}

pub fn balance_line(balance: f64) -> String {
    format!("Balance: Rs. {}", money(balance))
}

pub fn deposited(amount: f64) -> String {
    format!("Deposited Rs. {} :)", money(amount))
}

pub fn withdrawn(amount: f64) -> String {
    format!("Withdrawn Rs. {}, done!", money(amount))
}
