//! PIN authentication and PIN change rules

use std::ops::RangeInclusive;
use thiserror::Error;
use tracing::{debug, info};
use super::types::{Account, Pin};

/// Valid 4-digit PINs
pub const PIN_RANGE: RangeInclusive<Pin> = 1000..=9999;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinError {
    #[error("Old pin wrong, try again")]
    OldPinWrong,
    #[error("Pin gotta be 4 digits, dude")]
    OutOfRange,
}

/// Check that `pin` is a 4-digit value
pub fn check_range(pin: Pin) -> Result<(), PinError> {
    if PIN_RANGE.contains(&pin) {
        Ok(())
    } else {
        Err(PinError::OutOfRange)
    }
}

impl Account {
    /// True iff `pin` equals the stored PIN. No side effects.
    pub fn authenticate(&self, pin: Pin) -> bool {
        self.pin == pin
    }

    /// Replace the PIN after verifying the old one.
    pub fn change_pin(&mut self, old_pin: Pin, new_pin: Pin) -> Result<(), PinError> {
        if !self.authenticate(old_pin) {
            debug!("pin change rejected: old pin mismatch");
            return Err(PinError::OldPinWrong);
        }
        check_range(new_pin)?;

        self.pin = new_pin;
        info!("pin changed");
        Ok(())
    }
}
