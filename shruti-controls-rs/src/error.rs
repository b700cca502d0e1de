//! Error type for control board access.

use core::fmt;

/// Errors returned by [`ControlBoard`](crate::ControlBoard).
#[derive(Debug)]
pub enum ControlError<E> {
    /// The I2C transaction failed.
    I2c(E),
    /// Encoder index outside `0..ENCODER_COUNT`.
    InvalidEncoder(u8),
}

impl<E> From<E> for ControlError<E> {
    fn from(error: E) -> Self {
        ControlError::I2c(error)
    }
}

impl<E: fmt::Debug> fmt::Display for ControlError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ControlError::I2c(e) => write!(f, "I2C error: {:?}", e),
            ControlError::InvalidEncoder(n) => write!(f, "no encoder {}", n),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for ControlError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ControlError::I2c(e) => defmt::write!(f, "I2C error: {}", e),
            ControlError::InvalidEncoder(n) => defmt::write!(f, "no encoder {}", n),
        }
    }
}
