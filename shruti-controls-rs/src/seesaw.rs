//! Seesaw bus primitives.
//!
//! Every Seesaw register is addressed by a `[module, function]` pair. Reads
//! are a register write, a [`SEESAW_DELAY_US`] pause and a separate read.
//! `write_read` is not used: its repeated start leaves the firmware no time
//! to prepare the answer.
//!
//! Crate-private. [`ControlBoard`](crate::ControlBoard) is the public face.

use embassy_time::{Duration, Timer};
use embedded_hal_async::i2c::I2c;

use crate::error::ControlError;
use crate::registers::SEESAW_DELAY_US;

/// Owns the bus handle and the board address.
pub(crate) struct Seesaw<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> Seesaw<I2C>
where
    I2C: I2c,
{
    /// # Arguments
    /// * `i2c`: bus handle, owned for the lifetime of the driver.
    /// * `address`: 7-bit board address, [`DEFAULT_ADDRESS`](crate::DEFAULT_ADDRESS)
    ///   with no address jumpers closed.
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    // -----------------------------------------------------------------------
    // Protocol
    // -----------------------------------------------------------------------

    /// Select `register`, wait for the firmware, then fill `buffer`.
    ///
    /// # Errors
    /// [`ControlError::I2c`] if either transaction fails. A failed write
    /// skips the read.
    async fn read(&mut self, register: [u8; 2], buffer: &mut [u8]) -> Result<(), ControlError<I2C::Error>> {
        self.i2c.write(self.address, &register).await?;
        Timer::after(Duration::from_micros(SEESAW_DELAY_US)).await;
        self.i2c.read(self.address, buffer).await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Typed access
    // -----------------------------------------------------------------------

    /// Read a 32-bit register. Seesaw sends the most significant byte first.
    ///
    /// # Errors
    /// [`ControlError::I2c`] on a bus failure.
    pub async fn read_u32(&mut self, register: [u8; 2]) -> Result<u32, ControlError<I2C::Error>> {
        let mut buf = [0u8; 4];
        self.read(register, &mut buf).await?;
        Ok(u32::from_be_bytes(buf))
    }

    /// [`read_u32`](Self::read_u32) reinterpreted as two's complement, for
    /// encoder positions.
    pub async fn read_i32(&mut self, register: [u8; 2]) -> Result<i32, ControlError<I2C::Error>> {
        self.read_u32(register).await.map(|v| v as i32)
    }

    /// Write a 32-bit register in one transaction:
    /// `[module, function, b3, b2, b1, b0]`.
    ///
    /// # Errors
    /// [`ControlError::I2c`] on a bus failure.
    pub async fn write_u32(&mut self, register: [u8; 2], value: u32) -> Result<(), ControlError<I2C::Error>> {
        self.i2c.write(self.address, &u32_frame(register, value)).await?;
        Ok(())
    }

    /// Write a one-byte register, e.g. an encoder interrupt enable.
    ///
    /// # Errors
    /// [`ControlError::I2c`] on a bus failure.
    pub async fn write_u8(&mut self, register: [u8; 2], value: u8) -> Result<(), ControlError<I2C::Error>> {
        self.i2c.write(self.address, &[register[0], register[1], value]).await?;
        Ok(())
    }
}

/// Register address followed by `value`, most significant byte first.
fn u32_frame(register: [u8; 2], value: u32) -> [u8; 6] {
    let mut buf = [0u8; 6];
    buf[..2].copy_from_slice(&register);
    buf[2..].copy_from_slice(&value.to_be_bytes());
    buf
}
