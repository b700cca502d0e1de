//! The quad encoder board as seen by the editor: four positions, four push
//! switches and one shared active-low INT line.

use embedded_hal_async::i2c::I2c;

use crate::error::ControlError;
use crate::registers::*;
use crate::seesaw::Seesaw;

/// Async interface to the control board.
///
/// # Example
///
/// ```no_run
/// use shruti_controls::{ControlBoard, DEFAULT_ADDRESS};
///
/// # async fn example<I: embedded_hal_async::i2c::I2c>(i2c: I) -> Result<(), shruti_controls::ControlError<I::Error>> {
/// let mut board = ControlBoard::new(i2c, DEFAULT_ADDRESS);
/// board.configure_switches().await?;
/// board.enable_all_interrupts().await?;
///
/// let positions = board.read_all_positions().await?;
/// let pressed = board.read_switches().await?;
/// board.clear_interrupt_flags().await?;
/// # let _ = (positions, pressed);
/// # Ok(())
/// # }
/// ```
pub struct ControlBoard<I2C> {
    seesaw: Seesaw<I2C>,
}

impl<I2C> ControlBoard<I2C>
where
    I2C: I2c,
{
    /// No bus traffic until the first call.
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            seesaw: Seesaw::new(i2c, address),
        }
    }

    fn encoder_register(function: u8, encoder: u8) -> Result<[u8; 2], ControlError<I2C::Error>> {
        if encoder as usize >= ENCODER_COUNT {
            return Err(ControlError::InvalidEncoder(encoder));
        }
        Ok([MODULE_ENCODER, function | encoder])
    }

    // ── Encoders ─────────────────────────────────────────────────────

    /// Absolute detent count of `encoder` since power-on or the last
    /// [`set_position`](Self::set_position).
    pub async fn read_position(&mut self, encoder: u8) -> Result<i32, ControlError<I2C::Error>> {
        let register = Self::encoder_register(ENCODER_POSITION, encoder)?;
        self.seesaw.read_i32(register).await
    }

    /// All four positions, or the first bus error.
    pub async fn read_all_positions(&mut self) -> Result<[i32; ENCODER_COUNT], ControlError<I2C::Error>> {
        let mut positions = [0i32; ENCODER_COUNT];
        for (encoder, position) in positions.iter_mut().enumerate() {
            *position = self.read_position(encoder as u8).await?;
        }
        Ok(positions)
    }

    pub async fn set_position(&mut self, encoder: u8, value: i32) -> Result<(), ControlError<I2C::Error>> {
        let register = Self::encoder_register(ENCODER_POSITION, encoder)?;
        self.seesaw.write_u32(register, value as u32).await
    }

    // ── Interrupts ───────────────────────────────────────────────────

    /// Pull INT low on any turn. Off after power-on.
    pub async fn enable_all_interrupts(&mut self) -> Result<(), ControlError<I2C::Error>> {
        for encoder in 0..ENCODER_COUNT as u8 {
            let register = Self::encoder_register(ENCODER_INTENSET, encoder)?;
            self.seesaw.write_u8(register, 1).await?;
        }
        Ok(())
    }

    /// Acknowledge pending turns and presses, releasing INT.
    ///
    /// Call after reading, so a movement during the read raises INT again.
    pub async fn clear_interrupt_flags(&mut self) -> Result<(), ControlError<I2C::Error>> {
        self.seesaw.read_u32([MODULE_GPIO, GPIO_INTFLAG]).await?;
        Ok(())
    }

    // ── Push switches ────────────────────────────────────────────────

    /// Make the switch pins pulled-up inputs that also raise INT.
    pub async fn configure_switches(&mut self) -> Result<(), ControlError<I2C::Error>> {
        self.seesaw.write_u32([MODULE_GPIO, GPIO_DIRCLR_BULK], SWITCH_MASK).await?;
        self.seesaw.write_u32([MODULE_GPIO, GPIO_PULLENSET], SWITCH_MASK).await?;
        self.seesaw.write_u32([MODULE_GPIO, GPIO_BULK_SET], SWITCH_MASK).await?;
        self.seesaw.write_u32([MODULE_GPIO, GPIO_INTENSET], SWITCH_MASK).await
    }

    /// Raw switch levels by encoder index, `true` while held.
    pub async fn read_switches(&mut self) -> Result<[bool; ENCODER_COUNT], ControlError<I2C::Error>> {
        let levels = self.seesaw.read_u32([MODULE_GPIO, GPIO_BULK]).await?;
        Ok(switches_from_levels(levels))
    }
}

/// Switches pull their pin to ground when held.
fn switches_from_levels(levels: u32) -> [bool; ENCODER_COUNT] {
    SWITCH_PINS.map(|pin| levels & (1 << pin) == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_pins_read_released() {
        assert_eq!(switches_from_levels(u32::MAX), [false; ENCODER_COUNT]);
    }

    #[test]
    fn grounded_pin_reads_held() {
        let levels = !(1 << SWITCH_PINS[2]);
        assert_eq!(switches_from_levels(levels), [false, false, true, false]);
    }

    #[test]
    fn mask_covers_every_switch() {
        assert_eq!(SWITCH_MASK.count_ones() as usize, ENCODER_COUNT);
        assert_eq!(switches_from_levels(!SWITCH_MASK), [true; ENCODER_COUNT]);
    }
}
