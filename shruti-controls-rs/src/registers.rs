//! Seesaw register map used by the control board.
//!
//! Registers are addressed as `[module, function]`. Encoder functions take the
//! encoder index in their low bits: `[MODULE_ENCODER, ENCODER_POSITION | n]`.

// ── Modules ──────────────────────────────────────────────────────────────

pub const MODULE_GPIO: u8 = 0x01;
pub const MODULE_ENCODER: u8 = 0x11;

// ── GPIO functions (32-bit pin masks) ────────────────────────────────────

/// Make the masked pins inputs.
pub const GPIO_DIRCLR_BULK: u8 = 0x03;
/// Level of every pin.
pub const GPIO_BULK: u8 = 0x04;
/// With a pull enabled: drive the masked pins' pull high (pull-up).
pub const GPIO_BULK_SET: u8 = 0x05;
/// Raise INT when a masked pin changes.
pub const GPIO_INTENSET: u8 = 0x08;
/// Pending interrupt flags. Reading clears them and releases INT.
pub const GPIO_INTFLAG: u8 = 0x0A;
/// Enable the pull resistor on the masked pins.
pub const GPIO_PULLENSET: u8 = 0x0B;

// ── Encoder functions ────────────────────────────────────────────────────

pub const ENCODER_INTENSET: u8 = 0x10;
/// Absolute position, 32-bit signed, big-endian.
pub const ENCODER_POSITION: u8 = 0x30;

// ── Board ────────────────────────────────────────────────────────────────

/// Settling time between the register write and the read.
pub const SEESAW_DELAY_US: u64 = 125;

/// Address with no address jumpers closed.
pub const DEFAULT_ADDRESS: u8 = 0x49;

pub const ENCODER_COUNT: usize = 4;

/// GPIO pin of each encoder's push switch, by encoder index.
pub const SWITCH_PINS: [u8; ENCODER_COUNT] = [12, 14, 17, 9];

/// [`SWITCH_PINS`] as a bulk mask.
pub const SWITCH_MASK: u32 = (1 << SWITCH_PINS[0]) | (1 << SWITCH_PINS[1]) | (1 << SWITCH_PINS[2]) | (1 << SWITCH_PINS[3]);
