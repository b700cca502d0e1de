//! The Shruti control surface: four endless encoders with push switches on
//! an Adafruit Seesaw quad encoder breakout.
//!
//! Two layers:
//!
//! - **[`ControlBoard`]** talks to the board over I2C: encoder positions,
//!   the shared interrupt line and the GPIO bank the push switches sit on.
//! - **[`EncoderTracker`]** and **[`SwitchTracker`]** turn raw readings
//!   into the events the editor consumes (turn deltas and debounced press
//!   edges). They are pure logic and run on the host in tests.
//!
//! # Quick start
//!
//! ```ignore
//! use shruti_controls::{ControlBoard, EncoderTracker, DEFAULT_ADDRESS};
//!
//! let mut board = ControlBoard::new(i2c, DEFAULT_ADDRESS);
//! board.configure_switches().await?;
//! board.enable_all_interrupts().await?;
//!
//! let mut turns = EncoderTracker::new();
//! let deltas = turns.update(board.read_all_positions().await?);
//! ```
//!
//! # Features
//!
//! - **`defmt`**: [`defmt::Format`] on [`ControlError`].

#![cfg_attr(not(test), no_std)]

pub use board::ControlBoard;
pub use error::ControlError;
pub use events::{EncoderTracker, SwitchTracker, DEBOUNCE_READS};
pub use registers::{DEFAULT_ADDRESS, ENCODER_COUNT, SWITCH_PINS};

mod board;
mod error;
mod events;
mod registers;
mod seesaw;
