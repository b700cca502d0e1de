//! Parameter editor and patch state machine for the Shruti-1 synthesizer.
//!
//! The crate maps a tiny control surface (four controllers plus a row of
//! group buttons) onto the full patch of the synthesizer, and renders the
//! editor state onto a 16×2 character display.
//!
//! - [`editor`]: navigation, input/render dispatch, value formatting,
//!   load/save/undo and the step sequencer page.
//! - [`patch`]: the serialized patch buffer and its stable byte layout.
//! - [`resources`]: read-only string and lookup tables.
//! - [`storage`]: the patch storage collaborator.
//! - [`display`]: the character display collaborator.
//!
//! # `no_std` Compatibility
//!
//! No heap allocation is used anywhere. Text is built in fixed-capacity
//! [`heapless::String`]s and all tables are `static`. The optional `defmt`
//! feature enables structured logging for embedded targets.

#![cfg_attr(not(test), no_std)]

pub mod display;
pub mod editor;
pub mod patch;
pub mod resources;
pub mod storage;
