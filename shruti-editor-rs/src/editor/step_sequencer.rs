//! The step sequencer page.
//!
//! Controller 0 moves the step cursor, controllers 1 to 3 edit the note,
//! velocity and gate of the selected step. The cursor is bounded by the
//! sequence length, which lives on the arpeggiator page and may shrink under
//! the cursor; the step actually edited is always inside the sequence.

use core::fmt::Write;

use super::dispatch::Editor;
use super::format::{note_name, push_padded, push_right_aligned, ValueText};
use super::{CAPTION_WIDTH, COLUMN_WIDTH, NUM_CONTROLLERS, VALUE_WIDTH};
use crate::display::{LcdLine, TextDisplay};
use crate::patch::{step_offset, SEQUENCE_MAX_LENGTH, STEP_NOTE_MAX, STEP_NOTE_MIN, STEP_VELOCITY_MAX};
use crate::resources::*;

const SHORT_NAMES: [ResourceId; NUM_CONTROLLERS] = [STR_RES_STP, STR_RES_NOT, STR_RES_VEL, STR_RES_GAT];
const LONG_NAMES: [ResourceId; NUM_CONTROLLERS] = [STR_RES_STEP, STR_RES_NOTE, STR_RES_VELOCITY, STR_RES_GATE];

/// Strip glyphs by velocity quarter.
const VELOCITY_GLYPHS: [char; 4] = ['.', 'o', 'O', '#'];
const MUTED_GLYPH: char = '-';

impl<R: ResourceLookup> Editor<R> {
    /// The selected step, clamped into the current sequence.
    pub(super) fn active_step(&self) -> u8 {
        self.sequencer_step.min(self.patch.sequence_length() - 1)
    }

    pub(super) fn handle_step_sequencer_input(&mut self, controller: usize, value: i32) {
        let step = self.active_step() as usize;
        match controller {
            0 => {
                let last = self.patch.sequence_length() as i32 - 1;
                self.sequencer_step = value.clamp(0, last) as u8;
            }
            1 => {
                let note = value.clamp(STEP_NOTE_MIN as i32, STEP_NOTE_MAX as i32) as u8;
                self.patch.set_step_note(step, note);
                self.mark_edited(step_offset(step));
            }
            2 => {
                let velocity = value.clamp(0, STEP_VELOCITY_MAX as i32) as u8;
                self.patch.set_step_velocity(step, velocity);
                self.mark_edited(step_offset(step) + 1);
            }
            3 => {
                self.patch.set_step_gate(step, value > 0);
                self.mark_edited(step_offset(step) + 1);
            }
            _ => {}
        }
    }

    pub(super) fn step_sequencer_controller_value(&self, controller: usize) -> Option<i32> {
        let step = self.patch.step(self.active_step() as usize);
        match controller {
            0 => Some(self.active_step() as i32),
            1 => Some(step.note as i32),
            2 => Some(step.velocity as i32),
            3 => Some(step.gate as i32),
            _ => None,
        }
    }

    fn format_step_field(&self, controller: usize) -> ValueText {
        let index = self.active_step();
        let step = self.patch.step(index as usize);
        let mut text = ValueText::new();
        match controller {
            0 => {
                let _ = write!(text, "{}", index + 1);
            }
            1 => text = note_name(&self.resources, step.note),
            2 => {
                let _ = write!(text, "{}", step.velocity);
            }
            _ => {
                let token = if step.gate { STR_RES_ON } else { STR_RES_OFF };
                let _ = text.push_str(self.resources.resolve_string(token));
            }
        }
        text
    }

    /// Labels over the fields of the selected step.
    pub(super) fn summarize_step_sequencer<D: TextDisplay + ?Sized>(&self, display: &mut D) {
        let mut names = LcdLine::new();
        let mut values = LcdLine::new();
        for (controller, &name) in SHORT_NAMES.iter().enumerate() {
            push_padded(&mut names, self.resources.resolve_string(name), COLUMN_WIDTH - 1);
            push_padded(&mut names, "", 1);
            push_padded(&mut values, &self.format_step_field(controller), COLUMN_WIDTH - 1);
            push_padded(&mut values, "", 1);
        }
        display.print(0, &names, None);
        display.print(1, &values, None);
    }

    /// The whole sequence as a strip, over the touched field of the
    /// selected step.
    pub(super) fn detail_step_sequencer<D: TextDisplay + ?Sized>(&self, display: &mut D) {
        let length = self.patch.sequence_length() as usize;
        let mut strip = LcdLine::new();
        for index in 0..SEQUENCE_MAX_LENGTH {
            let step = self.patch.step(index);
            let glyph = if index >= length {
                ' '
            } else if !step.gate {
                MUTED_GLYPH
            } else {
                VELOCITY_GLYPHS[step.velocity as usize / 32]
            };
            let _ = strip.push(glyph);
        }
        let cursor = self.flip.then(|| self.active_step() as usize);
        display.print(0, &strip, cursor);

        let controller = self.current_controller;
        let mut line = LcdLine::new();
        push_padded(&mut line, self.resources.resolve_string(LONG_NAMES[controller]), CAPTION_WIDTH);
        push_right_aligned(&mut line, &self.format_step_field(controller), VALUE_WIDTH);
        display.print(1, &line, None);
    }
}
