//! Parameter pages: the standard pages and the modulation matrix.

use core::fmt::Write;

use super::dispatch::Editor;
use super::format::{pretty_print_parameter_value, push_padded, push_right_aligned, ValueText};
use super::page::PageKind;
use super::parameter::ParameterDefinition;
use super::{CAPTION_WIDTH, COLUMN_WIDTH, NUM_CONTROLLERS, VALUE_WIDTH};
use crate::display::{LcdLine, TextDisplay};
use crate::patch::{MOD_MATRIX_ROWS, MOD_MATRIX_ROW_SIZE};
use crate::resources::{ResourceLookup, STR_RES_MOD_ROW, STR_RES_ROW};

impl<R: ResourceLookup> Editor<R> {
    /// The parameter `controller` edits and its byte offset, taking the
    /// selected matrix row into account.
    fn edit_target(&self, controller: usize) -> Option<(&'static ParameterDefinition, usize)> {
        let page = self.current_page();
        if page.kind() == PageKind::ModulationMatrix {
            let slot = controller.checked_sub(1)?;
            let parameter = self.controller_map.parameter(page, slot)?;
            let offset = parameter.offset() + self.mod_matrix_row as usize * MOD_MATRIX_ROW_SIZE;
            Some((parameter, offset))
        } else {
            let parameter = self.controller_map.parameter(page, controller)?;
            Some((parameter, parameter.offset()))
        }
    }

    fn is_row_selector(&self, controller: usize) -> bool {
        controller == 0 && self.current_page().kind() == PageKind::ModulationMatrix
    }

    pub(super) fn handle_edit_input(&mut self, controller: usize, value: i32) {
        if self.is_row_selector(controller) {
            self.mod_matrix_row = value.clamp(0, MOD_MATRIX_ROWS as i32 - 1) as u8;
            return;
        }

        match self.edit_target(controller) {
            Some((parameter, offset)) => {
                let value = parameter.clamp(value);
                self.store(offset, parameter.encode(value));
            }
            None => {
                #[cfg(feature = "defmt")]
                defmt::debug!(
                    "no parameter on page {} for controller {}",
                    self.current_page(),
                    controller
                );
            }
        }
    }

    pub(super) fn edit_controller_value(&self, controller: usize) -> Option<i32> {
        if self.is_row_selector(controller) {
            return Some(self.mod_matrix_row as i32);
        }
        let (parameter, offset) = self.edit_target(controller)?;
        Some(parameter.value_of(self.patch.byte(offset)) as i32)
    }

    fn format_target(&self, parameter: &ParameterDefinition, offset: usize, width: usize) -> ValueText {
        pretty_print_parameter_value(&self.resources, parameter, self.patch.byte(offset), width)
    }

    /// Short names over values, one column per controller.
    pub(super) fn summarize_edit_page<D: TextDisplay + ?Sized>(&self, display: &mut D) {
        let mut names = LcdLine::new();
        let mut values = LcdLine::new();
        let mut number = ValueText::new();

        for controller in 0..NUM_CONTROLLERS {
            let (name, value) = if self.is_row_selector(controller) {
                number.clear();
                let _ = write!(number, "{}", self.mod_matrix_row + 1);
                (self.resources.resolve_string(STR_RES_ROW), number.clone())
            } else if let Some((parameter, offset)) = self.edit_target(controller) {
                (
                    self.resources.resolve_string(parameter.short_name),
                    self.format_target(parameter, offset, COLUMN_WIDTH - 1),
                )
            } else {
                ("", ValueText::new())
            };
            push_padded(&mut names, name, COLUMN_WIDTH - 1);
            push_padded(&mut names, "", 1);
            push_padded(&mut values, &value, COLUMN_WIDTH - 1);
            push_padded(&mut values, "", 1);
        }

        display.print(0, &names, None);
        display.print(1, &values, None);
    }

    /// Page title over the long name and value of the last touched
    /// controller.
    pub(super) fn detail_edit_page<D: TextDisplay + ?Sized>(&self, display: &mut D) {
        let mut title = LcdLine::new();
        let mut number = ValueText::new();
        let page_name = self.resources.resolve_string(self.current_page().definition().name);
        if self.current_page().kind() == PageKind::ModulationMatrix {
            let _ = write!(number, "#{}", self.mod_matrix_row + 1);
            push_padded(&mut title, page_name, CAPTION_WIDTH);
            push_right_aligned(&mut title, &number, VALUE_WIDTH);
        } else {
            push_padded(&mut title, page_name, CAPTION_WIDTH + VALUE_WIDTH);
        }

        let mut line = LcdLine::new();
        let controller = self.current_controller;
        if self.is_row_selector(controller) {
            number.clear();
            let _ = write!(number, "{}", self.mod_matrix_row + 1);
            push_padded(&mut line, self.resources.resolve_string(STR_RES_MOD_ROW), CAPTION_WIDTH);
            push_right_aligned(&mut line, &number, VALUE_WIDTH);
        } else if let Some((parameter, offset)) = self.edit_target(controller) {
            push_padded(&mut line, self.resources.resolve_string(parameter.long_name), CAPTION_WIDTH);
            push_right_aligned(&mut line, &self.format_target(parameter, offset, VALUE_WIDTH), VALUE_WIDTH);
        }

        display.print(0, &title, None);
        display.print(1, &line, None);
    }
}
