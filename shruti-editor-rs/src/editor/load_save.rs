//! The load/save page, patch slot selection and undo.
//!
//! Entering the page starts a session: the current slot is remembered so
//! `Exit` can restore it, and the undo snapshot is armed. The first `Load` of
//! the session copies the active patch into the undo buffer; further loads in
//! the same session keep that snapshot, so undo always returns to the patch
//! the user had before browsing. Saving or editing the active patch (a reset
//! counts as an edit) re-arms the snapshot. A failed `Load` changes nothing.

use core::fmt::Write;

use super::dispatch::Editor;
use super::format::{push_padded, push_right_aligned, ValueText};
use super::page::{Page, PageKind};
use super::{CAPTION_WIDTH, VALUE_WIDTH};
use crate::display::{LcdLine, TextDisplay, LCD_WIDTH};
use crate::patch::Patch;
use crate::resources::{
    ResourceLookup, STR_RES_EXIT, STR_RES_LOAD, STR_RES_LOAD_FAILED, STR_RES_LOAD_SAVE,
    STR_RES_SAVE, STR_RES_SAVE_FAILED,
};
use crate::storage::{PatchStorage, StorageError};

/// Pending intent on the load/save page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Action {
    Load = 0,
    Exit = 1,
    Save = 2,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Load, Action::Exit, Action::Save];

    /// Column of the action's label on the action row.
    const fn column(self) -> usize {
        self as usize * 6
    }
}

impl<R: ResourceLookup> Editor<R> {
    /// Open the load/save page.
    ///
    /// Remembers the current slot and the page to return to, and arms the
    /// undo snapshot. Does not touch the patch. Navigating onto the page with
    /// a group button or [`cycle_page`](Self::cycle_page) does the same.
    pub fn enter_load_save_mode(&mut self) {
        if self.current_page().kind() != PageKind::LoadSave {
            self.jump_to(Page::LoadSave);
        }
    }

    pub(super) fn begin_load_save_session(&mut self, from: Page) {
        self.previous_patch_number = self.patch_number;
        self.return_page = from;
        self.undo_armed = true;
        self.action = Action::Load;
        self.storage_failure = None;
    }

    pub(super) fn end_load_save_session(&mut self) {
        self.patch_number = self.previous_patch_number;
        self.undo_armed = true;
    }

    pub(super) fn handle_load_save_input(&mut self, controller: usize, value: i32) {
        match controller {
            0 => {
                let last = self.config.patch_slots.max(1) as i32 - 1;
                self.patch_number = value.clamp(0, last) as u8;
            }
            1 => {
                let index = value.clamp(0, Action::ALL.len() as i32 - 1) as usize;
                self.action = Action::ALL[index];
            }
            _ => return,
        }
        self.storage_failure = None;
    }

    pub(super) fn load_save_controller_value(&self, controller: usize) -> Option<i32> {
        match controller {
            0 => Some(self.patch_number as i32),
            1 => Some(self.action as i32),
            _ => None,
        }
    }

    /// The pending action.
    pub fn action(&self) -> Action {
        self.action
    }

    /// The selected patch slot.
    pub fn patch_number(&self) -> u8 {
        self.patch_number
    }

    /// The slot active before the load/save page was opened.
    pub fn previous_patch_number(&self) -> u8 {
        self.previous_patch_number
    }

    /// The last failed action and its error, cleared by the next input on
    /// the load/save page.
    pub fn storage_failure(&self) -> Option<(Action, StorageError)> {
        self.storage_failure
    }

    /// Carry out the pending action against `storage`.
    ///
    /// - `Load` installs the selected slot and stays on the page for
    ///   auditioning further slots.
    /// - `Save` writes the active patch to the selected slot and leaves the
    ///   page.
    /// - `Exit` restores the previous slot selection and leaves the page.
    ///
    /// Outside the load/save page this does nothing. A storage error is
    /// shown on the page and returned; the editor does not retry.
    pub fn confirm_action<S: PatchStorage + ?Sized>(&mut self, storage: &mut S) -> Result<(), StorageError> {
        if self.current_page().kind() != PageKind::LoadSave {
            return Ok(());
        }
        let slot = self.patch_number;
        match self.action {
            Action::Load => self.load_patch(storage, slot),
            Action::Save => {
                self.save_patch(storage, slot)?;
                self.jump_to(self.return_page);
                Ok(())
            }
            Action::Exit => {
                self.patch_number = self.previous_patch_number;
                self.jump_to(self.return_page);
                Ok(())
            }
        }
    }

    /// Replace the active patch with the contents of `slot`.
    ///
    /// If the undo snapshot is armed, the active patch is copied into the
    /// undo buffer first. Editing the active patch re-arms the snapshot. A
    /// failed read leaves both buffers untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use shruti::editor::Editor;
    /// use shruti::patch::SERIALIZED_PATCH_SIZE;
    /// use shruti::storage::{MemoryPatchStorage, PatchStorage};
    ///
    /// let mut storage = MemoryPatchStorage::<16>::new();
    /// storage.save_patch(3, &[0x22; SERIALIZED_PATCH_SIZE]).unwrap();
    ///
    /// let mut editor = Editor::default();
    /// let before = editor.patch().clone();
    /// editor.load_patch(&mut storage, 3).unwrap();
    /// assert_eq!(editor.patch().as_bytes(), &[0x22; SERIALIZED_PATCH_SIZE]);
    /// assert_eq!(editor.undo_buffer(), &before);
    /// ```
    pub fn load_patch<S: PatchStorage + ?Sized>(&mut self, storage: &mut S, slot: u8) -> Result<(), StorageError> {
        match storage.load_patch(slot) {
            Ok(bytes) => {
                if self.undo_armed {
                    self.undo = self.patch.clone();
                    self.undo_armed = false;
                }
                self.patch = Patch::from_bytes(bytes);
                self.changes.mark_all();
                self.patch_number = slot;
                self.previous_patch_number = slot;
                self.storage_failure = None;
                Ok(())
            }
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("loading patch {} failed: {}", slot, e);
                self.storage_failure = Some((Action::Load, e));
                Err(e)
            }
        }
    }

    /// Write the active patch to `slot`.
    pub fn save_patch<S: PatchStorage + ?Sized>(&mut self, storage: &mut S, slot: u8) -> Result<(), StorageError> {
        match storage.save_patch(slot, self.patch.as_bytes()) {
            Ok(()) => {
                self.patch_number = slot;
                self.previous_patch_number = slot;
                self.undo_armed = true;
                self.storage_failure = None;
                Ok(())
            }
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("saving patch {} failed: {}", slot, e);
                self.storage_failure = Some((Action::Save, e));
                Err(e)
            }
        }
    }

    /// Copy the undo buffer back into the active patch. The undo buffer
    /// keeps its contents, so this can be repeated.
    pub fn undo_load(&mut self) {
        self.patch = self.undo.clone();
        self.changes.mark_all();
    }

    /// Caption and slot number over the action row.
    pub(super) fn display_load_save_page<D: TextDisplay + ?Sized>(&self, display: &mut D) {
        let mut title = LcdLine::new();
        let mut number = ValueText::new();
        let _ = write!(number, "{}", self.patch_number as u16 + 1);
        push_padded(&mut title, self.resources.resolve_string(STR_RES_LOAD_SAVE), CAPTION_WIDTH);
        push_right_aligned(&mut title, &number, VALUE_WIDTH);
        display.print(0, &title, None);

        let mut actions = LcdLine::new();
        if let Some((failed, _)) = self.storage_failure {
            let message = match failed {
                Action::Save => STR_RES_SAVE_FAILED,
                Action::Load | Action::Exit => STR_RES_LOAD_FAILED,
            };
            push_padded(&mut actions, self.resources.resolve_string(message), LCD_WIDTH);
            display.print(1, &actions, None);
            return;
        }

        for (label, width) in [(STR_RES_LOAD, 6), (STR_RES_EXIT, 6), (STR_RES_SAVE, 4)] {
            push_padded(&mut actions, self.resources.resolve_string(label), width);
        }
        let cursor = self.flip.then(|| self.action.column());
        display.print(1, &actions, cursor);
    }
}

// ── Tests ────────────────────────────────────────────────────────────
