use super::controller_map::ControllerMap;
use super::cursor::CursorContext;
use super::error::EditorError;
use super::load_save::Action;
use super::navigation::Navigation;
use super::page::{Group, Page, PageKind};
use super::parameter::PARAMETER_DEFINITIONS;
use super::NUM_CONTROLLERS;
use crate::display::TextDisplay;
use crate::patch::{Patch, PatchChanges};
use crate::resources::{BuiltinResources, ResourceLookup, STR_RES_SHRUTI_1, STR_RES_VERSION};
use crate::storage::{PatchStorage, StorageError, NUM_PATCH_SLOTS};

/// Which view [`Editor::render`] draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// All controllers of the page at a glance.
    Summary,
    /// The last touched controller, with its full name.
    Details,
}

/// Tunables of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EditorConfig {
    /// Render ticks the details view stays up after a controller is touched.
    /// `0` keeps it up until the next page change.
    pub details_hold_ticks: u16,
    /// Number of selectable patch slots on the load/save page.
    pub patch_slots: u8,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            details_hold_ticks: 60,
            patch_slots: NUM_PATCH_SLOTS as u8,
        }
    }
}

/// The parameter editor: navigation, active patch, undo buffer and load/save
/// selection in one context object.
///
/// All operations run to completion and never block. The editor performs no
/// locking; callers sharing it between tasks wrap it in a mutex.
///
/// Every patch write is a single byte store, so a reader of
/// [`patch`](Self::patch) never observes a half-written parameter.
pub struct Editor<R = BuiltinResources> {
    pub(super) resources: R,
    pub(super) config: EditorConfig,
    pub(super) controller_map: ControllerMap,
    pub(super) navigation: Navigation,

    pub(super) current_controller: usize,
    pub(super) display_mode: DisplayMode,
    pub(super) details_ticks: u16,
    pub(super) flip: bool,

    // One cursor per page kind, see `CursorContext`.
    pub(super) mod_matrix_row: u8,
    pub(super) sequencer_step: u8,
    pub(super) patch_number: u8,

    pub(super) previous_patch_number: u8,
    pub(super) action: Action,
    pub(super) return_page: Page,
    pub(super) undo_armed: bool,
    pub(super) storage_failure: Option<(Action, StorageError)>,

    pub(super) patch: Patch,
    pub(super) undo: Patch,
    pub(super) changes: PatchChanges,
}

impl Default for Editor<BuiltinResources> {
    fn default() -> Self {
        Self::new(BuiltinResources)
    }
}

impl<R: ResourceLookup> Editor<R> {
    /// An editor on the first page with the init patch loaded.
    pub fn new(resources: R) -> Self {
        Self::with_config(resources, EditorConfig::default())
    }

    pub fn with_config(resources: R, config: EditorConfig) -> Self {
        Self {
            resources,
            config,
            controller_map: ControllerMap::new(&PARAMETER_DEFINITIONS),
            navigation: Navigation::new(),
            current_controller: 0,
            display_mode: DisplayMode::Summary,
            details_ticks: 0,
            flip: false,
            mod_matrix_row: 0,
            sequencer_step: 0,
            patch_number: 0,
            previous_patch_number: 0,
            action: Action::Load,
            return_page: Page::Oscillator1,
            undo_armed: true,
            storage_failure: None,
            patch: Patch::new(),
            undo: Patch::new(),
            changes: PatchChanges::new(),
        }
    }

    /// Load slot 0 as the startup patch.
    ///
    /// On failure the init patch stays active and the error is returned for
    /// the caller to log. The undo buffer is not touched.
    pub fn init<S: PatchStorage + ?Sized>(&mut self, storage: &mut S) -> Result<(), StorageError> {
        let result = match storage.load_patch(0) {
            Ok(bytes) => {
                self.patch = Patch::from_bytes(bytes);
                Ok(())
            }
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("startup patch unavailable: {}", e);
                self.patch = Patch::new();
                Err(e)
            }
        };
        self.patch_number = 0;
        self.previous_patch_number = 0;
        self.changes.mark_all();
        result
    }

    // ── Navigation ───────────────────────────────────────────────────

    pub fn current_page(&self) -> Page {
        self.navigation.current_page()
    }

    pub fn current_group(&self) -> Group {
        self.navigation.current_group()
    }

    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    /// Handle a press of the `group` button. See [`Navigation::toggle_group`].
    pub fn toggle_group(&mut self, group: Group) {
        let from = self.current_page();
        self.navigation.toggle_group(group);
        self.navigated_from(from);
    }

    /// Advance to the next page in global order.
    pub fn cycle_page(&mut self) {
        let from = self.current_page();
        self.navigation.cycle_page();
        self.navigated_from(from);
    }

    /// Go to the page with raw index `index`.
    ///
    /// Returns [`EditorError::InvalidPageIndex`] if `index >= NUM_PAGES`.
    pub fn set_page(&mut self, index: u8) -> Result<(), EditorError> {
        let page = Page::try_from(index)?;
        self.jump_to(page);
        Ok(())
    }

    pub(super) fn jump_to(&mut self, page: Page) {
        let from = self.current_page();
        self.navigation.jump_to(page);
        self.navigated_from(from);
    }

    fn navigated_from(&mut self, from: Page) {
        let to = self.current_page();
        if to == from {
            return;
        }
        self.display_mode = DisplayMode::Summary;

        let was_load_save = from.kind() == PageKind::LoadSave;
        let is_load_save = to.kind() == PageKind::LoadSave;
        if is_load_save && !was_load_save {
            self.begin_load_save_session(from);
        } else if was_load_save && !is_load_save {
            self.end_load_save_session();
        }
    }

    // ── Input ────────────────────────────────────────────────────────

    /// Apply an absolute `value` from controller `controller` to the
    /// current page.
    ///
    /// Out-of-range controllers are ignored (logged via `defmt` when that
    /// feature is enabled). Values are clamped to whatever they edit, never
    /// rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use shruti::editor::{Editor, Group};
    /// use shruti::patch::PRM_KBD_TRANSPOSE;
    ///
    /// let mut editor = Editor::default();
    /// editor.toggle_group(Group::Play);
    /// editor.toggle_group(Group::Play);
    /// editor.toggle_group(Group::Play); // keyboard
    /// editor.handle_input(3, -100);
    /// assert_eq!(editor.patch().byte(PRM_KBD_TRANSPOSE as usize) as i8, -2);
    ///
    /// // Controller 7 does not exist.
    /// editor.handle_input(7, 1);
    /// ```
    pub fn handle_input(&mut self, controller: usize, value: i32) {
        if controller >= NUM_CONTROLLERS {
            #[cfg(feature = "defmt")]
            defmt::warn!("handle_input: controller {} out of bounds", controller);
            return;
        }

        self.current_controller = controller;
        self.display_mode = DisplayMode::Details;
        self.details_ticks = self.config.details_hold_ticks;

        match self.current_page().kind() {
            PageKind::StandardEdit | PageKind::ModulationMatrix => {
                self.handle_edit_input(controller, value)
            }
            PageKind::LoadSave => self.handle_load_save_input(controller, value),
            PageKind::StepSequencer => self.handle_step_sequencer_input(controller, value),
        }
    }

    /// Apply a relative change, as produced by a rotary encoder.
    pub fn nudge(&mut self, controller: usize, delta: i32) {
        let base = self.controller_value(controller).unwrap_or(0);
        self.handle_input(controller, base.saturating_add(delta));
    }

    /// The value `controller` currently edits, or `None` if it edits nothing
    /// on this page.
    pub fn controller_value(&self, controller: usize) -> Option<i32> {
        if controller >= NUM_CONTROLLERS {
            return None;
        }
        match self.current_page().kind() {
            PageKind::StandardEdit | PageKind::ModulationMatrix => {
                self.edit_controller_value(controller)
            }
            PageKind::LoadSave => self.load_save_controller_value(controller),
            PageKind::StepSequencer => self.step_sequencer_controller_value(controller),
        }
    }

    /// Index of the last touched controller.
    pub fn current_controller(&self) -> usize {
        self.current_controller
    }

    /// What the cursor means on the current page, and where it is.
    pub fn cursor(&self) -> Option<CursorContext> {
        CursorContext::for_page(
            self.current_page().kind(),
            self.mod_matrix_row,
            self.patch_number,
            self.active_step(),
        )
    }

    // ── Rendering ────────────────────────────────────────────────────

    /// Draw the summary view of the current page.
    pub fn display_summary<D: TextDisplay + ?Sized>(&mut self, display: &mut D) {
        self.flip = !self.flip;
        match self.current_page().kind() {
            PageKind::StandardEdit | PageKind::ModulationMatrix => self.summarize_edit_page(display),
            PageKind::LoadSave => self.display_load_save_page(display),
            PageKind::StepSequencer => self.summarize_step_sequencer(display),
        }
    }

    /// Draw the details view of the current page.
    pub fn display_details<D: TextDisplay + ?Sized>(&mut self, display: &mut D) {
        self.flip = !self.flip;
        match self.current_page().kind() {
            PageKind::StandardEdit | PageKind::ModulationMatrix => self.detail_edit_page(display),
            PageKind::LoadSave => self.display_load_save_page(display),
            PageKind::StepSequencer => self.detail_step_sequencer(display),
        }
    }

    /// One render tick: draw the current view, then count down the details
    /// hold period and fall back to the summary when it expires.
    pub fn render<D: TextDisplay + ?Sized>(&mut self, display: &mut D) {
        match self.display_mode {
            DisplayMode::Summary => self.display_summary(display),
            DisplayMode::Details => {
                self.display_details(display);
                if self.config.details_hold_ticks != 0 {
                    self.details_ticks = self.details_ticks.saturating_sub(1);
                    if self.details_ticks == 0 {
                        self.display_mode = DisplayMode::Summary;
                    }
                }
            }
        }
    }

    /// Draw the boot banner.
    pub fn display_splash_screen<D: TextDisplay + ?Sized>(&self, display: &mut D) {
        display.print(0, self.resources.resolve_string(STR_RES_SHRUTI_1), None);
        display.print(1, self.resources.resolve_string(STR_RES_VERSION), None);
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    // ── Patch access ─────────────────────────────────────────────────

    /// The active patch, as read by the synthesis engine.
    pub fn patch(&self) -> &Patch {
        &self.patch
    }

    /// The patch as it was before the last load.
    pub fn undo_buffer(&self) -> &Patch {
        &self.undo
    }

    /// Replace the active patch with the init patch. The undo buffer is left
    /// alone; the next load snapshots the reset patch.
    pub fn reset_patch(&mut self) {
        self.patch = Patch::new();
        self.changes.mark_all();
        self.undo_armed = true;
    }

    /// Offsets written since the last call.
    pub fn take_patch_changes(&mut self) -> PatchChanges {
        core::mem::take(&mut self.changes)
    }

    pub fn resources(&self) -> &R {
        &self.resources
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Write one byte of the active patch. Any edit re-arms the undo
    /// snapshot.
    pub(super) fn store(&mut self, offset: usize, value: u8) {
        self.patch.set_byte(offset, value);
        self.mark_edited(offset);
    }

    pub(super) fn mark_edited(&mut self, offset: usize) {
        self.changes.mark(offset);
        self.undo_armed = true;
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::TextBuffer;
    use crate::editor::parameter::PARAMETER_DEFINITIONS;
    use crate::editor::NUM_PAGES;
    use crate::patch::*;
    use crate::storage::MemoryPatchStorage;

    #[test]
    fn starts_on_first_page_with_init_patch() {
        let editor = Editor::default();
        assert_eq!(editor.current_page(), Page::Oscillator1);
        assert_eq!(editor.patch(), &Patch::new());
        assert_eq!(editor.undo_buffer(), &Patch::new());
        assert_eq!(editor.display_mode(), DisplayMode::Summary);
        assert_eq!(editor.cursor(), None);
    }

    #[test]
    fn stored_values_always_within_range() {
        let mut editor = Editor::default();
        for page in Page::ALL {
            if page.kind() != PageKind::StandardEdit {
                continue;
            }
            editor.set_page(page.index() as u8).unwrap();
            for controller in 0..NUM_CONTROLLERS {
                for value in [i32::MIN, -1000, -129, -1, 0, 1, 63, 128, 255, 256, i32::MAX] {
                    editor.handle_input(controller, value);
                    if let Some(def) = editor.controller_map.parameter(page, controller) {
                        let stored = def.decode(editor.patch().byte(def.offset()));
                        assert!(
                            (def.min_value..=def.max_value).contains(&stored),
                            "{def:?} stored {stored} for input {value}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn unused_slot_is_a_no_op() {
        let mut editor = Editor::default();
        let before = editor.patch().clone();
        editor.handle_input(3, 50); // oscillator 1 has three parameters
        assert_eq!(editor.patch(), &before);
        assert!(editor.take_patch_changes().is_empty());
    }

    #[test]
    fn out_of_range_controller_is_ignored() {
        let mut editor = Editor::default();
        let before = editor.patch().clone();
        editor.handle_input(NUM_CONTROLLERS, 12);
        editor.nudge(99, 1);
        assert_eq!(editor.patch(), &before);
        assert_eq!(editor.display_mode(), DisplayMode::Summary);
        assert_eq!(editor.current_controller(), 0);
    }

    #[test]
    fn set_page_rejects_bad_index() {
        let mut editor = Editor::default();
        assert_eq!(editor.set_page(NUM_PAGES as u8), Err(EditorError::InvalidPageIndex));
        assert_eq!(editor.current_page(), Page::Oscillator1);
        editor.set_page(3).unwrap();
        assert_eq!(editor.current_page(), Page::Filter);
    }

    #[test]
    fn nudge_moves_relative_to_stored_value() {
        let mut editor = Editor::default();
        editor.toggle_group(Group::Filter);
        editor.nudge(0, -10);
        assert_eq!(editor.patch().byte(PRM_FILTER_CUTOFF as usize), 90);
        assert_eq!(editor.controller_value(0), Some(90));
        editor.nudge(2, -100);
        assert_eq!(editor.controller_value(2), Some(-63));
    }

    #[test]
    fn edits_are_tracked_as_changes() {
        let mut editor = Editor::default();
        editor.toggle_group(Group::Filter);
        editor.handle_input(1, 30);
        let changes = editor.take_patch_changes();
        assert_eq!(changes.len(), 1);
        assert!(changes.contains(PRM_FILTER_RESONANCE as usize));
        assert!(editor.take_patch_changes().is_empty());
    }

    #[test]
    fn flip_toggles_once_per_render_call() {
        let mut editor = Editor::default();
        let mut lcd = TextBuffer::new();
        assert!(!editor.flip);
        editor.display_summary(&mut lcd);
        assert!(editor.flip);
        editor.display_details(&mut lcd);
        assert!(!editor.flip);
        editor.render(&mut lcd);
        assert!(editor.flip);
    }

    #[test]
    fn rendering_does_not_touch_the_patch() {
        let mut editor = Editor::default();
        let mut lcd = TextBuffer::new();
        for page in Page::ALL {
            editor.set_page(page.index() as u8).unwrap();
            let _ = editor.take_patch_changes();
            let patch = editor.patch().clone();
            let undo = editor.undo_buffer().clone();
            editor.display_summary(&mut lcd);
            editor.display_details(&mut lcd);
            assert_eq!(editor.patch(), &patch);
            assert_eq!(editor.undo_buffer(), &undo);
            assert!(editor.take_patch_changes().is_empty());
        }
    }

    #[test]
    fn rendering_is_idempotent_for_the_same_flip_phase() {
        let mut editor = Editor::default();
        editor.toggle_group(Group::Filter);
        let mut first = TextBuffer::new();
        let mut second = TextBuffer::new();
        editor.display_summary(&mut first);
        editor.display_summary(&mut TextBuffer::new());
        editor.display_summary(&mut second);
        assert_eq!(first, second);
    }

    #[test]
    fn details_view_reverts_after_hold_period() {
        let config = EditorConfig {
            details_hold_ticks: 3,
            ..EditorConfig::default()
        };
        let mut editor = Editor::with_config(BuiltinResources, config);
        let mut lcd = TextBuffer::new();
        editor.handle_input(0, 2);
        assert_eq!(editor.display_mode(), DisplayMode::Details);
        for _ in 0..2 {
            editor.render(&mut lcd);
            assert_eq!(editor.display_mode(), DisplayMode::Details);
        }
        editor.render(&mut lcd);
        assert_eq!(editor.display_mode(), DisplayMode::Summary);
    }

    #[test]
    fn zero_hold_keeps_details_until_page_change() {
        let config = EditorConfig {
            details_hold_ticks: 0,
            ..EditorConfig::default()
        };
        let mut editor = Editor::with_config(BuiltinResources, config);
        let mut lcd = TextBuffer::new();
        editor.handle_input(0, 2);
        for _ in 0..500 {
            editor.render(&mut lcd);
        }
        assert_eq!(editor.display_mode(), DisplayMode::Details);
        editor.cycle_page();
        assert_eq!(editor.display_mode(), DisplayMode::Summary);
    }

    #[test]
    fn splash_screen() {
        let editor = Editor::default();
        let mut lcd = TextBuffer::new();
        editor.display_splash_screen(&mut lcd);
        assert_eq!(lcd.row(0), "shruti-1        ");
        assert_eq!(lcd.row(1), "v1.0            ");
    }

    #[test]
    fn init_loads_slot_zero() {
        let mut storage = MemoryPatchStorage::<4>::new();
        let mut bytes = *Patch::new().as_bytes();
        bytes[PRM_FILTER_CUTOFF as usize] = 7;
        storage.save_patch(0, &bytes).unwrap();

        let mut editor = Editor::default();
        editor.init(&mut storage).unwrap();
        assert_eq!(editor.patch().as_bytes(), &bytes);
        assert_eq!(editor.undo_buffer(), &Patch::new());
        assert_eq!(editor.take_patch_changes().len(), SERIALIZED_PATCH_SIZE);
    }

    #[test]
    fn init_falls_back_to_defaults() {
        let mut storage = MemoryPatchStorage::<0>::new();
        let mut editor = Editor::default();
        editor.handle_input(0, 5);
        assert_eq!(editor.init(&mut storage), Err(StorageError::InvalidSlot));
        assert_eq!(editor.patch(), &Patch::new());
    }

    #[test]
    fn every_parameter_is_reachable_by_some_controller() {
        let editor = Editor::default();
        for def in &PARAMETER_DEFINITIONS {
            let reachable = (0..NUM_CONTROLLERS)
                .any(|slot| editor.controller_map.parameter(def.page, slot) == Some(def));
            assert!(reachable, "{def:?}");
        }
    }
}
