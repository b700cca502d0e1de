use super::page::PageKind;

/// What the cursor indexes on the current page.
///
/// Each meaning has its own storage in the editor; the active one is chosen
/// by the page kind alone, so moving the slot selection on the load/save
/// page never disturbs the sequencer step or the matrix row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CursorContext {
    /// Row of the modulation matrix being edited.
    ModMatrixIndex(u16),
    /// Patch slot selected on the load/save page.
    PatchSlot(u8),
    /// Step being edited on the step sequencer page.
    SequencerStep(u8),
}

impl CursorContext {
    /// The raw cursor value regardless of meaning.
    pub fn value(self) -> u16 {
        match self {
            CursorContext::ModMatrixIndex(row) => row,
            CursorContext::PatchSlot(slot) => slot as u16,
            CursorContext::SequencerStep(step) => step as u16,
        }
    }

    /// Build the context for `kind` from the three stored cursors.
    pub(super) fn for_page(kind: PageKind, row: u8, slot: u8, step: u8) -> Option<Self> {
        match kind {
            PageKind::StandardEdit => None,
            PageKind::ModulationMatrix => Some(CursorContext::ModMatrixIndex(row as u16)),
            PageKind::LoadSave => Some(CursorContext::PatchSlot(slot)),
            PageKind::StepSequencer => Some(CursorContext::SequencerStep(step)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_follows_page_kind() {
        assert_eq!(CursorContext::for_page(PageKind::StandardEdit, 1, 2, 3), None);
        assert_eq!(
            CursorContext::for_page(PageKind::ModulationMatrix, 1, 2, 3),
            Some(CursorContext::ModMatrixIndex(1))
        );
        assert_eq!(
            CursorContext::for_page(PageKind::LoadSave, 1, 2, 3),
            Some(CursorContext::PatchSlot(2))
        );
        assert_eq!(
            CursorContext::for_page(PageKind::StepSequencer, 1, 2, 3).map(CursorContext::value),
            Some(3)
        );
    }
}
