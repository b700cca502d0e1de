use super::error::EditorError;
use crate::resources::{self, ResourceId};

/// A collection of related pages sharing one panel button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Group {
    Osc = 0,
    Filter = 1,
    Modulation = 2,
    Play = 3,
    LoadSave = 4,
}

/// Number of groups.
pub const NUM_GROUPS: usize = 5;

impl Group {
    /// All groups in panel order.
    pub const ALL: [Group; NUM_GROUPS] = [
        Group::Osc,
        Group::Filter,
        Group::Modulation,
        Group::Play,
        Group::LoadSave,
    ];

    /// Dense index, `0..NUM_GROUPS`.
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for Group {
    type Error = EditorError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Group::ALL
            .get(value as usize)
            .copied()
            .ok_or(EditorError::InvalidGroupIndex)
    }
}

/// An editor page. Ids are dense and in declared order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Page {
    Oscillator1 = 0,
    Oscillator2 = 1,
    Mixer = 2,
    Filter = 3,
    Envelope = 4,
    Lfo = 5,
    ModMatrix = 6,
    Arpeggiator = 7,
    StepSequencer = 8,
    Keyboard = 9,
    LoadSave = 10,
}

/// Number of pages.
pub const NUM_PAGES: usize = 11;

impl Page {
    /// All pages in declared order.
    pub const ALL: [Page; NUM_PAGES] = [
        Page::Oscillator1,
        Page::Oscillator2,
        Page::Mixer,
        Page::Filter,
        Page::Envelope,
        Page::Lfo,
        Page::ModMatrix,
        Page::Arpeggiator,
        Page::StepSequencer,
        Page::Keyboard,
        Page::LoadSave,
    ];

    /// Dense index, `0..NUM_PAGES`.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The static definition of this page.
    pub fn definition(self) -> &'static PageDefinition {
        &PAGE_DEFINITIONS[self.index()]
    }

    pub fn group(self) -> Group {
        self.definition().group
    }

    pub fn kind(self) -> PageKind {
        self.definition().kind
    }
}

impl TryFrom<u8> for Page {
    type Error = EditorError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Page::ALL
            .get(value as usize)
            .copied()
            .ok_or(EditorError::InvalidPageIndex)
    }
}

/// How a page interprets input and renders itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PageKind {
    /// Each controller edits one parameter of the page.
    StandardEdit,
    /// Controller 0 picks a matrix row, controllers 1..=3 edit that row.
    ModulationMatrix,
    /// Slot selection and load/exit/save actions.
    LoadSave,
    /// Step cursor plus note/velocity/gate of the selected step.
    StepSequencer,
}

/// Static description of one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PageDefinition {
    pub id: Page,
    pub group: Group,
    /// Page title resource.
    pub name: ResourceId,
    pub kind: PageKind,
}

const fn page(id: Page, group: Group, name: ResourceId, kind: PageKind) -> PageDefinition {
    PageDefinition {
        id,
        group,
        name,
        kind,
    }
}

/// Page table, indexed by [`Page::index`].
pub static PAGE_DEFINITIONS: [PageDefinition; NUM_PAGES] = [
    page(Page::Oscillator1, Group::Osc, resources::STR_RES_OSCILLATOR_1, PageKind::StandardEdit),
    page(Page::Oscillator2, Group::Osc, resources::STR_RES_OSCILLATOR_2, PageKind::StandardEdit),
    page(Page::Mixer, Group::Osc, resources::STR_RES_MIXER, PageKind::StandardEdit),
    page(Page::Filter, Group::Filter, resources::STR_RES_FILTER, PageKind::StandardEdit),
    page(Page::Envelope, Group::Filter, resources::STR_RES_ENVELOPE, PageKind::StandardEdit),
    page(Page::Lfo, Group::Modulation, resources::STR_RES_LFO, PageKind::StandardEdit),
    page(Page::ModMatrix, Group::Modulation, resources::STR_RES_MOD_MATRIX, PageKind::ModulationMatrix),
    page(Page::Arpeggiator, Group::Play, resources::STR_RES_ARPEGGIATOR, PageKind::StandardEdit),
    page(Page::StepSequencer, Group::Play, resources::STR_RES_STEP_SEQUENCER, PageKind::StepSequencer),
    page(Page::Keyboard, Group::Play, resources::STR_RES_KEYBOARD, PageKind::StandardEdit),
    page(Page::LoadSave, Group::LoadSave, resources::STR_RES_LOAD_SAVE, PageKind::LoadSave),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_ids_are_dense_and_ordered() {
        for (i, def) in PAGE_DEFINITIONS.iter().enumerate() {
            assert_eq!(def.id.index(), i);
            assert_eq!(Page::ALL[i], def.id);
            assert_eq!(Page::try_from(i as u8), Ok(def.id));
        }
        assert_eq!(Page::try_from(NUM_PAGES as u8), Err(EditorError::InvalidPageIndex));
    }

    #[test]
    fn every_group_has_a_page() {
        for group in Group::ALL {
            assert!(PAGE_DEFINITIONS.iter().any(|def| def.group == group));
        }
        assert_eq!(Group::try_from(4), Ok(Group::LoadSave));
        assert_eq!(Group::try_from(5), Err(EditorError::InvalidGroupIndex));
    }

    #[test]
    fn special_pages_have_their_kind() {
        assert_eq!(Page::LoadSave.kind(), PageKind::LoadSave);
        assert_eq!(Page::StepSequencer.kind(), PageKind::StepSequencer);
        assert_eq!(Page::ModMatrix.kind(), PageKind::ModulationMatrix);
        assert_eq!(Page::Filter.kind(), PageKind::StandardEdit);
        assert_eq!(Page::Keyboard.group(), Group::Play);
    }
}
