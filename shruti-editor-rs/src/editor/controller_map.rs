use super::page::{Page, NUM_PAGES};
use super::parameter::ParameterDefinition;
use super::NUM_CONTROLLERS;

/// Per-page lookup from controller slot to parameter definition.
///
/// Built once from the parameter table's page assignments. Slot `n` of a page
/// holds the `n`-th parameter declared on that page; pages with fewer than
/// [`NUM_CONTROLLERS`] parameters leave the remaining slots unused.
#[derive(Debug, Clone)]
pub struct ControllerMap {
    definitions: &'static [ParameterDefinition],
    /// Index into `definitions`, per page and slot.
    slots: [[Option<u8>; NUM_CONTROLLERS]; NUM_PAGES],
}

impl ControllerMap {
    /// Build the map for `definitions`.
    ///
    /// A page declaring more than [`NUM_CONTROLLERS`] parameters is a table
    /// error; the extra parameters are unreachable.
    pub fn new(definitions: &'static [ParameterDefinition]) -> Self {
        let mut slots = [[None; NUM_CONTROLLERS]; NUM_PAGES];

        for (index, def) in definitions.iter().enumerate() {
            let page_slots = &mut slots[def.page.index()];
            match page_slots.iter_mut().find(|slot| slot.is_none()) {
                Some(slot) => *slot = Some(index as u8),
                None => {
                    debug_assert!(false, "too many parameters on one page");
                    #[cfg(feature = "defmt")]
                    defmt::warn!("parameter {} does not fit on its page", def.id);
                }
            }
        }

        Self { definitions, slots }
    }

    /// The parameter controlled by `slot` on `page`, if any.
    pub fn parameter(&self, page: Page, slot: usize) -> Option<&'static ParameterDefinition> {
        let index = (*self.slots[page.index()].get(slot)?)?;
        self.definitions.get(index as usize)
    }

    /// Number of used slots on `page`.
    pub fn active_slots(&self, page: Page) -> usize {
        self.slots[page.index()]
            .iter()
            .filter(|slot| slot.is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::parameter::{Unit, PARAMETER_DEFINITIONS};
    use crate::patch::*;
    use crate::resources::STR_RES_ON;

    #[test]
    fn maps_every_parameter_of_the_table() {
        let map = ControllerMap::new(&PARAMETER_DEFINITIONS);
        let mapped: usize = Page::ALL.iter().map(|&page| map.active_slots(page)).sum();
        assert_eq!(mapped, PARAMETER_DEFINITIONS.len());
    }

    #[test]
    fn slots_follow_declaration_order() {
        let map = ControllerMap::new(&PARAMETER_DEFINITIONS);
        let ids: [Option<u8>; 4] =
            core::array::from_fn(|slot| map.parameter(Page::Filter, slot).map(|def| def.id));
        assert_eq!(
            ids,
            [
                Some(PRM_FILTER_CUTOFF),
                Some(PRM_FILTER_RESONANCE),
                Some(PRM_FILTER_ENV),
                Some(PRM_FILTER_LFO)
            ]
        );
    }

    #[test]
    fn short_pages_leave_slots_unused() {
        let map = ControllerMap::new(&PARAMETER_DEFINITIONS);
        assert_eq!(map.active_slots(Page::Oscillator1), 3);
        assert!(map.parameter(Page::Oscillator1, 3).is_none());
        assert_eq!(map.active_slots(Page::LoadSave), 0);
        assert_eq!(map.active_slots(Page::StepSequencer), 0);
        assert!(map.parameter(Page::Filter, NUM_CONTROLLERS).is_none());
    }

    static TOO_MANY: [ParameterDefinition; 5] = {
        const DEF: ParameterDefinition = ParameterDefinition {
            id: 0,
            min_value: 0,
            max_value: 1,
            page: Page::Mixer,
            unit: Unit::Boolean,
            short_name: STR_RES_ON,
            long_name: STR_RES_ON,
        };
        [DEF; 5]
    };

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "too many parameters"))]
    fn overfull_page_is_a_table_error() {
        let map = ControllerMap::new(&TOO_MANY);
        assert_eq!(map.active_slots(Page::Mixer), NUM_CONTROLLERS);
    }
}
