use super::page::{Group, Page, NUM_GROUPS, NUM_PAGES, PAGE_DEFINITIONS};

/// Current page plus one remembered page per group.
///
/// Both operations are total. Group ids cannot be out of range because they
/// are a closed enum; raw ids must go through [`Group::try_from`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Navigation {
    current_page: Page,
    last_visited_page: [Page; NUM_GROUPS],
}

impl Default for Navigation {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigation {
    /// Start on the first page, every group remembering its first page.
    pub fn new() -> Self {
        let last_visited_page = Group::ALL.map(|group| {
            PAGE_DEFINITIONS
                .iter()
                .find(|def| def.group == group)
                .map_or(Page::Oscillator1, |def| def.id)
        });
        Self {
            current_page: Page::Oscillator1,
            last_visited_page,
        }
    }

    pub fn current_page(&self) -> Page {
        self.current_page
    }

    pub fn current_group(&self) -> Group {
        self.current_page.group()
    }

    /// The page `group` returns to when selected.
    pub fn last_visited_page(&self, group: Group) -> Page {
        self.last_visited_page[group.index()]
    }

    /// Select `group`.
    ///
    /// Selecting the active group advances to its next page in declared
    /// order, wrapping. Selecting another group resumes the page last visited
    /// there.
    pub fn toggle_group(&mut self, group: Group) {
        let current = self.current_group();
        if group == current {
            let start = self.current_page.index();
            let next = (1..=NUM_PAGES)
                .map(|step| PAGE_DEFINITIONS[(start + step) % NUM_PAGES].id)
                .find(|page| page.group() == group)
                .unwrap_or(self.current_page);
            self.current_page = next;
        } else {
            self.last_visited_page[current.index()] = self.current_page;
            self.current_page = self.last_visited_page[group.index()];
        }
        self.remember_current();
    }

    /// Advance to the next page in global order, wrapping.
    pub fn cycle_page(&mut self) {
        let next = (self.current_page.index() + 1) % NUM_PAGES;
        self.current_page = PAGE_DEFINITIONS[next].id;
        self.remember_current();
    }

    /// Go straight to `page`.
    pub fn jump_to(&mut self, page: Page) {
        self.remember_current();
        self.current_page = page;
        self.remember_current();
    }

    fn remember_current(&mut self) {
        self.last_visited_page[self.current_group().index()] = self.current_page;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages_of(group: Group) -> impl Iterator<Item = Page> {
        Page::ALL.into_iter().filter(move |page| page.group() == group)
    }

    #[test]
    fn starts_on_first_page() {
        let nav = Navigation::new();
        assert_eq!(nav.current_page(), Page::Oscillator1);
        assert_eq!(nav.current_group(), Group::Osc);
        assert_eq!(nav.last_visited_page(Group::Play), Page::Arpeggiator);
        assert_eq!(nav.last_visited_page(Group::LoadSave), Page::LoadSave);
    }

    #[test]
    fn toggling_the_active_group_visits_each_page_once() {
        for group in Group::ALL {
            for start in pages_of(group) {
                let mut nav = Navigation::new();
                nav.jump_to(start);

                let count = pages_of(group).count();
                let mut seen = [false; NUM_PAGES];
                for _ in 0..count {
                    nav.toggle_group(group);
                    let page = nav.current_page();
                    assert_eq!(page.group(), group);
                    assert!(!seen[page.index()], "{page:?} visited twice");
                    seen[page.index()] = true;
                }
                assert_eq!(nav.current_page(), start);
            }
        }
    }

    #[test]
    fn toggle_order_is_declared_order() {
        let mut nav = Navigation::new();
        nav.toggle_group(Group::Play);
        assert_eq!(nav.current_page(), Page::Arpeggiator);
        nav.toggle_group(Group::Play);
        assert_eq!(nav.current_page(), Page::StepSequencer);
        nav.toggle_group(Group::Play);
        assert_eq!(nav.current_page(), Page::Keyboard);
        nav.toggle_group(Group::Play);
        assert_eq!(nav.current_page(), Page::Arpeggiator);
    }

    #[test]
    fn returning_to_a_group_restores_its_page() {
        let mut nav = Navigation::new();
        nav.toggle_group(Group::Osc);
        nav.toggle_group(Group::Osc);
        assert_eq!(nav.current_page(), Page::Mixer);

        nav.toggle_group(Group::Filter);
        assert_eq!(nav.current_page(), Page::Filter);
        nav.toggle_group(Group::Filter);
        assert_eq!(nav.current_page(), Page::Envelope);

        nav.toggle_group(Group::Osc);
        assert_eq!(nav.current_page(), Page::Mixer);
        nav.toggle_group(Group::Filter);
        assert_eq!(nav.current_page(), Page::Envelope);
    }

    #[test]
    fn cycle_page_wraps_after_every_page() {
        for start in Page::ALL {
            let mut nav = Navigation::new();
            nav.jump_to(start);
            for _ in 0..NUM_PAGES {
                nav.cycle_page();
            }
            assert_eq!(nav.current_page(), start);
        }
    }

    #[test]
    fn cycle_page_updates_group_memory() {
        let mut nav = Navigation::new();
        nav.jump_to(Page::Envelope);
        nav.cycle_page();
        nav.cycle_page();
        assert_eq!(nav.current_page(), Page::ModMatrix);
        assert_eq!(nav.last_visited_page(Group::Modulation), Page::ModMatrix);
        assert_eq!(nav.last_visited_page(Group::Filter), Page::Envelope);

        nav.toggle_group(Group::Filter);
        assert_eq!(nav.current_page(), Page::Envelope);
        nav.toggle_group(Group::Modulation);
        assert_eq!(nav.current_page(), Page::ModMatrix);
    }
}
