use super::SERIALIZED_PATCH_SIZE;

const WORDS: usize = SERIALIZED_PATCH_SIZE.div_ceil(32);

/// Set of patch offsets written since the set was last taken.
///
/// The editor marks every byte it stores. The consumer that forwards values
/// to the synthesis engine takes the set and sends only what changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchChanges {
    bits: [u32; WORDS],
}

impl PatchChanges {
    /// An empty set.
    pub const fn new() -> Self {
        Self { bits: [0; WORDS] }
    }

    /// Mark one offset. Offsets past the patch are ignored.
    pub fn mark(&mut self, offset: usize) {
        if offset < SERIALIZED_PATCH_SIZE {
            self.bits[offset / 32] |= 1 << (offset % 32);
        }
    }

    /// Mark the whole patch, e.g. after a load.
    pub fn mark_all(&mut self) {
        for offset in 0..SERIALIZED_PATCH_SIZE {
            self.mark(offset);
        }
    }

    /// Whether `offset` is marked.
    pub fn contains(&self, offset: usize) -> bool {
        offset < SERIALIZED_PATCH_SIZE && self.bits[offset / 32] & (1 << (offset % 32)) != 0
    }

    /// `true` if nothing is marked.
    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&word| word == 0)
    }

    /// Number of marked offsets.
    pub fn len(&self) -> usize {
        self.bits.iter().map(|word| word.count_ones() as usize).sum()
    }

    /// Marked offsets in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..SERIALIZED_PATCH_SIZE).filter(move |&offset| self.contains(offset))
    }
}
