//! The patch storage collaborator.
//!
//! Storage is synchronous from the editor's point of view. Failures are
//! reported back through [`StorageError`] so the load/save page can show
//! them; retrying is the storage layer's business.

use core::fmt;

use crate::patch::{Patch, PatchBytes};

/// Number of slots in the default patch bank.
pub const NUM_PATCH_SLOTS: usize = 16;

/// Errors reported by a [`PatchStorage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Slot number is past the end of the bank.
    InvalidSlot,
    /// The backing medium could not be read or written.
    Unavailable,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StorageError::InvalidSlot => write!(f, "patch slot out of range"),
            StorageError::Unavailable => write!(f, "patch storage unavailable"),
        }
    }
}

/// Persistent patch slots.
pub trait PatchStorage {
    /// Read the patch stored in `slot`.
    fn load_patch(&mut self, slot: u8) -> Result<PatchBytes, StorageError>;

    /// Overwrite `slot` with `bytes`.
    fn save_patch(&mut self, slot: u8, bytes: &PatchBytes) -> Result<(), StorageError>;
}

/// A RAM-backed patch bank with every slot holding the init patch.
#[derive(Debug, Clone)]
pub struct MemoryPatchStorage<const SLOTS: usize = NUM_PATCH_SLOTS> {
    slots: [PatchBytes; SLOTS],
}

impl<const SLOTS: usize> Default for MemoryPatchStorage<SLOTS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const SLOTS: usize> MemoryPatchStorage<SLOTS> {
    /// A bank filled with the init patch.
    pub const fn new() -> Self {
        Self {
            slots: [Patch::new().into_bytes(); SLOTS],
        }
    }

    /// Number of slots in the bank.
    pub const fn slot_count(&self) -> usize {
        SLOTS
    }
}

impl<const SLOTS: usize> PatchStorage for MemoryPatchStorage<SLOTS> {
    fn load_patch(&mut self, slot: u8) -> Result<PatchBytes, StorageError> {
        self.slots
            .get(slot as usize)
            .copied()
            .ok_or(StorageError::InvalidSlot)
    }

    fn save_patch(&mut self, slot: u8, bytes: &PatchBytes) -> Result<(), StorageError> {
        let target = self
            .slots
            .get_mut(slot as usize)
            .ok_or(StorageError::InvalidSlot)?;
        *target = *bytes;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_bank_holds_init_patches() {
        let mut storage = MemoryPatchStorage::<4>::new();
        assert_eq!(storage.slot_count(), 4);
        for slot in 0..4 {
            assert_eq!(&storage.load_patch(slot).unwrap(), Patch::new().as_bytes());
        }
    }

    #[test]
    fn save_then_load() {
        let mut storage = MemoryPatchStorage::<NUM_PATCH_SLOTS>::new();
        let bytes = [0x5A; crate::patch::SERIALIZED_PATCH_SIZE];
        storage.save_patch(7, &bytes).unwrap();
        assert_eq!(storage.load_patch(7).unwrap(), bytes);
        assert_eq!(&storage.load_patch(6).unwrap(), Patch::new().as_bytes());
    }

    #[test]
    fn invalid_slot() {
        let mut storage = MemoryPatchStorage::<2>::new();
        assert_eq!(storage.load_patch(2), Err(StorageError::InvalidSlot));
        let bytes = *Patch::new().as_bytes();
        assert_eq!(storage.save_patch(200, &bytes), Err(StorageError::InvalidSlot));
    }
}
