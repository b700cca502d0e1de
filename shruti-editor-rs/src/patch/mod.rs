//! The serialized patch and its stable byte layout.
//!
//! A patch is [`SERIALIZED_PATCH_SIZE`] bytes. Every parameter lives at a
//! fixed offset which doubles as its parameter id, so the in-memory buffer,
//! the storage format and the synthesis engine's view are the same bytes.
//!
//! ```text
//!   0..3    oscillator 1      shape, parameter, range
//!   3..7    oscillator 2      shape, parameter, range, detune
//!   7..11   mixer             balance, sub osc, noise, crush
//!  11..15   filter            cutoff, resonance, env amount, lfo amount
//!  15..19   envelope          attack, decay, sustain, release
//!  19..23   lfos              wave 1, rate 1, wave 2, rate 2
//!  23..59   mod matrix        12 × (source, destination, amount)
//!  59..63   arpeggiator       tempo, pattern, octaves, sequence length
//!  63..67   keyboard          raga, portamento, legato, transpose
//!  67..99   sequence          16 × (note, gate << 7 | velocity)
//!  99..107  name              8 ASCII bytes
//! 107       layout version
//! ```
//!
//! Offsets must not move without a migration path: stored patches depend on
//! them byte for byte.

mod changes;

pub use changes::PatchChanges;

/// Size in bytes of a serialized patch.
pub const SERIALIZED_PATCH_SIZE: usize = 108;

/// Serialized patch bytes.
pub type PatchBytes = [u8; SERIALIZED_PATCH_SIZE];

pub const PRM_OSC_SHAPE_1: u8 = 0;
pub const PRM_OSC_PARAMETER_1: u8 = 1;
pub const PRM_OSC_RANGE_1: u8 = 2;
pub const PRM_OSC_SHAPE_2: u8 = 3;
pub const PRM_OSC_PARAMETER_2: u8 = 4;
pub const PRM_OSC_RANGE_2: u8 = 5;
pub const PRM_OSC_DETUNE_2: u8 = 6;
pub const PRM_MIX_BALANCE: u8 = 7;
pub const PRM_MIX_SUB_OSC: u8 = 8;
pub const PRM_MIX_NOISE: u8 = 9;
pub const PRM_MIX_CRUSH: u8 = 10;
pub const PRM_FILTER_CUTOFF: u8 = 11;
pub const PRM_FILTER_RESONANCE: u8 = 12;
pub const PRM_FILTER_ENV: u8 = 13;
pub const PRM_FILTER_LFO: u8 = 14;
pub const PRM_ENV_ATTACK: u8 = 15;
pub const PRM_ENV_DECAY: u8 = 16;
pub const PRM_ENV_SUSTAIN: u8 = 17;
pub const PRM_ENV_RELEASE: u8 = 18;
pub const PRM_LFO_WAVE_1: u8 = 19;
pub const PRM_LFO_RATE_1: u8 = 20;
pub const PRM_LFO_WAVE_2: u8 = 21;
pub const PRM_LFO_RATE_2: u8 = 22;
/// Source of modulation matrix row 0; row `r` is at `+ r * MOD_MATRIX_ROW_SIZE`.
pub const PRM_MOD_SOURCE: u8 = 23;
pub const PRM_MOD_DESTINATION: u8 = 24;
pub const PRM_MOD_AMOUNT: u8 = 25;
pub const PRM_ARP_TEMPO: u8 = 59;
pub const PRM_ARP_PATTERN: u8 = 60;
pub const PRM_ARP_OCTAVES: u8 = 61;
pub const PRM_SEQ_LENGTH: u8 = 62;
pub const PRM_KBD_RAGA: u8 = 63;
pub const PRM_KBD_PORTAMENTO: u8 = 64;
pub const PRM_KBD_LEGATO: u8 = 65;
pub const PRM_KBD_TRANSPOSE: u8 = 66;

/// Number of modulation matrix rows.
pub const MOD_MATRIX_ROWS: usize = 12;
/// Bytes per modulation matrix row.
pub const MOD_MATRIX_ROW_SIZE: usize = 3;

/// First byte of the step sequence.
pub const SEQUENCE_OFFSET: usize = 67;
/// Maximum number of sequencer steps.
pub const SEQUENCE_MAX_LENGTH: usize = 16;
/// Bytes per sequencer step.
pub const SEQUENCE_STEP_SIZE: usize = 2;

/// Lowest note a sequencer step can hold (C0).
pub const STEP_NOTE_MIN: u8 = 12;
/// Highest note a sequencer step can hold (B8).
pub const STEP_NOTE_MAX: u8 = 119;
/// Highest step velocity.
pub const STEP_VELOCITY_MAX: u8 = 127;

const STEP_GATE_BIT: u8 = 0x80;

/// First byte of the patch name.
pub const NAME_OFFSET: usize = 99;
/// Length of the patch name.
pub const NAME_LENGTH: usize = 8;
/// Offset of the layout version byte.
pub const VERSION_OFFSET: usize = 107;
/// Current layout version.
pub const PATCH_VERSION: u8 = 1;

/// One step of the step sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SequenceStep {
    /// MIDI note, within [`STEP_NOTE_MIN`]..=[`STEP_NOTE_MAX`].
    pub note: u8,
    /// Velocity, 0..=[`STEP_VELOCITY_MAX`].
    pub velocity: u8,
    /// Whether the step plays at all.
    pub gate: bool,
}

/// The active synthesizer configuration as serialized bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    bytes: PatchBytes,
}

impl Default for Patch {
    fn default() -> Self {
        Self::new()
    }
}

impl Patch {
    /// The built-in init patch.
    pub const fn new() -> Self {
        let mut bytes = [0u8; SERIALIZED_PATCH_SIZE];

        bytes[PRM_OSC_SHAPE_1 as usize] = 1; // saw
        bytes[PRM_OSC_SHAPE_2 as usize] = 2; // square
        bytes[PRM_OSC_PARAMETER_2 as usize] = 16;
        bytes[PRM_OSC_DETUNE_2 as usize] = 12;
        bytes[PRM_MIX_BALANCE as usize] = 32;
        bytes[PRM_FILTER_CUTOFF as usize] = 100;
        bytes[PRM_FILTER_RESONANCE as usize] = 8;
        bytes[PRM_FILTER_ENV as usize] = 20;
        bytes[PRM_ENV_DECAY as usize] = 40;
        bytes[PRM_ENV_SUSTAIN as usize] = 80;
        bytes[PRM_ENV_RELEASE as usize] = 20;
        bytes[PRM_LFO_RATE_1 as usize] = 24;
        bytes[PRM_LFO_WAVE_2 as usize] = 3; // ramp
        bytes[PRM_LFO_RATE_2 as usize] = 60;
        bytes[PRM_ARP_TEMPO as usize] = 17; // 120 bpm
        bytes[PRM_ARP_OCTAVES as usize] = 1;
        bytes[PRM_SEQ_LENGTH as usize] = 16;

        // Matrix rows default to lfo1 → pwm1 and env1 → cutoff, rest silent.
        let mut row = 0;
        while row < MOD_MATRIX_ROWS {
            let offset = PRM_MOD_SOURCE as usize + row * MOD_MATRIX_ROW_SIZE;
            bytes[offset] = (row % 4) as u8;
            bytes[offset + 1] = (row % 12) as u8;
            row += 1;
        }
        bytes[PRM_MOD_SOURCE as usize] = 2;
        bytes[PRM_MOD_DESTINATION as usize] = 2;
        bytes[PRM_MOD_AMOUNT as usize] = 16;
        bytes[PRM_MOD_SOURCE as usize + MOD_MATRIX_ROW_SIZE] = 0;
        bytes[PRM_MOD_DESTINATION as usize + MOD_MATRIX_ROW_SIZE] = 0;
        bytes[PRM_MOD_AMOUNT as usize + MOD_MATRIX_ROW_SIZE] = 24;

        // An ascending minor pentatonic line, every step gated.
        const PENTATONIC: [u8; 5] = [0, 3, 5, 7, 10];
        let mut step = 0;
        while step < SEQUENCE_MAX_LENGTH {
            let offset = SEQUENCE_OFFSET + step * SEQUENCE_STEP_SIZE;
            bytes[offset] = 48 + 12 * (step / 5) as u8 + PENTATONIC[step % 5];
            bytes[offset + 1] = STEP_GATE_BIT | 100;
            step += 1;
        }

        let name = *b"init    ";
        let mut i = 0;
        while i < NAME_LENGTH {
            bytes[NAME_OFFSET + i] = name[i];
            i += 1;
        }
        bytes[VERSION_OFFSET] = PATCH_VERSION;

        Self { bytes }
    }

    /// Wrap raw bytes, e.g. as returned by patch storage.
    pub const fn from_bytes(bytes: PatchBytes) -> Self {
        Self { bytes }
    }

    /// The serialized form.
    pub fn as_bytes(&self) -> &PatchBytes {
        &self.bytes
    }

    /// Unwrap into the serialized form.
    pub const fn into_bytes(self) -> PatchBytes {
        self.bytes
    }

    /// Byte at `offset`, `0` past the end.
    pub fn byte(&self, offset: usize) -> u8 {
        self.bytes.get(offset).copied().unwrap_or(0)
    }

    /// Store one byte. Writes past the end are dropped.
    ///
    /// Every parameter fits in one byte, so a reader of the buffer never
    /// sees a half-written value.
    pub fn set_byte(&mut self, offset: usize, value: u8) {
        if let Some(slot) = self.bytes.get_mut(offset) {
            *slot = value;
        }
    }

    /// Number of active sequencer steps, 1..=[`SEQUENCE_MAX_LENGTH`].
    pub fn sequence_length(&self) -> u8 {
        self.byte(PRM_SEQ_LENGTH as usize)
            .clamp(1, SEQUENCE_MAX_LENGTH as u8)
    }

    /// Decode step `index`. Indices past the sequence wrap into it.
    pub fn step(&self, index: usize) -> SequenceStep {
        let offset = step_offset(index);
        let packed = self.byte(offset + 1);
        SequenceStep {
            note: self.byte(offset).clamp(STEP_NOTE_MIN, STEP_NOTE_MAX),
            velocity: packed & !STEP_GATE_BIT,
            gate: packed & STEP_GATE_BIT != 0,
        }
    }

    /// Set the note of step `index`, clamped to the playable range.
    pub fn set_step_note(&mut self, index: usize, note: u8) {
        self.set_byte(step_offset(index), note.clamp(STEP_NOTE_MIN, STEP_NOTE_MAX));
    }

    /// Set the velocity of step `index`, keeping its gate.
    pub fn set_step_velocity(&mut self, index: usize, velocity: u8) {
        let offset = step_offset(index) + 1;
        let gate = self.byte(offset) & STEP_GATE_BIT;
        self.set_byte(offset, gate | velocity.min(STEP_VELOCITY_MAX));
    }

    /// Set the gate of step `index`, keeping its velocity.
    pub fn set_step_gate(&mut self, index: usize, gate: bool) {
        let offset = step_offset(index) + 1;
        let velocity = self.byte(offset) & !STEP_GATE_BIT;
        self.set_byte(offset, if gate { velocity | STEP_GATE_BIT } else { velocity });
    }

    /// The patch name, trailing padding included. Non-ASCII names read as
    /// empty.
    pub fn name(&self) -> &str {
        let name = &self.bytes[NAME_OFFSET..NAME_OFFSET + NAME_LENGTH];
        if name.is_ascii() {
            core::str::from_utf8(name).unwrap_or("")
        } else {
            ""
        }
    }

    /// Layout version the bytes were written with.
    pub fn version(&self) -> u8 {
        self.bytes[VERSION_OFFSET]
    }
}

/// Byte offset of step `index`'s note byte.
pub const fn step_offset(index: usize) -> usize {
    SEQUENCE_OFFSET + (index % SEQUENCE_MAX_LENGTH) * SEQUENCE_STEP_SIZE
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_regions_do_not_overlap() {
        assert_eq!(
            PRM_MOD_SOURCE as usize + MOD_MATRIX_ROWS * MOD_MATRIX_ROW_SIZE,
            PRM_ARP_TEMPO as usize
        );
        assert_eq!(
            SEQUENCE_OFFSET + SEQUENCE_MAX_LENGTH * SEQUENCE_STEP_SIZE,
            NAME_OFFSET
        );
        assert_eq!(NAME_OFFSET + NAME_LENGTH, VERSION_OFFSET);
        assert_eq!(VERSION_OFFSET + 1, SERIALIZED_PATCH_SIZE);
        assert_eq!(PRM_KBD_TRANSPOSE as usize + 1, SEQUENCE_OFFSET);
    }

    #[test]
    fn init_patch_header() {
        let patch = Patch::new();
        assert_eq!(patch.name(), "init    ");
        assert_eq!(patch.version(), PATCH_VERSION);
        assert_eq!(patch.sequence_length(), 16);
        assert_eq!(patch, Patch::default());
    }

    #[test]
    fn init_sequence_is_gated_and_in_range() {
        let patch = Patch::new();
        for i in 0..SEQUENCE_MAX_LENGTH {
            let step = patch.step(i);
            assert!(step.gate);
            assert_eq!(step.velocity, 100);
            assert!((STEP_NOTE_MIN..=STEP_NOTE_MAX).contains(&step.note));
        }
        assert_eq!(patch.step(0).note, 48);
        assert_eq!(patch.step(5).note, 60);
    }

    #[test]
    fn step_setters_keep_the_other_field() {
        let mut patch = Patch::new();
        patch.set_step_gate(3, false);
        assert_eq!(patch.step(3).velocity, 100);
        assert!(!patch.step(3).gate);

        patch.set_step_velocity(3, 200);
        assert_eq!(patch.step(3).velocity, STEP_VELOCITY_MAX);
        assert!(!patch.step(3).gate);

        patch.set_step_gate(3, true);
        assert_eq!(patch.step(3).velocity, STEP_VELOCITY_MAX);
        assert!(patch.step(3).gate);
    }

    #[test]
    fn step_note_is_clamped() {
        let mut patch = Patch::new();
        patch.set_step_note(0, 0);
        assert_eq!(patch.step(0).note, STEP_NOTE_MIN);
        patch.set_step_note(0, 127);
        assert_eq!(patch.step(0).note, STEP_NOTE_MAX);
    }

    #[test]
    fn sequence_length_is_clamped() {
        let mut patch = Patch::new();
        patch.set_byte(PRM_SEQ_LENGTH as usize, 0);
        assert_eq!(patch.sequence_length(), 1);
        patch.set_byte(PRM_SEQ_LENGTH as usize, 99);
        assert_eq!(patch.sequence_length(), 16);
    }

    #[test]
    fn out_of_range_access_is_inert() {
        let mut patch = Patch::new();
        let before = patch.clone();
        patch.set_byte(SERIALIZED_PATCH_SIZE, 7);
        assert_eq!(patch, before);
        assert_eq!(patch.byte(SERIALIZED_PATCH_SIZE + 10), 0);
    }

    #[test]
    fn bytes_round_trip() {
        let patch = Patch::new();
        let copy = Patch::from_bytes(*patch.as_bytes());
        assert_eq!(copy, patch);
    }
}
