use super::page::Page;
use crate::patch::*;
use crate::resources::*;

/// How a parameter's raw byte is interpreted and displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Unit {
    /// Unsigned byte with no musical meaning attached.
    RawUint8,
    Uint8,
    /// Signed byte, stored as two's complement.
    Int8,
    Boolean,
    Waveform,
    LfoWaveform,
    ModulationSource,
    ModulationDestination,
    Pattern,
    Raga,
    /// Index into the tempo table, where 0 means "external clock".
    TempoWithExternalClock,
}

impl Unit {
    /// Whether values of this unit are stored as two's complement.
    pub const fn is_signed(self) -> bool {
        matches!(self, Unit::Int8)
    }

    /// First string of the enumeration's names, for named units.
    ///
    /// Value `v` of a parameter with minimum `min` is named by the string at
    /// `string_table() + (v - min)`.
    pub const fn string_table(self) -> Option<ResourceId> {
        match self {
            Unit::Boolean => Some(STR_RES_OFF),
            Unit::Waveform => Some(STR_RES_NONE),
            Unit::LfoWaveform => Some(STR_RES_TRI),
            Unit::ModulationSource => Some(STR_RES_ENV1),
            Unit::ModulationDestination => Some(STR_RES_DST_CUTOFF),
            Unit::Pattern => Some(STR_RES_PATTERN_1),
            Unit::Raga => Some(STR_RES_EQUAL),
            Unit::RawUint8
            | Unit::Uint8
            | Unit::Int8
            | Unit::TempoWithExternalClock => None,
        }
    }
}

/// Static description of one editable parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParameterDefinition {
    /// Stable id, equal to the parameter's byte offset in the patch.
    pub id: u8,
    pub min_value: i16,
    pub max_value: i16,
    pub page: Page,
    pub unit: Unit,
    /// Three-letter label for the summary view.
    pub short_name: ResourceId,
    /// Label for the details view.
    pub long_name: ResourceId,
}

impl ParameterDefinition {
    /// Byte offset of the parameter in the patch.
    pub const fn offset(&self) -> usize {
        self.id as usize
    }

    /// Clamp an arbitrary input value into `[min_value, max_value]`.
    pub fn clamp(&self, value: i32) -> i16 {
        value.clamp(self.min_value as i32, self.max_value as i32) as i16
    }

    /// Convert a value to its stored byte.
    pub fn encode(&self, value: i16) -> u8 {
        if self.unit.is_signed() {
            value as i8 as u8
        } else {
            value as u8
        }
    }

    /// Convert a stored byte back to a value, without clamping.
    pub fn decode(&self, raw: u8) -> i16 {
        if self.unit.is_signed() {
            raw as i8 as i16
        } else {
            raw as i16
        }
    }

    /// Decode a stored byte and clamp it into range.
    ///
    /// Patches from storage are not validated, so display and relative edits
    /// go through this rather than [`decode`](Self::decode).
    pub fn value_of(&self, raw: u8) -> i16 {
        self.clamp(self.decode(raw) as i32)
    }
}

/// Number of parameter definitions.
pub const NUM_PARAMETERS: usize = 34;

const fn param(
    id: u8,
    min_value: i16,
    max_value: i16,
    page: Page,
    unit: Unit,
    short_name: ResourceId,
    long_name: ResourceId,
) -> ParameterDefinition {
    ParameterDefinition {
        id,
        min_value,
        max_value,
        page,
        unit,
        short_name,
        long_name,
    }
}

const WAVEFORM_MAX: i16 = NUM_WAVEFORMS as i16 - 1;
const LFO_WAVEFORM_MAX: i16 = NUM_LFO_WAVEFORMS as i16 - 1;
const SOURCE_MAX: i16 = NUM_MODULATION_SOURCES as i16 - 1;
const DESTINATION_MAX: i16 = NUM_MODULATION_DESTINATIONS as i16 - 1;
const PATTERN_MAX: i16 = NUM_PATTERNS as i16 - 1;
const RAGA_MAX: i16 = NUM_RAGAS as i16 - 1;
const TEMPO_MAX: i16 = NUM_TEMPOS as i16 - 1;

/// Parameter table in declared order. Within a page, declaration order is
/// controller order.
///
/// The modulation matrix entries describe row 0; other rows reuse them at
/// `offset() + row * MOD_MATRIX_ROW_SIZE`.
#[rustfmt::skip]
pub static PARAMETER_DEFINITIONS: [ParameterDefinition; NUM_PARAMETERS] = [
    // Oscillator 1
    param(PRM_OSC_SHAPE_1, 0, WAVEFORM_MAX, Page::Oscillator1, Unit::Waveform, STR_RES_SHP, STR_RES_SHAPE),
    param(PRM_OSC_PARAMETER_1, 0, 127, Page::Oscillator1, Unit::Uint8, STR_RES_PRM, STR_RES_PARAMETER),
    param(PRM_OSC_RANGE_1, -24, 24, Page::Oscillator1, Unit::Int8, STR_RES_RNG, STR_RES_RANGE),

    // Oscillator 2
    param(PRM_OSC_SHAPE_2, 0, WAVEFORM_MAX, Page::Oscillator2, Unit::Waveform, STR_RES_SHP, STR_RES_SHAPE),
    param(PRM_OSC_PARAMETER_2, 0, 127, Page::Oscillator2, Unit::Uint8, STR_RES_PRM, STR_RES_PARAMETER),
    param(PRM_OSC_RANGE_2, -24, 24, Page::Oscillator2, Unit::Int8, STR_RES_RNG, STR_RES_RANGE),
    param(PRM_OSC_DETUNE_2, 0, 127, Page::Oscillator2, Unit::RawUint8, STR_RES_DET, STR_RES_DETUNE),

    // Mixer
    param(PRM_MIX_BALANCE, 0, 63, Page::Mixer, Unit::Uint8, STR_RES_BAL, STR_RES_BALANCE),
    param(PRM_MIX_SUB_OSC, 0, 63, Page::Mixer, Unit::Uint8, STR_RES_SUB, STR_RES_SUB_OSC),
    param(PRM_MIX_NOISE, 0, 63, Page::Mixer, Unit::Uint8, STR_RES_NOI, STR_RES_NOISE_LEVEL),
    param(PRM_MIX_CRUSH, 0, 31, Page::Mixer, Unit::RawUint8, STR_RES_CRU, STR_RES_BIT_CRUSH),

    // Filter
    param(PRM_FILTER_CUTOFF, 0, 127, Page::Filter, Unit::Uint8, STR_RES_CUT, STR_RES_CUTOFF),
    param(PRM_FILTER_RESONANCE, 0, 63, Page::Filter, Unit::Uint8, STR_RES_RES, STR_RES_RESONANCE),
    param(PRM_FILTER_ENV, -63, 63, Page::Filter, Unit::Int8, STR_RES_ENV, STR_RES_ENV_AMOUNT),
    param(PRM_FILTER_LFO, 0, 63, Page::Filter, Unit::Uint8, STR_RES_LFO, STR_RES_LFO_AMOUNT),

    // Envelope
    param(PRM_ENV_ATTACK, 0, 127, Page::Envelope, Unit::Uint8, STR_RES_ATK, STR_RES_ATTACK),
    param(PRM_ENV_DECAY, 0, 127, Page::Envelope, Unit::Uint8, STR_RES_DEC, STR_RES_DECAY),
    param(PRM_ENV_SUSTAIN, 0, 127, Page::Envelope, Unit::Uint8, STR_RES_SUS, STR_RES_SUSTAIN),
    param(PRM_ENV_RELEASE, 0, 127, Page::Envelope, Unit::Uint8, STR_RES_REL, STR_RES_RELEASE),

    // LFOs
    param(PRM_LFO_WAVE_1, 0, LFO_WAVEFORM_MAX, Page::Lfo, Unit::LfoWaveform, STR_RES_LF1, STR_RES_LFO1_WAVE),
    param(PRM_LFO_RATE_1, 0, 127, Page::Lfo, Unit::Uint8, STR_RES_RT1, STR_RES_LFO1_RATE),
    param(PRM_LFO_WAVE_2, 0, LFO_WAVEFORM_MAX, Page::Lfo, Unit::LfoWaveform, STR_RES_LF2, STR_RES_LFO2_WAVE),
    param(PRM_LFO_RATE_2, 0, 127, Page::Lfo, Unit::Uint8, STR_RES_RT2, STR_RES_LFO2_RATE),

    // Modulation matrix, row 0
    param(PRM_MOD_SOURCE, 0, SOURCE_MAX, Page::ModMatrix, Unit::ModulationSource, STR_RES_SRC, STR_RES_SOURCE),
    param(PRM_MOD_DESTINATION, 0, DESTINATION_MAX, Page::ModMatrix, Unit::ModulationDestination, STR_RES_DST, STR_RES_DESTINATION),
    param(PRM_MOD_AMOUNT, -63, 63, Page::ModMatrix, Unit::Int8, STR_RES_AMT, STR_RES_AMOUNT),

    // Arpeggiator
    param(PRM_ARP_TEMPO, 0, TEMPO_MAX, Page::Arpeggiator, Unit::TempoWithExternalClock, STR_RES_BPM, STR_RES_TEMPO),
    param(PRM_ARP_PATTERN, 0, PATTERN_MAX, Page::Arpeggiator, Unit::Pattern, STR_RES_PAT, STR_RES_PATTERN),
    param(PRM_ARP_OCTAVES, 1, 4, Page::Arpeggiator, Unit::Uint8, STR_RES_OCT, STR_RES_OCTAVES),
    param(PRM_SEQ_LENGTH, 1, SEQUENCE_MAX_LENGTH as i16, Page::Arpeggiator, Unit::Uint8, STR_RES_LEN, STR_RES_SEQ_LENGTH),

    // Keyboard
    param(PRM_KBD_RAGA, 0, RAGA_MAX, Page::Keyboard, Unit::Raga, STR_RES_RAG, STR_RES_RAGA),
    param(PRM_KBD_PORTAMENTO, 0, 63, Page::Keyboard, Unit::Uint8, STR_RES_PRT, STR_RES_PORTAMENTO),
    param(PRM_KBD_LEGATO, 0, 1, Page::Keyboard, Unit::Boolean, STR_RES_LEG, STR_RES_LEGATO),
    param(PRM_KBD_TRANSPOSE, -2, 2, Page::Keyboard, Unit::Int8, STR_RES_TRN, STR_RES_TRANSPOSE),
];
