//! Read-only lookup over the program-resident string and numeric tables.
//!
//! The editor never stores display text itself: page names, parameter names
//! and the names of enumerated values are all referenced through an opaque
//! [`ResourceId`] and resolved on demand through a [`ResourceLookup`].
//!
//! Enumerations occupy consecutive ids, so the name of value `n` of an
//! enumeration is found at `first_id + n`.

/// Opaque key into a string table or a lookup-table table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResourceId(pub u8);

impl ResourceId {
    /// The id `index` entries after this one, or `None` past the id space.
    pub const fn offset(self, index: u8) -> Option<Self> {
        match self.0.checked_add(index) {
            Some(id) => Some(ResourceId(id)),
            None => None,
        }
    }
}

/// Read access to immutable resource tables.
///
/// Both lookups are pure. An unbound id or an index past the end of a table
/// is not an error: strings resolve to `""` and table entries to `0`.
pub trait ResourceLookup {
    /// Resolve a string resource.
    fn resolve_string(&self, id: ResourceId) -> &str;

    /// Read entry `index` of the numeric lookup table `id`.
    fn resolve_table_entry(&self, id: ResourceId, index: usize) -> u16;
}

/// Resource manager with no tables linked in.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResources;

impl ResourceLookup for NoResources {
    fn resolve_string(&self, _id: ResourceId) -> &str {
        ""
    }

    fn resolve_table_entry(&self, _id: ResourceId, _index: usize) -> u16 {
        0
    }
}

/// The tables built into the firmware.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinResources;

impl ResourceLookup for BuiltinResources {
    fn resolve_string(&self, id: ResourceId) -> &str {
        STRINGS.get(id.0 as usize).copied().unwrap_or("")
    }

    fn resolve_table_entry(&self, id: ResourceId, index: usize) -> u16 {
        LOOKUP_TABLES
            .get(id.0 as usize)
            .and_then(|table| table.get(index))
            .copied()
            .unwrap_or(0)
    }
}

// ── String table ─────────────────────────────────────────────────────

/// Declares the string ids and the table in one list so they cannot drift.
macro_rules! string_resources {
    ($($id:ident => $text:literal,)*) => {
        #[allow(non_camel_case_types)]
        #[repr(u8)]
        enum StringIndex {
            $($id,)*
        }

        $(pub const $id: ResourceId = ResourceId(StringIndex::$id as u8);)*

        /// Program-resident strings, indexed by [`ResourceId`].
        pub static STRINGS: &[&str] = &[$($text,)*];
    };
}

string_resources! {
    // Page names
    STR_RES_OSCILLATOR_1 => "oscillator 1",
    STR_RES_OSCILLATOR_2 => "oscillator 2",
    STR_RES_MIXER => "mixer",
    STR_RES_FILTER => "filter",
    STR_RES_ENVELOPE => "envelope",
    STR_RES_LFO => "lfo",
    STR_RES_MOD_MATRIX => "mod matrix",
    STR_RES_ARPEGGIATOR => "arpeggiator",
    STR_RES_STEP_SEQUENCER => "step sequencer",
    STR_RES_KEYBOARD => "keyboard",
    STR_RES_LOAD_SAVE => "load/save",

    // Parameter names, short then long
    STR_RES_SHP => "shp",
    STR_RES_SHAPE => "shape",
    STR_RES_PRM => "prm",
    STR_RES_PARAMETER => "parameter",
    STR_RES_RNG => "rng",
    STR_RES_RANGE => "range",
    STR_RES_DET => "det",
    STR_RES_DETUNE => "detune",
    STR_RES_BAL => "bal",
    STR_RES_BALANCE => "osc mix",
    STR_RES_SUB => "sub",
    STR_RES_SUB_OSC => "sub osc",
    STR_RES_NOI => "noi",
    STR_RES_NOISE_LEVEL => "noise",
    STR_RES_CRU => "cru",
    STR_RES_BIT_CRUSH => "bit crush",
    STR_RES_CUT => "cut",
    STR_RES_CUTOFF => "cutoff",
    STR_RES_RES => "res",
    STR_RES_RESONANCE => "resonance",
    STR_RES_ENV => "env",
    STR_RES_ENV_AMOUNT => "env amount",
    STR_RES_LFO_AMOUNT => "lfo amount",
    STR_RES_ATK => "atk",
    STR_RES_ATTACK => "attack",
    STR_RES_DEC => "dec",
    STR_RES_DECAY => "decay",
    STR_RES_SUS => "sus",
    STR_RES_SUSTAIN => "sustain",
    STR_RES_REL => "rel",
    STR_RES_RELEASE => "release",
    STR_RES_LF1 => "lf1",
    STR_RES_LFO1_WAVE => "lfo1 wave",
    STR_RES_RT1 => "rt1",
    STR_RES_LFO1_RATE => "lfo1 rate",
    STR_RES_LF2 => "lf2",
    STR_RES_LFO2_WAVE => "lfo2 wave",
    STR_RES_RT2 => "rt2",
    STR_RES_LFO2_RATE => "lfo2 rate",
    STR_RES_ROW => "row",
    STR_RES_MOD_ROW => "mod row",
    STR_RES_SRC => "src",
    STR_RES_SOURCE => "source",
    STR_RES_DST => "dst",
    STR_RES_DESTINATION => "target",
    STR_RES_AMT => "amt",
    STR_RES_AMOUNT => "amount",
    STR_RES_BPM => "bpm",
    STR_RES_TEMPO => "tempo",
    STR_RES_PAT => "pat",
    STR_RES_PATTERN => "pattern",
    STR_RES_OCT => "oct",
    STR_RES_OCTAVES => "octaves",
    STR_RES_LEN => "len",
    STR_RES_SEQ_LENGTH => "seq length",
    STR_RES_RAG => "rag",
    STR_RES_RAGA => "raga",
    STR_RES_PRT => "prt",
    STR_RES_PORTAMENTO => "portamento",
    STR_RES_LEG => "leg",
    STR_RES_LEGATO => "legato",
    STR_RES_TRN => "trn",
    STR_RES_TRANSPOSE => "transpose",

    // Step sequencer labels
    STR_RES_STP => "stp",
    STR_RES_STEP => "step",
    STR_RES_NOT => "not",
    STR_RES_NOTE => "note",
    STR_RES_VEL => "vel",
    STR_RES_VELOCITY => "velocity",
    STR_RES_GAT => "gat",
    STR_RES_GATE => "gate",

    // Boolean
    STR_RES_OFF => "off",
    STR_RES_ON => "on",

    // Oscillator waveforms
    STR_RES_NONE => "none",
    STR_RES_SAW => "saw",
    STR_RES_SQUARE => "square",
    STR_RES_TRIANGLE => "triang",
    STR_RES_ZSAW => "zsaw",
    STR_RES_ZRESO => "zreso",
    STR_RES_ZTRI => "ztri",
    STR_RES_ZPULSE => "zpulse",
    STR_RES_ZSYNC => "zsync",
    STR_RES_FM => "fm",
    STR_RES_8BITS => "8bits",
    STR_RES_CRUSH => "crush",
    STR_RES_NOISE => "noise",
    STR_RES_VOWEL => "vowel",

    // LFO waveforms
    STR_RES_TRI => "tri",
    STR_RES_SQR => "sqr",
    STR_RES_S_AND_H => "s&h",
    STR_RES_RAMP => "ramp",

    // Modulation sources
    STR_RES_ENV1 => "env1",
    STR_RES_ENV2 => "env2",
    STR_RES_LFO1 => "lfo1",
    STR_RES_LFO2 => "lfo2",
    STR_RES_SEQ => "seq",
    STR_RES_WHEEL => "wheel",
    STR_RES_AFTERTOUCH => "aftert",
    STR_RES_BEND => "bend",
    STR_RES_SRC_NOTE => "note",
    STR_RES_SRC_VELOCITY => "veloc",
    STR_RES_RANDOM => "random",
    STR_RES_CV => "cv",

    // Modulation destinations
    STR_RES_DST_CUTOFF => "cutoff",
    STR_RES_VCA => "vca",
    STR_RES_PWM1 => "pwm1",
    STR_RES_PWM2 => "pwm2",
    STR_RES_OSC1 => "osc1",
    STR_RES_OSC2 => "osc2",
    STR_RES_OSC1_2 => "osc1+2",
    STR_RES_MIX => "mix",
    STR_RES_DST_NOISE => "noise",
    STR_RES_SUBOSC => "subosc",
    STR_RES_DST_RESONANCE => "reso",
    STR_RES_DST_ATTACK => "attack",

    // Arpeggiator patterns
    STR_RES_PATTERN_1 => "x.x.",
    STR_RES_PATTERN_2 => "xx.x",
    STR_RES_PATTERN_3 => "x..x",
    STR_RES_PATTERN_4 => "x.xx",
    STR_RES_PATTERN_5 => "xxx.",
    STR_RES_PATTERN_6 => "x...",
    STR_RES_PATTERN_7 => ".x.x",
    STR_RES_PATTERN_8 => "xxxx",

    // Ragas
    STR_RES_EQUAL => "equal",
    STR_RES_BHAIRAV => "bhairav",
    STR_RES_GUNAKRI => "gunakri",
    STR_RES_MARWA => "marwa",
    STR_RES_SHREE => "shree",
    STR_RES_PURVI => "purvi",
    STR_RES_BILAWAL => "bilawal",
    STR_RES_YAMAN => "yaman",
    STR_RES_KAFI => "kafi",
    STR_RES_BHIMPALASREE => "bhimpalasree",
    STR_RES_DARBARI => "darbari",
    STR_RES_BAGESHREE => "bageshree",
    STR_RES_RAGESHREE => "rageshree",
    STR_RES_KHAMAJ => "khamaj",

    // Tempo
    STR_RES_EXT => "ext",

    // Load/save page
    STR_RES_LOAD => "load",
    STR_RES_EXIT => "exit",
    STR_RES_SAVE => "save",
    STR_RES_LOAD_FAILED => "load failed",
    STR_RES_SAVE_FAILED => "save failed",
    STR_RES_PATCH => "patch",

    // Note names
    STR_RES_C => "C",
    STR_RES_C_SHARP => "C#",
    STR_RES_D => "D",
    STR_RES_D_SHARP => "D#",
    STR_RES_E => "E",
    STR_RES_F => "F",
    STR_RES_F_SHARP => "F#",
    STR_RES_G => "G",
    STR_RES_G_SHARP => "G#",
    STR_RES_A => "A",
    STR_RES_A_SHARP => "A#",
    STR_RES_B => "B",

    // Splash screen
    STR_RES_SHRUTI_1 => "shruti-1",
    STR_RES_VERSION => "v1.0",
}

/// Number of oscillator waveforms.
pub const NUM_WAVEFORMS: u8 = STR_RES_VOWEL.0 - STR_RES_NONE.0 + 1;
/// Number of LFO waveforms.
pub const NUM_LFO_WAVEFORMS: u8 = STR_RES_RAMP.0 - STR_RES_TRI.0 + 1;
/// Number of modulation sources.
pub const NUM_MODULATION_SOURCES: u8 = STR_RES_CV.0 - STR_RES_ENV1.0 + 1;
/// Number of modulation destinations.
pub const NUM_MODULATION_DESTINATIONS: u8 = STR_RES_DST_ATTACK.0 - STR_RES_DST_CUTOFF.0 + 1;
/// Number of arpeggiator patterns.
pub const NUM_PATTERNS: u8 = STR_RES_PATTERN_8.0 - STR_RES_PATTERN_1.0 + 1;
/// Number of ragas (tuning tables).
pub const NUM_RAGAS: u8 = STR_RES_KHAMAJ.0 - STR_RES_EQUAL.0 + 1;

// ── Lookup tables ────────────────────────────────────────────────────

/// Tempo index → BPM. Index 0 stands for the external clock.
pub const LUT_RES_TEMPO: ResourceId = ResourceId(0);

/// Number of entries in the tempo table (external clock included).
pub const NUM_TEMPOS: usize = 41;

const fn tempo_table() -> [u16; NUM_TEMPOS] {
    let mut table = [0u16; NUM_TEMPOS];
    let mut i = 1;
    while i < NUM_TEMPOS {
        table[i] = 40 + 5 * (i as u16 - 1);
        i += 1;
    }
    table
}

static TEMPO_TABLE: [u16; NUM_TEMPOS] = tempo_table();

/// Program-resident numeric tables, indexed by [`ResourceId`].
pub static LOOKUP_TABLES: &[&[u16]] = &[&TEMPO_TABLE];

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_index_their_own_strings() {
        let r = BuiltinResources;
        assert_eq!(r.resolve_string(STR_RES_OSCILLATOR_1), "oscillator 1");
        assert_eq!(r.resolve_string(STR_RES_LOAD_SAVE), "load/save");
        assert_eq!(r.resolve_string(STR_RES_ON), "on");
        assert_eq!(r.resolve_string(STR_RES_VERSION), "v1.0");
    }

    #[test]
    fn enumerations_are_contiguous() {
        let r = BuiltinResources;
        let second = STR_RES_NONE.offset(1).unwrap();
        assert_eq!(r.resolve_string(second), "saw");
        assert_eq!(NUM_WAVEFORMS, 14);
        assert_eq!(NUM_LFO_WAVEFORMS, 4);
        assert_eq!(NUM_MODULATION_SOURCES, 12);
        assert_eq!(NUM_MODULATION_DESTINATIONS, 12);
        assert_eq!(NUM_PATTERNS, 8);
        assert_eq!(NUM_RAGAS, 14);
    }

    #[test]
    fn unbound_ids_resolve_to_empty() {
        let r = BuiltinResources;
        assert_eq!(r.resolve_string(ResourceId(u8::MAX)), "");
        assert_eq!(r.resolve_table_entry(ResourceId(9), 0), 0);
        assert_eq!(r.resolve_table_entry(LUT_RES_TEMPO, NUM_TEMPOS), 0);
    }

    #[test]
    fn no_resources_is_empty() {
        let r = NoResources;
        assert_eq!(r.resolve_string(STR_RES_ON), "");
        assert_eq!(r.resolve_table_entry(LUT_RES_TEMPO, 3), 0);
    }

    #[test]
    fn tempo_table_starts_with_external_clock() {
        let r = BuiltinResources;
        assert_eq!(r.resolve_table_entry(LUT_RES_TEMPO, 0), 0);
        assert_eq!(r.resolve_table_entry(LUT_RES_TEMPO, 1), 40);
        assert_eq!(r.resolve_table_entry(LUT_RES_TEMPO, 17), 120);
        assert_eq!(r.resolve_table_entry(LUT_RES_TEMPO, NUM_TEMPOS - 1), 235);
    }

    #[test]
    fn strings_fit_the_display() {
        for s in STRINGS {
            assert!(s.len() <= crate::display::LCD_WIDTH, "{s:?} is too long");
            assert!(s.is_ascii());
        }
    }

    #[test]
    fn offset_past_id_space_is_none() {
        assert_eq!(ResourceId(250).offset(10), None);
        assert_eq!(ResourceId(1).offset(2), Some(ResourceId(3)));
    }
}
