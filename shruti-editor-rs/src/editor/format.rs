use core::fmt::Write;

use heapless::String;

use super::parameter::{ParameterDefinition, Unit};
use crate::display::{LcdLine, LCD_WIDTH};
use crate::resources::{ResourceLookup, LUT_RES_TEMPO, STR_RES_C, STR_RES_EXT};

/// A formatted value, at most one display row long.
pub type ValueText = String<LCD_WIDTH>;

/// Format the stored byte `raw` of `parameter` for display.
///
/// Byte units print as decimal numerals (signed for [`Unit::Int8`]), booleans
/// and named enumerations resolve through `resources`, and the tempo prints
/// the table BPM or the external-clock token. The result never exceeds
/// `width` characters; longer text is cut silently. Stored bytes outside the
/// parameter's range are clamped first.
///
/// # Examples
///
/// ```
/// use shruti::editor::{pretty_print_parameter_value, PARAMETER_DEFINITIONS};
/// use shruti::resources::BuiltinResources;
///
/// let shape = &PARAMETER_DEFINITIONS[0];
/// let text = pretty_print_parameter_value(&BuiltinResources, shape, 1, 6);
/// assert_eq!(text.as_str(), "saw");
/// ```
pub fn pretty_print_parameter_value<R: ResourceLookup + ?Sized>(
    resources: &R,
    parameter: &ParameterDefinition,
    raw: u8,
    width: usize,
) -> ValueText {
    let value = parameter.value_of(raw);
    let mut text = ValueText::new();

    match parameter.unit {
        Unit::RawUint8 | Unit::Uint8 | Unit::Int8 => {
            let _ = write!(text, "{}", value);
        }
        Unit::TempoWithExternalClock => {
            if value == 0 {
                push_fitted(&mut text, resources.resolve_string(STR_RES_EXT), LCD_WIDTH);
            } else {
                let bpm = resources.resolve_table_entry(LUT_RES_TEMPO, value as usize);
                let _ = write!(text, "{}", bpm);
            }
        }
        unit => {
            let name = unit
                .string_table()
                .and_then(|base| base.offset((value - parameter.min_value) as u8))
                .map_or("", |id| resources.resolve_string(id));
            push_fitted(&mut text, name, LCD_WIDTH);
        }
    }

    fit(&text, width)
}

/// Name and octave of a MIDI note, e.g. `C#4` for note 61.
pub fn note_name<R: ResourceLookup + ?Sized>(resources: &R, note: u8) -> ValueText {
    let mut text = ValueText::new();
    if let Some(id) = STR_RES_C.offset(note % 12) {
        push_fitted(&mut text, resources.resolve_string(id), LCD_WIDTH);
    }
    let _ = write!(text, "{}", note as i16 / 12 - 1);
    text
}

fn fit(text: &str, width: usize) -> ValueText {
    let mut out = ValueText::new();
    push_fitted(&mut out, text, width);
    out
}

fn push_fitted<const N: usize>(out: &mut String<N>, text: &str, width: usize) {
    for c in text.chars().take(width) {
        if out.push(c).is_err() {
            break;
        }
    }
}

// ── Row composition ──────────────────────────────────────────────────

/// Append `text` cut or space-padded to exactly `width` characters.
pub(super) fn push_padded(line: &mut LcdLine, text: &str, width: usize) {
    let start = line.len();
    push_fitted(line, text, width);
    while line.len() - start < width {
        if line.push(' ').is_err() {
            break;
        }
    }
}

/// Append `text` right-aligned in `width` characters.
pub(super) fn push_right_aligned(line: &mut LcdLine, text: &str, width: usize) {
    let shown = text.chars().count().min(width);
    for _ in shown..width {
        if line.push(' ').is_err() {
            return;
        }
    }
    push_fitted(line, text, shown);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::parameter::PARAMETER_DEFINITIONS;
    use crate::patch::*;
    use crate::resources::{BuiltinResources, NoResources};

    fn def(id: u8) -> &'static ParameterDefinition {
        PARAMETER_DEFINITIONS.iter().find(|d| d.id == id).unwrap()
    }

    #[test]
    fn boolean_tokens_are_distinct() {
        let legato = def(PRM_KBD_LEGATO);
        let off = pretty_print_parameter_value(&BuiltinResources, legato, 0, 6);
        let on = pretty_print_parameter_value(&BuiltinResources, legato, 1, 6);
        assert_eq!(off.as_str(), "off");
        assert_eq!(on.as_str(), "on");
        assert_ne!(off, on);
    }

    #[test]
    fn output_never_exceeds_width() {
        for parameter in &PARAMETER_DEFINITIONS {
            for raw in 0..=255u8 {
                for width in 0..=LCD_WIDTH + 2 {
                    let text = pretty_print_parameter_value(&BuiltinResources, parameter, raw, width);
                    assert!(text.chars().count() <= width, "{parameter:?} {raw} {width}");
                }
            }
        }
    }

    #[test]
    fn numbers_respect_sign() {
        let env = def(PRM_FILTER_ENV);
        assert_eq!(pretty_print_parameter_value(&BuiltinResources, env, 0xF6, 6).as_str(), "-10");
        let cutoff = def(PRM_FILTER_CUTOFF);
        assert_eq!(pretty_print_parameter_value(&BuiltinResources, cutoff, 100, 6).as_str(), "100");
        // Out of range bytes are shown clamped.
        assert_eq!(pretty_print_parameter_value(&BuiltinResources, cutoff, 200, 6).as_str(), "127");
    }

    #[test]
    fn truncation_is_silent() {
        let cutoff = def(PRM_FILTER_CUTOFF);
        assert_eq!(pretty_print_parameter_value(&BuiltinResources, cutoff, 127, 2).as_str(), "12");
        let raga = def(PRM_KBD_RAGA);
        assert_eq!(pretty_print_parameter_value(&BuiltinResources, raga, 9, 6).as_str(), "bhimpa");
    }

    #[test]
    fn named_enumerations() {
        let r = BuiltinResources;
        assert_eq!(pretty_print_parameter_value(&r, def(PRM_LFO_WAVE_1), 2, 6).as_str(), "s&h");
        assert_eq!(pretty_print_parameter_value(&r, def(PRM_MOD_SOURCE), 11, 6).as_str(), "cv");
        assert_eq!(pretty_print_parameter_value(&r, def(PRM_MOD_DESTINATION), 0, 6).as_str(), "cutoff");
        assert_eq!(pretty_print_parameter_value(&r, def(PRM_ARP_PATTERN), 7, 6).as_str(), "xxxx");
    }

    #[test]
    fn tempo_shows_external_clock_or_bpm() {
        let tempo = def(PRM_ARP_TEMPO);
        assert_eq!(pretty_print_parameter_value(&BuiltinResources, tempo, 0, 6).as_str(), "ext");
        assert_eq!(pretty_print_parameter_value(&BuiltinResources, tempo, 17, 6).as_str(), "120");
    }

    #[test]
    fn missing_tables_display_nothing() {
        let shape = def(PRM_OSC_SHAPE_1);
        assert_eq!(pretty_print_parameter_value(&NoResources, shape, 1, 6).as_str(), "");
        let cutoff = def(PRM_FILTER_CUTOFF);
        assert_eq!(pretty_print_parameter_value(&NoResources, cutoff, 5, 6).as_str(), "5");
    }

    #[test]
    fn note_names() {
        assert_eq!(note_name(&BuiltinResources, 60).as_str(), "C4");
        assert_eq!(note_name(&BuiltinResources, 61).as_str(), "C#4");
        assert_eq!(note_name(&BuiltinResources, 12).as_str(), "C0");
        assert_eq!(note_name(&BuiltinResources, 119).as_str(), "B8");
    }

    #[test]
    fn row_helpers_pad_and_align() {
        let mut line = LcdLine::new();
        push_padded(&mut line, "cutoff", 10);
        push_right_aligned(&mut line, "127", 6);
        assert_eq!(line.as_str(), "cutoff       127");

        let mut line = LcdLine::new();
        push_padded(&mut line, "resonance!", 4);
        push_right_aligned(&mut line, "1234567", 3);
        assert_eq!(line.as_str(), "reso123");
    }
}
