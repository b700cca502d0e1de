//! Raw board readings to editor events.

use crate::registers::ENCODER_COUNT;

/// Consecutive identical reads before a switch level is believed.
pub const DEBOUNCE_READS: u8 = 2;

// ── Turns ────────────────────────────────────────────────────────────────

/// Turns absolute encoder positions into per-read deltas.
///
/// The first reading only sets the baseline, so power-on counts never reach
/// the editor as a turn.
///
/// ```
/// use shruti_controls::EncoderTracker;
///
/// let mut turns = EncoderTracker::new();
/// assert_eq!(turns.update([5, 0, 0, 0]), [0; 4]);
/// assert_eq!(turns.update([7, 0, -1, 0]), [2, 0, -1, 0]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EncoderTracker {
    baseline: Option<[i32; ENCODER_COUNT]>,
}

impl EncoderTracker {
    pub const fn new() -> Self {
        Self { baseline: None }
    }

    /// Deltas since the previous reading. The counters are free-running, so
    /// differences wrap.
    pub fn update(&mut self, positions: [i32; ENCODER_COUNT]) -> [i32; ENCODER_COUNT] {
        let deltas = match self.baseline {
            Some(previous) => core::array::from_fn(|i| positions[i].wrapping_sub(previous[i])),
            None => [0; ENCODER_COUNT],
        };
        self.baseline = Some(positions);
        deltas
    }

    /// Forget the baseline, e.g. after a failed read or a position reset.
    pub fn reset(&mut self) {
        self.baseline = None;
    }
}

// ── Presses ──────────────────────────────────────────────────────────────

/// Debounces switch levels and reports press edges.
///
/// A level change is accepted after [`DEBOUNCE_READS`] consecutive reads
/// agree. Only the released → held transition is reported.
#[derive(Debug, Clone, Default)]
pub struct SwitchTracker {
    held: [bool; ENCODER_COUNT],
    candidate: [bool; ENCODER_COUNT],
    agreeing: [u8; ENCODER_COUNT],
}

impl SwitchTracker {
    pub const fn new() -> Self {
        Self {
            held: [false; ENCODER_COUNT],
            candidate: [false; ENCODER_COUNT],
            agreeing: [0; ENCODER_COUNT],
        }
    }

    /// Feed one reading; returns the switches that were pressed by it.
    pub fn update(&mut self, levels: [bool; ENCODER_COUNT]) -> [bool; ENCODER_COUNT] {
        let mut pressed = [false; ENCODER_COUNT];
        for i in 0..ENCODER_COUNT {
            if levels[i] == self.held[i] {
                self.agreeing[i] = 0;
                continue;
            }
            if levels[i] != self.candidate[i] {
                self.candidate[i] = levels[i];
                self.agreeing[i] = 0;
            }
            self.agreeing[i] += 1;
            if self.agreeing[i] >= DEBOUNCE_READS {
                self.held[i] = levels[i];
                self.agreeing[i] = 0;
                pressed[i] = levels[i];
            }
        }
        pressed
    }

    /// Debounced levels.
    pub fn held(&self) -> [bool; ENCODER_COUNT] {
        self.held
    }

    /// A level change is pending confirmation. The board raises INT only on
    /// edges, so callers must poll again rather than wait for it.
    pub fn settling(&self) -> bool {
        self.agreeing.iter().any(|&n| n > 0)
    }
}
