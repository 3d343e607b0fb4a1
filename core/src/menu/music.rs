//! Menu tune: a march in G for two voices.
//!
//! Each datum is one menu frame. Datum 0 is a rest; 1-36 are the semitones
//! C3 to B5.

use crate::menu::tune::{END_OF_TUNE, Tune};

pub const REST: u8 = 0;

// Scale degrees used by the tune, as datum values.
pub const D3: u8 = 3;
pub const F_SHARP3: u8 = 7;
pub const G3: u8 = 8;
pub const A3: u8 = 10;
pub const B3: u8 = 12;
pub const D4: u8 = 15;
pub const F_SHARP4: u8 = 19;
pub const G4: u8 = 20;
pub const A4: u8 = 22;
pub const B4: u8 = 24;
pub const C5: u8 = 25;
pub const D5: u8 = 27;
pub const F_SHARP5: u8 = 31;
pub const G5: u8 = 32;

/// Tone-loop passes per half-period, indexed by datum.
///
/// Entry 0 has the silence marker in its high byte; the others are the
/// equal-tempered scale at the tone loop's rate.
const TUNING_TABLE: [u16; 37] = [
    0xFFFF, // rest
    223, 210, 199, 187, 177, 167, 158, 149, 140, 133, 125, 118, // C3..B3
    111, 105, 99, 94, 88, 84, 79, 74, 70, 66, 63, 59, // C4..B4
    56, 53, 50, 47, 44, 42, 39, 37, 35, 33, 31, 30, // C5..B5
];

/// Countdown value for a tune datum.
pub fn tuning(datum: u8) -> u16 {
    let index = datum as usize;
    assert!(index < TUNING_TABLE.len(), "tune datum {datum:#04x} has no tuning");
    TUNING_TABLE[index]
}

#[rustfmt::skip]
const LEAD_DATA: [u8; 33] = [
    G4, G4, B4, B4, D5, D5, B4, B4,
    C5, C5, A4, A4, F_SHARP4, F_SHARP4, D4, D4,
    G4, G4, B4, B4, D5, D5, G5, G5,
    F_SHARP5, F_SHARP5, D5, D5, G5, G5, G5, REST,
    END_OF_TUNE,
];

#[rustfmt::skip]
const BASS_DATA: [u8; 33] = [
    G3, G3, D4, D4, G3, G3, D4, D4,
    A3, A3, D4, D4, D3, D3, F_SHARP3, F_SHARP3,
    G3, G3, D4, D4, G3, G3, B3, B3,
    D3, REST, F_SHARP3, REST, G3, REST, G3, REST,
    END_OF_TUNE,
];

pub const LEAD: Tune = Tune::new(&LEAD_DATA);
pub const BASS: Tune = Tune::new(&BASS_DATA);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_datum_has_a_tuning() {
        for tune in [LEAD, BASS] {
            for &datum in tune.data() {
                if datum != END_OF_TUNE {
                    tuning(datum);
                }
            }
        }
    }

    #[test]
    fn notes_rise_in_pitch() {
        assert!(TUNING_TABLE[1..].windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn rest_is_silence() {
        assert_eq!((tuning(REST) >> 8) as u8, crate::menu::tune::SILENCE);
    }
}
