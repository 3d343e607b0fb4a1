//! Two-voice square-wave player for the menu screen.
//!
//! Each voice is a countdown that flips the speaker bit whenever it expires.
//! A menu frame plays one note per voice for `tempo * 255` passes of the tone
//! loop, then the menu goes back to scanning the keyboard.

use crate::core::bus::{Device, PORT_BORDER};
use crate::menu::music;

/// Reserved datum that ends a tune. The cursor wraps to the start.
pub const END_OF_TUNE: u8 = 0xFF;

/// High byte of a tuning value that marks silence.
pub const SILENCE: u8 = 0xFF;

/// Passes of the tone loop per tempo step.
pub const SUB_TICKS_PER_STEP: u16 = 255;

/// Default number of tempo steps per note. Lower is faster.
pub const DEFAULT_TEMPO: u8 = 24;

/// Speaker bit of the border port.
const SPEAKER: u8 = 0x10;

/// A looping list of note data terminated by [`END_OF_TUNE`].
#[derive(Clone, Copy, Debug)]
pub struct Tune {
    data: &'static [u8],
}

impl Tune {
    /// Panics unless `data` holds at least one note followed by the end marker.
    pub const fn new(data: &'static [u8]) -> Self {
        assert!(data.len() >= 2, "tune needs a note and an end marker");
        assert!(data[0] != END_OF_TUNE, "tune starts with the end marker");
        assert!(data[data.len() - 1] == END_OF_TUNE, "tune is not terminated");
        Self { data }
    }

    pub fn data(&self) -> &'static [u8] {
        self.data
    }
}

/// One voice: a 16-bit countdown held as two 8-bit halves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToneChannel {
    countdown_high: u8,
    countdown_low: u8,
    reload_value: u16,
    tune_cursor: usize,
    output_phase: bool,
}

impl ToneChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the next datum to read.
    pub fn tune_cursor(&self) -> usize {
        self.tune_cursor
    }

    pub fn reload_value(&self) -> u16 {
        self.reload_value
    }

    pub fn countdown(&self) -> u16 {
        u16::from_be_bytes([self.countdown_high, self.countdown_low])
    }

    pub fn output_phase(&self) -> bool {
        self.output_phase
    }

    /// Value written to the border port for the current phase.
    pub fn output(&self) -> u8 {
        if self.output_phase { SPEAKER } else { 0 }
    }

    /// Read the next datum of `tune`, wrapping to the start at the end marker.
    pub fn next_datum(&mut self, tune: &Tune) -> u8 {
        if tune.data[self.tune_cursor] == END_OF_TUNE {
            self.tune_cursor = 0;
        }
        let datum = tune.data[self.tune_cursor];
        self.tune_cursor += 1;
        datum
    }

    /// Start a note: countdown and reload both take `tuning`, phase goes low.
    pub fn load(&mut self, tuning: u16) {
        self.reload_value = tuning;
        self.set_countdown(tuning);
        self.output_phase = false;
    }

    fn set_countdown(&mut self, value: u16) {
        [self.countdown_high, self.countdown_low] = value.to_be_bytes();
    }

    /// One pass of the tone loop.
    ///
    /// The low half counts down and borrows from the high half. Only when both
    /// halves are zero at once does the phase flip and the countdown reload,
    /// so a reload value of `N` flips every `N` passes.
    ///
    /// Returns true if the phase flipped.
    pub fn step(&mut self) -> bool {
        let (low, borrow) = self.countdown_low.overflowing_sub(1);
        self.countdown_low = low;
        if borrow {
            self.countdown_high = self.countdown_high.wrapping_sub(1);
        }

        if self.countdown_high == 0 && self.countdown_low == 0 {
            self.output_phase = !self.output_phase;
            self.set_countdown(self.reload_value);
            true
        } else {
            false
        }
    }
}

/// Both voices plus the tunes they walk. Lives as long as the menu so the
/// music picks up where it stopped.
#[derive(Clone, Debug)]
pub struct Sequencer {
    channels: [ToneChannel; 2],
    tunes: [Tune; 2],
}

impl Sequencer {
    pub fn new(tunes: [Tune; 2]) -> Self {
        Self {
            channels: [ToneChannel::new(); 2],
            tunes,
        }
    }

    pub fn channel(&self, index: usize) -> &ToneChannel {
        &self.channels[index]
    }

    /// Load the next note of each tune.
    ///
    /// If the second voice lands on silence it doubles the first voice
    /// instead.
    pub fn next_notes(&mut self) {
        let datum = self.channels[0].next_datum(&self.tunes[0]);
        self.channels[0].load(music::tuning(datum));

        let datum = self.channels[1].next_datum(&self.tunes[1]);
        let tuning = music::tuning(datum);
        if (tuning >> 8) as u8 == SILENCE {
            let lead = self.channels[0].reload_value();
            self.channels[1].load(lead);
        } else {
            self.channels[1].load(tuning);
        }
    }

    /// Run `steps * 255` passes of the tone loop on the current notes.
    ///
    /// Channel 0 always runs before channel 1 within a pass. Each flip is
    /// written straight to the border port.
    pub fn run<D: Device + ?Sized>(&mut self, device: &mut D, steps: u8) {
        for _ in 0..steps {
            for _ in 0..SUB_TICKS_PER_STEP {
                for channel in &mut self.channels {
                    if channel.step() {
                        device.port_out(PORT_BORDER, channel.output());
                    }
                }
                device.sub_tick();
            }
        }
    }

    /// Play one menu frame: next notes, then `tempo` steps.
    pub fn play_frame<D: Device + ?Sized>(&mut self, device: &mut D, tempo: u8) {
        self.next_notes();
        self.run(device, tempo);
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new([music::LEAD, music::BASS])
    }
}
