/// Rate at which the menu's tone loop runs: one pass of the two-channel
/// countdown loop takes about 60 T-states on a 3.5 MHz Z80.
pub const SUB_TICK_HZ: u64 = 3_500_000 / 60;

/// Host audio output rate.
pub const OUTPUT_SAMPLE_RATE: u64 = 44_100;

/// The Spectrum's 1-bit speaker, driven from bit 4 of port `0xFE`.
///
/// The tone loop reports every pass through [`Beeper::tick`]; the speaker
/// level is box-filtered down to [`OUTPUT_SAMPLE_RATE`] with a Bresenham
/// accumulator.
pub struct Beeper {
    level: bool,
    amplitude: i16,
    sample_accum: i64,
    sample_count: u32,
    sample_phase: u64,
    audio_buffer: Vec<i16>,
}

impl Beeper {
    /// `volume` is 0-100 percent of full scale.
    pub fn new(volume: u8) -> Self {
        let volume = volume.min(100) as i32;
        Self {
            level: false,
            amplitude: (i16::MAX as i32 * volume / 100) as i16,
            sample_accum: 0,
            sample_count: 0,
            sample_phase: 0,
            audio_buffer: Vec::with_capacity(8192),
        }
    }

    /// Called for every write to port `0xFE`.
    pub fn write(&mut self, value: u8) {
        self.level = value & 0x10 != 0;
    }

    pub fn level(&self) -> bool {
        self.level
    }

    /// Advance by one tone-loop pass at [`SUB_TICK_HZ`].
    pub fn tick(&mut self) {
        self.sample_accum += if self.level { self.amplitude as i64 } else { 0 };
        self.sample_count += 1;
        self.sample_phase += OUTPUT_SAMPLE_RATE;

        if self.sample_phase >= SUB_TICK_HZ {
            self.sample_phase -= SUB_TICK_HZ;
            let sample = (self.sample_accum / self.sample_count as i64) as i16;
            self.audio_buffer.push(sample);
            self.sample_accum = 0;
            self.sample_count = 0;
        }
    }

    /// Take all samples produced since the last call.
    pub fn drain_audio(&mut self) -> Vec<i16> {
        std::mem::take(&mut self.audio_buffer)
    }
}

impl Default for Beeper {
    fn default() -> Self {
        Self::new(50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_speaker_produces_zero_samples() {
        let mut beeper = Beeper::new(100);
        for _ in 0..SUB_TICK_HZ / 100 {
            beeper.tick();
        }
        let samples = beeper.drain_audio();
        // 10 ms of sub-ticks is about 441 output samples.
        assert!((440..=441).contains(&samples.len()));
        assert!(samples.iter().all(|&s| s == 0));
    }

    #[test]
    fn high_level_produces_full_amplitude() {
        let mut beeper = Beeper::new(100);
        beeper.write(0x10);
        for _ in 0..100 {
            beeper.tick();
        }
        let samples = beeper.drain_audio();
        assert!(!samples.is_empty());
        assert!(samples.iter().all(|&s| s == i16::MAX));
    }

    #[test]
    fn border_bits_do_not_drive_the_speaker() {
        let mut beeper = Beeper::new(100);
        beeper.write(0x07);
        assert!(!beeper.level());
        beeper.write(0x17);
        assert!(beeper.level());
    }

    #[test]
    fn drain_empties_the_buffer() {
        let mut beeper = Beeper::default();
        for _ in 0..1000 {
            beeper.tick();
        }
        assert!(!beeper.drain_audio().is_empty());
        assert!(beeper.drain_audio().is_empty());
    }
}
