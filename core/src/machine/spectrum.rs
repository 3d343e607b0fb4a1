use crate::core::bus::{Device, Interrupted, SleepKind};
use crate::core::machine::Platform;
use crate::core::render::{Attribute, Region, Renderer};
use crate::device::beeper::Beeper;
use crate::device::keyboard::ZxKeyboard;
use crate::device::screen::{FRAME_HEIGHT, FRAME_WIDTH, ZxScreen};

/// A 48K Spectrum as far as the menu needs one: keyboard matrix, screen
/// memory, border and speaker, wired to a host [`Platform`].
///
/// Only even ports are decoded (the ULA answers every port with A0 = 0).
/// Odd ports float high.
pub struct Spectrum<P: Platform> {
    keyboard: ZxKeyboard,
    screen: ZxScreen,
    beeper: Beeper,
    border: u8,
    frame: Vec<u8>,
    platform: P,
}

impl<P: Platform> Spectrum<P> {
    pub fn new(platform: P, volume: u8) -> Self {
        Self {
            keyboard: ZxKeyboard::new(),
            screen: ZxScreen::new(),
            beeper: Beeper::new(volume),
            border: 0,
            frame: vec![0; FRAME_WIDTH * FRAME_HEIGHT * 3],
            platform,
        }
    }

    /// Native frame size including the border, as (width, height).
    pub fn display_size(&self) -> (u32, u32) {
        (FRAME_WIDTH as u32, FRAME_HEIGHT as u32)
    }

    pub fn border(&self) -> u8 {
        self.border
    }

    pub fn keyboard(&self) -> &ZxKeyboard {
        &self.keyboard
    }

    pub fn keyboard_mut(&mut self) -> &mut ZxKeyboard {
        &mut self.keyboard
    }

    pub fn screen(&self) -> &ZxScreen {
        &self.screen
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn into_platform(self) -> P {
        self.platform
    }
}

impl<P: Platform> Device for Spectrum<P> {
    fn port_in(&mut self, port: u16) -> u8 {
        if port & 0x0001 == 0 {
            self.keyboard.read((port >> 8) as u8)
        } else {
            0xFF
        }
    }

    fn port_out(&mut self, port: u16, value: u8) {
        if port & 0x0001 == 0 {
            self.border = value & 0x07;
            self.beeper.write(value);
        }
    }

    fn sleep(&mut self, kind: SleepKind, micros: u32) -> Result<(), Interrupted> {
        let samples = self.beeper.drain_audio();
        if !samples.is_empty() {
            self.platform.queue_audio(&samples);
        }
        self.platform.delay(kind, micros);
        self.platform.poll(&mut self.keyboard)
    }

    fn kick(&mut self) {
        self.screen.render(self.border, &mut self.frame);
        self.platform
            .present(&self.frame, FRAME_WIDTH as u32, FRAME_HEIGHT as u32);
    }

    fn sub_tick(&mut self) {
        self.beeper.tick();
    }
}

impl<P: Platform> Renderer for Spectrum<P> {
    fn plot_glyph(&mut self, glyph: u8, offset: u16) -> u16 {
        self.screen.plot_glyph(glyph, offset)
    }

    fn set_attributes(&mut self, region: Region, attribute: Attribute) {
        self.screen.set_attributes(region, attribute);
    }

    fn clear(&mut self, region: Region) {
        self.screen.clear(region);
    }
}
