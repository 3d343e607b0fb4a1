#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};

use stalag_core::core::{Attribute, Device, Interrupted, Platform, Region, Renderer, SleepKind};
use stalag_core::device::{ZxKeyboard, ZxKeys};

/// Keyboard states handed out one per `sleep`. Running out cancels.
#[derive(Default)]
pub struct KeyScript {
    steps: VecDeque<ZxKeys>,
}

impl KeyScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// `keys` held for `ticks` sleeps.
    pub fn hold(mut self, keys: ZxKeys, ticks: usize) -> Self {
        for _ in 0..ticks {
            self.steps.push_back(keys);
        }
        self
    }

    /// One tick with nothing pressed, then one tick with `keys`.
    pub fn tap(self, keys: ZxKeys) -> Self {
        self.hold(ZxKeys::empty(), 1).hold(keys, 1)
    }

    pub fn idle(self, ticks: usize) -> Self {
        self.hold(ZxKeys::empty(), ticks)
    }

    pub fn remaining(&self) -> usize {
        self.steps.len()
    }

    fn next(&mut self) -> Option<ZxKeys> {
        self.steps.pop_front()
    }
}

/// Device + renderer double that records everything the menu does.
pub struct MockHost {
    pub keyboard: ZxKeyboard,
    pub script: KeyScript,
    pub sleeps: Vec<SleepKind>,
    pub outs: Vec<(u16, u8)>,
    pub sub_ticks: u64,
    pub kicks: usize,
    pub clears: Vec<Region>,
    pub attributes: Vec<(Region, Attribute)>,
    /// Every plot in order.
    pub plots: Vec<(u16, u8)>,
    /// Latest glyph at each offset.
    pub cells: BTreeMap<u16, u8>,
}

impl MockHost {
    pub fn new(script: KeyScript) -> Self {
        Self {
            keyboard: ZxKeyboard::new(),
            script,
            sleeps: Vec::new(),
            outs: Vec::new(),
            sub_ticks: 0,
            kicks: 0,
            clears: Vec::new(),
            attributes: Vec::new(),
            plots: Vec::new(),
            cells: BTreeMap::new(),
        }
    }

    /// The `len` cells starting at `offset` as a string.
    pub fn text_at(&self, offset: u16, len: usize) -> String {
        (0..len as u16)
            .map(|i| self.cells.get(&(offset + i)).map_or(' ', |&g| g as char))
            .collect()
    }

    /// How many times anything was plotted at `offset`.
    pub fn plot_count(&self, offset: u16) -> usize {
        self.plots.iter().filter(|(o, _)| *o == offset).count()
    }
}

impl Device for MockHost {
    fn port_in(&mut self, port: u16) -> u8 {
        self.keyboard.read((port >> 8) as u8)
    }

    fn port_out(&mut self, port: u16, value: u8) {
        self.outs.push((port, value));
    }

    fn sleep(&mut self, kind: SleepKind, _micros: u32) -> Result<(), Interrupted> {
        self.sleeps.push(kind);
        let keys = self.script.next().ok_or(Interrupted)?;
        self.keyboard.release_all();
        self.keyboard.press(keys);
        Ok(())
    }

    fn kick(&mut self) {
        self.kicks += 1;
    }

    fn sub_tick(&mut self) {
        self.sub_ticks += 1;
    }
}

impl Renderer for MockHost {
    fn plot_glyph(&mut self, glyph: u8, offset: u16) -> u16 {
        self.plots.push((offset, glyph));
        self.cells.insert(offset, glyph);
        offset + 1
    }

    fn set_attributes(&mut self, region: Region, attribute: Attribute) {
        self.attributes.push((region, attribute));
    }

    fn clear(&mut self, region: Region) {
        self.clears.push(region);
        if region == Region::GameWindow {
            self.cells.clear();
        }
    }
}

/// Host shell double for driving a full `Spectrum`.
pub struct ScriptedPlatform {
    pub script: KeyScript,
    pub delays: Vec<(SleepKind, u32)>,
    pub frames: usize,
    pub last_frame_size: (u32, u32),
    pub audio: Vec<i16>,
}

impl ScriptedPlatform {
    pub fn new(script: KeyScript) -> Self {
        Self {
            script,
            delays: Vec::new(),
            frames: 0,
            last_frame_size: (0, 0),
            audio: Vec::new(),
        }
    }
}

impl Platform for ScriptedPlatform {
    fn poll(&mut self, keyboard: &mut ZxKeyboard) -> Result<(), Interrupted> {
        let keys = self.script.next().ok_or(Interrupted)?;
        keyboard.release_all();
        keyboard.press(keys);
        Ok(())
    }

    fn delay(&mut self, kind: SleepKind, micros: u32) {
        self.delays.push((kind, micros));
    }

    fn present(&mut self, frame: &[u8], width: u32, height: u32) {
        assert_eq!(frame.len(), (width * height * 3) as usize);
        self.frames += 1;
        self.last_frame_size = (width, height);
    }

    fn queue_audio(&mut self, samples: &[i16]) {
        self.audio.extend_from_slice(samples);
    }
}
