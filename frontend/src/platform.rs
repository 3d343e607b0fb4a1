use std::collections::HashSet;
use std::time::Duration;

use sdl2::EventPump;
use sdl2::audio::AudioDevice;
use sdl2::event::Event;
use sdl2::keyboard::Scancode;
use stalag_core::core::{Interrupted, Platform, SleepKind};
use stalag_core::device::beeper::OUTPUT_SAMPLE_RATE;
use stalag_core::device::{ZxKeyboard, ZxKeys};
use tracing::{debug, warn};

use crate::audio::{self, AudioPlayer, AudioRing, FadeOut};
use crate::error::{FrontendError, sdl};
use crate::input::zx_keys_for;
use crate::video::Video;

/// Queued audio the frame pause lets drain down to (~50 ms).
const FRAME_AUDIO_TARGET: usize = OUTPUT_SAMPLE_RATE as usize / 20;

/// Upper bound on one frame pause while waiting for audio to drain.
const FRAME_AUDIO_WAIT_LIMIT: Duration = Duration::from_millis(250);

/// SDL window, keyboard and speaker as seen by the menu.
pub struct SdlPlatform {
    event_pump: EventPump,
    video: Video,
    audio_device: AudioDevice<AudioPlayer>,
    ring: AudioRing,
    fade_out: FadeOut,
    audio_started: bool,
    held: HashSet<Scancode>,
}

impl SdlPlatform {
    pub fn new(
        sdl_context: &sdl2::Sdl,
        width: u32,
        height: u32,
        scale: u32,
    ) -> Result<Self, FrontendError> {
        let sdl_video = sdl_context.video().map_err(sdl)?;
        let sdl_audio = sdl_context.audio().map_err(sdl)?;

        let video = Video::new(&sdl_video, "Stalag", width, height, scale)?;
        let (audio_device, ring, fade_out) = audio::init(&sdl_audio)?;
        let event_pump = sdl_context.event_pump().map_err(sdl)?;

        Ok(Self {
            event_pump,
            video,
            audio_device,
            ring,
            fade_out,
            audio_started: false,
            held: HashSet::new(),
        })
    }

    fn queued_samples(&self) -> usize {
        self.ring.lock().map_or(0, |ring| ring.len())
    }

    /// Fade the speaker out and stop playback.
    pub fn shutdown(&mut self) {
        if self.audio_started {
            self.fade_out.store(true, std::sync::atomic::Ordering::Relaxed);
            std::thread::sleep(audio::fade_out_duration());
            self.audio_device.pause();
        }
    }
}

impl Platform for SdlPlatform {
    fn poll(&mut self, keyboard: &mut ZxKeyboard) -> Result<(), Interrupted> {
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    scancode: Some(Scancode::Escape),
                    ..
                } => {
                    debug!("quit requested");
                    return Err(Interrupted);
                }

                Event::KeyDown {
                    scancode: Some(sc),
                    repeat: false,
                    ..
                } => {
                    self.held.insert(sc);
                }

                Event::KeyUp {
                    scancode: Some(sc), ..
                } => {
                    self.held.remove(&sc);
                }

                _ => {}
            }
        }

        let keys = self
            .held
            .iter()
            .filter_map(|&sc| zx_keys_for(sc))
            .fold(ZxKeys::empty(), |keys, key| keys | key);
        keyboard.release_all();
        keyboard.press(keys);
        Ok(())
    }

    fn delay(&mut self, kind: SleepKind, micros: u32) {
        match kind {
            // The music already took real time to generate; wait only as
            // long as it takes the queued audio to play down.
            SleepKind::Frame => {
                let mut waited = Duration::ZERO;
                while self.queued_samples() > FRAME_AUDIO_TARGET
                    && waited < FRAME_AUDIO_WAIT_LIMIT
                {
                    std::thread::sleep(Duration::from_millis(1));
                    waited += Duration::from_millis(1);
                }
                if !self.audio_started {
                    std::thread::sleep(Duration::from_micros(u64::from(micros)));
                }
            }
            SleepKind::Poll | SleepKind::Settle => {
                std::thread::sleep(Duration::from_micros(u64::from(micros)));
            }
        }
    }

    fn present(&mut self, frame: &[u8], _width: u32, _height: u32) {
        if let Err(e) = self.video.present(frame) {
            warn!("present failed: {e}");
        }
    }

    fn queue_audio(&mut self, samples: &[i16]) {
        match self.ring.lock() {
            Ok(mut ring) => ring.extend(samples.iter().copied()),
            Err(_) => return,
        }
        if !self.audio_started {
            self.audio_device.resume();
            self.audio_started = true;
        }
    }
}
