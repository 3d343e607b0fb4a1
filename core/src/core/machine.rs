use crate::core::bus::{Interrupted, SleepKind};
use crate::device::keyboard::ZxKeyboard;

/// Host shell services for [`crate::machine::Spectrum`].
///
/// The Spectrum model owns the emulated devices; the platform only moves
/// pixels, samples and key state across the boundary. The frontend is a pure
/// presentation layer and does not know what the menu is doing.
pub trait Platform {
    /// Latch host key events into the keyboard matrix.
    ///
    /// Returning `Err` cancels whatever the menu code is waiting for.
    fn poll(&mut self, keyboard: &mut ZxKeyboard) -> Result<(), Interrupted>;

    /// Let roughly `micros` microseconds of wall time pass.
    fn delay(&mut self, kind: SleepKind, micros: u32);

    /// Show an RGB24 frame of `width * height` pixels.
    fn present(&mut self, frame: &[u8], width: u32, height: u32);

    /// Queue mono 16-bit samples for playback.
    fn queue_audio(&mut self, samples: &[i16]);
}
