use std::fmt;

/// ULA port: writes set the border colour (bits 0-2) and the speaker (bit 4).
pub const PORT_BORDER: u16 = 0x00FE;

/// Keyboard half-row `1 2 3 4 5` (bit 0 = `1`).
pub const PORT_KEYBOARD_12345: u16 = 0xF7FE;
/// Keyboard half-row `0 9 8 7 6` (bit 0 = `0`).
pub const PORT_KEYBOARD_09876: u16 = 0xEFFE;
/// Keyboard half-row `P O I U Y` (bit 0 = `P`).
pub const PORT_KEYBOARD_POIUY: u16 = 0xDFFE;
/// Keyboard half-row `SPACE SYMBOL-SHIFT M N B` (bit 0 = `SPACE`).
pub const PORT_KEYBOARD_SPACESYMSHFTMNB: u16 = 0x7FFE;

/// Why the menu code is giving up control. Hosts may pace each kind differently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SleepKind {
    /// Between two keyboard scans.
    Poll,
    /// The pause after all five keys have been chosen.
    Settle,
    /// After one frame of menu music has been played.
    Frame,
}

/// The host asked the menu to stop (window closed, quit key, ...).
///
/// Only ever produced by [`Device::sleep`], which is the single point where
/// the host gets control back from the menu code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interrupted;

impl fmt::Display for Interrupted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "interrupted by host")
    }
}

impl std::error::Error for Interrupted {}

/// The I/O side of the host machine as seen by the menu code.
///
/// Mirrors the Z80 `IN`/`OUT` instructions plus the two cooperative hooks the
/// menu needs: `sleep` (yield to the host, sample input) and `kick` (flush the
/// screen). Reads are active-low like the real hardware.
pub trait Device {
    /// Read an I/O port. Keyboard ports answer 0 for pressed keys.
    fn port_in(&mut self, port: u16) -> u8;

    /// Write an I/O port.
    fn port_out(&mut self, port: u16, value: u8);

    /// Yield to the host for roughly `micros` microseconds.
    ///
    /// This is where hosts sample their input devices, and the only place the
    /// menu can be cancelled.
    fn sleep(&mut self, kind: SleepKind, micros: u32) -> Result<(), Interrupted>;

    /// Present the current screen contents.
    fn kick(&mut self);

    /// One iteration of the tone loop has elapsed.
    ///
    /// Hosts that synthesise the speaker advance their sample clock here.
    fn sub_tick(&mut self) {}
}
