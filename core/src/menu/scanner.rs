use crate::core::bus::{Device, PORT_KEYBOARD_09876, PORT_KEYBOARD_12345};
use crate::menu::InputDevice;
use crate::menu::glyphs::PORT_TABLE;

/// Pressed keys on the half-row selected by `high_byte`, active-high.
pub fn scan_port<D: Device + ?Sized>(device: &mut D, high_byte: u8) -> u8 {
    !device.port_in(u16::from(high_byte) << 8 | 0x00FE)
}

/// A single key found by [`scan_keyboard`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyHit {
    /// Row of the port in the scan order (0-7).
    pub port_index: usize,
    /// High byte of the port address.
    pub port: u8,
    /// The key's bit within the port.
    pub mask: u8,
}

/// Find the first pressed key in scan order.
///
/// Ports are visited in [`PORT_TABLE`] order. Within a port a mask starting at
/// bit 5 is shifted right before each test, so bits 4 down to 0 are tried; the
/// bit falling out of the bottom ends the port.
pub fn scan_keyboard<D: Device + ?Sized>(device: &mut D) -> Option<KeyHit> {
    for (port_index, &port) in PORT_TABLE[1..].iter().enumerate() {
        if port == 0 {
            break;
        }

        let keyflags = scan_port(device, port);
        let mut mask: u8 = 1 << 5;
        loop {
            let carry = mask & 1 != 0;
            mask >>= 1;
            if carry {
                break;
            }
            if keyflags & mask != 0 {
                return Some(KeyHit {
                    port_index,
                    port,
                    mask,
                });
            }
        }
    }
    None
}

/// A keypress on the input-device menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuKey {
    /// One of keys 1-4.
    Select(InputDevice),
    /// Key 0.
    Start,
}

/// Scan keys 1-4 (device choice) and 0 (start).
///
/// When several of 1-4 are held the lowest wins. `None` means nothing
/// relevant is pressed, which is distinct from key 0.
pub fn menu_keyscan<D: Device + ?Sized>(device: &mut D) -> Option<MenuKey> {
    let keymask = !device.port_in(PORT_KEYBOARD_12345) & 0x0F;
    if keymask != 0 {
        let position = keymask.trailing_zeros() as usize;
        return InputDevice::from_index(position).map(MenuKey::Select);
    }

    if device.port_in(PORT_KEYBOARD_09876) & 0x01 == 0 {
        Some(MenuKey::Start)
    } else {
        None
    }
}
