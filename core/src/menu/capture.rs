//! Interactive key chooser.
//!
//! The player presses one key for each of LEFT, RIGHT, UP, DOWN and FIRE, then
//! confirms the layout. A key only counts on its press edge: something that
//! was already held when the prompt appeared, or is still held from the last
//! choice, is ignored until it has been released for a whole scan.
//!
//! A key that is already bound in this session is ignored even on a fresh
//! press, and scanning carries on. Pressing the same key again therefore never
//! moves on to the next action; the player has to pick a different key.
//! Declining the confirmation throws the whole layout away and starts over
//! from LEFT.

use tracing::{debug, info};

use crate::core::bus::{
    Device, Interrupted, PORT_KEYBOARD_POIUY, PORT_KEYBOARD_SPACESYMSHFTMNB, SleepKind,
};
use crate::core::render::{Attribute, Region, Renderer};
use crate::menu::glyphs::{
    CHOOSE_KEY_PROMPTS, CONFIRM_PROMPT, KEY_NAME_OFFSETS, PORT_COUNT, PORT_TABLE, key_label,
    plot_screen_string, plot_text,
};
use crate::menu::scanner::{KeyHit, scan_keyboard, scan_port};

/// Pause between keyboard scans.
pub const POLL_MICROS: u32 = 10_000;

/// Pause once all five keys are in, before asking for confirmation.
pub const SETTLE_MICROS: u32 = 0xFFFF;

/// Things the player can bind a key to, in the order they are asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
    Fire,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Left,
        Action::Right,
        Action::Up,
        Action::Down,
        Action::Fire,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::Left => "left",
            Action::Right => "right",
            Action::Up => "up",
            Action::Down => "down",
            Action::Fire => "fire",
        }
    }
}

/// A key as the game reads it: half-row high byte and bit mask.
///
/// `port == 0` marks an unassigned binding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub port: u8,
    pub mask: u8,
}

impl KeyBinding {
    pub const UNASSIGNED: Self = Self { port: 0, mask: 0 };

    pub fn is_assigned(&self) -> bool {
        self.port != 0
    }

    /// Full 16-bit port address to read this key from.
    pub fn port_address(&self) -> u16 {
        u16::from(self.port) << 8 | 0x00FE
    }

    /// Name of the bound key, or `None` if this is not a single matrix key.
    pub fn label(&self) -> Option<&'static str> {
        if self.mask.count_ones() != 1 || self.mask >= 0x20 {
            return None;
        }
        let port_index = PORT_TABLE[1..=PORT_COUNT]
            .iter()
            .position(|&port| port == self.port)?;
        std::str::from_utf8(key_label(port_index, self.mask)).ok()
    }
}

/// The five bindings, indexed by [`Action`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyDefs {
    defs: [KeyBinding; 5],
}

impl KeyDefs {
    pub fn get(&self, action: Action) -> KeyBinding {
        self.defs[action.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Action, KeyBinding)> + '_ {
        Action::ALL.iter().map(|&action| (action, self.get(action)))
    }

    /// True once every action has a key.
    pub fn is_complete(&self) -> bool {
        self.defs.iter().all(KeyBinding::is_assigned)
    }

    /// Set `action` directly, e.g. when restoring a saved layout.
    pub fn set(&mut self, action: Action, binding: KeyBinding) {
        self.defs[action.index()] = binding;
    }

    pub fn reset(&mut self) {
        self.defs = [KeyBinding::UNASSIGNED; 5];
    }

    /// Walk the bindings up to the first unassigned one.
    ///
    /// Returns that free slot, or `None` if `(port, mask)` is already bound
    /// before it (or no slot is free).
    fn free_slot_for(&self, port: u8, mask: u8) -> Option<usize> {
        for (slot, def) in self.defs.iter().enumerate() {
            if !def.is_assigned() {
                return Some(slot);
            }
            if def.port == port && def.mask == mask {
                return None;
            }
        }
        None
    }
}

/// Run key-choosing sessions until the player confirms one.
///
/// Cancellation from the host is the only way out other than confirming.
pub fn choose_keys<H>(host: &mut H) -> Result<KeyDefs, Interrupted>
where
    H: Device + Renderer + ?Sized,
{
    let mut keydefs = KeyDefs::default();
    let mut session = 0u32;

    loop {
        session += 1;
        debug!(session, "starting key selection");

        host.clear(Region::GameWindow);
        host.set_attributes(Region::GameWindow, Attribute::WHITE_OVER_BLACK);
        for prompt in &CHOOSE_KEY_PROMPTS {
            plot_screen_string(host, prompt);
        }
        host.kick();

        keydefs.reset();
        for (action, &offset) in Action::ALL.iter().zip(&KEY_NAME_OFFSETS) {
            let (slot, hit) = capture_key(host, &keydefs)?;
            debug_assert_eq!(slot, action.index());
            keydefs.defs[slot] = KeyBinding {
                port: hit.port,
                mask: hit.mask,
            };

            let label = key_label(hit.port_index, hit.mask);
            debug!(
                action = action.name(),
                port = hit.port,
                mask = hit.mask,
                key = %String::from_utf8_lossy(label),
                "key bound"
            );
            plot_text(host, offset, label);
            host.kick();
        }

        host.sleep(SleepKind::Settle, SETTLE_MICROS)?;

        if user_confirm(host)? {
            info!(session, "key layout confirmed");
            return Ok(keydefs);
        }
        debug!(session, "key layout declined");
    }
}

/// Wait for a fresh press of a key not yet bound in `keydefs`.
///
/// `current_sample` starts out as pressed so the first scan can never be an
/// edge. Each pass moves it into `previous_sample` and scans again; a key is
/// taken only when the previous scan saw nothing.
fn capture_key<H>(host: &mut H, keydefs: &KeyDefs) -> Result<(usize, KeyHit), Interrupted>
where
    H: Device + ?Sized,
{
    let mut current_sample = true;

    loop {
        host.sleep(SleepKind::Poll, POLL_MICROS)?;

        let previous_sample = current_sample;
        let Some(hit) = scan_keyboard(host) else {
            current_sample = false;
            continue;
        };
        current_sample = true;

        if previous_sample {
            continue;
        }

        match keydefs.free_slot_for(hit.port, hit.mask) {
            Some(slot) => return Ok((slot, hit)),
            None => debug!(port = hit.port, mask = hit.mask, "key already bound"),
        }
    }
}

/// Ask "CONFIRM. Y OR N" and wait for an answer. Y wins if both are held.
pub fn user_confirm<H>(host: &mut H) -> Result<bool, Interrupted>
where
    H: Device + Renderer + ?Sized,
{
    plot_screen_string(host, &CONFIRM_PROMPT);
    host.kick();

    loop {
        if scan_port(host, (PORT_KEYBOARD_POIUY >> 8) as u8) & (1 << 4) != 0 {
            return Ok(true);
        }
        if scan_port(host, (PORT_KEYBOARD_SPACESYMSHFTMNB >> 8) as u8) & (1 << 3) != 0 {
            return Ok(false);
        }
        host.sleep(SleepKind::Poll, POLL_MICROS)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding(port: u8, mask: u8) -> KeyBinding {
        KeyBinding { port, mask }
    }

    #[test]
    fn first_free_slot_is_found() {
        let mut defs = KeyDefs::default();
        assert_eq!(defs.free_slot_for(0xFB, 0x01), Some(0));

        defs.set(Action::Left, binding(0xFB, 0x01));
        defs.set(Action::Right, binding(0xFB, 0x02));
        assert_eq!(defs.free_slot_for(0xDF, 0x01), Some(2));
    }

    #[test]
    fn bound_key_has_no_slot() {
        let mut defs = KeyDefs::default();
        defs.set(Action::Left, binding(0xFB, 0x01));
        assert_eq!(defs.free_slot_for(0xFB, 0x01), None);
        // Same bit on another port is a different key.
        assert_eq!(defs.free_slot_for(0xFD, 0x01), Some(1));
    }

    #[test]
    fn full_layout_has_no_slot() {
        let mut defs = KeyDefs::default();
        for (i, action) in Action::ALL.iter().enumerate() {
            defs.set(*action, binding(0xF7, 1 << i));
        }
        assert!(defs.is_complete());
        assert_eq!(defs.free_slot_for(0x7F, 0x01), None);
    }

    #[test]
    fn reset_unassigns_everything() {
        let mut defs = KeyDefs::default();
        defs.set(Action::Fire, binding(0x7F, 0x01));
        defs.reset();
        assert!(defs.iter().all(|(_, b)| !b.is_assigned()));
    }

    #[test]
    fn labels_follow_the_matrix() {
        assert_eq!(binding(0xFB, 0x01).label(), Some("Q"));
        assert_eq!(binding(0x7F, 0x02).label(), Some("SYMBOL"));
        assert_eq!(KeyBinding::UNASSIGNED.label(), None);
        assert_eq!(binding(0xFB, 0x03).label(), None);
        assert_eq!(binding(0x24, 0x01).label(), None);
    }

    #[test]
    fn port_address_uses_ula_low_byte() {
        assert_eq!(binding(0xDF, 0x10).port_address(), 0xDFFE);
    }
}
