//! Static tables for the key chooser: scan order, key labels and prompts.

use crate::core::render::Renderer;

/// Keyboard half-row high bytes in scan order.
///
/// Entry 0 is never read and the trailing 0 terminates the table. The order
/// decides which key wins when several are held at once.
pub const PORT_TABLE: [u8; 10] = [0x24, 0xF7, 0xEF, 0xFB, 0xDF, 0xFD, 0xBF, 0xFE, 0x7F, 0x00];

/// Number of real ports in [`PORT_TABLE`].
pub const PORT_COUNT: usize = 8;

/// Length-prefixed names for keys that do not fit in one character cell.
pub const SPECIAL_KEY_NAMES: &[u8] = b"\x05ENTER\x04CAPS\x06SYMBOL\x05SPACE";

/// What to draw for one key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyGlyph {
    /// A single character.
    Char(u8),
    /// Offset of a length-prefixed name in [`SPECIAL_KEY_NAMES`].
    Named(u8),
}

use KeyGlyph::{Char, Named};

/// Key labels indexed by `[port index][bit position]`, port index counting
/// from the first real entry of [`PORT_TABLE`].
pub static KEY_GLYPHS: [[KeyGlyph; 5]; PORT_COUNT] = [
    [Char(b'1'), Char(b'2'), Char(b'3'), Char(b'4'), Char(b'5')],
    [Char(b'0'), Char(b'9'), Char(b'8'), Char(b'7'), Char(b'6')],
    [Char(b'Q'), Char(b'W'), Char(b'E'), Char(b'R'), Char(b'T')],
    [Char(b'P'), Char(b'O'), Char(b'I'), Char(b'U'), Char(b'Y')],
    [Char(b'A'), Char(b'S'), Char(b'D'), Char(b'F'), Char(b'G')],
    [Named(0), Char(b'L'), Char(b'K'), Char(b'J'), Char(b'H')],
    [Named(6), Char(b'Z'), Char(b'X'), Char(b'C'), Char(b'V')],
    [Named(18), Named(11), Char(b'M'), Char(b'N'), Char(b'B')],
];

/// A string at a fixed display-file offset.
#[derive(Clone, Copy, Debug)]
pub struct ScreenString {
    pub offset: u16,
    pub text: &'static [u8],
}

/// Title plus one prompt per action, in action order.
pub const CHOOSE_KEY_PROMPTS: [ScreenString; 6] = [
    ScreenString { offset: 0x006D, text: b"CHOOSE KEYS" },
    ScreenString { offset: 0x00CD, text: b"LEFT." },
    ScreenString { offset: 0x080D, text: b"RIGHT." },
    ScreenString { offset: 0x084D, text: b"UP." },
    ScreenString { offset: 0x088D, text: b"DOWN." },
    ScreenString { offset: 0x08CD, text: b"FIRE." },
];

/// Where each chosen key's label goes, in action order.
pub const KEY_NAME_OFFSETS: [u16; 5] = [0x00D5, 0x0815, 0x0855, 0x0895, 0x08D5];

pub const CONFIRM_PROMPT: ScreenString = ScreenString {
    offset: 0x100B,
    text: b"CONFIRM. Y OR N",
};

/// Menu lines, one per input device followed by the start line.
pub const MENU_LABELS: [ScreenString; 5] = [
    ScreenString { offset: 0x080D, text: b"1 KEYBOARD" },
    ScreenString { offset: 0x084D, text: b"2 KEMPSTON" },
    ScreenString { offset: 0x088D, text: b"3 SINCLAIR" },
    ScreenString { offset: 0x08CD, text: b"4 PROTEK" },
    ScreenString { offset: 0x100D, text: b"0 START GAME" },
];

/// Label for the key at `port_index` whose bit is `mask`.
///
/// `mask` must have exactly one of bits 0-4 set.
pub fn key_label(port_index: usize, mask: u8) -> &'static [u8] {
    assert!(port_index < PORT_COUNT, "port index {port_index} out of range");
    assert!(
        mask.count_ones() == 1 && mask < 0x20,
        "key mask {mask:#04x} is not a single key"
    );

    match &KEY_GLYPHS[port_index][mask.trailing_zeros() as usize] {
        Char(ch) => std::slice::from_ref(ch),
        Named(index) => {
            let start = *index as usize;
            let len = SPECIAL_KEY_NAMES[start] as usize;
            &SPECIAL_KEY_NAMES[start + 1..start + 1 + len]
        }
    }
}

/// Plot `text` left to right from `offset`; returns the offset after it.
pub fn plot_text<R: Renderer + ?Sized>(renderer: &mut R, offset: u16, text: &[u8]) -> u16 {
    text.iter()
        .fold(offset, |offset, &glyph| renderer.plot_glyph(glyph, offset))
}

pub fn plot_screen_string<R: Renderer + ?Sized>(renderer: &mut R, string: &ScreenString) -> u16 {
    plot_text(renderer, string.offset, string.text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_character_labels() {
        assert_eq!(key_label(0, 0x01), b"1");
        assert_eq!(key_label(1, 0x01), b"0");
        assert_eq!(key_label(2, 0x10), b"T");
        assert_eq!(key_label(7, 0x04), b"M");
    }

    #[test]
    fn named_labels() {
        assert_eq!(key_label(5, 0x01), b"ENTER");
        assert_eq!(key_label(6, 0x01), b"CAPS");
        assert_eq!(key_label(7, 0x02), b"SYMBOL");
        assert_eq!(key_label(7, 0x01), b"SPACE");
    }

    #[test]
    #[should_panic]
    fn two_bit_mask_is_rejected() {
        key_label(0, 0x03);
    }

    #[test]
    fn port_table_is_terminated() {
        assert_eq!(PORT_TABLE[PORT_COUNT + 1], 0);
        assert!(PORT_TABLE[1..=PORT_COUNT].iter().all(|&hi| hi != 0));
    }
}
