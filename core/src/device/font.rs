/// 8x8 character set for the menu text, in the style of the Spectrum ROM font.
/// Each glyph is 8 rows top to bottom, MSB is the leftmost pixel.
const GLYPHS: &[(u8, [u8; 8])] = &[
    (b' ', [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    (b'.', [0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x00]),
    (b'0', [0x00, 0x3C, 0x46, 0x4A, 0x52, 0x62, 0x3C, 0x00]),
    (b'1', [0x00, 0x18, 0x28, 0x08, 0x08, 0x08, 0x3E, 0x00]),
    (b'2', [0x00, 0x3C, 0x42, 0x02, 0x3C, 0x40, 0x7E, 0x00]),
    (b'3', [0x00, 0x3C, 0x42, 0x0C, 0x02, 0x42, 0x3C, 0x00]),
    (b'4', [0x00, 0x08, 0x18, 0x28, 0x48, 0x7E, 0x08, 0x00]),
    (b'5', [0x00, 0x7E, 0x40, 0x7C, 0x02, 0x42, 0x3C, 0x00]),
    (b'6', [0x00, 0x3C, 0x40, 0x7C, 0x42, 0x42, 0x3C, 0x00]),
    (b'7', [0x00, 0x7E, 0x02, 0x04, 0x08, 0x10, 0x10, 0x00]),
    (b'8', [0x00, 0x3C, 0x42, 0x3C, 0x42, 0x42, 0x3C, 0x00]),
    (b'9', [0x00, 0x3C, 0x42, 0x42, 0x3E, 0x02, 0x3C, 0x00]),
    (b'A', [0x00, 0x3C, 0x42, 0x42, 0x7E, 0x42, 0x42, 0x00]),
    (b'B', [0x00, 0x7C, 0x42, 0x7C, 0x42, 0x42, 0x7C, 0x00]),
    (b'C', [0x00, 0x3C, 0x42, 0x40, 0x40, 0x42, 0x3C, 0x00]),
    (b'D', [0x00, 0x78, 0x44, 0x42, 0x42, 0x44, 0x78, 0x00]),
    (b'E', [0x00, 0x7E, 0x40, 0x7C, 0x40, 0x40, 0x7E, 0x00]),
    (b'F', [0x00, 0x7E, 0x40, 0x7C, 0x40, 0x40, 0x40, 0x00]),
    (b'G', [0x00, 0x3C, 0x42, 0x40, 0x4E, 0x42, 0x3C, 0x00]),
    (b'H', [0x00, 0x42, 0x42, 0x7E, 0x42, 0x42, 0x42, 0x00]),
    (b'I', [0x00, 0x3E, 0x08, 0x08, 0x08, 0x08, 0x3E, 0x00]),
    (b'J', [0x00, 0x02, 0x02, 0x02, 0x42, 0x42, 0x3C, 0x00]),
    (b'K', [0x00, 0x44, 0x48, 0x70, 0x48, 0x44, 0x42, 0x00]),
    (b'L', [0x00, 0x40, 0x40, 0x40, 0x40, 0x40, 0x7E, 0x00]),
    (b'M', [0x00, 0x42, 0x66, 0x5A, 0x42, 0x42, 0x42, 0x00]),
    (b'N', [0x00, 0x42, 0x62, 0x52, 0x4A, 0x46, 0x42, 0x00]),
    (b'O', [0x00, 0x3C, 0x42, 0x42, 0x42, 0x42, 0x3C, 0x00]),
    (b'P', [0x00, 0x7C, 0x42, 0x42, 0x7C, 0x40, 0x40, 0x00]),
    (b'Q', [0x00, 0x3C, 0x42, 0x42, 0x52, 0x4A, 0x3C, 0x00]),
    (b'R', [0x00, 0x7C, 0x42, 0x42, 0x7C, 0x44, 0x42, 0x00]),
    (b'S', [0x00, 0x3C, 0x40, 0x3C, 0x02, 0x42, 0x3C, 0x00]),
    (b'T', [0x00, 0xFE, 0x10, 0x10, 0x10, 0x10, 0x10, 0x00]),
    (b'U', [0x00, 0x42, 0x42, 0x42, 0x42, 0x42, 0x3C, 0x00]),
    (b'V', [0x00, 0x42, 0x42, 0x42, 0x42, 0x24, 0x18, 0x00]),
    (b'W', [0x00, 0x42, 0x42, 0x42, 0x42, 0x5A, 0x24, 0x00]),
    (b'X', [0x00, 0x42, 0x24, 0x18, 0x18, 0x24, 0x42, 0x00]),
    (b'Y', [0x00, 0x82, 0x44, 0x28, 0x10, 0x10, 0x10, 0x00]),
    (b'Z', [0x00, 0x7E, 0x04, 0x08, 0x10, 0x20, 0x7E, 0x00]),
];

const BLANK: [u8; 8] = [0; 8];

/// Bitmap for `ch`. Characters outside the set draw as a blank cell.
pub fn glyph_for(ch: u8) -> &'static [u8; 8] {
    let ch = ch.to_ascii_uppercase();
    GLYPHS
        .iter()
        .find(|(c, _)| *c == ch)
        .map(|(_, data)| data)
        .unwrap_or(&BLANK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_label_character_is_drawable() {
        for ch in b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ." {
            assert_ne!(glyph_for(*ch), &BLANK, "missing glyph {}", *ch as char);
        }
    }

    #[test]
    fn unknown_characters_are_blank() {
        assert_eq!(glyph_for(b'#'), &BLANK);
        assert_eq!(glyph_for(b' '), &BLANK);
    }
}
