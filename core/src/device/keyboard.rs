use bitflags::bitflags;

bitflags! {
    /// The 40 keys of the Spectrum keyboard matrix.
    ///
    /// Bit `line * 5 + n` is key `n` of the half-row selected by address line
    /// `A(8 + line)`. Key 0 sits on the outer edge of the keyboard.
    ///
    /// ```text
    /// line  hi   b0     b1      b2  b3  b4
    ///  0    FE   CAPS   Z       X   C   V
    ///  1    FD   A      S       D   F   G
    ///  2    FB   Q      W       E   R   T
    ///  3    F7   1      2       3   4   5
    ///  4    EF   0      9       8   7   6
    ///  5    DF   P      O       I   U   Y
    ///  6    BF   ENTER  L       K   J   H
    ///  7    7F   SPACE  SYMBOL  M   N   B
    /// ```
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ZxKeys: u64 {
        const CAPS_SHIFT = 1 << 0;
        const Z = 1 << 1;
        const X = 1 << 2;
        const C = 1 << 3;
        const V = 1 << 4;

        const A = 1 << 5;
        const S = 1 << 6;
        const D = 1 << 7;
        const F = 1 << 8;
        const G = 1 << 9;

        const Q = 1 << 10;
        const W = 1 << 11;
        const E = 1 << 12;
        const R = 1 << 13;
        const T = 1 << 14;

        const N1 = 1 << 15;
        const N2 = 1 << 16;
        const N3 = 1 << 17;
        const N4 = 1 << 18;
        const N5 = 1 << 19;

        const N0 = 1 << 20;
        const N9 = 1 << 21;
        const N8 = 1 << 22;
        const N7 = 1 << 23;
        const N6 = 1 << 24;

        const P = 1 << 25;
        const O = 1 << 26;
        const I = 1 << 27;
        const U = 1 << 28;
        const Y = 1 << 29;

        const ENTER = 1 << 30;
        const L = 1 << 31;
        const K = 1 << 32;
        const J = 1 << 33;
        const H = 1 << 34;

        const SPACE = 1 << 35;
        const SYMBOL_SHIFT = 1 << 36;
        const M = 1 << 37;
        const N = 1 << 38;
        const B = 1 << 39;
    }
}

impl ZxKeys {
    /// The key that types `ch` unshifted, if there is one.
    ///
    /// Letters are case-insensitive. `'\n'`/`'\r'` map to ENTER.
    pub fn from_char(ch: char) -> Option<Self> {
        let key = match ch.to_ascii_uppercase() {
            '1' => Self::N1,
            '2' => Self::N2,
            '3' => Self::N3,
            '4' => Self::N4,
            '5' => Self::N5,
            '6' => Self::N6,
            '7' => Self::N7,
            '8' => Self::N8,
            '9' => Self::N9,
            '0' => Self::N0,
            'Q' => Self::Q,
            'W' => Self::W,
            'E' => Self::E,
            'R' => Self::R,
            'T' => Self::T,
            'Y' => Self::Y,
            'U' => Self::U,
            'I' => Self::I,
            'O' => Self::O,
            'P' => Self::P,
            'A' => Self::A,
            'S' => Self::S,
            'D' => Self::D,
            'F' => Self::F,
            'G' => Self::G,
            'H' => Self::H,
            'J' => Self::J,
            'K' => Self::K,
            'L' => Self::L,
            'Z' => Self::Z,
            'X' => Self::X,
            'C' => Self::C,
            'V' => Self::V,
            'B' => Self::B,
            'N' => Self::N,
            'M' => Self::M,
            ' ' => Self::SPACE,
            '\n' | '\r' => Self::ENTER,
            _ => return None,
        };
        Some(key)
    }
}

/// Keyboard matrix as seen through the ULA's port `0xFE`.
///
/// Key state is latched by the host between scans; reads never change it.
#[derive(Clone, Debug, Default)]
pub struct ZxKeyboard {
    keys: ZxKeys,
}

impl ZxKeyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press or release `keys`.
    pub fn set(&mut self, keys: ZxKeys, pressed: bool) {
        self.keys.set(keys, pressed);
    }

    pub fn press(&mut self, keys: ZxKeys) {
        self.keys.insert(keys);
    }

    pub fn release(&mut self, keys: ZxKeys) {
        self.keys.remove(keys);
    }

    pub fn release_all(&mut self) {
        self.keys = ZxKeys::empty();
    }

    pub fn pressed(&self) -> ZxKeys {
        self.keys
    }

    /// Read the half-rows selected by the zero bits of `high_byte`.
    ///
    /// Returns the 5 key bits active-low (0 = pressed). When several lines are
    /// selected their keys are merged, as on the real matrix. Bits 5-7 are
    /// not driven by the keyboard and read as 1.
    pub fn read(&self, high_byte: u8) -> u8 {
        let mut result = 0x1F;
        for line in 0..8 {
            if high_byte & (1 << line) == 0 {
                let row = ((self.keys.bits() >> (line * 5)) & 0x1F) as u8;
                result &= !row;
            }
        }
        result | 0xE0
    }
}
