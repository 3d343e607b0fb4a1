/// A ZX Spectrum colour attribute byte: `FLASH BRIGHT PAPER(3) INK(3)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Attribute(pub u8);

impl Attribute {
    pub const WHITE_OVER_BLACK: Self = Self(0x07);
    pub const BRIGHT_YELLOW_OVER_BLACK: Self = Self(0x46);

    pub fn ink(self) -> u8 {
        self.0 & 0x07
    }

    pub fn paper(self) -> u8 {
        (self.0 >> 3) & 0x07
    }

    pub fn bright(self) -> bool {
        self.0 & 0x40 != 0
    }
}

/// Screen areas the menu paints as a whole.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    /// The central window that the key chooser takes over.
    GameWindow,
    /// One of the four input-device menu lines (0..4).
    MenuItem(u8),
}

/// Glyph and attribute output. The menu only decides what goes where.
pub trait Renderer {
    /// Plot one character cell at display-file `offset` and return the offset
    /// of the next cell to the right.
    fn plot_glyph(&mut self, glyph: u8, offset: u16) -> u16;

    /// Paint the attributes of a whole region.
    fn set_attributes(&mut self, region: Region, attribute: Attribute);

    /// Clear the pixels of a region.
    fn clear(&mut self, region: Region);
}
