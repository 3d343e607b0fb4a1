use crate::core::render::{Attribute, Region, Renderer};
use crate::device::font;

/// Bytes in the bitmap part of the display file (256x192 at 1bpp).
pub const DISPLAY_FILE_SIZE: usize = 0x1800;
/// Bytes in the attribute file (32x24 cells).
pub const ATTRIBUTES_SIZE: usize = 0x300;

pub const COLUMNS: usize = 32;
pub const ROWS: usize = 24;

/// Border thickness around the 256x192 paper, in pixels.
pub const BORDER: usize = 32;

pub const PAPER_WIDTH: usize = COLUMNS * 8;
pub const PAPER_HEIGHT: usize = ROWS * 8;
pub const FRAME_WIDTH: usize = PAPER_WIDTH + 2 * BORDER;
pub const FRAME_HEIGHT: usize = PAPER_HEIGHT + 2 * BORDER;

// Central window taken over by the key chooser: 23 columns from column 7,
// 16 character rows from row 2.
const GAME_WINDOW_COLUMN: usize = 7;
const GAME_WINDOW_ROW: usize = 2;
const GAME_WINDOW_WIDTH: usize = 23;
const GAME_WINDOW_HEIGHT: usize = 16;

// Input-device menu lines: 10 cells wide, every other row from row 8.
const MENU_ITEM_COLUMN: usize = 13;
const MENU_ITEM_ROW: usize = 8;
const MENU_ITEM_WIDTH: usize = 10;
const MENU_ITEMS: u8 = 4;

/// Normal and BRIGHT intensities of the ULA palette.
const NORMAL: u8 = 0xD7;
const BRIGHT: u8 = 0xFF;

/// Display-file offset of the top pixel line of character cell (`row`, `column`).
///
/// The Spectrum interleaves the screen in thirds: `0 0 0 y7 y6 y2 y1 y0 |
/// y5 y4 y3 x4 x3 x2 x1 x0`.
pub const fn cell_offset(row: usize, column: usize) -> u16 {
    (((row & 0x18) << 8) | ((row & 0x07) << 5) | column) as u16
}

/// RGB for a 3-bit GRB colour index.
fn colour(index: u8, bright: bool) -> (u8, u8, u8) {
    let level = if bright { BRIGHT } else { NORMAL };
    let on = |bit: u8| if index & bit != 0 { level } else { 0 };
    (on(0x02), on(0x04), on(0x01))
}

/// ZX Spectrum screen memory: the interleaved bitmap plus attributes.
///
/// Implements [`Renderer`] so the menu can draw straight into it, and renders
/// to an RGB24 frame with the border colour around the paper.
pub struct ZxScreen {
    pixels: Box<[u8; DISPLAY_FILE_SIZE]>,
    attributes: Box<[u8; ATTRIBUTES_SIZE]>,
}

impl ZxScreen {
    pub fn new() -> Self {
        Self {
            pixels: Box::new([0; DISPLAY_FILE_SIZE]),
            attributes: Box::new([Attribute::WHITE_OVER_BLACK.0; ATTRIBUTES_SIZE]),
        }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels[..]
    }

    pub fn attribute(&self, row: usize, column: usize) -> Attribute {
        Attribute(self.attributes[row * COLUMNS + column])
    }

    /// The 8 pixel rows of character cell (`row`, `column`).
    pub fn cell(&self, row: usize, column: usize) -> [u8; 8] {
        let base = cell_offset(row, column) as usize;
        std::array::from_fn(|line| self.pixels[base + line * 256])
    }

    /// Cell rectangle of a region as (row, column, height, width).
    fn bounds(region: Region) -> (usize, usize, usize, usize) {
        match region {
            Region::GameWindow => (
                GAME_WINDOW_ROW,
                GAME_WINDOW_COLUMN,
                GAME_WINDOW_HEIGHT,
                GAME_WINDOW_WIDTH,
            ),
            Region::MenuItem(index) => {
                assert!(index < MENU_ITEMS, "menu item {index} out of range");
                (
                    MENU_ITEM_ROW + index as usize * 2,
                    MENU_ITEM_COLUMN,
                    1,
                    MENU_ITEM_WIDTH,
                )
            }
        }
    }

    /// Render into an RGB24 buffer of `FRAME_WIDTH * FRAME_HEIGHT * 3` bytes.
    pub fn render(&self, border: u8, buffer: &mut [u8]) {
        assert!(buffer.len() >= FRAME_WIDTH * FRAME_HEIGHT * 3);

        let (br, bg, bb) = colour(border & 0x07, false);
        for y in 0..FRAME_HEIGHT {
            for x in 0..FRAME_WIDTH {
                let inside = (BORDER..BORDER + PAPER_WIDTH).contains(&x)
                    && (BORDER..BORDER + PAPER_HEIGHT).contains(&y);
                let (r, g, b) = if inside {
                    self.paper_pixel(x - BORDER, y - BORDER)
                } else {
                    (br, bg, bb)
                };
                let offset = (y * FRAME_WIDTH + x) * 3;
                buffer[offset] = r;
                buffer[offset + 1] = g;
                buffer[offset + 2] = b;
            }
        }
    }

    fn paper_pixel(&self, x: usize, y: usize) -> (u8, u8, u8) {
        let row = y / 8;
        let column = x / 8;
        let byte = self.pixels[cell_offset(row, column) as usize + (y & 7) * 256];
        let attr = self.attribute(row, column);
        let index = if byte & (0x80 >> (x & 7)) != 0 {
            attr.ink()
        } else {
            attr.paper()
        };
        colour(index, attr.bright())
    }
}

impl Default for ZxScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for ZxScreen {
    fn plot_glyph(&mut self, glyph: u8, offset: u16) -> u16 {
        let base = offset as usize;
        assert!(
            base < DISPLAY_FILE_SIZE && base & 0x0700 == 0,
            "screen offset {offset:#06x} is not a character cell"
        );

        for (line, bits) in font::glyph_for(glyph).iter().enumerate() {
            self.pixels[base + line * 256] = *bits;
        }
        offset + 1
    }

    fn set_attributes(&mut self, region: Region, attribute: Attribute) {
        let (row, column, height, width) = Self::bounds(region);
        for r in row..row + height {
            let start = r * COLUMNS + column;
            self.attributes[start..start + width].fill(attribute.0);
        }
    }

    fn clear(&mut self, region: Region) {
        let (row, column, height, width) = Self::bounds(region);
        for r in row..row + height {
            for line in 0..8 {
                let start = cell_offset(r, column) as usize + line * 256;
                self.pixels[start..start + width].fill(0);
            }
        }
    }
}
