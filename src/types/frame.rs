use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use std::convert::Infallible;

pub const FRAME_WIDTH: usize = 264;
pub const FRAME_HEIGHT: usize = 176;
pub const FRAME_ROW_BYTES: usize = FRAME_WIDTH.div_ceil(8);
pub const FRAME_RASTER_LEN: usize = FRAME_ROW_BYTES * FRAME_HEIGHT;

/// Monochrome 264x176 bitmap ready for the display
///
/// Pixels are kept in PBM raster order: rows top to bottom, the leftmost
/// pixel in the most significant bit, `1` for black ink. The raster is
/// exactly what the image channel expects, so handing it over is a copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFrame {
    raster: Vec<u8>,
}

impl Default for RenderedFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderedFrame {
    /// All-white frame
    pub fn new() -> Self {
        Self {
            raster: vec![0; FRAME_RASTER_LEN],
        }
    }

    /// Wrap an existing raster; `None` unless it is exactly one frame long
    pub fn from_raster(raster: Vec<u8>) -> Option<Self> {
        (raster.len() == FRAME_RASTER_LEN).then_some(Self { raster })
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, black: bool) {
        if x >= FRAME_WIDTH || y >= FRAME_HEIGHT {
            return;
        }
        let mask = 0x80u8 >> (x % 8);
        let byte = &mut self.raster[y * FRAME_ROW_BYTES + x / 8];
        if black {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= FRAME_WIDTH || y >= FRAME_HEIGHT {
            return false;
        }
        self.raster[y * FRAME_ROW_BYTES + x / 8] & (0x80 >> (x % 8)) != 0
    }

    /// Number of black pixels
    pub fn ink(&self) -> u32 {
        self.raster.iter().map(|b| b.count_ones()).sum()
    }

    pub fn raster(&self) -> &[u8] {
        &self.raster
    }

    /// Raster with a binary PBM (`P4`) header, for writing to a file
    pub fn to_pbm(&self) -> Vec<u8> {
        let header = format!("P4\n{} {}\n", FRAME_WIDTH, FRAME_HEIGHT);
        let mut pbm = Vec::with_capacity(header.len() + self.raster.len());
        pbm.extend_from_slice(header.as_bytes());
        pbm.extend_from_slice(&self.raster);
        pbm
    }
}

impl DrawTarget for RenderedFrame {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(pos, color) in pixels {
            if pos.x < 0 || pos.y < 0 {
                continue;
            }
            self.set_pixel(pos.x as usize, pos.y as usize, color.is_on());
        }
        Ok(())
    }
}

impl OriginDimensions for RenderedFrame {
    fn size(&self) -> Size {
        Size::new(FRAME_WIDTH as u32, FRAME_HEIGHT as u32)
    }
}
