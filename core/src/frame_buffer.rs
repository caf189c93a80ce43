use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// One frame of pixels, indexed as `[y][x]`; each pixel is 0 or 1.
pub type Frame = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// # Frame buffer
/// The 64x32 monochrome display plus a flag telling the renderer it changed.
///
/// Only the draw and clear instructions mutate it. The renderer gets a copy
/// of a whole frame through `take_frame`, which also clears the flag.
#[derive(Clone, Copy)]
pub struct FrameBuffer {
    pixels: Frame,
    dirty: bool,
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            dirty: false,
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        self.dirty = true;
    }

    /// XORs an 8-pixel wide sprite onto the frame with its top left corner at (x, y).
    ///
    /// Every pixel wraps around the screen edges independently.
    /// Returns whether any lit pixel was switched off.
    pub fn draw_sprite(&mut self, x: usize, y: usize, rows: &[u8]) -> bool {
        let mut collision = false;
        for (row, byte) in rows.iter().enumerate() {
            let py = (y + row) % DISPLAY_HEIGHT;
            for bit in 0..8 {
                let px = (x + bit) % DISPLAY_WIDTH;
                let sprite_pixel = (byte >> (7 - bit)) & 1;
                let pixel = &mut self.pixels[py][px];
                collision |= sprite_pixel & *pixel == 1;
                *pixel ^= sprite_pixel;
            }
        }
        self.dirty = true;
        collision
    }

    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.pixels[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH]
    }

    pub fn pixels(&self) -> &Frame {
        &self.pixels
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// A copy of the frame if it changed since the last call.
    pub fn take_frame(&mut self) -> Option<Frame> {
        if self.dirty {
            self.dirty = false;
            Some(self.pixels)
        } else {
            None
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
