use log::debug;
use sdl2::pixels::PixelFormatEnum;

use chipvm_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chipvm_core::Frame;

/// RGB of a lit pixel.
const FOREGROUND: [u8; 3] = [0xFF, 0xFF, 0xFF];
/// RGB of an unlit pixel.
const BACKGROUND: [u8; 3] = [0x00, 0x00, 0x00];
const BYTES_PER_PIXEL: usize = 3;

/// # Display
/// The Chip-8 display is composed of 64x32 black/white pixels.
/// A window scaled up by an integer factor; it only gets a call to `render`
/// when the machine hands over a changed frame.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
}

impl Display {
    /// Opens a window bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, String> {
        let video_subsystem = sdl.video()?;
        let width = DISPLAY_WIDTH as u32 * scale;
        let height = DISPLAY_HEIGHT as u32 * scale;
        let window = video_subsystem
            .window("chipvm", width, height)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;
        let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        canvas.clear();
        canvas.present();
        debug!("opened {}x{} window", width, height);

        Ok(Display { canvas })
    }

    /// Uploads the frame as an RGB24 texture and presents it, stretched to the window.
    pub fn render(&mut self, frame: &Frame) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();
        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(|e| e.to_string())?;

        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            paint_rgb24(frame, buffer, pitch)
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}

/// Writes a frame into an RGB24 pixel buffer whose rows are `pitch` bytes apart.
///
/// The pitch may be wider than a row of pixels; the padding is left alone.
fn paint_rgb24(frame: &Frame, buffer: &mut [u8], pitch: usize) {
    for (y, row) in frame.iter().enumerate() {
        let line = &mut buffer[y * pitch..y * pitch + DISPLAY_WIDTH * BYTES_PER_PIXEL];
        for (pixel, rgb) in row.iter().zip(line.chunks_exact_mut(BYTES_PER_PIXEL)) {
            let colour = if *pixel == 1 { FOREGROUND } else { BACKGROUND };
            rgb.copy_from_slice(&colour);
        }
    }
}
