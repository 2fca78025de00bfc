//! Pixel output: gamma correction, quantization and image encoding.
//!
//! The renderer hands linear colors to a [`PixelSink`] in scan order. Sinks
//! own the conversion to display values:
//! - [`PpmWriter`] streams a plain-text P3 image to any `Write`
//! - [`ImageBuffer`] collects pixels in memory and can be saved as PNG

use crate::Color;
use image::RgbImage;
use lux_math::Interval;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while encoding an image file.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Pixel buffer does not match {width}x{height}")]
    SizeMismatch { width: u32, height: u32 },
}

/// Consumer of rendered pixels.
///
/// Receives exactly `width * height` linear colors between `begin` and
/// `finish`, in row-major order starting at the top-left pixel.
pub trait PixelSink {
    fn begin(&mut self, width: u32, height: u32) -> io::Result<()>;

    fn write_pixel(&mut self, color: Color) -> io::Result<()>;

    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to gamma-corrected 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    const INTENSITY: Interval = Interval::new(0.000, 0.999);
    let quantize = |c: f32| (256.0 * INTENSITY.clamp(linear_to_gamma(c))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Streams a plain-text PPM (P3) image.
pub struct PpmWriter<W: Write> {
    out: W,
}

impl<W: Write> PpmWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PixelSink for PpmWriter<W> {
    fn begin(&mut self, width: u32, height: u32) -> io::Result<()> {
        write!(self.out, "P3\n{width} {height}\n255\n")
    }

    fn write_pixel(&mut self, color: Color) -> io::Result<()> {
        let [r, g, b] = color_to_rgb8(color);
        writeln!(self.out, "{r} {g} {b}")
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Simple image buffer for storing render output.
#[derive(Debug, Clone, Default)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
    cursor: usize,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width as usize) * (height as usize)],
            cursor: 0,
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Convert to gamma-corrected RGB bytes.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb8(*color));
        }
        bytes
    }

    /// Encode as PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), OutputError> {
        let image = RgbImage::from_raw(self.width, self.height, self.to_rgb8()).ok_or(
            OutputError::SizeMismatch {
                width: self.width,
                height: self.height,
            },
        )?;
        image.save_with_format(path.as_ref(), image::ImageFormat::Png)?;
        log::info!("Saved PNG to {}", path.as_ref().display());
        Ok(())
    }

    /// Write as a plain-text PPM (P3) image.
    pub fn write_ppm<W: Write>(&self, out: W) -> io::Result<W> {
        let mut writer = PpmWriter::new(out);
        writer.begin(self.width, self.height)?;
        for color in &self.pixels {
            writer.write_pixel(*color)?;
        }
        writer.finish()?;
        Ok(writer.into_inner())
    }
}

impl PixelSink for ImageBuffer {
    fn begin(&mut self, width: u32, height: u32) -> io::Result<()> {
        *self = ImageBuffer::new(width, height);
        Ok(())
    }

    fn write_pixel(&mut self, color: Color) -> io::Result<()> {
        let slot = self.pixels.get_mut(self.cursor).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "more pixels than the image holds")
        })?;
        *slot = color;
        self.cursor += 1;
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        if self.cursor != self.pixels.len() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("received {} of {} pixels", self.cursor, self.pixels.len()),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_color_to_rgb8() {
        assert_eq!(color_to_rgb8(Color::ZERO), [0, 0, 0]);
        assert_eq!(color_to_rgb8(Color::ONE), [255, 255, 255]);
        // Out of range values saturate instead of wrapping
        assert_eq!(color_to_rgb8(Color::new(4.0, -2.0, 0.25)), [255, 0, 128]);
    }

    #[test]
    fn test_ppm_stream() {
        let mut writer = PpmWriter::new(Vec::new());
        writer.begin(2, 1).unwrap();
        writer.write_pixel(Color::ONE).unwrap();
        writer.write_pixel(Color::new(0.25, 0.0, 1.0)).unwrap();
        writer.finish().unwrap();

        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(text, "P3\n2 1\n255\n255 255 255\n128 0 255\n");
    }

    #[test]
    fn test_image_buffer_sink_fills_in_scan_order() {
        let mut image = ImageBuffer::default();
        image.begin(2, 2).unwrap();
        for k in 0..4 {
            image.write_pixel(Color::splat(k as f32)).unwrap();
        }
        image.finish().unwrap();

        assert_eq!(image.get(0, 0), Color::splat(0.0));
        assert_eq!(image.get(1, 0), Color::splat(1.0));
        assert_eq!(image.get(0, 1), Color::splat(2.0));
        assert_eq!(image.get(1, 1), Color::splat(3.0));
    }

    #[test]
    fn test_image_buffer_sink_rejects_wrong_pixel_count() {
        let mut image = ImageBuffer::default();
        image.begin(1, 1).unwrap();
        image.write_pixel(Color::ONE).unwrap();
        assert!(image.write_pixel(Color::ONE).is_err());

        let mut short = ImageBuffer::default();
        short.begin(2, 1).unwrap();
        short.write_pixel(Color::ONE).unwrap();
        assert!(short.finish().is_err());
    }

    #[test]
    fn test_write_ppm_matches_streamed_output() {
        let mut image = ImageBuffer::new(1, 2);
        image.set(0, 1, Color::new(1.0, 0.0, 0.0));

        let bytes = image.write_ppm(Vec::new()).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "P3\n1 2\n255\n0 0 0\n255 0 0\n");
        assert_eq!(image.to_rgb8(), vec![0, 0, 0, 255, 0, 0]);
    }
}
