//! Rendered frames and writing them out
//!
//! A [`Frame`] holds averaged linear colors. Gamma correction and 8-bit quantization happen
//! only when the frame is encoded.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use log::info;

use crate::interval::Interval;
use crate::{Color, Error, Result};

/// Linear colors in raster order: rows top to bottom, pixels left to right
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}
impl Frame {
    /// A black frame
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::zeros(); width as usize * height as usize],
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| get_pixel(&self.get(x, y)))
    }

    /// Plain-text PPM (P3)
    pub fn write_ppm(&self, mut out: impl Write) -> Result<()> {
        write!(out, "P3\n{} {}\n255\n", self.width, self.height)?;
        for color in &self.pixels {
            let Rgb([r, g, b]) = get_pixel(color);
            writeln!(out, "{r} {g} {b}")?;
        }
        out.flush()?;
        Ok(())
    }

    /// Save to `path`, picking the format from its extension
    pub fn save(&self, path: &Path) -> Result<()> {
        let is_ppm = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("ppm"));
        if is_ppm {
            self.write_ppm(BufWriter::new(File::create(path)?))?;
        } else {
            let format = ImageFormat::from_path(path)
                .map_err(|_| Error::UnsupportedFormat(path.to_path_buf()))?;
            self.to_rgb_image().save_with_format(path, format)?;
        }
        info!("Wrote {}", path.display());
        Ok(())
    }
}

/// Gamma-correct for gamma = 2.0
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

pub fn get_pixel(color: &Color) -> Rgb<u8> {
    let r = scale_color(linear_to_gamma(color[0]));
    let g = scale_color(linear_to_gamma(color[1]));
    let b = scale_color(linear_to_gamma(color[2]));

    Rgb([r, g, b])
}

/// scale the color to between 0 and 255
fn scale_color(val: f64) -> u8 {
    let intensity = Interval::new(0.0, 0.999);
    (256.0 * intensity.clamp(val)) as u8
}
