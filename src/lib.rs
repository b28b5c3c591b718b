//! Image to ASCII and Braille art converter.
//!
//! An image is reduced to a brightness field, tiled into chunks, and every
//! chunk is mapped to one character (alphabet mode) or one 2x4 dot glyph
//! (Braille mode).

pub mod art;
pub mod braille;
pub mod brightness;
pub mod chunk;
pub mod config;
pub mod matrix;
pub mod raster;
pub mod simple;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use art::ChunkConverter;
pub use braille::BrailleConverter;
pub use brightness::{BrightnessConverter, BrightnessField, WeightedBrightness};
pub use chunk::{Chunk, ChunkGrid};
pub use config::{ArtConfig, Mode};
pub use matrix::Matrix;
pub use raster::{Image, Pixel, PixelFormat};
pub use simple::SimpleConverter;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArtError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Invalid pixel: {0} channels")]
    InvalidPixel(usize),
    #[error("Invalid path: {}", .0.display())]
    InvalidPath(PathBuf),
    #[error("Failed to open image: {0}")]
    ImageOpenFail(#[from] image::ImageError),
    #[error("Failed to allocate memory for the output")]
    AllocationError,
    #[error("Failed to allocate memory for the pixel buffer")]
    ImageAllocationError,
    #[error("Failed to allocate memory for a matrix")]
    MatrixAllocationError,
    #[error("Matrix index ({x}, {y}) out of bounds for {width}x{height}")]
    MatrixIndexOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error("Chunk size error: {0}")]
    ChunkSizeError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ArtError>;

/// Run the whole pipeline: brightness extraction, partitioning, mapping and
/// assembly.
pub fn create_art(
    image: &Image,
    chunk_size: usize,
    brightness: &dyn BrightnessConverter,
    mapper: &dyn ChunkConverter,
    parallel: bool,
) -> Result<String> {
    chunk::validate_chunk_size(image.width(), image.height(), chunk_size)?;
    let field = brightness.convert(image)?;
    let chunks = chunk::partition(&field, chunk_size)?;
    let glyphs = mapper.glyphs(&chunks, parallel)?;
    art::assemble(&glyphs)
}

/// Main converter with builder-style configuration
pub struct Converter {
    chunk_size: usize,
    brightness: Box<dyn BrightnessConverter>,
    mapper: Box<dyn ChunkConverter>,
    parallel: bool,
}

impl Converter {
    /// Alphabet mode with the default ramp and BT.601 brightness.
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size,
            brightness: Box::new(WeightedBrightness::default()),
            mapper: Box::new(SimpleConverter::default()),
            parallel: false,
        }
    }

    pub fn from_config(config: &ArtConfig) -> Result<Self> {
        config.weights.validate()?;
        Ok(Self {
            chunk_size: config.chunk_size,
            brightness: Box::new(config.weights),
            mapper: config.mode.converter(config.invert)?,
            parallel: config.parallel,
        })
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_brightness(mut self, brightness: impl BrightnessConverter + 'static) -> Self {
        self.brightness = Box::new(brightness);
        self
    }

    pub fn with_mapper(mut self, mapper: impl ChunkConverter + 'static) -> Self {
        self.mapper = Box::new(mapper);
        self
    }

    pub fn with_simple(self, alphabet: &str) -> Result<Self> {
        Ok(self.with_mapper(SimpleConverter::new(alphabet)?))
    }

    pub fn with_braille(self, break_point: u8) -> Self {
        self.with_mapper(BrailleConverter::new(break_point))
    }

    pub fn with_mode(mut self, mode: &Mode, invert: bool) -> Result<Self> {
        self.mapper = mode.converter(invert)?;
        Ok(self)
    }

    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn create_art(&self, image: &Image) -> Result<String> {
        create_art(
            image,
            self.chunk_size,
            self.brightness.as_ref(),
            self.mapper.as_ref(),
            self.parallel,
        )
    }

    pub fn convert(&self, image: &image::DynamicImage) -> Result<String> {
        self.create_art(&Image::try_from(image)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grey(w: usize, h: usize, value: u8) -> Image {
        Image::from_raw(w, h, 1, vec![value; w * h]).unwrap()
    }

    #[test]
    fn test_single_white_chunk() {
        // index 0 is the darkest character, so white lands on ' '
        let conv = Converter::new(4).with_simple("@ ").unwrap();
        assert_eq!(conv.create_art(&grey(4, 4, 255)).unwrap(), " \n");
        assert_eq!(conv.create_art(&grey(4, 4, 0)).unwrap(), "@\n");
    }

    #[test]
    fn test_black_grid() {
        let conv = Converter::new(2).with_simple("#.").unwrap();
        assert_eq!(conv.create_art(&grey(8, 8, 0)).unwrap(), "####\n".repeat(4));
    }

    #[test]
    fn test_idempotent() {
        let data: Vec<u8> = (0..24 * 20 * 3).map(|i| (i * 37 % 256) as u8).collect();
        let img = Image::from_raw(24, 20, 3, data).unwrap();
        let conv = Converter::new(4).with_braille(100);
        let first = conv.create_art(&img).unwrap();
        assert_eq!(first, conv.create_art(&img).unwrap());
        assert_eq!(first.lines().count(), 5);
    }

    #[test]
    fn test_zero_chunk_size_fails_before_conversion() {
        let conv = Converter::new(0);
        assert!(matches!(
            conv.create_art(&grey(4, 4, 0)),
            Err(ArtError::ChunkSizeError(_))
        ));
    }

    #[test]
    fn test_from_config() {
        let config = ArtConfig {
            chunk_size: 4,
            mode: Mode::Braille { break_point: 127, edges: true },
            parallel: true,
            ..Default::default()
        };
        let conv = Converter::from_config(&config).unwrap();
        assert_eq!(conv.create_art(&grey(8, 4, 255)).unwrap(), "\u{28FF}\u{28FF}\n");
    }

    #[test]
    fn test_convert_dynamic_image() {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(4, 2, image::Rgb([255, 255, 255])));
        let conv = Converter::new(2).with_simple("01").unwrap();
        assert_eq!(conv.convert(&img).unwrap(), "11\n");
    }
}
