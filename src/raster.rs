//! Decoded pixel data tagged by channel layout.

use std::path::Path;

use image::DynamicImage;

use crate::{ArtError, Result};

/// Largest accepted width or height.
pub const MAX_DIMENSION: usize = 65_535;

/// Channel layout of an [`Image`], one variant per supported channel count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    Grey,
    GreyAlpha,
    Rgb,
    Rgba,
}

impl PixelFormat {
    pub fn from_channels(channels: usize) -> Result<Self> {
        match channels {
            1 => Ok(Self::Grey),
            2 => Ok(Self::GreyAlpha),
            3 => Ok(Self::Rgb),
            4 => Ok(Self::Rgba),
            n => Err(ArtError::InvalidPixel(n)),
        }
    }

    pub fn channels(self) -> usize {
        match self {
            Self::Grey => 1,
            Self::GreyAlpha => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// A single pixel read out of an [`Image`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pixel {
    Grey(u8),
    GreyAlpha(u8, u8),
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, u8),
}

/// Row-major 8-bit image.
#[derive(Clone, Debug)]
pub struct Image {
    width: usize,
    height: usize,
    format: PixelFormat,
    data: Vec<u8>,
}

impl Image {
    /// Wrap a dense row-major buffer of `width * height * channels` bytes.
    pub fn from_raw(width: usize, height: usize, channels: usize, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(ArtError::InvalidArguments(format!(
                "image dimensions {width}x{height} outside 1..={MAX_DIMENSION}"
            )));
        }
        if !(1..=4).contains(&channels) {
            return Err(ArtError::InvalidArguments(format!(
                "{channels} channels per pixel, expected 1 to 4"
            )));
        }
        let expected = width * height * channels;
        if data.len() != expected {
            return Err(ArtError::InvalidArguments(format!(
                "pixel buffer holds {} bytes, expected {expected}",
                data.len()
            )));
        }
        let format = PixelFormat::from_channels(channels)?;
        Ok(Self { width, height, format, data })
    }

    /// Same as [`Image::from_raw`] but copies a borrowed buffer.
    pub fn from_slice(width: usize, height: usize, channels: usize, data: &[u8]) -> Result<Self> {
        let mut owned = Vec::new();
        owned
            .try_reserve_exact(data.len())
            .map_err(|_| ArtError::ImageAllocationError)?;
        owned.extend_from_slice(data);
        Self::from_raw(width, height, channels, owned)
    }

    /// Decode an image file, keeping 8-bit grey/RGB layouts as they are.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ArtError::InvalidPath(path.to_path_buf()));
        }
        let decoded = image::open(path)?;
        log::debug!(
            "decoded {} ({}x{}, {:?})",
            path.display(),
            decoded.width(),
            decoded.height(),
            decoded.color()
        );
        Self::try_from(&decoded)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Pixel at `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> Result<Pixel> {
        if x >= self.width || y >= self.height {
            return Err(ArtError::MatrixIndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let n = self.format.channels();
        let p = &self.data[(y * self.width + x) * n..][..n];
        Ok(match self.format {
            PixelFormat::Grey => Pixel::Grey(p[0]),
            PixelFormat::GreyAlpha => Pixel::GreyAlpha(p[0], p[1]),
            PixelFormat::Rgb => Pixel::Rgb(p[0], p[1], p[2]),
            PixelFormat::Rgba => Pixel::Rgba(p[0], p[1], p[2], p[3]),
        })
    }

    /// Pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel> + '_ {
        let format = self.format;
        self.data
            .chunks_exact(format.channels())
            .map(move |p| match format {
                PixelFormat::Grey => Pixel::Grey(p[0]),
                PixelFormat::GreyAlpha => Pixel::GreyAlpha(p[0], p[1]),
                PixelFormat::Rgb => Pixel::Rgb(p[0], p[1], p[2]),
                PixelFormat::Rgba => Pixel::Rgba(p[0], p[1], p[2], p[3]),
            })
    }
}

impl TryFrom<&DynamicImage> for Image {
    type Error = ArtError;

    fn try_from(image: &DynamicImage) -> Result<Self> {
        let (w, h) = (image.width() as usize, image.height() as usize);
        match image {
            DynamicImage::ImageLuma8(buf) => Self::from_slice(w, h, 1, buf.as_raw()),
            DynamicImage::ImageLumaA8(buf) => Self::from_slice(w, h, 2, buf.as_raw()),
            DynamicImage::ImageRgb8(buf) => Self::from_slice(w, h, 3, buf.as_raw()),
            DynamicImage::ImageRgba8(buf) => Self::from_slice(w, h, 4, buf.as_raw()),
            // 16-bit and float layouts are narrowed to 8-bit RGBA
            other => Self::from_raw(w, h, 4, other.to_rgba8().into_raw()),
        }
    }
}
