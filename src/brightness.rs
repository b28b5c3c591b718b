//! Pixel to brightness reduction.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::matrix::Matrix;
use crate::raster::{Image, Pixel};
use crate::{ArtError, Result};

/// Single-channel brightness grid shared by every chunk cut from it.
pub type BrightnessField = Arc<Matrix<u8>>;

/// Reduces an image to a [`BrightnessField`] of the same dimensions.
pub trait BrightnessConverter: Send + Sync {
    fn convert(&self, image: &Image) -> Result<BrightnessField>;
}

/// Integer weighted sum of the red, green and blue channels. Alpha is ignored
/// and grey pixels pass through unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedBrightness {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
}

impl Default for WeightedBrightness {
    /// ITU-R BT.601 luma, scaled by 1000.
    fn default() -> Self {
        Self { red: 299, green: 587, blue: 114 }
    }
}

impl WeightedBrightness {
    pub fn new(red: u32, green: u32, blue: u32) -> Result<Self> {
        let weights = Self { red, green, blue };
        weights.validate()?;
        Ok(weights)
    }

    /// Plain average of the three color channels.
    pub fn equal() -> Self {
        Self { red: 1, green: 1, blue: 1 }
    }

    pub fn validate(&self) -> Result<()> {
        let total = self.red as u64 + self.green as u64 + self.blue as u64;
        if total == 0 {
            return Err(ArtError::InvalidArguments(
                "brightness weights must not all be zero".into(),
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn brightness(&self, pixel: Pixel) -> u8 {
        let (r, g, b) = match pixel {
            Pixel::Grey(v) | Pixel::GreyAlpha(v, _) => return v,
            Pixel::Rgb(r, g, b) | Pixel::Rgba(r, g, b, _) => (r as u64, g as u64, b as u64),
        };
        let (wr, wg, wb) = (self.red as u64, self.green as u64, self.blue as u64);
        ((r * wr + g * wg + b * wb) / (wr + wg + wb)) as u8
    }
}

impl BrightnessConverter for WeightedBrightness {
    fn convert(&self, image: &Image) -> Result<BrightnessField> {
        self.validate()?;
        let mut data = Vec::new();
        data.try_reserve_exact(image.width() * image.height())
            .map_err(|_| ArtError::MatrixAllocationError)?;
        data.extend(image.pixels().map(|p| self.brightness(p)));
        Ok(Arc::new(Matrix::from_vec(image.width(), image.height(), data)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma_primaries() {
        let w = WeightedBrightness::default();
        assert_eq!(w.brightness(Pixel::Rgb(255, 0, 0)), 76);
        assert_eq!(w.brightness(Pixel::Rgb(0, 255, 0)), 149);
        assert_eq!(w.brightness(Pixel::Rgb(0, 0, 255)), 29);
        assert_eq!(w.brightness(Pixel::Rgb(255, 255, 255)), 255);
    }

    #[test]
    fn test_equal_weights_and_alpha_ignored() {
        let w = WeightedBrightness::equal();
        assert_eq!(w.brightness(Pixel::Rgba(30, 60, 90, 0)), 60);
        assert_eq!(w.brightness(Pixel::Rgba(30, 60, 90, 255)), 60);
    }

    #[test]
    fn test_grey_passes_through() {
        let w = WeightedBrightness::default();
        assert_eq!(w.brightness(Pixel::Grey(42)), 42);
        assert_eq!(w.brightness(Pixel::GreyAlpha(200, 7)), 200);
    }

    #[test]
    fn test_zero_weights_rejected() {
        assert!(matches!(
            WeightedBrightness::new(0, 0, 0),
            Err(ArtError::InvalidArguments(_))
        ));
    }

    #[test]
    fn test_field_matches_image() {
        let img = Image::from_raw(2, 2, 2, vec![10, 0, 20, 0, 30, 0, 40, 255]).unwrap();
        let field = WeightedBrightness::default().convert(&img).unwrap();
        assert_eq!((field.width(), field.height()), (2, 2));
        assert_eq!(field.as_slice(), &[10, 20, 30, 40]);
    }
}
