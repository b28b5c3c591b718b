//! Image chunking - tiles a brightness field into rectangular chunks.

use std::ops::Range;
use std::sync::Arc;

use crate::brightness::BrightnessField;
use crate::matrix::Matrix;
use crate::{ArtError, Result};

/// Grid of chunks, one per output glyph.
pub type ChunkGrid = Matrix<Chunk>;

/// A rectangular window onto a shared brightness field.
#[derive(Clone, Debug)]
pub struct Chunk {
    x: Range<usize>,
    y: Range<usize>,
    field: BrightnessField,
}

impl Chunk {
    pub fn new(field: BrightnessField, x: Range<usize>, y: Range<usize>) -> Result<Self> {
        if x.start >= x.end || y.start >= y.end || x.end > field.width() || y.end > field.height() {
            return Err(ArtError::InvalidArguments(format!(
                "chunk {x:?}x{y:?} does not fit a {}x{} field",
                field.width(),
                field.height()
            )));
        }
        Ok(Self { x, y, field })
    }

    pub fn x_start(&self) -> usize {
        self.x.start
    }

    pub fn x_end(&self) -> usize {
        self.x.end
    }

    pub fn y_start(&self) -> usize {
        self.y.start
    }

    pub fn y_end(&self) -> usize {
        self.y.end
    }

    pub fn width(&self) -> usize {
        self.x.len()
    }

    pub fn height(&self) -> usize {
        self.y.len()
    }

    pub fn cell_count(&self) -> usize {
        self.width() * self.height()
    }

    pub fn field(&self) -> &BrightnessField {
        &self.field
    }

    /// Truncated mean brightness over the whole chunk.
    pub fn average(&self) -> u8 {
        self.region_average(0..self.width(), 0..self.height())
    }

    /// Truncated mean brightness over a sub-rectangle given relative to the
    /// chunk origin. An empty region averages to 0.
    pub fn region_average(&self, x: Range<usize>, y: Range<usize>) -> u8 {
        let x = (self.x.start + x.start).min(self.x.end)..(self.x.start + x.end).min(self.x.end);
        let y = (self.y.start + y.start).min(self.y.end)..(self.y.start + y.end).min(self.y.end);
        let count = (x.len() * y.len()) as u64;
        if count == 0 {
            return 0;
        }
        let sum: u64 = self
            .field
            .rows()
            .skip(y.start)
            .take(y.len())
            .map(|row| row[x.clone()].iter().map(|&v| v as u64).sum::<u64>())
            .sum();
        (sum / count) as u8
    }
}

/// Tile `field` into `chunk_size`-square chunks; the last row and column
/// shrink when the field does not divide evenly.
pub fn partition(field: &BrightnessField, chunk_size: usize) -> Result<ChunkGrid> {
    let (w, h) = (field.width(), field.height());
    validate_chunk_size(w, h, chunk_size)?;

    let cols = w.div_ceil(chunk_size);
    let rows = h.div_ceil(chunk_size);
    log::debug!("partitioning {w}x{h} field into {cols}x{rows} chunks of {chunk_size}px");

    let mut chunks = Vec::new();
    chunks
        .try_reserve_exact(cols * rows)
        .map_err(|_| ArtError::MatrixAllocationError)?;
    for row in 0..rows {
        let y0 = row * chunk_size;
        for col in 0..cols {
            let x0 = col * chunk_size;
            chunks.push(Chunk {
                x: x0..(x0 + chunk_size).min(w),
                y: y0..(y0 + chunk_size).min(h),
                field: Arc::clone(field),
            });
        }
    }
    Matrix::from_vec(cols, rows, chunks)
}

/// A chunk size must be positive and yield at least one full chunk per axis.
pub fn validate_chunk_size(width: usize, height: usize, chunk_size: usize) -> Result<()> {
    if chunk_size == 0 {
        return Err(ArtError::ChunkSizeError("chunk size must be positive".into()));
    }
    if chunk_size > width || chunk_size > height {
        return Err(ArtError::ChunkSizeError(format!(
            "chunk size {chunk_size} exceeds the {width}x{height} image"
        )));
    }
    Ok(())
}
