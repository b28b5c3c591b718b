//! Braille rendering: every chunk becomes one 2x4 dot glyph.
//!
//! A chunk is split into 2 columns and 4 rows of sub-cells. A dot is raised
//! when the sub-cell's mean brightness is strictly above the break point.
//! Bit weights follow the Unicode Braille Patterns block:
//! ```text
//! [0,0]=1   [1,0]=8
//! [0,1]=2   [1,1]=16
//! [0,2]=4   [1,2]=32
//! [0,3]=64  [1,3]=128
//! ```

use crate::art::{render_grid, ChunkConverter, BLANK};
use crate::chunk::{Chunk, ChunkGrid};
use crate::matrix::Matrix;
use crate::{ArtError, Result};

/// Braille base character (U+2800, empty braille pattern).
pub const BRAILLE_BASE: char = '\u{2800}';

/// Default break point, the middle of the brightness range.
pub const DEFAULT_BREAK_POINT: u8 = 127;

const COLUMNS: usize = 2;
const ROWS: usize = 4;

/// Bit for the dot at `[column][row]`.
const DOT_BITS: [[u8; ROWS]; COLUMNS] = [[0x01, 0x02, 0x04, 0x40], [0x08, 0x10, 0x20, 0x80]];

/// Convert a dot pattern to its braille character.
pub fn encode(pattern: u8) -> char {
    char::from_u32(BRAILLE_BASE as u32 + pattern as u32).unwrap_or(BRAILLE_BASE)
}

/// Cumulative sub-cell boundaries, relative to the chunk origin, for a
/// chunk of a given span. Leftover pixels go to column 0 and to rows 1, 2
/// and 0, in that order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubGrid {
    columns: [usize; COLUMNS + 1],
    rows: [usize; ROWS + 1],
}

impl SubGrid {
    pub fn new(width: usize, height: usize) -> Self {
        let col_size = width / COLUMNS;
        let col_rem = width % COLUMNS;
        let columns = [0, col_size + col_rem, 2 * col_size + col_rem];

        let row_size = height / ROWS;
        let rem = height % ROWS;
        let (r0, r1, r2) = (usize::from(rem > 0), usize::from(rem > 1), usize::from(rem > 2));
        let rows = [
            0,
            row_size + r2,
            2 * row_size + r0 + r2,
            3 * row_size + r1 + r0 + r2,
            4 * row_size + r1 + r0 + r2,
        ];
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[usize; COLUMNS + 1] {
        &self.columns
    }

    pub fn rows(&self) -> &[usize; ROWS + 1] {
        &self.rows
    }
}

#[derive(Clone, Debug)]
pub struct BrailleConverter {
    break_point: u8,
    edges: bool,
    invert: bool,
}

impl Default for BrailleConverter {
    fn default() -> Self {
        Self::new(DEFAULT_BREAK_POINT)
    }
}

impl BrailleConverter {
    pub fn new(break_point: u8) -> Self {
        Self { break_point, edges: false, invert: false }
    }

    /// Also convert the outermost ring of chunks, which is left blank by
    /// default.
    pub fn with_edges(mut self, edges: bool) -> Self {
        self.edges = edges;
        self
    }

    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    pub fn break_point(&self) -> u8 {
        self.break_point
    }

    /// Dot pattern of `chunk` sampled with `layout`.
    pub fn pattern(&self, chunk: &Chunk, layout: &SubGrid) -> u8 {
        let mut code = 0u8;
        for (col, bits) in DOT_BITS.iter().enumerate() {
            let xs = layout.columns[col]..layout.columns[col + 1];
            for (row, &bit) in bits.iter().enumerate() {
                let ys = layout.rows[row]..layout.rows[row + 1];
                let avg = chunk.region_average(xs.clone(), ys);
                let avg = if self.invert { 255 - avg } else { avg };
                if avg > self.break_point {
                    code |= bit;
                }
            }
        }
        code
    }
}

impl ChunkConverter for BrailleConverter {
    fn glyphs(&self, chunks: &ChunkGrid, parallel: bool) -> Result<Matrix<char>> {
        let reference = chunks.get(0, 0)?;
        if reference.width() < COLUMNS || reference.height() < ROWS {
            return Err(ArtError::ChunkSizeError(format!(
                "braille needs chunks of at least {COLUMNS}x{ROWS} pixels, got {}x{}",
                reference.width(),
                reference.height()
            )));
        }
        let layout = SubGrid::new(reference.width(), reference.height());
        log::debug!("braille sub-grid: columns {:?}, rows {:?}", layout.columns, layout.rows);

        let (cols, rows) = (chunks.width(), chunks.height());
        if !self.edges && (cols < 3 || rows < 3) {
            log::warn!("{cols}x{rows} chunk grid has no interior, braille output is blank");
        }

        render_grid(cols, rows, parallel, |x, y| {
            let border = x == 0 || y == 0 || x + 1 == cols || y + 1 == rows;
            if border && !self.edges {
                return BLANK;
            }
            let chunk = &chunks.as_slice()[y * cols + x];
            let own;
            let layout = if chunk.width() == reference.width() && chunk.height() == reference.height() {
                &layout
            } else {
                own = SubGrid::new(chunk.width(), chunk.height());
                &own
            };
            encode(self.pattern(chunk, layout))
        })
    }
}
