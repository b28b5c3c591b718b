//! Glyph grid construction and final string assembly.

use crate::chunk::ChunkGrid;
use crate::matrix::Matrix;
use crate::{ArtError, Result};

/// Glyph used for cells a converter leaves unset.
pub const BLANK: char = ' ';

/// Maps a chunk grid to one glyph per chunk.
pub trait ChunkConverter: Send + Sync {
    /// Glyph grid with the chunk grid's dimensions. Rows may be computed in
    /// parallel when `parallel` is set; the result is identical either way.
    fn glyphs(&self, chunks: &ChunkGrid, parallel: bool) -> Result<Matrix<char>>;

    fn convert(&self, chunks: &ChunkGrid) -> Result<String> {
        assemble(&self.glyphs(chunks, false)?)
    }
}

/// Join a glyph grid row by row, each row terminated by `'\n'`.
pub fn assemble(glyphs: &Matrix<char>) -> Result<String> {
    let bytes: usize = glyphs
        .as_slice()
        .iter()
        .map(|c| c.len_utf8())
        .sum::<usize>()
        + glyphs.height();
    let mut out = String::new();
    out.try_reserve_exact(bytes)
        .map_err(|_| ArtError::AllocationError)?;
    for row in glyphs.rows() {
        out.extend(row.iter());
        out.push('\n');
    }
    Ok(out)
}

/// Build a `cols x rows` glyph grid from `f(x, y)`.
pub(crate) fn render_grid<F>(cols: usize, rows: usize, parallel: bool, f: F) -> Result<Matrix<char>>
where
    F: Fn(usize, usize) -> char + Sync,
{
    #[cfg(not(target_arch = "wasm32"))]
    {
        use rayon::prelude::*;

        if parallel {
            let lines: Vec<Vec<char>> = (0..rows)
                .into_par_iter()
                .map(|y| (0..cols).map(|x| f(x, y)).collect())
                .collect();
            return Matrix::from_vec(cols, rows, lines.into_iter().flatten().collect());
        }
    }
    #[cfg(target_arch = "wasm32")]
    let _ = parallel;

    Matrix::from_fn(cols, rows, |x, y| {
        if x == 0 {
            log::trace!("row {y}/{rows}");
        }
        f(x, y)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_rows() {
        let grid = Matrix::from_vec(2, 2, vec!['a', 'b', 'c', 'd']).unwrap();
        assert_eq!(assemble(&grid).unwrap(), "ab\ncd\n");
    }

    #[test]
    fn test_assemble_braille_is_utf8() {
        let grid = Matrix::from_vec(1, 1, vec!['\u{28FF}']).unwrap();
        let out = assemble(&grid).unwrap();
        assert_eq!(out.as_bytes(), &[0xE2, 0xA3, 0xBF, b'\n']);
    }

    #[test]
    fn test_render_grid_parallel_matches_sequential() {
        let f = |x: usize, y: usize| char::from(b'a' + ((x + 3 * y) % 26) as u8);
        let seq = render_grid(7, 5, false, f).unwrap();
        let par = render_grid(7, 5, true, f).unwrap();
        assert_eq!(seq, par);
        assert_eq!(*seq.get(1, 1).unwrap(), 'e');
    }
}
