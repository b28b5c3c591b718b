//! Alphabet mapping: one character per chunk, picked by average brightness.

use crate::art::{render_grid, ChunkConverter};
use crate::chunk::ChunkGrid;
use crate::matrix::Matrix;
use crate::{ArtError, Result};

/// Ten-level ramp ordered from darkest to brightest.
pub const DEFAULT_ALPHABET: &str = " .:-=+*#%@";

const MIN_ALPHABET_LEN: usize = 2;
const MAX_ALPHABET_LEN: usize = 255;

#[derive(Clone, Debug)]
pub struct SimpleConverter {
    alphabet: Vec<char>,
    invert: bool,
}

impl SimpleConverter {
    /// `alphabet` runs from darkest (first) to brightest (last) and must hold
    /// between 2 and 255 characters.
    pub fn new(alphabet: &str) -> Result<Self> {
        let alphabet: Vec<char> = alphabet.chars().collect();
        validate_alphabet(&alphabet)?;
        Ok(Self { alphabet, invert: false })
    }

    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// Character for an average brightness.
    pub fn char_for(&self, brightness: u8) -> char {
        let brightness = if self.invert { 255 - brightness } else { brightness };
        let interval = (255 / self.alphabet.len()) as u8;
        let idx = ((brightness / interval) as usize).min(self.alphabet.len() - 1);
        self.alphabet[idx]
    }
}

impl Default for SimpleConverter {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.chars().collect(),
            invert: false,
        }
    }
}

impl ChunkConverter for SimpleConverter {
    fn glyphs(&self, chunks: &ChunkGrid, parallel: bool) -> Result<Matrix<char>> {
        validate_alphabet(&self.alphabet)?;
        render_grid(chunks.width(), chunks.height(), parallel, |x, y| {
            let chunk = &chunks.as_slice()[y * chunks.width() + x];
            self.char_for(chunk.average())
        })
    }
}

fn validate_alphabet(alphabet: &[char]) -> Result<()> {
    if !(MIN_ALPHABET_LEN..=MAX_ALPHABET_LEN).contains(&alphabet.len()) {
        return Err(ArtError::InvalidArguments(format!(
            "alphabet has {} characters, expected {MIN_ALPHABET_LEN} to {MAX_ALPHABET_LEN}",
            alphabet.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::chunk::partition;

    fn grid(w: usize, h: usize, cs: usize, f: impl FnMut(usize, usize) -> u8) -> ChunkGrid {
        partition(&Arc::new(Matrix::from_fn(w, h, f).unwrap()), cs).unwrap()
    }

    #[test]
    fn test_binary_alphabet() {
        let conv = SimpleConverter::new("01").unwrap();
        assert_eq!(conv.char_for(0), '0');
        assert_eq!(conv.char_for(126), '0');
        assert_eq!(conv.char_for(127), '1');
        assert_eq!(conv.char_for(255), '1');
    }

    #[test]
    fn test_invert() {
        let conv = SimpleConverter::new("01").unwrap().with_invert(true);
        assert_eq!(conv.char_for(0), '1');
        assert_eq!(conv.char_for(255), '0');
    }

    #[test]
    fn test_alphabet_length_bounds() {
        for len in [0, 1, 256] {
            let alphabet: String = std::iter::repeat('x').take(len).collect();
            assert!(
                matches!(SimpleConverter::new(&alphabet), Err(ArtError::InvalidArguments(_))),
                "length {len}"
            );
        }
        let max: String = std::iter::repeat('x').take(255).collect();
        assert!(SimpleConverter::new(&max).is_ok());
    }

    #[test]
    fn test_unicode_alphabet_counts_chars() {
        let conv = SimpleConverter::new(" ░▒▓█").unwrap();
        assert_eq!(conv.alphabet().len(), 5);
        assert_eq!(conv.char_for(255), '█');
        assert_eq!(conv.char_for(0), ' ');
    }

    #[test]
    fn test_long_alphabet_clamps() {
        // interval is 1, so bright values would index past the end
        let alphabet: String = ('a'..='z').cycle().take(200).collect();
        let conv = SimpleConverter::new(&alphabet).unwrap();
        assert_eq!(conv.char_for(255), conv.alphabet()[199]);
    }

    #[test]
    fn test_convert_uses_chunk_average() {
        // left chunk dark, right chunk bright
        let chunks = grid(4, 2, 2, |x, _| if x < 2 { 0 } else { 255 });
        let out = SimpleConverter::new("01").unwrap().convert(&chunks).unwrap();
        assert_eq!(out, "01\n");
    }

    #[test]
    fn test_default_ramp() {
        let conv = SimpleConverter::default();
        assert_eq!(conv.char_for(0), ' ');
        assert_eq!(conv.char_for(255), '@');
        assert_eq!(conv.char_for(128), '+');
    }
}
