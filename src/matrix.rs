//! Dense row-major 2-D container shared by the image, brightness and chunk stages.

use crate::{ArtError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T> Matrix<T> {
    /// Build a matrix by calling `f(x, y)` for every cell in row-major order.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Result<Self> {
        let len = width
            .checked_mul(height)
            .ok_or(ArtError::MatrixAllocationError)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| ArtError::MatrixAllocationError)?;
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Ok(Self { width, height, data })
    }

    /// Wrap row-major data; `data.len()` must equal `width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self> {
        if width.checked_mul(height) != Some(data.len()) {
            return Err(ArtError::InvalidArguments(format!(
                "{} elements do not fill a {width}x{height} matrix",
                data.len()
            )));
        }
        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Result<&T> {
        let idx = self.index(x, y)?;
        Ok(&self.data[idx])
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Result<&mut T> {
        let idx = self.index(x, y)?;
        Ok(&mut self.data[idx])
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) -> Result<()> {
        *self.get_mut(x, y)? = value;
        Ok(())
    }

    /// Rows from top to bottom, each `width` elements long.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks_exact(0) panics; an empty matrix simply has no rows to yield
        self.data.chunks_exact(self.width.max(1)).take(self.height)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    fn index(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(ArtError::MatrixIndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }
}

impl<T: Default> Matrix<T> {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::from_fn(width, height, |_, _| T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_default_filled() {
        let m: Matrix<u8> = Matrix::new(3, 2).unwrap();
        assert_eq!(m.width(), 3);
        assert_eq!(m.height(), 2);
        assert!(m.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_set_then_get() {
        let mut m: Matrix<char> = Matrix::new(2, 2).unwrap();
        m.set(1, 0, 'x').unwrap();
        assert_eq!(*m.get(1, 0).unwrap(), 'x');
        assert_eq!(m.as_slice(), &['\0', 'x', '\0', '\0']);
    }

    #[test]
    fn test_out_of_bounds() {
        let m: Matrix<u8> = Matrix::new(2, 3).unwrap();
        assert!(matches!(
            m.get(2, 0),
            Err(ArtError::MatrixIndexOutOfBounds { x: 2, y: 0, width: 2, height: 3 })
        ));
        assert!(m.get(0, 3).is_err());
    }

    #[test]
    fn test_from_fn_is_row_major() {
        let m = Matrix::from_fn(3, 2, |x, y| (y * 10 + x) as u8).unwrap();
        let rows: Vec<&[u8]> = m.rows().collect();
        assert_eq!(rows, vec![&[0, 1, 2][..], &[10, 11, 12][..]]);
    }

    #[test]
    fn test_from_vec_length_mismatch() {
        assert!(matches!(
            Matrix::from_vec(2, 2, vec![0u8; 3]),
            Err(ArtError::InvalidArguments(_))
        ));
    }

    #[test]
    fn test_huge_matrix_fails_allocation() {
        let result: Result<Matrix<u8>> = Matrix::new(usize::MAX, 2);
        assert!(matches!(result, Err(ArtError::MatrixAllocationError)));
    }
}
