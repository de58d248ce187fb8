//! Grayscale intensity grids, the input to every hash algorithm.

use crate::error::HashError;

/// A row-major grid of 0-255 grayscale intensities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntensityGrid {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

impl IntensityGrid {
    /// Wrap row-major samples, checking that they fill `width x height` exactly
    pub fn new(width: u32, height: u32, samples: Vec<u8>) -> Result<Self, HashError> {
        if width == 0 || height == 0 || samples.len() != (width as usize) * (height as usize) {
            return Err(HashError::InvalidGrid {
                width,
                height,
                samples: samples.len(),
            });
        }

        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Build a grid by evaluating `f(x, y)` for every cell
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> u8) -> Self {
        let mut samples = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                samples.push(f(x, y));
            }
        }

        Self {
            width,
            height,
            samples,
        }
    }

    /// A grid where every cell holds `value`
    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        Self::from_fn(width, height, |_, _| value)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Intensity at column `x`, row `y`
    ///
    /// Panics if the coordinate is outside the grid.
    pub fn get(&self, x: u32, y: u32) -> u8 {
        assert!(x < self.width && y < self.height, "({x}, {y}) outside grid");
        self.samples[(y * self.width + x) as usize]
    }

    /// All samples in row-major order
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_wrong_sample_count() {
        let result = IntensityGrid::new(8, 8, vec![0; 63]);
        assert!(matches!(
            result,
            Err(HashError::InvalidGrid { samples: 63, .. })
        ));
    }

    #[test]
    fn new_rejects_empty_dimensions() {
        assert!(IntensityGrid::new(0, 8, Vec::new()).is_err());
    }

    #[test]
    fn from_fn_is_row_major() {
        let grid = IntensityGrid::from_fn(3, 2, |x, y| (y * 10 + x) as u8);
        assert_eq!(grid.samples(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(grid.get(2, 1), 12);
    }

    #[test]
    fn filled_grid_is_uniform() {
        let grid = IntensityGrid::filled(4, 4, 77);
        assert!(grid.samples().iter().all(|&v| v == 77));
    }
}
