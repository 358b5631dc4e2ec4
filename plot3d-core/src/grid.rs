//! Rectangular grids of sampled values for surface, wireframe and
//! contour plots.

use crate::error::PlotError;

/// A row-major rectangular grid of `f64` samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Grid {
    /// Build a grid from row-major data with the given shape.
    pub fn from_vec(data: Vec<f64>, rows: usize, cols: usize) -> Result<Self, PlotError> {
        if data.len() != rows * cols {
            return Err(PlotError::InvalidArgument(format!(
                "{} samples do not fill a {}x{} grid",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Build a grid from rows, which must all share one length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, PlotError> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.len());
        for (i, row) in rows.iter().enumerate() {
            if row.len() != ncols {
                return Err(PlotError::InvalidArgument(format!(
                    "row {} has {} samples, expected {}",
                    i,
                    row.len(),
                    ncols
                )));
            }
        }
        Ok(Self {
            rows: nrows,
            cols: ncols,
            data: rows.into_iter().flatten().collect(),
        })
    }

    /// Build a grid by evaluating `f(row, col)` at every cell.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    pub fn values(&self) -> &[f64] {
        &self.data
    }

    /// Minimum and maximum over the finite samples, if any.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let mut bounds: Option<(f64, f64)> = None;
        for &v in &self.data {
            if !v.is_finite() {
                continue;
            }
            bounds = Some(match bounds {
                None => (v, v),
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
            });
        }
        bounds
    }

    /// Elementwise map into a new grid of the same shape.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }
}

/// `n` evenly spaced samples from `start` to `stop` inclusive.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Samples from `start` up to (excluding) `stop` in increments of `step`.
pub fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    assert!(step > 0.0, "step must be positive");
    let n = ((stop - start) / step).ceil().max(0.0) as usize;
    (0..n).map(|i| start + step * i as f64).collect()
}

/// Coordinate grids of shape (ys.len(), xs.len()): the first repeats `xs`
/// along every row, the second repeats `ys` down every column.
pub fn meshgrid(xs: &[f64], ys: &[f64]) -> (Grid, Grid) {
    let x = Grid::from_fn(ys.len(), xs.len(), |_, c| xs[c]);
    let y = Grid::from_fn(ys.len(), xs.len(), |r, _| ys[r]);
    (x, y)
}

fn gaussian(x: f64, y: f64, sx: f64, sy: f64, mx: f64, my: f64) -> f64 {
    let ex = ((x - mx) / sx).powi(2);
    let ey = ((y - my) / sy).powi(2);
    (-(ex + ey) / 2.0).exp() / (2.0 * std::f64::consts::PI * sx * sy)
}

/// Demo surface: difference of two Gaussian bumps sampled over [-3, 3]^2
/// at the given step, scaled to a [-30, 30] x/y footprint.
pub fn sample_surface(step: f64) -> (Grid, Grid, Grid) {
    let ticks = arange(-3.0, 3.0, step);
    let (x, y) = meshgrid(&ticks, &ticks);
    let z = Grid::from_fn(x.rows(), x.cols(), |r, c| {
        let (gx, gy) = (x.get(r, c), y.get(r, c));
        let z1 = gaussian(gx, gy, 1.0, 1.0, 0.0, 0.0);
        let z2 = gaussian(gx, gy, 1.5, 0.5, 1.0, 1.0);
        (z2 - z1) * 500.0
    });
    (x.map(|v| v * 10.0), y.map(|v| v * 10.0), z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_rows_rectangular() {
        let g = Grid::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
        assert_eq!(g.shape(), (3, 2));
        assert_eq!(g.get(1, 0), 3.0);
        assert_eq!(g.get(2, 1), 6.0);
    }

    #[test]
    fn test_from_rows_ragged() {
        let err = Grid::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, PlotError::InvalidArgument(_)));
    }

    #[test]
    fn test_from_vec_length_checked() {
        assert!(Grid::from_vec(vec![0.0; 6], 2, 3).is_ok());
        assert!(Grid::from_vec(vec![0.0; 5], 2, 3).is_err());
    }

    #[test]
    fn test_linspace_endpoints() {
        let v = linspace(-2.0, 2.0, 5);
        assert_eq!(v.len(), 5);
        assert_relative_eq!(v[0], -2.0);
        assert_relative_eq!(v[2], 0.0);
        assert_relative_eq!(v[4], 2.0);
    }

    #[test]
    fn test_arange_excludes_stop() {
        let v = arange(0.0, 1.0, 0.25);
        assert_eq!(v.len(), 4);
        assert_relative_eq!(v[3], 0.75);
        assert!(arange(1.0, 1.0, 0.5).is_empty());
    }

    #[test]
    fn test_meshgrid_shape() {
        let (x, y) = meshgrid(&[0.0, 1.0, 2.0], &[10.0, 20.0]);
        assert_eq!(x.shape(), (2, 3));
        assert_eq!(y.shape(), (2, 3));
        assert_eq!(x.get(1, 2), 2.0);
        assert_eq!(y.get(1, 2), 20.0);
    }

    #[test]
    fn test_min_max_skips_non_finite() {
        let g = Grid::from_vec(vec![1.0, f64::NAN, -3.0, f64::INFINITY], 2, 2).unwrap();
        assert_eq!(g.min_max(), Some((-3.0, 1.0)));
    }

    #[test]
    fn test_sample_surface_shape() {
        let (x, y, z) = sample_surface(0.5);
        assert_eq!(x.shape(), z.shape());
        assert_eq!(y.shape(), z.shape());
        assert_eq!(x.rows(), 12);
        // The central dip of the first bump is below zero.
        let (lo, hi) = z.min_max().unwrap();
        assert!(lo < 0.0 && hi > 0.0);
    }
}
