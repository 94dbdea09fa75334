use log::{debug, info, warn};
use crate::error::Error;

/// Adaptive one-dimensional mesh of a shock tube. The driven section has unit
/// length and the driver section has length `driver_length`, so the tube
/// spans `[0, 1 + driver_length]`.
///
/// The mesh holds two grids of cell-edge points. The uniform grid is fixed
/// at construction. The active grid starts out equal to it, and is replaced
/// only by an explicit call to [`Mesh::set_active_grid`]; in particular
/// [`Mesh::redistribute`] returns a new grid without committing it.
///
#[derive(Clone, Debug)]
pub struct Mesh {
    driver_length: f64,
    uniform_grid: Vec<f64>,
    active_grid: Vec<f64>,
}

impl Mesh {
    /// Create a mesh of `num_points` evenly spaced points over the closed
    /// interval `[0, 1 + driver_length]`.
    ///
    pub fn new(num_points: usize, driver_length: f64) -> Result<Self, Error> {
        if num_points < 2 {
            return Err(Error::TooFewPoints(num_points));
        }
        if !(driver_length > 0.0 && driver_length.is_finite()) {
            return Err(Error::NonPositiveLength(driver_length));
        }
        let tube_length = 1.0 + driver_length;
        let uniform_grid = linspace(0.0, tube_length, num_points);
        let active_grid = uniform_grid.clone();

        info!("mesh with {} points on [0, {}]", num_points, tube_length);

        Ok(Self {
            driver_length,
            uniform_grid,
            active_grid,
        })
    }

    pub fn num_points(&self) -> usize {
        self.uniform_grid.len()
    }

    pub fn driver_length(&self) -> f64 {
        self.driver_length
    }

    pub fn tube_length(&self) -> f64 {
        1.0 + self.driver_length
    }

    pub fn uniform_grid(&self) -> &[f64] {
        &self.uniform_grid
    }

    pub fn active_grid(&self) -> &[f64] {
        &self.active_grid
    }

    /// Return the widths of the `num_points - 1` cells of the active grid.
    ///
    pub fn cell_spacing(&self) -> Vec<f64> {
        self.active_grid.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Commit a grid as the active one. The grid must have `num_points`
    /// points, start at 0, end at the tube length, and be strictly
    /// increasing.
    ///
    pub fn set_active_grid(&mut self, grid: Vec<f64>) -> Result<(), Error> {
        let tube_length = self.tube_length();

        if grid.len() != self.num_points() {
            return Err(Error::ShapeMismatch {
                expected: self.num_points(),
                found: grid.len(),
            });
        }
        if grid[0] != 0.0 || (grid[grid.len() - 1] - tube_length).abs() > 1e-12 * tube_length {
            return Err(Error::InvalidGrid(format!(
                "grid spans [{}, {}], expected [0, {}]",
                grid[0],
                grid[grid.len() - 1],
                tube_length
            )));
        }
        if let Some(i) = grid.windows(2).position(|w| !(w[1] > w[0])) {
            return Err(Error::InvalidGrid(format!(
                "grid is not strictly increasing at index {}",
                i + 1
            )));
        }
        self.active_grid = grid;
        info!("committed new active grid");
        Ok(())
    }

    /// Sample a field given on the active grid at the uniform grid points,
    /// by clamped piecewise-linear interpolation.
    ///
    pub fn resample_to_uniform(&self, field: &[f64]) -> Result<Vec<f64>, Error> {
        self.check_field(field)?;
        interpolate(&self.uniform_grid, &self.active_grid, field)
    }

    /// Compute a grid which equidistributes the variation of `field`, a flow
    /// variable sampled at the active grid points. Cells where the field
    /// varies rapidly are compressed. The active grid is not modified.
    ///
    /// A field with no variation at all yields the uniform grid.
    ///
    pub fn redistribute(&self, field: &[f64]) -> Result<Vec<f64>, Error> {
        // The uniform resample validates the field and is only reported;
        // the weights are taken on the active grid, where the cells are.
        let field_uniform = self.resample_to_uniform(field)?;
        let (lo, hi) = extrema(field);
        let (ulo, uhi) = extrema(&field_uniform);

        debug!(
            "redistributing on field in [{:.6e}, {:.6e}] (uniform resample in [{:.6e}, {:.6e}])",
            lo, hi, ulo, uhi
        );

        let floor = (hi - lo).abs() / 10.0;
        let weights: Vec<f64> = field
            .windows(2)
            .map(|w| (w[1] - w[0]).abs().max(floor))
            .collect();

        if let Some(&w) = weights.iter().find(|w| !w.is_finite()) {
            return Err(Error::NonFiniteValue(w));
        }
        if weights.iter().sum::<f64>() == 0.0 {
            warn!("field is uniform, falling back to the uniform grid");
            return Ok(self.uniform_grid.clone());
        }

        let mean = field.iter().sum::<f64>() / field.len() as f64;

        if !mean.is_finite() {
            return Err(Error::NonFiniteValue(mean));
        }
        if mean == 0.0 {
            return Err(Error::DivisionByZero("mean field value"));
        }

        let tube_length = self.tube_length();
        let min_width = tube_length / 10.0 / self.num_points() as f64;

        debug!("weight floor {:.6e}, minimum cell width {:.6e}", floor, min_width);

        let widths = self
            .cell_spacing()
            .into_iter()
            .zip(weights)
            .map(|(dx, w)| dx.max(min_width) / w * mean);

        let mut grid = Vec::with_capacity(self.num_points());
        grid.push(0.0);

        for dx in widths {
            grid.push(grid[grid.len() - 1] + dx);
        }

        // The cumulative sum starts at 0, so scaling by the span alone maps
        // it onto [0, tube_length]. This would need a translation first if
        // the sum were ever seeded with a non-zero value.
        let first = grid[0];
        let last = grid[grid.len() - 1];
        let span = last - first;

        if !span.is_finite() {
            return Err(Error::NonFiniteValue(span));
        }
        if span == 0.0 {
            return Err(Error::DivisionByZero("grid span"));
        }

        Ok(grid
            .into_iter()
            .map(|x| x / span * tube_length)
            .collect())
    }

    fn check_field(&self, field: &[f64]) -> Result<(), Error> {
        if field.len() != self.active_grid.len() {
            return Err(Error::ShapeMismatch {
                expected: self.active_grid.len(),
                found: field.len(),
            });
        }
        match field.iter().find(|x| !x.is_finite()) {
            Some(&x) => Err(Error::NonFiniteValue(x)),
            None => Ok(()),
        }
    }
}

/// Evaluate the piecewise-linear interpolant through the points `(xp, fp)`
/// at each of the abscissas `x`. Values outside `[xp[0], xp[n - 1]]` are
/// clamped to the end values. `xp` must be strictly increasing.
///
pub fn interpolate(x: &[f64], xp: &[f64], fp: &[f64]) -> Result<Vec<f64>, Error> {
    if xp.len() != fp.len() {
        return Err(Error::ShapeMismatch {
            expected: xp.len(),
            found: fp.len(),
        });
    }
    if xp.is_empty() {
        return Err(Error::TooFewPoints(0));
    }
    let n = xp.len();

    Ok(x.iter()
        .map(|&x| {
            if x <= xp[0] {
                fp[0]
            } else if x >= xp[n - 1] {
                fp[n - 1]
            } else {
                let j = xp.partition_point(|&a| a <= x);
                let i = j - 1;
                let t = (x - xp[i]) / (xp[j] - xp[i]);
                fp[i] + t * (fp[j] - fp[i])
            }
        })
        .collect())
}

fn linspace(start: f64, end: f64, num: usize) -> Vec<f64> {
    let step = (end - start) / (num - 1) as f64;
    (0..num)
        .map(|i| if i == num - 1 { end } else { start + i as f64 * step })
        .collect()
}

fn extrema(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)))
}
