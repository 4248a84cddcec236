//! Value grid generators for creating synthetic zone data.
//!
//! Grids are indexed `values[i][j]` with `i` along the plane's u axis and
//! `j` along its v axis, matching `ValueGrid`.

use zone_common::ValueGrid;

/// Creates a grid with predictable values.
///
/// Each cell value is `i * 1000 + j`, so a test can tell exactly which cell
/// ended up where.
///
/// # Example
///
/// ```
/// use test_utils::create_index_grid;
///
/// let grid = create_index_grid(3, 2);
/// assert_eq!(grid.len(), 3);
/// assert_eq!(grid[2][1], 2001.0);
/// ```
pub fn create_index_grid(n_u: usize, n_v: usize) -> Vec<Vec<f64>> {
    (0..n_u)
        .map(|i| (0..n_v).map(|j| (i * 1000 + j) as f64).collect())
        .collect()
}

/// Creates a grid where every cell holds `value`.
pub fn create_uniform_grid(n_u: usize, n_v: usize, value: f64) -> Vec<Vec<f64>> {
    vec![vec![value; n_v]; n_u]
}

/// Creates a grid rising linearly from `min` at `(0, 0)` to `max` at the far
/// corner.
pub fn create_gradient_grid(n_u: usize, n_v: usize, min: f64, max: f64) -> Vec<Vec<f64>> {
    let span = (n_u + n_v).saturating_sub(2).max(1) as f64;
    (0..n_u)
        .map(|i| {
            (0..n_v)
                .map(|j| min + (max - min) * (i + j) as f64 / span)
                .collect()
        })
        .collect()
}

/// Creates an irradiance-like field peaking under a lamp at the grid centre.
///
/// Values fall off with the inverse square of the distance to a source
/// `height` cells above the plane, scaled so the peak equals `peak`.
pub fn create_lamp_field(n_u: usize, n_v: usize, peak: f64, height: f64) -> Vec<Vec<f64>> {
    let cu = (n_u as f64 - 1.0) / 2.0;
    let cv = (n_v as f64 - 1.0) / 2.0;
    let h2 = height * height;
    (0..n_u)
        .map(|i| {
            (0..n_v)
                .map(|j| {
                    let du = i as f64 - cu;
                    let dv = j as f64 - cv;
                    peak * h2 / (du * du + dv * dv + h2)
                })
                .collect()
        })
        .collect()
}

/// Creates a gradient grid with some cells replaced by NaN.
///
/// Every `nan_interval`-th cell (in row-major order) is NaN.
pub fn create_grid_with_nans(n_u: usize, n_v: usize, nan_interval: usize) -> Vec<Vec<f64>> {
    let mut grid = create_gradient_grid(n_u, n_v, 0.0, 100.0);
    if nan_interval == 0 {
        return grid;
    }
    for i in 0..n_u {
        for j in 0..n_v {
            if (i * n_v + j) % nan_interval == 0 {
                grid[i][j] = f64::NAN;
            }
        }
    }
    grid
}

/// Wrap raw values in a `ValueGrid` with a unit factor of 1.
pub fn value_grid(values: Vec<Vec<f64>>) -> ValueGrid {
    ValueGrid::new(values, 1.0).unwrap_or_else(|e| panic!("invalid test grid: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_grid_values() {
        let grid = create_index_grid(4, 3);
        assert_eq!(grid.len(), 4);
        assert_eq!(grid[0].len(), 3);
        assert_eq!(grid[0][0], 0.0);
        assert_eq!(grid[3][2], 3002.0);
    }

    #[test]
    fn test_gradient_grid_endpoints() {
        let grid = create_gradient_grid(5, 4, 10.0, 50.0);
        assert_eq!(grid[0][0], 10.0);
        assert_eq!(grid[4][3], 50.0);
    }

    #[test]
    fn test_gradient_grid_single_cell() {
        let grid = create_gradient_grid(1, 1, 7.0, 9.0);
        assert_eq!(grid, vec![vec![7.0]]);
    }

    #[test]
    fn test_lamp_field_peaks_in_centre() {
        let grid = create_lamp_field(5, 5, 200.0, 2.0);
        assert_eq!(grid[2][2], 200.0);
        assert!(grid[0][0] < grid[1][1]);
    }

    #[test]
    fn test_grid_with_nans() {
        let grid = create_grid_with_nans(4, 4, 5);
        let nan_count = grid.iter().flatten().filter(|v| v.is_nan()).count();
        assert_eq!(nan_count, 4); // cells 0, 5, 10, 15
    }

    #[test]
    fn test_value_grid_wraps() {
        let grid = value_grid(create_uniform_grid(2, 3, 1.5));
        assert_eq!(grid.n_u(), 2);
        assert_eq!(grid.n_v(), 3);
    }
}
