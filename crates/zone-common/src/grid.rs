//! Value grids produced by the calculation service.

use crate::{PlotError, PlotResult};
use serde::{Deserialize, Serialize};

/// Immutable snapshot of one zone's computed values.
///
/// `values[i][j]` holds the value at the `i`-th point along the plane's u axis
/// and the `j`-th point along its v axis. Every row has the same length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueGrid {
    values: Vec<Vec<f64>>,
    unit_factor: f64,
}

impl ValueGrid {
    /// Build a grid, rejecting empty or ragged input.
    pub fn new(values: Vec<Vec<f64>>, unit_factor: f64) -> PlotResult<Self> {
        let n_v = match values.first() {
            Some(row) => row.len(),
            None => return Err(PlotError::InvalidGrid("grid has no rows".to_string())),
        };
        if n_v == 0 {
            return Err(PlotError::InvalidGrid("grid rows are empty".to_string()));
        }
        if let Some((i, row)) = values.iter().enumerate().find(|(_, row)| row.len() != n_v) {
            return Err(PlotError::InvalidGrid(format!(
                "row {} has {} values, expected {}",
                i,
                row.len(),
                n_v
            )));
        }
        if !unit_factor.is_finite() {
            return Err(PlotError::InvalidGrid(format!(
                "unit factor must be finite, got {}",
                unit_factor
            )));
        }
        Ok(Self { values, unit_factor })
    }

    /// Number of points along the u axis.
    pub fn n_u(&self) -> usize {
        self.values.len()
    }

    /// Number of points along the v axis.
    pub fn n_v(&self) -> usize {
        self.values[0].len()
    }

    /// Raw value at `(i, j)`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    /// Multiplier applied to raw values for display.
    pub fn unit_factor(&self) -> f64 {
        self.unit_factor
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Iterate over every raw value.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().flat_map(|row| row.iter().copied())
    }
}

/// Physical quantity a zone reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueUnits {
    Irradiance,
    Dose,
}

impl ValueUnits {
    /// Unit label as shown on legends.
    pub fn label(&self) -> &'static str {
        match self {
            ValueUnits::Irradiance => "µW/cm²",
            ValueUnits::Dose => "mJ/cm²",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangular_grid_accepted() {
        let grid = ValueGrid::new(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]], 1.0).unwrap();
        assert_eq!(grid.n_u(), 2);
        assert_eq!(grid.n_v(), 3);
        assert_eq!(grid.get(1, 2), 6.0);
        assert_eq!(grid.iter().count(), 6);
    }

    #[test]
    fn test_ragged_grid_rejected() {
        let err = ValueGrid::new(vec![vec![1.0, 2.0], vec![3.0]], 1.0).unwrap_err();
        assert!(matches!(err, PlotError::InvalidGrid(_)));
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_empty_grid_rejected() {
        assert!(ValueGrid::new(vec![], 1.0).is_err());
        assert!(ValueGrid::new(vec![vec![]], 1.0).is_err());
    }

    #[test]
    fn test_unit_labels() {
        assert_eq!(ValueUnits::Irradiance.label(), "µW/cm²");
        assert_eq!(ValueUnits::Dose.label(), "mJ/cm²");
    }
}
