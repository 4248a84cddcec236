//! Value statistics for colour scaling and legends.

use zone_common::ValueGrid;

/// Raw and display extremes of a value grid.
///
/// Display values are raw values multiplied by the grid's unit factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueStats {
    pub min: f64,
    pub max: f64,
    pub display_min: f64,
    pub display_max: f64,
}

impl ValueStats {
    /// Scan a grid, ignoring non-finite cells. A grid with no finite cell
    /// reports `0..0`.
    pub fn compute(grid: &ValueGrid) -> Self {
        let (min, max) = grid
            .iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
                None => Some((v, v)),
            })
            .unwrap_or((0.0, 0.0));

        let factor = grid.unit_factor();
        let (a, b) = (min * factor, max * factor);
        Self {
            min,
            max,
            display_min: a.min(b),
            display_max: a.max(b),
        }
    }

    /// Raw span, floored to 1 when every value is the same.
    pub fn range(&self) -> f64 {
        let range = self.max - self.min;
        if range > 0.0 {
            range
        } else {
            1.0
        }
    }

    /// Map a raw value to `[0, 1]` against the grid extremes.
    pub fn normalize(&self, value: f64) -> f64 {
        ((value - self.min) / self.range()).clamp(0.0, 1.0)
    }

    /// Display value halfway between the extremes.
    pub fn display_mid(&self) -> f64 {
        (self.display_min + self.display_max) / 2.0
    }
}
