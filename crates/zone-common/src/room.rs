//! Room geometry and display settings.

use crate::Standard;
use serde::{Deserialize, Serialize};

/// Unit system the room is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Meters,
    Feet,
}

impl Units {
    /// Short unit suffix for axis titles.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Units::Meters => "m",
            Units::Feet => "ft",
        }
    }
}

/// A world axis of the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn name(&self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

/// Room record as returned when a project is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRecord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default)]
    pub units: Units,
    #[serde(default)]
    pub standard: Standard,
    /// Decimal places used for numeric cell values
    #[serde(default = "default_precision")]
    pub precision: u8,
    /// Selected colormap name
    #[serde(default)]
    pub colormap: Option<String>,
}

fn default_precision() -> u8 {
    1
}

impl RoomRecord {
    /// Extent of the room along `axis`.
    pub fn dimension(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

impl Default for RoomRecord {
    fn default() -> Self {
        Self {
            x: 4.0,
            y: 6.0,
            z: 2.7,
            units: Units::Meters,
            standard: Standard::default(),
            precision: default_precision(),
            colormap: None,
        }
    }
}
