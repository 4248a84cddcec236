//! Calculation zone records.

use crate::ValueUnits;
use serde::{Deserialize, Serialize};

/// Reference plane a zone lies in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefSurface {
    #[default]
    Xy,
    Xz,
    Yz,
}

impl RefSurface {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefSurface::Xy => "xy",
            RefSurface::Xz => "xz",
            RefSurface::Yz => "yz",
        }
    }
}

/// A planar calculation zone. Every geometric field is optional because
/// partially configured zones are rendered with room-derived defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoneRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ref_surface: RefSurface,
    /// Normal direction of the plane, used only when
    /// `v_positive_direction` is absent
    #[serde(default)]
    pub direction: Option<i32>,
    #[serde(default)]
    pub x1: Option<f64>,
    #[serde(default)]
    pub x2: Option<f64>,
    #[serde(default)]
    pub y1: Option<f64>,
    #[serde(default)]
    pub y2: Option<f64>,
    /// Position of the plane along its normal axis
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub num_x: Option<usize>,
    #[serde(default)]
    pub num_y: Option<usize>,
    #[serde(default)]
    pub v_positive_direction: Option<bool>,
    #[serde(default)]
    pub dose: Option<bool>,
    #[serde(default)]
    pub hours: Option<f64>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl ZoneRecord {
    pub fn new(id: impl Into<String>, ref_surface: RefSurface) -> Self {
        Self {
            id: id.into(),
            ref_surface,
            enabled: true,
            ..Default::default()
        }
    }

    /// Human-readable name, falling back to the id.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.id,
        }
    }

    pub fn is_dose(&self) -> bool {
        self.dose.unwrap_or(false)
    }

    pub fn value_units(&self) -> ValueUnits {
        if self.is_dose() {
            ValueUnits::Dose
        } else {
            ValueUnits::Irradiance
        }
    }

    /// Factor applied to irradiance values to get displayed values.
    /// Dose zones convert µW/cm² over `hours` into mJ/cm².
    pub fn unit_factor(&self) -> f64 {
        if self.is_dose() {
            self.hours.unwrap_or(8.0) * 3.6
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_from_service_json() {
        let zone: ZoneRecord = serde_json::from_str(
            r#"{"id": "SkinLimits", "ref_surface": "xz", "x1": 0.0, "x2": 4.0,
                "v_positive_direction": false, "dose": true, "hours": 8.0}"#,
        )
        .unwrap();
        assert_eq!(zone.ref_surface, RefSurface::Xz);
        assert_eq!(zone.v_positive_direction, Some(false));
        assert!(zone.enabled);
        assert_eq!(zone.value_units(), ValueUnits::Dose);
        assert!((zone.unit_factor() - 28.8).abs() < 1e-9);
    }

    #[test]
    fn test_irradiance_factor_is_one() {
        let zone = ZoneRecord::new("WholePlane", RefSurface::Xy);
        assert_eq!(zone.unit_factor(), 1.0);
        assert_eq!(zone.value_units(), ValueUnits::Irradiance);
    }

    #[test]
    fn test_display_name() {
        let mut zone = ZoneRecord::new("z1", RefSurface::Yz);
        assert_eq!(zone.display_name(), "z1");
        zone.name = Some("  ".into());
        assert_eq!(zone.display_name(), "z1");
        zone.name = Some("Eye Level".into());
        assert_eq!(zone.display_name(), "Eye Level");
    }
}
