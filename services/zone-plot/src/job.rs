//! Plot job files.
//!
//! A job is the JSON document the calculation service writes for one zone:
//! the zone and room records, enabled lamps, the computed values and,
//! optionally, the TLV limits per standard.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use zone_common::{LampRecord, RoomRecord, Standard, TlvLimits, TlvTable, ValueGrid, ZoneRecord};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotJob {
    pub zone: ZoneRecord,
    #[serde(default)]
    pub room: RoomRecord,
    #[serde(default)]
    pub lamps: Vec<LampRecord>,
    /// `values[i][j]` along the zone's u and v axes, in µW/cm²
    pub values: Vec<Vec<f64>>,
    /// Overrides for the built-in limits
    #[serde(default)]
    pub tlv_limits: Option<HashMap<Standard, TlvLimits>>,
}

impl PlotJob {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read job file {}", path.display()))?;
        Self::from_json_str(&content).with_context(|| format!("invalid job file {}", path.display()))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Values with the zone's display unit factor attached.
    pub fn grid(&self) -> Result<ValueGrid> {
        Ok(ValueGrid::new(self.values.clone(), self.zone.unit_factor())?)
    }

    /// Built-in limits with this job's overrides applied.
    pub fn tlv_table(&self) -> TlvTable {
        let mut table = TlvTable::default();
        if let Some(overrides) = &self.tlv_limits {
            for (standard, limits) in overrides {
                table.set(*standard, *limits);
            }
        }
        table
    }

    /// Lamps that contribute to the plot.
    pub fn enabled_lamps(&self) -> Vec<LampRecord> {
        self.lamps.iter().filter(|l| l.enabled).cloned().collect()
    }
}
