//! Photobiological safety standards and threshold limit values.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Safety standard used to look up skin and eye limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Standard {
    #[default]
    #[serde(rename = "ACGIH")]
    Acgih,
    #[serde(rename = "ACGIH-UL8802")]
    AcgihUl8802,
    #[serde(rename = "ICNIRP")]
    Icnirp,
}

impl Standard {
    pub fn as_str(&self) -> &'static str {
        match self {
            Standard::Acgih => "ACGIH",
            Standard::AcgihUl8802 => "ACGIH-UL8802",
            Standard::Icnirp => "ICNIRP",
        }
    }
}

impl std::str::FromStr for Standard {
    type Err = crate::PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACGIH" => Ok(Standard::Acgih),
            "ACGIH-UL8802" => Ok(Standard::AcgihUl8802),
            "ICNIRP" => Ok(Standard::Icnirp),
            other => Err(crate::PlotError::Config(format!(
                "unknown safety standard: {}",
                other
            ))),
        }
    }
}

/// Which exposure limit a zone is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyKind {
    Skin,
    Eye,
}

impl SafetyKind {
    /// Safety zones are recognised by their well-known ids.
    pub fn from_zone_id(id: &str) -> Option<Self> {
        match id {
            "SkinLimits" => Some(SafetyKind::Skin),
            "EyeLimits" => Some(SafetyKind::Eye),
            _ => None,
        }
    }
}

/// Skin and eye limits in mJ/cm² over 8 hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TlvLimits {
    pub skin: f64,
    pub eye: f64,
}

impl TlvLimits {
    pub fn get(&self, kind: SafetyKind) -> f64 {
        match kind {
            SafetyKind::Skin => self.skin,
            SafetyKind::Eye => self.eye,
        }
    }
}

/// Limits per standard. Jobs may override individual entries.
#[derive(Debug, Clone, PartialEq)]
pub struct TlvTable {
    limits: HashMap<Standard, TlvLimits>,
}

impl Default for TlvTable {
    fn default() -> Self {
        let acgih = TlvLimits {
            skin: 479.0,
            eye: 161.0,
        };
        let mut limits = HashMap::new();
        limits.insert(Standard::Acgih, acgih);
        limits.insert(Standard::AcgihUl8802, acgih);
        limits.insert(
            Standard::Icnirp,
            TlvLimits {
                skin: 23.0,
                eye: 23.0,
            },
        );
        Self { limits }
    }
}

impl TlvTable {
    pub fn set(&mut self, standard: Standard, limits: TlvLimits) {
        self.limits.insert(standard, limits);
    }

    pub fn get(&self, standard: Standard) -> Option<TlvLimits> {
        self.limits.get(&standard).copied()
    }

    /// Limit for a zone, or `None` when the zone is not a safety zone or
    /// no positive limit is known.
    pub fn limit_for_zone(&self, zone_id: &str, standard: Standard) -> Option<f64> {
        let kind = SafetyKind::from_zone_id(zone_id)?;
        let limit = self.get(standard)?.get(kind);
        (limit.is_finite() && limit > 0.0).then_some(limit)
    }
}
