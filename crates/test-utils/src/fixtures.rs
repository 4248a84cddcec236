//! Common test fixtures for zone plotting tests.
//!
//! Rooms, zones and lamps that mirror what the calculation service hands
//! over for a typical small room.

use zone_common::{LampRecord, RefSurface, RoomRecord, Standard, Units, ZoneRecord};

/// Common room definitions.
pub mod rooms {
    use super::*;

    /// 4 m × 6 m × 2.7 m room, ACGIH limits.
    pub fn small_office() -> RoomRecord {
        RoomRecord {
            x: 4.0,
            y: 6.0,
            z: 2.7,
            units: Units::Meters,
            standard: Standard::Acgih,
            precision: 1,
            colormap: None,
        }
    }

    /// 20 ft × 30 ft × 9 ft room, ICNIRP limits.
    pub fn imperial_classroom() -> RoomRecord {
        RoomRecord {
            x: 20.0,
            y: 30.0,
            z: 9.0,
            units: Units::Feet,
            standard: Standard::Icnirp,
            precision: 2,
            colormap: Some("viridis".to_string()),
        }
    }
}

/// Common calculation zones.
pub mod zones {
    use super::*;

    /// Horizontal working plane at 0.75 m covering the whole floor.
    pub fn working_plane() -> ZoneRecord {
        ZoneRecord {
            name: Some("Working Plane".to_string()),
            height: Some(0.75),
            num_x: Some(20),
            num_y: Some(30),
            v_positive_direction: Some(true),
            ..ZoneRecord::new("WorkingPlane", RefSurface::Xy)
        }
    }

    /// 8-hour skin dose plane at 1.8 m.
    pub fn skin_limits() -> ZoneRecord {
        ZoneRecord {
            name: Some("Skin Dose (8 Hours)".to_string()),
            height: Some(1.8),
            dose: Some(true),
            hours: Some(8.0),
            v_positive_direction: Some(true),
            ..ZoneRecord::new("SkinLimits", RefSurface::Xy)
        }
    }

    /// 8-hour eye dose plane at 1.8 m.
    pub fn eye_limits() -> ZoneRecord {
        ZoneRecord {
            name: Some("Eye Dose (8 Hours)".to_string()),
            id: "EyeLimits".to_string(),
            ..skin_limits()
        }
    }

    /// Vertical wall plane without the authoritative flip flag.
    pub fn legacy_wall(direction: i32) -> ZoneRecord {
        ZoneRecord {
            direction: Some(direction),
            height: Some(0.0),
            ..ZoneRecord::new("Wall", RefSurface::Xz)
        }
    }
}

/// Common lamp layouts.
pub mod lamps {
    use super::*;

    /// A single ceiling lamp in the middle of the small office.
    pub fn single_ceiling() -> Vec<LampRecord> {
        vec![LampRecord::new("lamp-1", 2.0, 3.0, 2.7).with_name("Lamp 1")]
    }

    /// `count` lamps in a row along x at the given spacing, named "Lamp N".
    pub fn row(count: usize, y: f64, spacing: f64) -> Vec<LampRecord> {
        (0..count)
            .map(|i| {
                LampRecord::new(format!("lamp-{}", i + 1), 0.25 + i as f64 * spacing, y, 2.7)
                    .with_name(format!("Lamp {}", i + 1))
            })
            .collect()
    }
}
