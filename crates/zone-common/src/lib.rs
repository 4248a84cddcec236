//! Common types shared by the zone plotting crates.
//!
//! Everything here is plain data handed over by the calculation service:
//! value grids, zone and room geometry, lamp positions and the TLV table.

pub mod error;
pub mod grid;
pub mod lamp;
pub mod room;
pub mod safety;
pub mod zone;

pub use error::{PlotError, PlotResult};
pub use grid::{ValueGrid, ValueUnits};
pub use lamp::LampRecord;
pub use room::{Axis, RoomRecord, Units};
pub use safety::{SafetyKind, Standard, TlvLimits, TlvTable};
pub use zone::{RefSurface, ZoneRecord};
