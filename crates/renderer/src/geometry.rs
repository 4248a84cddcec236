//! Plane geometry for calculation zones.
//!
//! Resolves a zone and its room into the world-space bounds of the plotted
//! plane and whether the vertical axis is drawn inverted.

use zone_common::{Axis, RefSurface, RoomRecord, Units, ZoneRecord};

/// World-space extent of a zone's plane.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneBounds {
    pub u1: f64,
    pub u2: f64,
    pub v1: f64,
    pub v2: f64,
    /// Coordinate along the plane normal
    pub fixed: f64,
    pub u_axis: Axis,
    pub v_axis: Axis,
    pub fixed_axis: Axis,
    pub units: Units,
}

impl PlaneBounds {
    /// Horizontal axis title, e.g. `"X (m)"`.
    pub fn u_label(&self) -> String {
        axis_title(self.u_axis, self.units)
    }

    /// Vertical axis title, e.g. `"Z (ft)"`.
    pub fn v_label(&self) -> String {
        axis_title(self.v_axis, self.units)
    }

    pub fn fixed_label(&self) -> String {
        axis_title(self.fixed_axis, self.units)
    }

    pub fn u_span(&self) -> f64 {
        self.u2 - self.u1
    }

    pub fn v_span(&self) -> f64 {
        self.v2 - self.v1
    }

    /// Position of `u` along the horizontal extent; 0.5 on a degenerate axis.
    pub fn fraction_u(&self, u: f64) -> f64 {
        fraction(u, self.u1, self.u2)
    }

    /// Position of `v` along the vertical extent; 0.5 on a degenerate axis.
    pub fn fraction_v(&self, v: f64) -> f64 {
        fraction(v, self.v1, self.v2)
    }

    /// In-plane `(u, v)` of a world point.
    pub fn project_world(&self, x: f64, y: f64, z: f64) -> (f64, f64) {
        let pick = |axis: Axis| match axis {
            Axis::X => x,
            Axis::Y => y,
            Axis::Z => z,
        };
        (pick(self.u_axis), pick(self.v_axis))
    }
}

fn axis_title(axis: Axis, units: Units) -> String {
    format!("{} ({})", axis.name(), units.abbreviation())
}

fn fraction(value: f64, lo: f64, hi: f64) -> f64 {
    let span = hi - lo;
    if span.abs() < f64::EPSILON {
        0.5
    } else {
        (value - lo) / span
    }
}

/// Bounds plus vertical orientation of a zone's plane.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneGeometry {
    pub bounds: PlaneBounds,
    /// When true the v axis increases downwards on screen
    pub flip_v: bool,
}

/// In-plane and normal axes for a reference surface.
pub fn plane_axes(surface: RefSurface) -> (Axis, Axis, Axis) {
    match surface {
        RefSurface::Xy => (Axis::X, Axis::Y, Axis::Z),
        RefSurface::Xz => (Axis::X, Axis::Z, Axis::Y),
        RefSurface::Yz => (Axis::Y, Axis::Z, Axis::X),
    }
}

/// Decide whether the v axis is drawn inverted.
///
/// `v_positive_direction` is authoritative when present. Older zones only
/// carry the normal `direction`: xy and yz planes flip when it is negative,
/// xz planes when it is positive, and a zero or missing direction never
/// flips.
pub fn resolve_flip_v(zone: &ZoneRecord) -> bool {
    if let Some(v_positive) = zone.v_positive_direction {
        return !v_positive;
    }
    let direction = zone.direction.unwrap_or(0);
    match zone.ref_surface {
        RefSurface::Xy | RefSurface::Yz => direction < 0,
        RefSurface::Xz => direction > 0,
    }
}

/// Resolve a zone's plane bounds against its room.
pub fn resolve(zone: &ZoneRecord, room: &RoomRecord) -> PlaneGeometry {
    let (u_axis, v_axis, fixed_axis) = plane_axes(zone.ref_surface);
    let (u1, u2) = ordered(zone.x1, zone.x2, room.dimension(u_axis));
    let (v1, v2) = ordered(zone.y1, zone.y2, room.dimension(v_axis));

    let bounds = PlaneBounds {
        u1,
        u2,
        v1,
        v2,
        fixed: zone.height.filter(|h| h.is_finite()).unwrap_or(0.0),
        u_axis,
        v_axis,
        fixed_axis,
        units: room.units,
    };
    let flip_v = resolve_flip_v(zone);

    tracing::debug!(
        zone = %zone.id,
        surface = zone.ref_surface.as_str(),
        flip_v,
        "resolved plane geometry"
    );

    PlaneGeometry { bounds, flip_v }
}

fn ordered(a: Option<f64>, b: Option<f64>, dimension: f64) -> (f64, f64) {
    let a = a.filter(|v| v.is_finite()).unwrap_or(0.0);
    let b = b.filter(|v| v.is_finite()).unwrap_or(dimension);
    (a.min(b), a.max(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(surface: RefSurface, direction: Option<i32>, v_positive: Option<bool>) -> ZoneRecord {
        ZoneRecord {
            direction,
            v_positive_direction: v_positive,
            ..ZoneRecord::new("z", surface)
        }
    }

    #[test]
    fn test_authoritative_flag_wins() {
        assert!(!resolve_flip_v(&zone(RefSurface::Xz, Some(1), Some(true))));
        assert!(resolve_flip_v(&zone(RefSurface::Xy, Some(1), Some(false))));
    }

    #[test]
    fn test_fallback_truth_table() {
        assert!(resolve_flip_v(&zone(RefSurface::Xy, Some(-1), None)));
        assert!(!resolve_flip_v(&zone(RefSurface::Xy, Some(1), None)));
        assert!(resolve_flip_v(&zone(RefSurface::Yz, Some(-1), None)));
        assert!(!resolve_flip_v(&zone(RefSurface::Yz, Some(1), None)));
        assert!(resolve_flip_v(&zone(RefSurface::Xz, Some(1), None)));
        assert!(!resolve_flip_v(&zone(RefSurface::Xz, Some(-1), None)));
        for surface in [RefSurface::Xy, RefSurface::Xz, RefSurface::Yz] {
            assert!(!resolve_flip_v(&zone(surface, Some(0), None)));
            assert!(!resolve_flip_v(&zone(surface, None, None)));
        }
    }

    #[test]
    fn test_bounds_default_to_room() {
        let room = RoomRecord::default();
        let geometry = resolve(&ZoneRecord::new("wall", RefSurface::Yz), &room);
        let b = &geometry.bounds;
        assert_eq!((b.u1, b.u2, b.v1, b.v2), (0.0, room.y, 0.0, room.z));
        assert_eq!(b.fixed, 0.0);
        assert_eq!(b.u_label(), "Y (m)");
        assert_eq!(b.v_label(), "Z (m)");
        assert_eq!(b.fixed_label(), "X (m)");
    }

    #[test]
    fn test_explicit_bounds_are_ordered() {
        let zone = ZoneRecord {
            x1: Some(3.0),
            x2: Some(1.0),
            y1: Some(0.5),
            height: Some(1.2),
            ..ZoneRecord::new("z", RefSurface::Xy)
        };
        let geometry = resolve(&zone, &RoomRecord::default());
        let b = &geometry.bounds;
        assert_eq!((b.u1, b.u2), (1.0, 3.0));
        assert_eq!((b.v1, b.v2), (0.5, 6.0));
        assert_eq!(b.fixed, 1.2);
    }

    #[test]
    fn test_project_world_xz() {
        let geometry = resolve(&ZoneRecord::new("z", RefSurface::Xz), &RoomRecord::default());
        assert_eq!(geometry.bounds.project_world(1.0, 2.0, 3.0), (1.0, 3.0));
    }
}
