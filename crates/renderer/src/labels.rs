//! Lamp label placement.
//!
//! Lamps are projected onto the plot, each gets a name box above its marker,
//! and overlapping boxes are pushed apart with a bounded number of nudge
//! passes. Coordinates are logical pixels relative to the plot area's
//! top-left corner.

use crate::geometry::PlaneGeometry;
use zone_common::LampRecord;

/// Font size of label text.
pub const LABEL_FONT_SIZE: f64 = 10.0;
/// Fixed advance per character used for label widths.
pub const CHAR_WIDTH: f64 = 6.0;
/// Horizontal padding on each side of the label text.
pub const LABEL_PADDING: f64 = 4.0;
pub const LABEL_HEIGHT: f64 = 16.0;
/// Gap between the marker and the bottom of its label.
pub const MARKER_OFFSET: f64 = 10.0;
/// Distance each box of an overlapping pair moves per pass.
pub const NUDGE: f64 = 8.0;
pub const MAX_PASSES: usize = 10;
/// Minimum distance between a label and the plot edge.
pub const EDGE_MARGIN: f64 = 2.0;
/// Lamps projected further than this outside the plot are dropped.
pub const PROJECTION_MARGIN: f64 = 10.0;

/// A lamp projected into plot pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct LampProjection {
    pub name: String,
    pub world_u: f64,
    pub world_v: f64,
    pub pixel_x: f64,
    pub pixel_y: f64,
}

/// Final box for one lamp label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacement {
    pub lamp: LampProjection,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Set when the box no longer sits directly above its marker
    pub needs_leader: bool,
}

impl LabelPlacement {
    pub fn overlaps(&self, other: &LabelPlacement) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    /// Point on the box edge a leader line attaches to.
    pub fn leader_anchor(&self) -> (f64, f64) {
        let cx = self.x + self.width / 2.0;
        if self.lamp.pixel_y < self.y {
            (cx, self.y)
        } else {
            (cx, self.y + self.height)
        }
    }
}

/// Estimated label width for `text`.
pub fn label_width(text: &str) -> f64 {
    text.chars().count() as f64 * CHAR_WIDTH + 2.0 * LABEL_PADDING
}

/// Project enabled lamps onto a `width` × `height` plot.
pub fn project_lamps(
    lamps: &[LampRecord],
    geometry: &PlaneGeometry,
    width: f64,
    height: f64,
) -> Vec<LampProjection> {
    let bounds = &geometry.bounds;
    lamps
        .iter()
        .filter(|lamp| lamp.enabled)
        .filter_map(|lamp| {
            let (u, v) = bounds.project_world(lamp.x, lamp.y, lamp.z);
            let frac_u = bounds.fraction_u(u);
            let mut frac_v = bounds.fraction_v(v);
            if geometry.flip_v {
                frac_v = 1.0 - frac_v;
            }
            let pixel_x = frac_u * width;
            let pixel_y = (1.0 - frac_v) * height;

            let inside = (-PROJECTION_MARGIN..=width + PROJECTION_MARGIN).contains(&pixel_x)
                && (-PROJECTION_MARGIN..=height + PROJECTION_MARGIN).contains(&pixel_y);
            if !inside {
                tracing::debug!(lamp = %lamp.id, pixel_x, pixel_y, "lamp outside plot");
                return None;
            }

            Some(LampProjection {
                name: lamp.display_name().to_string(),
                world_u: u,
                world_v: v,
                pixel_x,
                pixel_y,
            })
        })
        .collect()
}

/// Box centred above the marker.
fn initial_placement(lamp: LampProjection) -> LabelPlacement {
    let width = label_width(&lamp.name);
    LabelPlacement {
        x: lamp.pixel_x - width / 2.0,
        y: lamp.pixel_y - MARKER_OFFSET - LABEL_HEIGHT,
        width,
        height: LABEL_HEIGHT,
        needs_leader: false,
        lamp,
    }
}

/// One nudge pass over every overlapping pair. Returns whether anything moved.
///
/// Of each overlapping pair the higher box moves up and the other down; on a
/// tie the earlier box moves up.
fn nudge_overlaps(labels: &mut [LabelPlacement]) -> bool {
    let mut moved = false;
    for i in 0..labels.len() {
        for j in (i + 1)..labels.len() {
            if !labels[i].overlaps(&labels[j]) {
                continue;
            }
            moved = true;
            let (upper, lower) = if labels[j].y < labels[i].y { (j, i) } else { (i, j) };
            labels[upper].y -= NUDGE;
            labels[lower].y += NUDGE;
            labels[upper].needs_leader = true;
            labels[lower].needs_leader = true;
        }
    }
    moved
}

/// Push overlapping boxes apart, keeping them inside the plot. Returns the
/// number of passes run.
///
/// The clamp runs before the first pass and after every pass, so boxes pulled
/// in from an edge are separated again. Stops after a pass with no overlap or
/// after [`MAX_PASSES`], so some overlap may remain.
pub fn resolve_within_plot(labels: &mut [LabelPlacement], width: f64, height: f64) -> usize {
    clamp_to_plot(labels, width, height);
    for pass in 0..MAX_PASSES {
        if !nudge_overlaps(labels) {
            return pass;
        }
        clamp_to_plot(labels, width, height);
    }
    MAX_PASSES
}

/// Keep boxes inside the plot less [`EDGE_MARGIN`].
pub fn clamp_to_plot(labels: &mut [LabelPlacement], width: f64, height: f64) {
    for label in labels.iter_mut() {
        let max_x = (width - label.width - EDGE_MARGIN).max(EDGE_MARGIN);
        let max_y = (height - label.height - EDGE_MARGIN).max(EDGE_MARGIN);
        let x = label.x.clamp(EDGE_MARGIN, max_x);
        let y = label.y.clamp(EDGE_MARGIN, max_y);
        if x != label.x || y != label.y {
            label.x = x;
            label.y = y;
            label.needs_leader = true;
        }
    }
}

/// Full placement: project, place, then resolve collisions inside the plot.
pub fn place_labels(
    lamps: &[LampRecord],
    geometry: &PlaneGeometry,
    width: f64,
    height: f64,
) -> Vec<LabelPlacement> {
    let mut labels: Vec<LabelPlacement> = project_lamps(lamps, geometry, width, height)
        .into_iter()
        .map(initial_placement)
        .collect();

    let passes = resolve_within_plot(&mut labels, width, height);

    tracing::debug!(labels = labels.len(), passes, "placed lamp labels");
    labels
}
