//! Plot composition.
//!
//! [`DerivedState`] is recomputed from [`PlotInputs`] on every change; the
//! `draw_*` functions compose the figure against any [`Surface`] in logical
//! units. The live view and the export share this code and differ only in
//! the surface they draw onto.

use crate::colormap::{self, ColorLut};
use crate::config::DisplayConfig;
use crate::geometry::{self, PlaneGeometry};
use crate::labels::{self, LabelPlacement, LABEL_FONT_SIZE};
use crate::layout::*;
use crate::stats::ValueStats;
use crate::surface::{HAlign, Point, Rect, Stroke, Surface, TextStyle, VAlign};
use crate::ticks::{format_tick, generate_ticks, DEFAULT_TICK_COUNT};
use crate::tlv::TlvScale;
use image::Rgba;
use std::sync::Arc;
use zone_common::{LampRecord, RoomRecord, TlvTable, ValueGrid, ValueUnits, ZoneRecord};

pub const BACKGROUND_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const AXIS_COLOR: Rgba<u8> = Rgba([55, 65, 81, 255]);
pub const TEXT_COLOR: Rgba<u8> = Rgba([31, 41, 55, 255]);
/// Marker colour for 222 nm lamps
pub const LAMP_COLOR: Rgba<u8> = Rgba([0x8B, 0x5C, 0xF6, 255]);
pub const NO_DATA_COLOR: Rgba<u8> = Rgba([209, 213, 219, 255]);
pub const PASS_COLOR: Rgba<u8> = Rgba([22, 163, 74, 255]);
pub const FAIL_COLOR: Rgba<u8> = Rgba([220, 38, 38, 255]);
pub const TLV_BAND_COLOR: Rgba<u8> = Rgba([245, 158, 11, 255]);
pub const TLV_TRACK_COLOR: Rgba<u8> = Rgba([229, 231, 235, 255]);
const LABEL_BOX_COLOR: Rgba<u8> = Rgba([255, 255, 255, 230]);

/// Colour strips in the legend bar.
pub const LEGEND_STEPS: usize = 64;
pub const LAMP_MARKER_RADIUS: f32 = 4.0;
pub const LEADER_DASH: [f32; 2] = [3.0, 2.0];
const LABEL_CORNER_RADIUS: f32 = 3.0;

/// Everything a plot is a function of.
#[derive(Debug, Clone, Copy)]
pub struct PlotInputs<'a> {
    pub grid: &'a ValueGrid,
    pub zone: &'a ZoneRecord,
    pub room: &'a RoomRecord,
    pub lamps: &'a [LampRecord],
    pub tlv_table: &'a TlvTable,
    pub display: &'a DisplayConfig,
}

/// Structures derived from [`PlotInputs`]. Only the LUT is cached across
/// recomputations.
#[derive(Debug, Clone)]
pub struct DerivedState {
    pub title: String,
    pub geometry: PlaneGeometry,
    pub stats: ValueStats,
    pub lut: Arc<ColorLut>,
    pub colormap: String,
    pub layout: PlotLayout,
    pub u_ticks: Vec<f64>,
    pub v_ticks: Vec<f64>,
    pub tlv: Option<TlvScale>,
    pub labels: Vec<LabelPlacement>,
    pub units: ValueUnits,
    pub precision: u8,
}

impl DerivedState {
    pub fn compute(inputs: &PlotInputs<'_>) -> Self {
        let display = inputs.display;
        let geometry = geometry::resolve(inputs.zone, inputs.room);
        let stats = ValueStats::compute(inputs.grid);

        let colormap = display
            .colormap
            .clone()
            .or_else(|| inputs.room.colormap.clone())
            .unwrap_or_else(|| colormap::DEFAULT_COLORMAP.to_string());
        let lut = colormap::lut_for(&colormap);

        let standard = display.standard.unwrap_or(inputs.room.standard);
        let tlv = if display.show_tlv_scale {
            inputs
                .tlv_table
                .limit_for_zone(&inputs.zone.id, standard)
                .and_then(|limit| TlvScale::compute(stats.display_max, limit))
        } else {
            None
        };

        let layout = PlotLayout::new(display.width, display.height, tlv.is_some());

        let labels = if display.show_lamp_labels {
            labels::place_labels(
                inputs.lamps,
                &geometry,
                layout.plot.width as f64,
                layout.plot.height as f64,
            )
        } else {
            Vec::new()
        };

        let b = &geometry.bounds;
        let u_ticks = generate_ticks(b.u1, b.u2, DEFAULT_TICK_COUNT);
        let v_ticks = generate_ticks(b.v1, b.v2, DEFAULT_TICK_COUNT);

        tracing::debug!(
            zone = %inputs.zone.id,
            colormap = %colormap,
            n_u = inputs.grid.n_u(),
            n_v = inputs.grid.n_v(),
            labels = labels.len(),
            tlv = tlv.is_some(),
            "derived plot state"
        );

        Self {
            title: inputs.zone.display_name().to_string(),
            geometry,
            stats,
            lut,
            colormap,
            layout,
            u_ticks,
            v_ticks,
            tlv,
            labels,
            units: inputs.zone.value_units(),
            precision: display.precision.unwrap_or(inputs.room.precision),
        }
    }

    /// Colour for a raw cell value.
    pub fn cell_color(&self, value: f64) -> Rgba<u8> {
        if !value.is_finite() {
            return NO_DATA_COLOR;
        }
        Rgba(self.lut.sample(self.stats.normalize(value)))
    }

    /// Screen row of grid column `j`: v increases upwards unless flipped.
    pub fn row_for(&self, j: usize, n_v: usize) -> usize {
        if self.geometry.flip_v {
            j
        } else {
            n_v - 1 - j
        }
    }

    /// Logical x of a world u coordinate.
    pub fn u_to_x(&self, u: f64) -> f32 {
        let plot = &self.layout.plot;
        plot.x + (self.geometry.bounds.fraction_u(u) as f32) * plot.width
    }

    /// Logical y of a world v coordinate.
    pub fn v_to_y(&self, v: f64) -> f32 {
        let plot = &self.layout.plot;
        let mut frac = self.geometry.bounds.fraction_v(v);
        if self.geometry.flip_v {
            frac = 1.0 - frac;
        }
        plot.y + ((1.0 - frac) as f32) * plot.height
    }
}

/// Cell `(i, j)` in logical units.
pub fn cell_rect(plot: &Rect, i: usize, row: usize, n_u: usize, n_v: usize) -> Rect {
    let cell_w = plot.width / n_u as f32;
    let cell_h = plot.height / n_v as f32;
    Rect::new(
        plot.x + i as f32 * cell_w,
        plot.y + row as f32 * cell_h,
        cell_w,
        cell_h,
    )
}

pub fn draw_heatmap_cells<S: Surface + ?Sized>(surface: &mut S, state: &DerivedState, grid: &ValueGrid) {
    let (n_u, n_v) = (grid.n_u(), grid.n_v());
    for i in 0..n_u {
        for j in 0..n_v {
            let rect = cell_rect(&state.layout.plot, i, state.row_for(j, n_v), n_u, n_v);
            surface.fill_rect(rect, state.cell_color(grid.get(i, j)));
        }
    }
}

pub fn draw_title<S: Surface + ?Sized>(surface: &mut S, state: &DerivedState) {
    let (x, y) = state.layout.title_anchor();
    let style = TextStyle::new(TITLE_FONT_SIZE, TEXT_COLOR).aligned(HAlign::Center, VAlign::Middle);
    surface.text(Point::new(x, y), &state.title, &style);
}

pub fn draw_axes<S: Surface + ?Sized>(surface: &mut S, state: &DerivedState) {
    let plot = state.layout.plot;
    let axis = Stroke::solid(AXIS_COLOR, AXIS_STROKE_WIDTH);
    surface.stroke_rect(plot, &axis);

    let tick_style = TextStyle::new(TICK_FONT_SIZE, TEXT_COLOR);

    for &u in &state.u_ticks {
        let x = state.u_to_x(u);
        surface.line(
            Point::new(x, plot.bottom()),
            Point::new(x, plot.bottom() + TICK_LENGTH),
            &axis,
        );
        surface.text(
            Point::new(x, plot.bottom() + TICK_LENGTH + 2.0),
            &format_tick(u),
            &tick_style.aligned(HAlign::Center, VAlign::Top),
        );
    }

    for &v in &state.v_ticks {
        let y = state.v_to_y(v);
        surface.line(
            Point::new(plot.x - TICK_LENGTH, y),
            Point::new(plot.x, y),
            &axis,
        );
        surface.text(
            Point::new(plot.x - TICK_LENGTH - 2.0, y),
            &format_tick(v),
            &tick_style.aligned(HAlign::Right, VAlign::Middle),
        );
    }

    let title_style = TextStyle::new(AXIS_FONT_SIZE, TEXT_COLOR);
    let bounds = &state.geometry.bounds;
    surface.text(
        Point::new(plot.center_x(), plot.bottom() + TICK_LENGTH + TICK_FONT_SIZE + 10.0),
        &bounds.u_label(),
        &title_style.aligned(HAlign::Center, VAlign::Top),
    );
    surface.text(
        Point::new(4.0, plot.y - 6.0),
        &bounds.v_label(),
        &title_style.aligned(HAlign::Left, VAlign::Bottom),
    );
}

pub fn draw_legend<S: Surface + ?Sized>(surface: &mut S, state: &DerivedState) {
    let legend = state.layout.legend;
    let step_h = legend.height / LEGEND_STEPS as f32;
    for k in 0..LEGEND_STEPS {
        let t = (k as f64 + 0.5) / LEGEND_STEPS as f64;
        let rect = Rect::new(legend.x, legend.bottom() - (k + 1) as f32 * step_h, legend.width, step_h);
        surface.fill_rect(rect, Rgba(state.lut.sample(t)));
    }
    surface.stroke_rect(legend, &Stroke::solid(AXIS_COLOR, AXIS_STROKE_WIDTH));

    let style = TextStyle::new(TICK_FONT_SIZE, TEXT_COLOR).aligned(HAlign::Left, VAlign::Middle);
    let x = legend.right() + 4.0;
    let stats = &state.stats;
    surface.text(Point::new(x, legend.y), &format_tick(stats.display_max), &style);
    surface.text(Point::new(x, legend.center_y()), &format_tick(stats.display_mid()), &style);
    surface.text(Point::new(x, legend.bottom()), &format_tick(stats.display_min), &style);

    surface.text(
        Point::new(legend.center_x(), legend.bottom() + TICK_LENGTH + 2.0),
        state.units.label(),
        &TextStyle::new(TICK_FONT_SIZE, TEXT_COLOR).aligned(HAlign::Center, VAlign::Top),
    );
}

pub fn draw_tlv_scale<S: Surface + ?Sized>(surface: &mut S, state: &DerivedState) {
    let (Some(scale), Some(bar)) = (state.tlv, state.layout.tlv) else {
        return;
    };
    let percent_y = |p: f64| bar.bottom() - (p / 100.0) as f32 * bar.height;

    surface.fill_rect(bar, TLV_TRACK_COLOR);

    let band_top = percent_y(scale.band_high);
    let band_bottom = percent_y(scale.band_low);
    surface.fill_rect(
        Rect::new(bar.x, band_top, bar.width, band_bottom - band_top),
        TLV_BAND_COLOR,
    );

    let status_color = if scale.is_compliant { PASS_COLOR } else { FAIL_COLOR };
    let level = percent_y(scale.max_percent);
    surface.line(
        Point::new(bar.x - 3.0, level),
        Point::new(bar.right() + 3.0, level),
        &Stroke::solid(status_color, 2.0),
    );
    surface.stroke_rect(bar, &Stroke::solid(AXIS_COLOR, AXIS_STROKE_WIDTH));

    let style = TextStyle::new(TICK_FONT_SIZE, TEXT_COLOR).aligned(HAlign::Left, VAlign::Middle);
    surface.text(Point::new(bar.right() + 4.0, bar.y), "100%", &style);
    surface.text(Point::new(bar.right() + 4.0, bar.bottom()), "0%", &style);

    surface.text(
        Point::new(bar.center_x(), bar.y - 4.0),
        scale.status_label(),
        &TextStyle::new(TICK_FONT_SIZE, status_color).aligned(HAlign::Center, VAlign::Bottom),
    );
    surface.text(
        Point::new(bar.center_x(), bar.bottom() + TICK_LENGTH + 2.0),
        "TLV",
        &TextStyle::new(TICK_FONT_SIZE, TEXT_COLOR).aligned(HAlign::Center, VAlign::Top),
    );
    if let Some(dimming) = scale.dimming_label() {
        surface.text(
            Point::new(bar.center_x(), bar.bottom() + TICK_LENGTH + TICK_FONT_SIZE + 4.0),
            &dimming,
            &TextStyle::new(TICK_FONT_SIZE, FAIL_COLOR).aligned(HAlign::Center, VAlign::Top),
        );
    }
}

pub fn draw_lamp_labels<S: Surface + ?Sized>(surface: &mut S, state: &DerivedState) {
    let plot = state.layout.plot;
    let to_canvas = |x: f64, y: f64| Point::new(plot.x + x as f32, plot.y + y as f32);
    let leader = Stroke::dashed(LAMP_COLOR, 1.0, LEADER_DASH);

    for label in &state.labels {
        let marker = to_canvas(label.lamp.pixel_x, label.lamp.pixel_y);
        if label.needs_leader {
            let (ax, ay) = label.leader_anchor();
            surface.line(marker, to_canvas(ax, ay), &leader);
        }
        surface.fill_circle(marker, LAMP_MARKER_RADIUS, LAMP_COLOR);
        surface.stroke_circle(marker, LAMP_MARKER_RADIUS, &Stroke::solid(BACKGROUND_COLOR, 1.0));
    }

    let text_style =
        TextStyle::new(LABEL_FONT_SIZE as f32, TEXT_COLOR).aligned(HAlign::Center, VAlign::Middle);
    for label in &state.labels {
        let origin = to_canvas(label.x, label.y);
        let rect = Rect::new(origin.x, origin.y, label.width as f32, label.height as f32);
        surface.fill_rounded_rect(rect, LABEL_CORNER_RADIUS, LABEL_BOX_COLOR);
        surface.stroke_rounded_rect(rect, LABEL_CORNER_RADIUS, &Stroke::solid(LAMP_COLOR, 1.0));
        surface.text(
            Point::new(rect.center_x(), rect.center_y()),
            &label.lamp.name,
            &text_style,
        );
    }
}

/// Everything except the heatmap cells.
pub fn draw_overlay<S: Surface + ?Sized>(surface: &mut S, state: &DerivedState) {
    draw_title(surface, state);
    draw_axes(surface, state);
    draw_legend(surface, state);
    draw_tlv_scale(surface, state);
    draw_lamp_labels(surface, state);
}

/// The full figure on a white background.
pub fn draw_composite<S: Surface + ?Sized>(surface: &mut S, state: &DerivedState, grid: &ValueGrid) {
    let layout = &state.layout;
    surface.fill_rect(Rect::new(0.0, 0.0, layout.width, layout.height), BACKGROUND_COLOR);
    draw_heatmap_cells(surface, state, grid);
    draw_overlay(surface, state);
}
