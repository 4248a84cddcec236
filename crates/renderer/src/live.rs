//! Live view rendering.
//!
//! The heatmap is produced at the grid's native resolution (one pixel per
//! cell, scaled by the host with nearest-neighbour filtering) and everything
//! else is recorded as a display list in logical units.

use crate::config::DisplayMode;
use crate::layout::PlotLayout;
use crate::render::{self, cell_rect, DerivedState, PlotInputs, TEXT_COLOR};
use crate::surface::{
    estimate_text_width, DisplayList, HAlign, Point, Rect, Stroke, Surface, TextStyle, VAlign,
    CHAR_WIDTH_FACTOR,
};
use crate::ticks::format_value;
use image::{Rgba, RgbaImage};
use zone_common::{PlotResult, ValueGrid};

/// Grids with more points than this along either axis show a notice instead
/// of per-cell values.
pub const DENSE_THRESHOLD: usize = 25;
pub const DENSE_NOTICE: &str = "Grid too dense for numeric display";

const MIN_CELL_FONT: f32 = 6.0;
const MAX_CELL_FONT: f32 = 14.0;
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Text drawn over one heatmap cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellLabel {
    pub i: usize,
    pub j: usize,
    pub text: String,
    pub center: Point,
    pub font_size: f32,
    pub color: Rgba<u8>,
}

/// What the numeric display mode contributed to the overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericOverlay {
    /// Heatmap mode
    Off,
    Values(Vec<CellLabel>),
    TooDense,
}

/// One live-view frame.
#[derive(Debug, Clone)]
pub struct LiveFrame {
    /// `n_u` × `n_v` pixels, row 0 at the top of the plot
    pub heatmap: RgbaImage,
    /// Axes, legend, safety scale, labels and cell text in logical units
    pub overlay: DisplayList,
    pub numeric: NumericOverlay,
    pub layout: PlotLayout,
}

/// Render the grid with one pixel per cell.
pub fn render_native_grid(grid: &ValueGrid, state: &DerivedState) -> RgbaImage {
    let (n_u, n_v) = (grid.n_u(), grid.n_v());
    let mut img = RgbaImage::new(n_u as u32, n_v as u32);
    for i in 0..n_u {
        for j in 0..n_v {
            let row = state.row_for(j, n_v);
            img.put_pixel(i as u32, row as u32, state.cell_color(grid.get(i, j)));
        }
    }
    img
}

/// Black on light cells, white on dark ones.
pub fn contrast_text_color(background: Rgba<u8>) -> Rgba<u8> {
    let [r, g, b, _] = background.0;
    let luminance = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
    if luminance > 128.0 {
        BLACK
    } else {
        WHITE
    }
}

/// Font size that fits `chars` characters inside a cell.
fn fit_font_size(cell: &Rect, chars: usize) -> f32 {
    let by_width = cell.width * 0.9 / (chars.max(1) as f32 * CHAR_WIDTH_FACTOR);
    let by_height = cell.height * 0.6;
    by_width.min(by_height).clamp(MIN_CELL_FONT, MAX_CELL_FONT)
}

/// Per-cell value labels, or `None` when the grid is too dense.
pub fn cell_labels(grid: &ValueGrid, state: &DerivedState) -> Option<Vec<CellLabel>> {
    let (n_u, n_v) = (grid.n_u(), grid.n_v());
    if n_u > DENSE_THRESHOLD || n_v > DENSE_THRESHOLD {
        return None;
    }

    let factor = grid.unit_factor();
    let texts: Vec<Vec<String>> = grid
        .rows()
        .iter()
        .map(|row| row.iter().map(|v| format_value(v * factor, state.precision)).collect())
        .collect();
    let longest = texts.iter().flatten().map(|t| t.chars().count()).max().unwrap_or(1);

    let plot = state.layout.plot;
    let font_size = fit_font_size(&cell_rect(&plot, 0, 0, n_u, n_v), longest);

    let mut labels = Vec::with_capacity(n_u * n_v);
    for (i, row_texts) in texts.into_iter().enumerate() {
        for (j, text) in row_texts.into_iter().enumerate() {
            let cell = cell_rect(&plot, i, state.row_for(j, n_v), n_u, n_v);
            labels.push(CellLabel {
                i,
                j,
                text,
                center: Point::new(cell.center_x(), cell.center_y()),
                font_size,
                color: contrast_text_color(state.cell_color(grid.get(i, j))),
            });
        }
    }
    Some(labels)
}

fn draw_dense_notice<S: Surface + ?Sized>(surface: &mut S, plot: &Rect) {
    let size = 11.0;
    let width = estimate_text_width(DENSE_NOTICE, size) + 16.0;
    let height = size + 10.0;
    let rect = Rect::new(
        plot.center_x() - width / 2.0,
        plot.center_y() - height / 2.0,
        width,
        height,
    );
    surface.fill_rounded_rect(rect, 4.0, Rgba([255, 255, 255, 220]));
    surface.stroke_rounded_rect(rect, 4.0, &Stroke::solid(TEXT_COLOR, 1.0));
    surface.text(
        Point::new(plot.center_x(), plot.center_y()),
        DENSE_NOTICE,
        &TextStyle::new(size, TEXT_COLOR).aligned(HAlign::Center, VAlign::Middle),
    );
}

/// Produces live frames from plot inputs.
#[derive(Debug, Default)]
pub struct LiveView;

impl LiveView {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, inputs: &PlotInputs<'_>) -> PlotResult<LiveFrame> {
        let state = DerivedState::compute(inputs);
        Ok(self.render_state(inputs.grid, &state, inputs.display.mode))
    }

    /// Render from already derived state.
    pub fn render_state(&self, grid: &ValueGrid, state: &DerivedState, mode: DisplayMode) -> LiveFrame {
        let heatmap = render_native_grid(grid, state);
        let layout = state.layout;
        let mut overlay = DisplayList::new(layout.width, layout.height);

        let numeric = match mode {
            DisplayMode::Heatmap => NumericOverlay::Off,
            DisplayMode::Numeric => match cell_labels(grid, state) {
                Some(labels) => {
                    for label in &labels {
                        let style = TextStyle::new(label.font_size, label.color)
                            .aligned(HAlign::Center, VAlign::Middle);
                        overlay.text(label.center, &label.text, &style);
                    }
                    NumericOverlay::Values(labels)
                }
                None => {
                    draw_dense_notice(&mut overlay, &layout.plot);
                    NumericOverlay::TooDense
                }
            },
        };

        render::draw_overlay(&mut overlay, state);

        tracing::debug!(
            n_u = grid.n_u(),
            n_v = grid.n_v(),
            commands = overlay.len(),
            "rendered live frame"
        );

        LiveFrame {
            heatmap,
            overlay,
            numeric,
            layout,
        }
    }
}
