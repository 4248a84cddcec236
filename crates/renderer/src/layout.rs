//! Plot layout in logical units.

use crate::surface::Rect;

pub const MARGIN_LEFT: f32 = 60.0;
pub const MARGIN_TOP: f32 = 24.0;
pub const MARGIN_BOTTOM: f32 = 48.0;
pub const MARGIN_RIGHT: f32 = 8.0;

pub const LEGEND_GAP: f32 = 14.0;
pub const LEGEND_WIDTH: f32 = 14.0;
/// Room for the legend's value labels
pub const LEGEND_LABEL_SPACE: f32 = 46.0;

pub const TLV_GAP: f32 = 18.0;
pub const TLV_WIDTH: f32 = 14.0;
pub const TLV_LABEL_SPACE: f32 = 40.0;

pub const TICK_FONT_SIZE: f32 = 10.0;
pub const AXIS_FONT_SIZE: f32 = 12.0;
pub const TITLE_FONT_SIZE: f32 = 13.0;
pub const TICK_LENGTH: f32 = 4.0;
pub const AXIS_STROKE_WIDTH: f32 = 1.0;

/// Smallest plot area kept when the canvas is tiny.
const MIN_PLOT_EXTENT: f32 = 16.0;

/// Where each part of the figure goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotLayout {
    pub width: f32,
    pub height: f32,
    /// Heatmap area
    pub plot: Rect,
    /// Colour legend bar
    pub legend: Rect,
    /// Safety scale bar, when shown
    pub tlv: Option<Rect>,
}

impl PlotLayout {
    pub fn new(width: f32, height: f32, show_tlv: bool) -> Self {
        let mut right = LEGEND_GAP + LEGEND_WIDTH + LEGEND_LABEL_SPACE + MARGIN_RIGHT;
        if show_tlv {
            right += TLV_GAP + TLV_WIDTH + TLV_LABEL_SPACE;
        }

        let plot = Rect::new(
            MARGIN_LEFT,
            MARGIN_TOP,
            (width - MARGIN_LEFT - right).max(MIN_PLOT_EXTENT),
            (height - MARGIN_TOP - MARGIN_BOTTOM).max(MIN_PLOT_EXTENT),
        );
        let legend = Rect::new(plot.right() + LEGEND_GAP, plot.y, LEGEND_WIDTH, plot.height);
        let tlv = show_tlv.then(|| {
            Rect::new(
                legend.right() + LEGEND_LABEL_SPACE + TLV_GAP,
                plot.y,
                TLV_WIDTH,
                plot.height,
            )
        });

        Self {
            width,
            height,
            plot,
            legend,
            tlv,
        }
    }

    /// Anchor for the figure title.
    pub fn title_anchor(&self) -> (f32, f32) {
        (self.plot.center_x(), MARGIN_TOP / 2.0)
    }
}
