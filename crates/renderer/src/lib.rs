//! Rendering for calculation-zone plots.
//!
//! Turns a zone's value grid plus room geometry into:
//! - a live heatmap with an overlay of axes, legend and safety scale
//! - collision-resolved lamp labels
//! - a high-resolution PNG export of the same composition

pub mod colormap;
pub mod config;
pub mod export;
pub mod fonts;
pub mod geometry;
pub mod glyphs;
pub mod labels;
pub mod layout;
pub mod live;
pub mod png;
pub mod raster;
pub mod render;
pub mod stats;
pub mod surface;
pub mod ticks;
pub mod tlv;

pub use colormap::{build_lut, lut_for, ColorLut, DEFAULT_COLORMAP};
pub use config::{DisplayConfig, DisplayMode};
pub use export::{export_filename, ArtifactSink, DirectorySink, ExportController, ExportReceipt, ExportState, MemorySink};
pub use geometry::{PlaneBounds, PlaneGeometry};
pub use labels::{LabelPlacement, LampProjection};
pub use live::{LiveFrame, LiveView, NumericOverlay};
pub use render::{DerivedState, PlotInputs};
pub use stats::ValueStats;
pub use surface::{DisplayList, DrawCommand, Surface};
pub use tlv::TlvScale;
