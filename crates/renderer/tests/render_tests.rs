//! Tests for plot composition and the live view.

use image::Rgba;
use test_utils::{create_gradient_grid, create_uniform_grid, fixtures, value_grid};
use zone_common::{LampRecord, RefSurface, RoomRecord, Standard, TlvLimits, TlvTable, ValueGrid, ZoneRecord};
use zone_renderer::live::{render_native_grid, DENSE_NOTICE, DENSE_THRESHOLD};
use zone_renderer::render::{self, DerivedState, PlotInputs};
use zone_renderer::surface::{DisplayList, DrawCommand, Rect, ScaledSurface};
use zone_renderer::{DisplayConfig, DisplayMode, LiveView, NumericOverlay};

// ============================================================================
// Helpers
// ============================================================================

struct Scene {
    grid: ValueGrid,
    zone: ZoneRecord,
    room: RoomRecord,
    lamps: Vec<LampRecord>,
    tlv: TlvTable,
    display: DisplayConfig,
}

impl Scene {
    fn new(values: Vec<Vec<f64>>) -> Self {
        Self {
            grid: value_grid(values),
            zone: fixtures::zones::working_plane(),
            room: fixtures::rooms::small_office(),
            lamps: fixtures::lamps::single_ceiling(),
            tlv: TlvTable::default(),
            display: DisplayConfig::default(),
        }
    }

    fn inputs(&self) -> PlotInputs<'_> {
        PlotInputs {
            grid: &self.grid,
            zone: &self.zone,
            room: &self.room,
            lamps: &self.lamps,
            tlv_table: &self.tlv,
            display: &self.display,
        }
    }

    fn state(&self) -> DerivedState {
        DerivedState::compute(&self.inputs())
    }
}

/// Heatmap cells as (rect, colour), in drawing order.
fn cells(scene: &Scene) -> Vec<(Rect, Rgba<u8>)> {
    let state = scene.state();
    let mut list = DisplayList::new(state.layout.width, state.layout.height);
    render::draw_heatmap_cells(&mut list, &state, &scene.grid);
    list.commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::FillRect { rect, color } => Some((*rect, *color)),
            _ => None,
        })
        .collect()
}

fn top_cell_color(scene: &Scene) -> Rgba<u8> {
    cells(scene)
        .into_iter()
        .min_by(|a, b| a.0.y.total_cmp(&b.0.y))
        .map(|(_, color)| color)
        .unwrap()
}

fn overlay_texts(scene: &Scene) -> Vec<String> {
    let frame = LiveView::new().render(&scene.inputs()).unwrap();
    frame.overlay.texts().map(str::to_string).collect()
}

// ============================================================================
// Heatmap orientation and colour scaling
// ============================================================================

#[test]
fn test_unflipped_puts_highest_v_on_top() {
    let scene = Scene::new(vec![vec![10.0, 20.0, 30.0]]);
    let state = scene.state();
    assert!(!state.geometry.flip_v);
    assert_eq!(top_cell_color(&scene), Rgba(state.lut.sample(1.0)));
}

#[test]
fn test_flipped_puts_lowest_v_on_top() {
    let mut scene = Scene::new(vec![vec![10.0, 20.0, 30.0]]);
    scene.zone.v_positive_direction = Some(false);
    let state = scene.state();
    assert!(state.geometry.flip_v);
    assert_eq!(top_cell_color(&scene), Rgba(state.lut.sample(0.0)));
}

#[test]
fn test_legacy_direction_flip() {
    let mut scene = Scene::new(vec![vec![10.0, 20.0, 30.0]]);
    scene.zone.v_positive_direction = None;
    scene.zone.direction = Some(-1);
    assert!(scene.state().geometry.flip_v);
    assert_eq!(top_cell_color(&scene), Rgba(scene.state().lut.sample(0.0)));
}

#[test]
fn test_native_grid_matches_cells() {
    let mut scene = Scene::new(vec![vec![10.0, 20.0, 30.0], vec![40.0, 50.0, 60.0]]);
    scene.zone.v_positive_direction = Some(true);
    let state = scene.state();
    let img = render_native_grid(&scene.grid, &state);
    assert_eq!(img.dimensions(), (2, 3));
    // Top-left pixel is u = 0, highest v
    assert_eq!(*img.get_pixel(0, 0), state.cell_color(30.0));
    assert_eq!(*img.get_pixel(1, 2), state.cell_color(40.0));
}

#[test]
fn test_uniform_grid_uses_lowest_color() {
    let scene = Scene::new(create_uniform_grid(4, 3, 7.5));
    let state = scene.state();
    let expected = Rgba(state.lut.color(0));
    let cells = cells(&scene);
    assert_eq!(cells.len(), 12);
    assert!(cells.iter().all(|(_, color)| *color == expected));
}

#[test]
fn test_cells_tile_the_plot() {
    let scene = Scene::new(create_gradient_grid(5, 4, 0.0, 1.0));
    let plot = scene.state().layout.plot;
    let area: f32 = cells(&scene).iter().map(|(r, _)| r.width * r.height).sum();
    assert!((area - plot.width * plot.height).abs() < 1.0);
}

#[test]
fn test_colormap_precedence() {
    let mut scene = Scene::new(create_uniform_grid(2, 2, 1.0));
    assert_eq!(scene.state().colormap, "plasma");
    scene.room.colormap = Some("viridis".into());
    assert_eq!(scene.state().colormap, "viridis");
    scene.display.colormap = Some("magma".into());
    assert_eq!(scene.state().colormap, "magma");
}

// ============================================================================
// Overlay
// ============================================================================

#[test]
fn test_overlay_has_axis_titles_and_units() {
    let scene = Scene::new(create_gradient_grid(4, 4, 0.0, 50.0));
    let texts = overlay_texts(&scene);
    for expected in ["Working Plane", "X (m)", "Y (m)", "µW/cm²", "50.0", "0", "Lamp 1"] {
        assert!(texts.iter().any(|t| t == expected), "missing {:?} in {:?}", expected, texts);
    }
}

#[test]
fn test_dose_zone_legend_unit() {
    let mut scene = Scene::new(create_gradient_grid(4, 4, 0.0, 5.0));
    scene.zone = fixtures::zones::eye_limits();
    scene.grid = ValueGrid::new(create_gradient_grid(4, 4, 0.0, 5.0), scene.zone.unit_factor()).unwrap();
    let texts = overlay_texts(&scene);
    assert!(texts.iter().any(|t| t == "mJ/cm²"));
    // 5 µW/cm² over 8 h is 144 mJ/cm²
    assert!(texts.iter().any(|t| t == "144"));
}

#[test]
fn test_lamp_labels_toggle() {
    let mut scene = Scene::new(create_uniform_grid(3, 3, 1.0));
    assert_eq!(scene.state().labels.len(), 1);
    scene.display.show_lamp_labels = false;
    assert!(scene.state().labels.is_empty());
    assert!(!overlay_texts(&scene).iter().any(|t| t == "Lamp 1"));
}

// ============================================================================
// TLV scale
// ============================================================================

#[test]
fn test_tlv_scale_for_safety_zone() {
    let mut scene = Scene::new(vec![vec![0.0, 125.0, 250.0]]);
    scene.zone = ZoneRecord::new("SkinLimits", RefSurface::Xy);
    scene.tlv.set(Standard::Acgih, TlvLimits { skin: 100.0, eye: 100.0 });
    let state = scene.state();
    let tlv = state.tlv.unwrap();
    assert_eq!(tlv.max_percent, 100.0);
    assert_eq!((tlv.band_low, tlv.band_high), (90.0, 100.0));
    assert!(tlv.exceeds_limit);
    assert!(state.layout.tlv.is_some());
    assert!(overlay_texts(&scene).iter().any(|t| t == "FAIL"));
}

#[test]
fn test_tlv_scale_shows_dimming_when_over_limit() {
    let mut scene = Scene::new(vec![vec![0.0, 125.0, 250.0]]);
    scene.zone = ZoneRecord::new("SkinLimits", RefSurface::Xy);
    scene.tlv.set(Standard::Acgih, TlvLimits { skin: 100.0, eye: 100.0 });
    assert!(overlay_texts(&scene).iter().any(|t| t == "dim 40%"));

    scene.grid = value_grid(vec![vec![0.0, 50.0]]);
    let texts = overlay_texts(&scene);
    assert!(texts.iter().any(|t| t == "PASS"));
    assert!(!texts.iter().any(|t| t.starts_with("dim ")));
}

#[test]
fn test_standard_override_changes_limit() {
    let mut scene = Scene::new(vec![vec![0.0, 100.0]]);
    scene.zone = ZoneRecord::new("EyeLimits", RefSurface::Xy);
    assert_eq!(scene.state().tlv.unwrap().limit, 161.0);
    scene.display.standard = Some(Standard::Icnirp);
    assert_eq!(scene.state().tlv.unwrap().limit, 23.0);
}

#[test]
fn test_tlv_scale_omitted() {
    let mut scene = Scene::new(vec![vec![0.0, 250.0]]);
    assert!(scene.state().tlv.is_none());
    assert!(scene.state().layout.tlv.is_none());

    scene.zone = ZoneRecord::new("SkinLimits", RefSurface::Xy);
    scene.display.show_tlv_scale = false;
    assert!(scene.state().tlv.is_none());
}

// ============================================================================
// Scale fidelity
// ============================================================================

#[test]
fn test_export_composition_is_exact_upscale() {
    let mut scene = Scene::new(create_gradient_grid(6, 5, 0.0, 300.0));
    scene.zone = fixtures::zones::skin_limits();
    scene.lamps = fixtures::lamps::row(3, 3.0, 0.1);
    let state = scene.state();

    let mut logical = DisplayList::new(state.layout.width, state.layout.height);
    render::draw_composite(&mut logical, &state, &scene.grid);

    let mut device = DisplayList::new(state.layout.width * 2.0, state.layout.height * 2.0);
    {
        let mut scaled = ScaledSurface::new(&mut device, 2.0);
        render::draw_composite(&mut scaled, &state, &scene.grid);
    }

    assert!(!logical.is_empty());
    assert_eq!(device, logical.scaled(2.0));
}

// ============================================================================
// Numeric mode
// ============================================================================

#[test]
fn test_dense_grid_shows_notice() {
    let mut scene = Scene::new(create_gradient_grid(30, 10, 0.0, 1.0));
    scene.display.mode = DisplayMode::Numeric;
    let frame = LiveView::new().render(&scene.inputs()).unwrap();
    assert_eq!(frame.numeric, NumericOverlay::TooDense);
    assert!(frame.overlay.texts().any(|t| t == DENSE_NOTICE));
}

#[test]
fn test_grid_at_threshold_shows_values() {
    let mut scene = Scene::new(create_gradient_grid(20, 20, 0.0, 1.0));
    scene.display.mode = DisplayMode::Numeric;
    let frame = LiveView::new().render(&scene.inputs()).unwrap();
    match &frame.numeric {
        NumericOverlay::Values(labels) => assert_eq!(labels.len(), 400),
        other => panic!("expected values, got {:?}", other),
    }
    assert!(!frame.overlay.texts().any(|t| t == DENSE_NOTICE));

    let mut scene = Scene::new(create_gradient_grid(DENSE_THRESHOLD, 1, 0.0, 1.0));
    scene.display.mode = DisplayMode::Numeric;
    let frame = LiveView::new().render(&scene.inputs()).unwrap();
    assert!(matches!(frame.numeric, NumericOverlay::Values(_)));
}

#[test]
fn test_numeric_text_uses_precision_and_contrast() {
    let mut scene = Scene::new(vec![vec![0.0, 100.0]]);
    scene.display.mode = DisplayMode::Numeric;
    scene.display.precision = Some(2);
    let frame = LiveView::new().render(&scene.inputs()).unwrap();
    let NumericOverlay::Values(labels) = frame.numeric else {
        panic!("expected values");
    };
    let low = labels.iter().find(|l| l.j == 0).unwrap();
    let high = labels.iter().find(|l| l.j == 1).unwrap();
    assert_eq!(low.text, "0.00");
    assert_eq!(high.text, "100.00");
    // plasma runs from dark blue to light yellow
    assert_eq!(low.color, Rgba([255, 255, 255, 255]));
    assert_eq!(high.color, Rgba([0, 0, 0, 255]));
}

#[test]
fn test_heatmap_mode_has_no_cell_text() {
    let scene = Scene::new(create_gradient_grid(3, 3, 0.0, 1.0));
    let frame = LiveView::new().render(&scene.inputs()).unwrap();
    assert_eq!(frame.numeric, NumericOverlay::Off);
    assert_eq!(frame.heatmap.dimensions(), (3, 3));
}
