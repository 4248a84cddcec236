//! Tests for the high-resolution export path.

use async_trait::async_trait;
use std::cell::RefCell;
use std::rc::Rc;
use test_utils::{create_lamp_field, fixtures, scratch_dir};
use zone_common::{LampRecord, PlotError, PlotResult, RoomRecord, TlvTable, ValueGrid, ZoneRecord};
use zone_renderer::{
    ArtifactSink, DirectorySink, DisplayConfig, ExportController, ExportState, MemorySink,
    PlotInputs,
};

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

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
    fn skin_dose() -> Self {
        let zone = fixtures::zones::skin_limits();
        let grid = ValueGrid::new(create_lamp_field(12, 18, 4.0, 1.0), zone.unit_factor()).unwrap();
        Self {
            grid,
            zone,
            room: fixtures::rooms::small_office(),
            lamps: fixtures::lamps::row(3, 3.0, 1.5),
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
}

fn png_dimensions(bytes: &[u8]) -> (u32, u32) {
    let width = u32::from_be_bytes(bytes[16..20].try_into().unwrap());
    let height = u32::from_be_bytes(bytes[20..24].try_into().unwrap());
    (width, height)
}

struct FailingSink;

#[async_trait]
impl ArtifactSink for FailingSink {
    async fn deliver(&self, _filename: &str, _bytes: Vec<u8>) -> PlotResult<()> {
        Err(PlotError::Sink("disk full".to_string()))
    }
}

/// Sink that refuses the artifact without attempting delivery.
struct RejectingSink;

#[async_trait]
impl ArtifactSink for RejectingSink {
    async fn deliver(&self, _filename: &str, _bytes: Vec<u8>) -> PlotResult<()> {
        Err(PlotError::Config("read-only session".to_string()))
    }
}

fn recording_controller() -> (ExportController, Rc<RefCell<Vec<ExportState>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let controller = ExportController::new(None).with_observer(move |s| sink.borrow_mut().push(s));
    (controller, seen)
}

// ============================================================================
// Successful exports
// ============================================================================

#[tokio::test]
async fn test_export_is_double_resolution() {
    let scene = Scene::skin_dose();
    let sink = MemorySink::new();
    let controller = ExportController::new(None);

    let receipt = controller.export(&scene.inputs(), &sink).await.unwrap();
    assert_eq!(receipt.filename, "Skin_Dose_8_Hours.png");
    assert_eq!((receipt.width, receipt.height), (1280, 960));

    let bytes = sink.get("Skin_Dose_8_Hours.png").unwrap();
    assert_eq!(bytes.len(), receipt.size_bytes);
    assert_eq!(&bytes[..8], &PNG_SIGNATURE);
    assert_eq!(png_dimensions(&bytes), (1280, 960));
    assert_eq!(controller.state(), ExportState::Idle);
}

#[tokio::test]
async fn test_export_decodes_to_white_background() {
    let scene = Scene::skin_dose();
    let sink = MemorySink::new();
    ExportController::new(None)
        .export(&scene.inputs(), &sink)
        .await
        .unwrap();

    let img = image::load_from_memory(&sink.get("Skin_Dose_8_Hours.png").unwrap())
        .unwrap()
        .to_rgba8();
    assert_eq!(img.dimensions(), (1280, 960));
    assert_eq!(img.get_pixel(1, 1).0, [255, 255, 255, 255]);
    // Upper part of the plot, clear of the lamp row, is heatmap
    assert_ne!(img.get_pixel(2 * 300, 2 * 100).0, [255, 255, 255, 255]);
}

#[tokio::test]
async fn test_export_scale_follows_config() {
    let mut scene = Scene::skin_dose();
    scene.display.export_scale = 1.0;
    let sink = MemorySink::new();

    let receipt = ExportController::new(None)
        .export(&scene.inputs(), &sink)
        .await
        .unwrap();
    assert_eq!((receipt.width, receipt.height), (640, 480));
}

#[tokio::test]
async fn test_directory_sink_writes_file() {
    let dir = scratch_dir();
    let scene = Scene::skin_dose();
    let sink = DirectorySink::new(dir.path().join("exports"));

    let receipt = ExportController::new(None)
        .export(&scene.inputs(), &sink)
        .await
        .unwrap();

    let path = sink.path_for(&receipt.filename);
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), receipt.size_bytes);
    assert_eq!(png_dimensions(&bytes), (1280, 960));
}

#[tokio::test]
async fn test_successful_transitions() {
    let scene = Scene::skin_dose();
    let (controller, seen) = recording_controller();

    controller.export(&scene.inputs(), &MemorySink::new()).await.unwrap();
    assert_eq!(
        *seen.borrow(),
        vec![ExportState::Rendering, ExportState::Encoding, ExportState::Idle]
    );
}

// ============================================================================
// Busy rejection and failure
// ============================================================================

#[tokio::test]
async fn test_concurrent_export_is_rejected() {
    let scene = Scene::skin_dose();
    let inputs = scene.inputs();
    let sink = MemorySink::new();
    let controller = ExportController::new(None);

    let (first, second) = tokio::join!(
        controller.export(&inputs, &sink),
        controller.export(&inputs, &sink)
    );

    let busy = [&first, &second]
        .iter()
        .filter(|r| matches!(r, Err(PlotError::ExportBusy)))
        .count();
    assert_eq!(busy, 1);
    assert!(first.is_ok() || second.is_ok());
    assert_eq!(sink.filenames(), vec!["Skin_Dose_8_Hours.png".to_string()]);
    assert_eq!(controller.state(), ExportState::Idle);
}

#[tokio::test]
async fn test_failed_delivery_reports_and_recovers() {
    let scene = Scene::skin_dose();
    let (controller, seen) = recording_controller();

    let err = controller.export(&scene.inputs(), &FailingSink).await.unwrap_err();
    assert!(matches!(err, PlotError::Sink(_)));
    assert_eq!(err.user_notice(), "Save Failed");
    assert_eq!(
        *seen.borrow(),
        vec![
            ExportState::Rendering,
            ExportState::Encoding,
            ExportState::Failed,
            ExportState::Idle
        ]
    );
    assert_eq!(controller.state(), ExportState::Idle);

    // A later export runs normally
    let sink = MemorySink::new();
    controller.export(&scene.inputs(), &sink).await.unwrap();
    assert_eq!(sink.filenames().len(), 1);
}

#[tokio::test]
async fn test_zero_size_surface_fails() {
    let mut scene = Scene::skin_dose();
    scene.display.export_scale = 0.0;
    let (controller, seen) = recording_controller();

    let err = controller.export(&scene.inputs(), &MemorySink::new()).await.unwrap_err();
    assert!(matches!(err, PlotError::Surface(_)));
    assert_eq!(err.user_notice(), "Save Failed");
    assert_eq!(
        *seen.borrow(),
        vec![ExportState::Rendering, ExportState::Failed, ExportState::Idle]
    );
}

#[tokio::test]
async fn test_rejected_delivery_is_not_a_failure() {
    let scene = Scene::skin_dose();
    let (controller, seen) = recording_controller();

    let err = controller.export(&scene.inputs(), &RejectingSink).await.unwrap_err();
    assert!(matches!(err, PlotError::Config(_)));
    assert_eq!(
        *seen.borrow(),
        vec![ExportState::Rendering, ExportState::Encoding, ExportState::Idle]
    );
    assert_eq!(controller.state(), ExportState::Idle);
}
