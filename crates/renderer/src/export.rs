//! High-resolution PNG export.
//!
//! An [`ExportController`] renders the same composition as the live view at
//! `export_scale` times the logical size, encodes it off the async thread and
//! hands the bytes to an [`ArtifactSink`]. One export runs at a time; a
//! request while one is in flight is rejected, not queued.

use crate::fonts::{self, SharedFont};
use crate::png::encode_png;
use crate::raster::RasterSurface;
use crate::render::{self, DerivedState, PlotInputs};
use crate::surface::ScaledSurface;
use async_trait::async_trait;
use std::cell::Cell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use zone_common::{PlotError, PlotResult, ZoneRecord};

/// Where an export currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportState {
    Idle,
    Rendering,
    Encoding,
    Failed,
}

impl ExportState {
    pub fn is_busy(&self) -> bool {
        matches!(self, ExportState::Rendering | ExportState::Encoding)
    }
}

/// Summary of a delivered export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    pub filename: String,
    pub width: u32,
    pub height: u32,
    pub size_bytes: usize,
}

/// Receives finished export artifacts.
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    async fn deliver(&self, filename: &str, bytes: Vec<u8>) -> PlotResult<()>;
}

/// Writes artifacts into a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl ArtifactSink for DirectorySink {
    async fn deliver(&self, filename: &str, bytes: Vec<u8>) -> PlotResult<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| PlotError::Sink(format!("{}: {}", self.dir.display(), e)))?;
        let path = self.path_for(filename);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| PlotError::Sink(format!("{}: {}", path.display(), e)))?;
        tracing::info!(path = %path.display(), "wrote export");
        Ok(())
    }
}

/// Keeps artifacts in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    artifacts: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, filename: &str) -> Option<Vec<u8>> {
        self.artifacts.lock().ok()?.get(filename).cloned()
    }

    pub fn filenames(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .artifacts
            .lock()
            .map(|a| a.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }
}

#[async_trait]
impl ArtifactSink for MemorySink {
    async fn deliver(&self, filename: &str, bytes: Vec<u8>) -> PlotResult<()> {
        self.artifacts
            .lock()
            .map_err(|_| PlotError::Sink("memory sink poisoned".to_string()))?
            .insert(filename.to_string(), bytes);
        Ok(())
    }
}

/// File name for a zone's export: the display name with every run of
/// characters outside `[A-Za-z0-9-_]` replaced by `_`.
pub fn export_filename(zone: &ZoneRecord) -> String {
    let mut stem = String::new();
    let mut in_run = false;
    for ch in zone.display_name().chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
            stem.push(ch);
            in_run = false;
        } else if !in_run {
            stem.push('_');
            in_run = true;
        }
    }
    let stem = stem.trim_matches('_');
    if stem.is_empty() {
        "zone.png".to_string()
    } else {
        format!("{}.png", stem)
    }
}

type StateObserver = Box<dyn Fn(ExportState)>;

/// Runs exports and tracks their state.
pub struct ExportController {
    state: Cell<ExportState>,
    observer: Option<StateObserver>,
    font: Option<SharedFont>,
}

/// Returns the controller to `Idle` on every exit path.
struct BusyGuard<'a> {
    controller: &'a ExportController,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.controller.transition(ExportState::Idle);
    }
}

impl ExportController {
    pub fn new(font: Option<SharedFont>) -> Self {
        Self {
            state: Cell::new(ExportState::Idle),
            observer: None,
            font,
        }
    }

    /// Controller using the configured font or a system font.
    pub fn with_font_path(path: Option<&Path>) -> Self {
        Self::new(fonts::load_font(path))
    }

    /// Call `observer` on every state change.
    pub fn with_observer(mut self, observer: impl Fn(ExportState) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn state(&self) -> ExportState {
        self.state.get()
    }

    fn transition(&self, next: ExportState) {
        let prev = self.state.replace(next);
        if prev != next {
            tracing::debug!(from = ?prev, to = ?next, "export state");
            if let Some(observer) = &self.observer {
                observer(next);
            }
        }
    }

    fn begin(&self) -> PlotResult<BusyGuard<'_>> {
        if self.state.get().is_busy() {
            return Err(PlotError::ExportBusy);
        }
        self.transition(ExportState::Rendering);
        Ok(BusyGuard { controller: self })
    }

    /// Render, encode and deliver one export.
    pub async fn export(
        &self,
        inputs: &PlotInputs<'_>,
        sink: &dyn ArtifactSink,
    ) -> PlotResult<ExportReceipt> {
        let _guard = self.begin()?;
        let result = self.run(inputs, sink).await;
        match &result {
            Err(e) if e.is_export_failure() => {
                self.transition(ExportState::Failed);
                tracing::warn!(error = %e, notice = e.user_notice(), "export failed");
            }
            Err(e) => {
                tracing::info!(error = %e, notice = e.user_notice(), "export rejected");
            }
            Ok(_) => {}
        }
        result
    }

    async fn run(&self, inputs: &PlotInputs<'_>, sink: &dyn ArtifactSink) -> PlotResult<ExportReceipt> {
        let state = DerivedState::compute(inputs);
        let scale = inputs.display.export_scale;
        let width = (state.layout.width * scale).round() as u32;
        let height = (state.layout.height * scale).round() as u32;

        let mut raster = RasterSurface::new(width, height, self.font.clone())?;
        {
            let mut scaled = ScaledSurface::new(&mut raster, scale);
            render::draw_composite(&mut scaled, &state, inputs.grid);
        }
        let image = raster.into_image();

        self.transition(ExportState::Encoding);
        let bytes = tokio::task::spawn_blocking(move || encode_png(&image))
            .await
            .map_err(|e| PlotError::Encode(format!("encoder task failed: {}", e)))??;

        let filename = export_filename(inputs.zone);
        let size_bytes = bytes.len();
        sink.deliver(&filename, bytes).await?;

        tracing::info!(
            filename = %filename,
            width,
            height,
            size_bytes,
            "export complete"
        );

        Ok(ExportReceipt {
            filename,
            width,
            height,
            size_bytes,
        })
    }
}

impl std::fmt::Debug for ExportController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportController")
            .field("state", &self.state.get())
            .field("has_font", &self.font.is_some())
            .finish()
    }
}
