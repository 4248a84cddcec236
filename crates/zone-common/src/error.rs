//! Error types for zone plotting.

use thiserror::Error;

/// Result type alias using PlotError.
pub type PlotResult<T> = Result<T, PlotError>;

/// Primary error type for plot rendering and export.
#[derive(Debug, Error)]
pub enum PlotError {
    // === Input Errors ===
    #[error("Invalid value grid: {0}")]
    InvalidGrid(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    // === Rendering Errors ===
    #[error("Failed to acquire drawing surface: {0}")]
    Surface(String),

    #[error("Image encoding failed: {0}")]
    Encode(String),

    // === Export Errors ===
    #[error("Failed to deliver artifact: {0}")]
    Sink(String),

    #[error("An export is already in progress")]
    ExportBusy,
}

impl PlotError {
    /// Short notice shown to the user when an export action fails.
    pub fn user_notice(&self) -> &'static str {
        match self {
            PlotError::ExportBusy => "Export already in progress",
            PlotError::InvalidGrid(_) => "No plottable values",
            PlotError::Config(_) => "Invalid display settings",
            PlotError::Surface(_) | PlotError::Encode(_) | PlotError::Sink(_) => "Save Failed",
        }
    }

    /// Whether the failure ended an export attempt (as opposed to rejecting it).
    pub fn is_export_failure(&self) -> bool {
        matches!(self, PlotError::Surface(_) | PlotError::Encode(_) | PlotError::Sink(_))
    }
}

// Conversion from common error types
impl From<serde_json::Error> for PlotError {
    fn from(err: serde_json::Error) -> Self {
        PlotError::Config(format!("JSON error: {}", err))
    }
}
