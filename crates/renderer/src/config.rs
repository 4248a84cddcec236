//! Display configuration.
//!
//! Loaded from YAML with `${VAR}` and `${VAR:-default}` environment
//! substitution. Every field is optional; missing fields take the defaults
//! below and room-level settings (colormap, standard, precision) apply unless
//! overridden here.

use crate::colormap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use zone_common::{PlotError, PlotResult, Standard};

pub const MIN_WIDTH: f32 = 200.0;
pub const MIN_HEIGHT: f32 = 150.0;
pub const MAX_EXPORT_SCALE: f32 = 8.0;
pub const MAX_PRECISION: u8 = 6;

/// How cell values are presented in the live view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Heatmap,
    Numeric,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Overrides the room's colormap
    pub colormap: Option<String>,
    pub mode: DisplayMode,
    pub show_lamp_labels: bool,
    pub show_tlv_scale: bool,
    /// Overrides the room's safety standard
    pub standard: Option<Standard>,
    /// Overrides the room's value precision
    pub precision: Option<u8>,
    /// Logical plot width
    pub width: f32,
    /// Logical plot height
    pub height: f32,
    /// Export resolution relative to the logical size
    pub export_scale: f32,
    /// TrueType font for rendered text
    pub font_path: Option<PathBuf>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            colormap: None,
            mode: DisplayMode::Heatmap,
            show_lamp_labels: true,
            show_tlv_scale: true,
            standard: None,
            precision: None,
            width: 640.0,
            height: 480.0,
            export_scale: 2.0,
            font_path: None,
        }
    }
}

impl DisplayConfig {
    /// Load and validate a YAML config file.
    pub fn load<P: AsRef<Path>>(path: P) -> PlotResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PlotError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_yaml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded display config");
        Ok(config)
    }

    /// Parse and validate YAML text.
    pub fn from_yaml_str(content: &str) -> PlotResult<Self> {
        let expanded = expand_env_vars(content)?;
        let config: DisplayConfig = serde_yaml::from_str(&expanded)
            .map_err(|e| PlotError::Config(format!("failed to parse display config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PlotResult<()> {
        if !(self.width.is_finite() && self.width >= MIN_WIDTH) {
            return Err(PlotError::Config(format!(
                "width must be at least {}, got {}",
                MIN_WIDTH, self.width
            )));
        }
        if !(self.height.is_finite() && self.height >= MIN_HEIGHT) {
            return Err(PlotError::Config(format!(
                "height must be at least {}, got {}",
                MIN_HEIGHT, self.height
            )));
        }
        if !(self.export_scale.is_finite()
            && self.export_scale > 0.0
            && self.export_scale <= MAX_EXPORT_SCALE)
        {
            return Err(PlotError::Config(format!(
                "export_scale must be in (0, {}], got {}",
                MAX_EXPORT_SCALE, self.export_scale
            )));
        }
        if let Some(precision) = self.precision {
            if precision > MAX_PRECISION {
                return Err(PlotError::Config(format!(
                    "precision must be at most {}, got {}",
                    MAX_PRECISION, precision
                )));
            }
        }
        if let Some(name) = &self.colormap {
            if !colormap::is_known_colormap(name) {
                tracing::warn!(colormap = %name, "unknown colormap, default will be used");
            }
        }
        Ok(())
    }
}

// ============================================================================
// Environment variable expansion
// ============================================================================

/// Expand environment variables in config content.
/// Supports `${VAR}` and `${VAR:-default}` syntax.
pub fn expand_env_vars(content: &str) -> PlotResult<String> {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && chars.peek() == Some(&'{') {
            chars.next(); // consume '{'

            let mut var_expr = String::new();
            let mut brace_count = 1;

            while brace_count > 0 {
                match chars.next() {
                    Some('{') => {
                        brace_count += 1;
                        var_expr.push('{');
                    }
                    Some('}') => {
                        brace_count -= 1;
                        if brace_count > 0 {
                            var_expr.push('}');
                        }
                    }
                    Some(c) => var_expr.push(c),
                    None => {
                        return Err(PlotError::Config(format!(
                            "unclosed variable substitution: ${{{}",
                            var_expr
                        )))
                    }
                }
            }

            result.push_str(&resolve_var_expr(&var_expr)?);
        } else {
            result.push(ch);
        }
    }

    Ok(result)
}

/// Resolve variable expression (supports VAR and VAR:-default syntax)
fn resolve_var_expr(expr: &str) -> PlotResult<String> {
    if let Some((var_name, default)) = expr.split_once(":-") {
        match std::env::var(var_name.trim()) {
            Ok(val) if !val.is_empty() => Ok(val),
            _ => Ok(default.to_string()),
        }
    } else {
        std::env::var(expr.trim())
            .map_err(|_| PlotError::Config(format!("environment variable {} not set", expr)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DisplayConfig::default();
        assert_eq!((config.width, config.height), (640.0, 480.0));
        assert_eq!(config.export_scale, 2.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml() {
        let config = DisplayConfig::from_yaml_str("mode: numeric\ncolormap: viridis\n").unwrap();
        assert_eq!(config.mode, DisplayMode::Numeric);
        assert_eq!(config.colormap.as_deref(), Some("viridis"));
        assert!(config.show_lamp_labels);
    }

    #[test]
    fn test_env_default_used() {
        let yaml = "colormap: ${ZONE_PLOT_TEST_UNSET_COLORMAP:-magma}\n";
        let config = DisplayConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.colormap.as_deref(), Some("magma"));
    }

    #[test]
    fn test_missing_env_var_is_error() {
        let err = expand_env_vars("x: ${ZONE_PLOT_TEST_DEFINITELY_UNSET}").unwrap_err();
        assert!(matches!(err, PlotError::Config(_)));
    }

    #[test]
    fn test_unclosed_substitution() {
        assert!(expand_env_vars("x: ${OPEN").is_err());
    }

    #[test]
    fn test_invalid_sizes_rejected() {
        assert!(DisplayConfig::from_yaml_str("width: 10").is_err());
        assert!(DisplayConfig::from_yaml_str("export_scale: 0").is_err());
        assert!(DisplayConfig::from_yaml_str("precision: 9").is_err());
    }
}
