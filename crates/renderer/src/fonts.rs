//! TrueType font discovery.

use rusttype::Font;
use std::path::Path;
use std::sync::Arc;

/// Shared font handle.
pub type SharedFont = Arc<Font<'static>>;

/// Well-known locations tried when no font is configured.
const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

fn read_font(path: &Path) -> Option<SharedFont> {
    let bytes = std::fs::read(path).ok()?;
    Font::try_from_vec(bytes).map(Arc::new)
}

/// Load the configured font, else the first system font found.
///
/// Returns `None` when nothing usable exists; text then falls back to the
/// built-in stroke glyphs.
pub fn load_font(configured: Option<&Path>) -> Option<SharedFont> {
    if let Some(path) = configured {
        match read_font(path) {
            Some(font) => {
                tracing::debug!(path = %path.display(), "loaded configured font");
                return Some(font);
            }
            None => tracing::warn!(path = %path.display(), "failed to load configured font"),
        }
    }

    let found = SYSTEM_FONT_PATHS
        .iter()
        .map(Path::new)
        .find_map(|path| read_font(path).map(|font| (path, font)));

    match found {
        Some((path, font)) => {
            tracing::debug!(path = %path.display(), "loaded system font");
            Some(font)
        }
        None => {
            tracing::info!("no TrueType font found, using stroke glyphs");
            None
        }
    }
}
