//! Colormap lookup tables.
//!
//! A [`ColorLut`] holds 256 RGBA entries sampled from a named colormap. Names
//! follow matplotlib spelling; a `_r` suffix selects the reversed map and
//! unknown names fall back to [`DEFAULT_COLORMAP`].

use once_cell::sync::Lazy;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

/// Colormap used when none is configured or the name is unknown.
pub const DEFAULT_COLORMAP: &str = "plasma";

/// Number of LUTs kept in the process-wide cache.
const LUT_CACHE_CAPACITY: usize = 16;

/// 256-entry RGBA lookup table.
#[derive(Clone, PartialEq, Eq)]
pub struct ColorLut {
    entries: [[u8; 4]; 256],
}

impl ColorLut {
    /// Entry for a normalized value. `t` is clamped to `[0, 1]`, NaN maps to 0.
    pub fn sample(&self, t: f64) -> [u8; 4] {
        self.entries[Self::index(t)]
    }

    /// LUT index for a normalized value: `round(t * 255)`.
    pub fn index(t: f64) -> usize {
        if t.is_nan() {
            return 0;
        }
        (t.clamp(0.0, 1.0) * 255.0).round() as usize
    }

    pub fn color(&self, index: u8) -> [u8; 4] {
        self.entries[index as usize]
    }

    pub fn entries(&self) -> &[[u8; 4]; 256] {
        &self.entries
    }

    fn reversed(&self) -> Self {
        let mut entries = self.entries;
        entries.reverse();
        Self { entries }
    }
}

impl std::fmt::Debug for ColorLut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorLut")
            .field("first", &self.entries[0])
            .field("last", &self.entries[255])
            .finish()
    }
}

/// Resolve a colormap name to a gradient and whether it runs backwards.
fn resolve_gradient(name: &str) -> Option<(colorous::Gradient, bool)> {
    let key = name.trim().to_ascii_lowercase();
    let (base, reversed) = match key.strip_suffix("_r") {
        Some(base) => (base, true),
        None => (key.as_str(), false),
    };

    let (gradient, inverted) = match base {
        "viridis" => (colorous::VIRIDIS, false),
        "plasma" => (colorous::PLASMA, false),
        "inferno" => (colorous::INFERNO, false),
        "magma" => (colorous::MAGMA, false),
        "cividis" => (colorous::CIVIDIS, false),
        "turbo" => (colorous::TURBO, false),
        "cubehelix" => (colorous::CUBEHELIX, false),
        "warm" => (colorous::WARM, false),
        "cool" => (colorous::COOL, false),
        "rainbow" => (colorous::RAINBOW, false),
        "greys" => (colorous::GREYS, false),
        // matplotlib "gray" runs black to white
        "gray" | "grey" => (colorous::GREYS, true),
        "blues" => (colorous::BLUES, false),
        "greens" => (colorous::GREENS, false),
        "oranges" => (colorous::ORANGES, false),
        "reds" => (colorous::REDS, false),
        "purples" => (colorous::PURPLES, false),
        "ylorrd" => (colorous::YELLOW_ORANGE_RED, false),
        "ylgnbu" => (colorous::YELLOW_GREEN_BLUE, false),
        // diverging maps run red to blue in matplotlib
        "rdbu" => (colorous::RED_BLUE, false),
        "rdylbu" => (colorous::RED_YELLOW_BLUE, false),
        "spectral" => (colorous::SPECTRAL, false),
        _ => return None,
    };

    Some((gradient, inverted ^ reversed))
}

/// Whether `name` is a known colormap (with or without `_r`).
pub fn is_known_colormap(name: &str) -> bool {
    resolve_gradient(name).is_some()
}

/// Build a LUT for `name`. Entry `i` is the colormap evaluated at `i / 255`.
pub fn build_lut(name: &str) -> ColorLut {
    let (gradient, reversed) = match resolve_gradient(name) {
        Some(resolved) => resolved,
        None => {
            tracing::debug!(colormap = %name, fallback = DEFAULT_COLORMAP, "unknown colormap");
            (colorous::PLASMA, false)
        }
    };

    let mut entries = [[0u8, 0, 0, 255]; 256];
    for (i, entry) in entries.iter_mut().enumerate() {
        let c = gradient.eval_continuous(i as f64 / 255.0);
        *entry = [c.r, c.g, c.b, 255];
    }

    let lut = ColorLut { entries };
    if reversed {
        lut.reversed()
    } else {
        lut
    }
}

// ============================================================================
// LUT cache
// ============================================================================

struct LutCache {
    luts: HashMap<String, Arc<ColorLut>>,
    order: VecDeque<String>,
}

static LUT_CACHE: Lazy<RwLock<LutCache>> = Lazy::new(|| {
    RwLock::new(LutCache {
        luts: HashMap::new(),
        order: VecDeque::new(),
    })
});

/// Get a cached LUT for `name`, building it on first use.
pub fn lut_for(name: &str) -> Arc<ColorLut> {
    let key = name.trim().to_ascii_lowercase();

    // Try to get from cache first (read lock)
    if let Ok(cache) = LUT_CACHE.read() {
        if let Some(lut) = cache.luts.get(&key) {
            return Arc::clone(lut);
        }
    }

    let lut = Arc::new(build_lut(&key));

    // A poisoned cache only costs a rebuild
    if let Ok(mut cache) = LUT_CACHE.write() {
        // Double-check after acquiring write lock
        if let Some(existing) = cache.luts.get(&key) {
            return Arc::clone(existing);
        }
        while cache.order.len() >= LUT_CACHE_CAPACITY {
            if let Some(oldest) = cache.order.pop_front() {
                cache.luts.remove(&oldest);
            }
        }
        cache.order.push_back(key.clone());
        cache.luts.insert(key, Arc::clone(&lut));
        tracing::debug!(cached = cache.order.len(), "built colormap LUT");
    }

    lut
}
