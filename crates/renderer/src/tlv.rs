//! Threshold limit value (TLV) safety scale.

/// Percent-of-limit summary for a safety zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TlvScale {
    /// Peak dose as a percentage of the limit, capped at 100
    pub max_percent: f64,
    /// Start of the warning band in percent
    pub band_low: f64,
    /// End of the warning band in percent
    pub band_high: f64,
    pub is_compliant: bool,
    pub exceeds_limit: bool,
    pub max_val: f64,
    pub limit: f64,
}

/// Lower edge of the warning band, in percent of the limit.
const BAND_LOW_PERCENT: f64 = 90.0;
/// Upper edge of the warning band before clamping.
const BAND_HIGH_PERCENT: f64 = 110.0;

impl TlvScale {
    /// Build the scale for a peak display value against `limit`.
    /// Returns `None` when the limit is not positive.
    pub fn compute(max_val: f64, limit: f64) -> Option<Self> {
        if !(limit.is_finite() && limit > 0.0) {
            return None;
        }
        Some(Self {
            max_percent: (max_val / limit * 100.0).min(100.0),
            band_low: BAND_LOW_PERCENT.clamp(0.0, 100.0),
            band_high: BAND_HIGH_PERCENT.clamp(0.0, 100.0),
            is_compliant: max_val <= limit,
            exceeds_limit: max_val > limit,
            max_val,
            limit,
        })
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_compliant {
            "PASS"
        } else {
            "FAIL"
        }
    }

    /// Fraction of lamp output that keeps the zone within the limit.
    /// 1.0 means no dimming is needed.
    pub fn dimming_required(&self) -> f64 {
        if self.max_val <= 0.0 {
            return 1.0;
        }
        (self.limit / self.max_val).min(1.0)
    }

    /// Output level to dim to, shown under the scale when over the limit.
    pub fn dimming_label(&self) -> Option<String> {
        self.exceeds_limit
            .then(|| format!("dim {:.0}%", self.dimming_required() * 100.0))
    }
}
