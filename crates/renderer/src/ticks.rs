//! Axis tick values and labels.

/// Ticks per axis when the caller has no preference.
pub const DEFAULT_TICK_COUNT: usize = 5;

/// `count` evenly spaced values from `min` to `max` inclusive.
///
/// `count == 1` yields `[min]` and `count == 0` yields nothing.
pub fn generate_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step = (max - min) / (count - 1) as f64;
            (0..count).map(|i| min + i as f64 * step).collect()
        }
    }
}

/// Format a tick value with precision scaled to its magnitude.
pub fn format_tick(value: f64) -> String {
    let abs = value.abs();
    if abs < 0.01 {
        "0".to_string()
    } else if abs >= 100.0 {
        format!("{:.0}", value)
    } else if abs >= 10.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Format a cell value with a fixed number of decimal places.
pub fn format_value(value: f64, precision: u8) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    format!("{:.*}", precision as usize, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_count_edge_cases() {
        assert!(generate_ticks(0.0, 4.0, 0).is_empty());
        assert_eq!(generate_ticks(1.5, 4.0, 1), vec![1.5]);
        assert_eq!(generate_ticks(0.0, 4.0, 5), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_format_value_precision() {
        assert_eq!(format_value(12.345, 0), "12");
        assert_eq!(format_value(12.346, 2), "12.35");
        assert_eq!(format_value(f64::NAN, 1), "-");
    }
}
