//! Human-readable byte counts for the progress display

const KB: u64 = 2 << 9;
const MB: u64 = 2 << 19;
const GB: u64 = 2 << 29;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format a byte count using binary thresholds.
///
/// Sizes of at least 1 kB are divided by the matching threshold and
/// rounded to two decimals. Smaller counts are rendered bare, without a
/// unit. An unknown or zero size renders as `"0 b"`.
pub fn format_size(size: Option<u64>) -> String {
    let size = match size {
        Some(size) if size > 0 => size,
        _ => return "0 b".to_string(),
    };

    for (threshold, unit) in [(GB, "GB"), (MB, "MB"), (KB, "kB")] {
        if size >= threshold {
            return format!("{} {}", round2(size as f64 / threshold as f64), unit);
        }
    }

    size.to_string()
}
