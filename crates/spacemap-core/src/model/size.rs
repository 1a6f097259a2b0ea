/// Size formatting utilities: compact, human-readable byte counts for
/// treemap labels.
///
/// All internal sizes are `u64` bytes. Floating point is only used
/// at the display-formatting boundary. Units are binary (1024) and use a
/// single-letter suffix so labels stay short inside narrow boxes.

const UNITS: [char; 7] = ['B', 'K', 'M', 'G', 'T', 'P', 'E'];

/// Scale `bytes` down to the largest unit that keeps the value below 1024
/// once rounded to `decimals` places.
fn scaled(bytes: u64, decimals: i32) -> (f64, char) {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    // 1023.999K would print as 1024K; carry it into the next unit.
    let factor = 10f64.powi(decimals);
    if (value * factor).round() / factor >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    (value, UNITS[unit])
}

/// Two-decimal form, e.g. `12.00B`, `1.50K`, `3.27G`.
pub fn format_size_long(bytes: u64) -> String {
    let (value, unit) = scaled(bytes, 2);
    format!("{value:.2}{unit}")
}

/// Rounded integer form, e.g. `12B`, `2K`, `3G`.
pub fn format_size_short(bytes: u64) -> String {
    let (value, unit) = scaled(bytes, 0);
    format!("{value:.0}{unit}")
}
