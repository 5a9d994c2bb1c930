//! Formatting utilities for the run summary.

const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

/// Format a byte count using binary units, e.g. `1.50 KB`.
///
/// ```
/// use bc_cli_common::format_bytes;
///
/// assert_eq!(format_bytes(8), "8 bytes");
/// assert_eq!(format_bytes(3 * 1024 * 1024), "3.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} bytes");
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}

/// Format a count with thousands separators.
///
/// ```
/// use bc_cli_common::format_number;
///
/// assert_eq!(format_number(999), "999");
/// assert_eq!(format_number(1_234_567), "1,234,567");
/// ```
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format milliseconds as seconds with two decimals.
pub fn format_seconds(millis: i64) -> String {
    format!("{:.2}s", millis as f64 / 1000.0)
}

/// Format a throughput figure.
pub fn format_rate(per_second: f64, unit: &str) -> String {
    format!("{per_second:.1} {unit}/sec")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_stay_unscaled_below_one_kilobyte() {
        assert_eq!(format_bytes(0), "0 bytes");
        assert_eq!(format_bytes(8), "8 bytes");
        assert_eq!(format_bytes(1023), "1023 bytes");
    }

    #[test]
    fn test_bytes_pick_the_largest_unit() {
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.00 MB");
        assert_eq!(format_bytes(1024u64.pow(3)), "1.00 GB");
        assert_eq!(format_bytes(2048 * 1024u64.pow(4)), "2048.00 TB");
    }

    #[test]
    fn test_thousands_separators() {
        assert_eq!(format_number(7), "7");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(20_000_001), "20,000,001");
    }

    #[test]
    fn test_seconds_and_rate() {
        assert_eq!(format_seconds(0), "0.00s");
        assert_eq!(format_seconds(61_500), "61.50s");
        assert_eq!(format_rate(12.345, "probes"), "12.3 probes/sec");
    }
}
