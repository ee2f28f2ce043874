/// Human-readable byte counts and file counts.
///
/// All internal sizes are `u64` bytes. Floating point is only used
/// at the display-formatting boundary.

/// One mebibyte. Sizes from here up are shown as "MB".
pub const MB: u64 = 1 << 20;
/// One gibibyte. Sizes from here up are shown as "GB".
pub const GB: u64 = 1 << 30;

/// Format a byte count as a human-readable string.
///
/// Three bands, each inclusive of its lower threshold:
/// - `>= 1 GiB` → `"1.50 GB"`
/// - `>= 1 MiB` → `"4.77 MB"`
/// - otherwise → `"500 bytes"`
pub fn format_size(bytes: u64) -> String {
    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else {
        format!("{bytes} bytes")
    }
}

/// Format a file count with thousand separators.
pub fn format_count(count: u64) -> String {
    if count < 1_000 {
        return count.to_string();
    }
    let s = count.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(format_size(0), "0 bytes");
        assert_eq!(format_size(500), "500 bytes");
        assert_eq!(format_size(MB - 1), "1048575 bytes");
    }

    #[test]
    fn test_format_size_mb() {
        assert_eq!(format_size(1_048_576), "1.00 MB");
        assert_eq!(format_size(5_000_000), "4.77 MB");
        assert_eq!(format_size(GB - 1), "1024.00 MB");
    }

    #[test]
    fn test_format_size_gb() {
        assert_eq!(format_size(1_073_741_824), "1.00 GB");
        assert_eq!(format_size(1_610_612_736), "1.50 GB");
        assert_eq!(format_size(2_000_000_000), "1.86 GB");
    }

    #[test]
    fn test_format_size_beyond_terabyte_stays_in_gb() {
        assert_eq!(format_size(1_099_511_627_776), "1024.00 GB");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }
}
