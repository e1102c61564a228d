//! Size formatting utilities.
//!
//! This module turns raw byte counts into the compact binary-unit strings
//! used by the human-readable report (`"1.50M"`, `"512B"`, ...).

/// One kibibyte, in bytes.
pub const KIB: u64 = 1024;
/// One mebibyte, in bytes.
pub const MIB: u64 = KIB * 1024;
/// One gibibyte, in bytes.
pub const GIB: u64 = MIB * 1024;
/// One tebibyte, in bytes.
pub const TIB: u64 = GIB * 1024;

/// Unit thresholds, largest first.
const UNITS: &[(u64, char)] = &[(TIB, 'T'), (GIB, 'G'), (MIB, 'M'), (KIB, 'K')];

/// Format a byte count with 1024-based units.
///
/// Values of at least one kibibyte are printed with two decimals and a
/// single-letter suffix (`K`, `M`, `G`, `T`). Anything smaller is printed as
/// the raw integer followed by `B`.
///
/// # Examples
///
/// ```
/// # use dirtally::utils::format_size;
/// assert_eq!(format_size(1023), "1023B");
/// assert_eq!(format_size(1024), "1.00K");
/// assert_eq!(format_size(1_572_864), "1.50M");
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    for &(threshold, suffix) in UNITS {
        if bytes >= threshold {
            return format!("{:.2}{suffix}", bytes as f64 / threshold as f64);
        }
    }

    format!("{bytes}B")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(format_size(0), "0B");
        assert_eq!(format_size(1), "1B");
        assert_eq!(format_size(1023), "1023B");
    }

    #[test]
    fn test_format_size_thresholds() {
        assert_eq!(format_size(KIB), "1.00K");
        assert_eq!(format_size(MIB), "1.00M");
        assert_eq!(format_size(GIB), "1.00G");
        assert_eq!(format_size(TIB), "1.00T");
    }

    #[test]
    fn test_format_size_just_below_threshold() {
        // 1 MiB - 1 byte is still reported in K, rounded to two decimals
        assert_eq!(format_size(MIB - 1), "1024.00K");
        assert_eq!(format_size(GIB - MIB), "1023.00M");
    }

    #[test]
    fn test_format_size_fractions() {
        assert_eq!(format_size(1536), "1.50K");
        assert_eq!(format_size(2_621_440), "2.50M");
        assert_eq!(format_size(3 * GIB + GIB / 4), "3.25G");
    }

    #[test]
    fn test_format_size_beyond_tebibytes() {
        assert_eq!(format_size(2048 * TIB), "2048.00T");
    }
}
