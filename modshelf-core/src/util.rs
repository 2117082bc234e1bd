/// True when the string is empty or only whitespace.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Treat `None` and blank strings alike.
pub fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !is_blank(v))
}

/// Format a download count compactly (e.g., "950", "12.3K", "4.5M").
pub fn format_count(count: f64) -> String {
    let count = count.max(0.0);
    if count >= 1_000_000_000.0 {
        format!("{:.1}B", count / 1_000_000_000.0)
    } else if count >= 1_000_000.0 {
        format!("{:.1}M", count / 1_000_000.0)
    } else if count >= 1_000.0 {
        format!("{:.1}K", count / 1_000.0)
    } else {
        format!("{}", count as u64)
    }
}

/// Format a byte count with fractional KB/MB (e.g., "1.5 KB", "2.3 MB").
pub fn format_bytes_approx(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

/// Shorten a string to at most `max` characters, adding an ellipsis.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{}\u{2026}", kept.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("  \t"));
        assert!(!is_blank(" 1.16.5 "));
        assert_eq!(non_blank(Some("  ")), None);
        assert_eq!(non_blank(Some("1.12.2")), Some("1.12.2"));
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0.0), "0");
        assert_eq!(format_count(950.0), "950");
        assert_eq!(format_count(12_345.0), "12.3K");
        assert_eq!(format_count(4_500_000.0), "4.5M");
        assert_eq!(format_count(1_200_000_000.0), "1.2B");
    }

    #[test]
    fn test_format_bytes_approx() {
        assert_eq!(format_bytes_approx(512), "512 B");
        assert_eq!(format_bytes_approx(1536), "1.5 KB");
        assert_eq!(format_bytes_approx(1048576), "1.0 MB");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a long summary line", 7), "a long\u{2026}");
    }
}
