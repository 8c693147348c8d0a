// Display helpers

/// Size in megabytes with two decimals, e.g. `2.00 MB`
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

/// Truncate a string to fit within a given width (in characters)
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width > 3 {
        let head: String = s.chars().take(max_width - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max_width).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_megabytes() {
        assert_eq!(format_megabytes(2 * 1024 * 1024), "2.00 MB");
        assert_eq!(format_megabytes(1536 * 1024), "1.50 MB");
        assert_eq!(format_megabytes(0), "0.00 MB");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("report.pdf", 20), "report.pdf");
        assert_eq!(truncate_string("a-very-long-name.pdf", 10), "a-very-...");
        assert_eq!(truncate_string("résumé.pdf", 3), "rés");
    }
}
