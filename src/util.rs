//! Formatting helpers for the preview page

/// Formats byte count as human readable file size
///
/// Converts byte count to appropriate unit (bytes, KB, MB) with two decimal
/// places for KB and MB. Uses binary prefixes.
///
/// # Arguments
///
/// * `bytes`: File size in bytes
///
/// # Returns
///
/// Formatted string like "512 bytes", "1.50 KB", or "2.00 MB"
pub fn format_file_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Counts whitespace separated words in markdown source.
///
/// Markup characters are not stripped, so `**bold**` counts as one word
/// and a lone `-` list marker counts as one as well.
pub fn word_count(source: &str) -> usize {
    source.split_whitespace().count()
}

/// Formats word count with singular or plural noun
pub fn format_word_count(count: usize) -> String {
    if count == 1 {
        "1 word".to_string()
    } else {
        format!("{} words", count)
    }
}
