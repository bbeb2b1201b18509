//! Human-readable byte counts for size-limit messages.

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;

/// Render a byte count using binary units.
///
/// Values below 1 KB are shown as plain bytes (`"512 B"`); larger values use
/// KB, MB or GB with two decimals (`"100.00 MB"`).
pub fn format_file_size(bytes: u64) -> String {
    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else if bytes < GB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    }
}
