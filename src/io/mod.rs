pub mod optimal_reader;
pub mod record_reader;
pub mod report_writer;

/// Parses an optional decimal field. Empty or unparsable text is treated as absent.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse().ok()
}
