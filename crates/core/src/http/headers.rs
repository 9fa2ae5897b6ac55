use log::info;
use reqwest::header::HeaderMap;

/// Render response headers as log lines.
///
/// One `<label> <name> : <value>` line per header. If any value is not
/// printable text the whole collection is rendered once with its debug
/// representation instead. Empty collections render nothing.
pub fn render_headers(label: &str, headers: &HeaderMap) -> Vec<String> {
    if headers.is_empty() {
        return Vec::new();
    }

    let lines: Option<Vec<String>> = headers
        .iter()
        .map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| format!("{} {} : {}", label, name, value))
        })
        .collect();

    lines.unwrap_or_else(|| vec![format!("{}: {:?}", label, headers)])
}

/// Log response headers at info level. Never fails.
pub fn log_headers(label: &str, headers: &HeaderMap) {
    for line in render_headers(label, headers) {
        info!("{}", line);
    }
}
