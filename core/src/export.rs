const STEM_MAX_CHARS: usize = 30;
const DEFAULT_STEM: &str = "generated";

pub const SVG_MIME: &str = "image/svg+xml";
pub const SVG_BLOB_MIME: &str = "image/svg+xml;charset=utf-8";
pub const PNG_MIME: &str = "image/png";

/// Filename stem derived from the prompt: first 30 chars, everything but
/// ASCII alphanumerics replaced with `_`.
pub fn filename_stem(prompt: &str) -> String {
    let stem: String = prompt
        .trim()
        .chars()
        .take(STEM_MAX_CHARS)
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
        .collect();
    if stem.is_empty() {
        DEFAULT_STEM.to_string()
    } else {
        stem
    }
}

pub fn svg_filename(prompt: &str, timestamp_ms: u64) -> String {
    format!("{}_{timestamp_ms}.svg", filename_stem(prompt))
}

pub fn png_filename(prompt: &str, custom: bool, timestamp_ms: u64) -> String {
    let suffix = if custom { "_custom" } else { "" };
    format!("{}{suffix}_{timestamp_ms}.png", filename_stem(prompt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_truncates_by_chars() {
        let prompt = "é".repeat(40);
        assert_eq!(filename_stem(&prompt), "_".repeat(30));
    }
}
