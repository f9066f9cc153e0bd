pub const PLACEHOLDER_TEXT: &str = "Preview will appear here.";
pub const INVALID_TEXT: &str = "Invalid or incomplete SVG code.";
pub const PARSE_ERROR_TEXT: &str = "Error parsing SVG code.";

pub const DEFAULT_INTRINSIC_WIDTH: f64 = 300.0;
pub const DEFAULT_INTRINSIC_HEIGHT: f64 = 150.0;

/// Raw sizing attributes of a parsed root `<svg>` element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SvgInfo {
    pub width: Option<String>,
    pub height: Option<String>,
    pub view_box: Option<String>,
}

impl SvgInfo {
    pub fn intrinsic_size(&self) -> (f64, f64) {
        let view_box = self.view_box.as_deref().and_then(parse_view_box);
        let width = resolve_dimension(
            self.width.as_deref(),
            view_box.map(|(w, _)| w),
            DEFAULT_INTRINSIC_WIDTH,
        );
        let height = resolve_dimension(
            self.height.as_deref(),
            view_box.map(|(_, h)| h),
            DEFAULT_INTRINSIC_HEIGHT,
        );
        (width, height)
    }

    pub fn aspect_ratio(&self) -> f64 {
        let (width, height) = self.intrinsic_size();
        width / height
    }
}

/// Markup parser seam. The browser implementation goes through
/// `DOMParser`; `None` means the markup did not produce a root `<svg>`.
pub trait SvgParser {
    fn inspect(&self, markup: &str) -> Option<SvgInfo>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PreviewState {
    Placeholder,
    Invalid,
    ParseError,
    Rendered(SvgInfo),
}

impl PreviewState {
    pub fn exports_enabled(&self) -> bool {
        matches!(self, PreviewState::Rendered(_))
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            PreviewState::Placeholder => Some(PLACEHOLDER_TEXT),
            PreviewState::Invalid => Some(INVALID_TEXT),
            PreviewState::ParseError => Some(PARSE_ERROR_TEXT),
            PreviewState::Rendered(_) => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, PreviewState::Invalid | PreviewState::ParseError)
    }

    pub fn svg_info(&self) -> Option<&SvgInfo> {
        match self {
            PreviewState::Rendered(info) => Some(info),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Precheck<'a> {
    Empty,
    MissingTags,
    Candidate(&'a str),
}

pub fn precheck(markup: &str) -> Precheck<'_> {
    if markup.trim().is_empty() {
        return Precheck::Empty;
    }
    if !markup.contains("<svg") || !markup.contains("</svg>") {
        return Precheck::MissingTags;
    }
    Precheck::Candidate(markup)
}

pub fn classify(markup: &str, parser: &dyn SvgParser) -> PreviewState {
    match precheck(markup) {
        Precheck::Empty => PreviewState::Placeholder,
        Precheck::MissingTags => PreviewState::Invalid,
        Precheck::Candidate(markup) => match parser.inspect(markup) {
            Some(info) => PreviewState::Rendered(info),
            None => PreviewState::ParseError,
        },
    }
}

/// Width and height of a `viewBox="min-x min-y width height"` value.
pub fn parse_view_box(raw: &str) -> Option<(f64, f64)> {
    let parts: Vec<f64> = raw
        .split(|ch: char| ch.is_whitespace() || ch == ',')
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<f64>())
        .collect::<Result<_, _>>()
        .ok()?;
    if parts.len() != 4 {
        return None;
    }
    Some((parts[2], parts[3]))
}

/// Longest numeric prefix, so `"120px"` reads as 120.
pub fn parse_number_prefix(raw: &str) -> Option<f64> {
    let raw = raw.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut seen_exp = false;
    let bytes = raw.as_bytes();
    let mut best = None;
    while end < bytes.len() {
        let byte = bytes[end];
        let accepted = match byte {
            b'0'..=b'9' => {
                seen_digit = true;
                true
            }
            b'+' | b'-' => end == 0 || matches!(bytes[end - 1], b'e' | b'E'),
            b'.' => !seen_dot && !seen_exp && {
                seen_dot = true;
                true
            },
            b'e' | b'E' => seen_digit && !seen_exp && {
                seen_exp = true;
                true
            },
            _ => false,
        };
        if !accepted {
            break;
        }
        end += 1;
        if let Ok(value) = raw[..end].parse::<f64>() {
            best = Some(value);
        }
    }
    best.filter(|value| value.is_finite())
}

/// A non-empty attribute decides on its own: if it does not read as a
/// positive number the default applies, not the `viewBox`.
fn resolve_dimension(attr: Option<&str>, view_box: Option<f64>, fallback: f64) -> f64 {
    let usable = |value: f64| value.is_finite() && value > 0.0;
    let candidate = match attr.filter(|raw| !raw.is_empty()) {
        Some(raw) => parse_number_prefix(raw),
        None => view_box,
    };
    candidate.filter(|value| usable(*value)).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_prefix_handles_units_and_exponents() {
        assert_eq!(parse_number_prefix("120px"), Some(120.0));
        assert_eq!(parse_number_prefix(" 1.5e2"), Some(150.0));
        assert_eq!(parse_number_prefix("2e"), Some(2.0));
        assert_eq!(parse_number_prefix("px"), None);
        assert_eq!(parse_number_prefix("-4"), Some(-4.0));
    }

    #[test]
    fn intrinsic_size_prefers_attributes_then_view_box() {
        let info = SvgInfo {
            width: Some("64".into()),
            height: None,
            view_box: Some("0 0 200,100".into()),
        };
        assert_eq!(info.intrinsic_size(), (64.0, 100.0));
        assert_eq!(SvgInfo::default().intrinsic_size(), (300.0, 150.0));
    }

    #[test]
    fn zero_sizes_fall_back() {
        let info = SvgInfo {
            width: Some("0".into()),
            height: Some("auto".into()),
            view_box: Some("0 0 0 0".into()),
        };
        assert_eq!(info.intrinsic_size(), (300.0, 150.0));
    }

    #[test]
    fn unreadable_attribute_skips_view_box() {
        let info = SvgInfo {
            width: Some("auto".into()),
            height: Some("auto".into()),
            view_box: Some("0 0 200 100".into()),
        };
        assert_eq!(info.intrinsic_size(), (300.0, 150.0));

        let empty = SvgInfo {
            width: Some(String::new()),
            height: None,
            view_box: Some("0 0 200 100".into()),
        };
        assert_eq!(empty.intrinsic_size(), (200.0, 100.0));
    }
}
