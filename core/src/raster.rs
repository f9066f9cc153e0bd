use std::fmt;

use crate::config::RASTER_QUALITY_SCALE;

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
pub const AUTO_PLACEHOLDER: &str = "(auto)";

/// How the canvas size for a rasterization is picked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizePolicy {
    /// User-typed dimensions; a missing axis follows the aspect ratio. When
    /// neither axis is set this behaves like `Upscale`.
    Explicit {
        width: Option<u32>,
        height: Option<u32>,
        min_dimension: u32,
    },
    /// Start from the quality scale and grow until the longer axis reaches
    /// `min_dimension`.
    Upscale { min_dimension: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RasterSize {
    pub width: u32,
    pub height: u32,
    pub custom: bool,
}

pub fn target_size(intrinsic: (f64, f64), policy: SizePolicy) -> RasterSize {
    let (svg_width, svg_height) = intrinsic;
    let aspect = svg_width / svg_height;
    let (width, height, custom) = match policy {
        SizePolicy::Explicit {
            width: Some(width),
            ..
        } if width > 0 => (f64::from(width), (f64::from(width) / aspect).round(), true),
        SizePolicy::Explicit {
            height: Some(height),
            ..
        } if height > 0 => ((f64::from(height) * aspect).round(), f64::from(height), true),
        SizePolicy::Explicit { min_dimension, .. } | SizePolicy::Upscale { min_dimension } => {
            let (width, height) = upscale(svg_width, svg_height, f64::from(min_dimension));
            (width.round(), height.round(), false)
        }
    };
    RasterSize {
        width: clamp_pixels(width),
        height: clamp_pixels(height),
        custom,
    }
}

fn upscale(svg_width: f64, svg_height: f64, min_dimension: f64) -> (f64, f64) {
    let mut width = svg_width * RASTER_QUALITY_SCALE;
    let mut height = svg_height * RASTER_QUALITY_SCALE;
    if width < min_dimension && height < min_dimension {
        let factor = if svg_width >= svg_height {
            min_dimension / width
        } else {
            min_dimension / height
        };
        width *= factor;
        height *= factor;
    }
    (width, height)
}

fn clamp_pixels(value: f64) -> u32 {
    if !value.is_finite() || value < 1.0 {
        return 1;
    }
    if value >= f64::from(u32::MAX) {
        return u32::MAX;
    }
    value as u32
}

/// Positive integer prefix of a dimension input, `None` for blank, zero or
/// garbage.
pub fn parse_dimension_input(raw: &str) -> Option<u32> {
    let raw = raw.trim_start();
    let digits: &str = {
        let end = raw
            .char_indices()
            .find(|(_, ch)| !ch.is_ascii_digit())
            .map(|(idx, _)| idx)
            .unwrap_or(raw.len());
        &raw[..end]
    };
    digits.parse::<u32>().ok().filter(|value| *value > 0)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DimensionField {
    Width,
    Height,
}

impl DimensionField {
    pub fn other(self) -> DimensionField {
        match self {
            DimensionField::Width => DimensionField::Height,
            DimensionField::Height => DimensionField::Width,
        }
    }
}

/// Result of editing one of the linked PNG dimension inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkedDimension {
    pub field: DimensionField,
    pub value: String,
    pub placeholder: String,
    pub auto_populated: bool,
}

pub fn link_dimension(changed: DimensionField, raw: &str, aspect: f64) -> LinkedDimension {
    let field = changed.other();
    match parse_dimension_input(raw) {
        Some(value) => {
            let derived = match changed {
                DimensionField::Width => (f64::from(value) / aspect).round(),
                DimensionField::Height => (f64::from(value) * aspect).round(),
            };
            let derived = clamp_pixels(derived).to_string();
            LinkedDimension {
                field,
                value: derived.clone(),
                placeholder: derived,
                auto_populated: true,
            }
        }
        None => LinkedDimension {
            field,
            value: String::new(),
            placeholder: AUTO_PLACEHOLDER.to_string(),
            auto_populated: false,
        },
    }
}

/// Adds the default SVG namespace when the serialized markup lacks one, so
/// the image decoder accepts it.
pub fn ensure_xmlns(markup: &str) -> String {
    if markup.contains("xmlns=") {
        return markup.to_string();
    }
    markup.replacen("<svg", &format!("<svg xmlns=\"{SVG_NAMESPACE}\""), 1)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RasterError {
    NoSvg,
    ImageLoad(String),
    Export(String),
}

impl RasterError {
    /// Text for the blocking alert shown on the download path.
    pub fn alert_text(&self) -> &'static str {
        match self {
            RasterError::NoSvg => "No SVG in preview to save as PNG.",
            RasterError::ImageLoad(_) => {
                "Failed to load SVG for PNG conversion. Please check SVG code for errors."
            }
            RasterError::Export(_) => {
                "Failed to save SVG as PNG. The SVG might be too complex or contain unsupported features."
            }
        }
    }
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RasterError::NoSvg => write!(f, "No SVG in preview to generate PNG."),
            RasterError::ImageLoad(detail) => {
                write!(f, "Error loading SVG into image element for PNG generation: {detail}")
            }
            RasterError::Export(detail) => write!(f, "Error converting canvas to PNG: {detail}"),
        }
    }
}

impl std::error::Error for RasterError {}
