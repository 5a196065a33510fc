//! Shared constants for sheet packing
//!
//! This module centralizes magic numbers and constants used throughout
//! the packing and markup normalization passes.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Device pixels per millimeter (72 px per inch, 1 inch = 25.4mm)
pub const PX_PER_MM: f64 = 72.0 / 25.4; // ≈ 2.83465

/// Convert device pixels to millimeters
#[inline]
pub fn px_to_mm(px: f64) -> f64 {
    px / PX_PER_MM
}

// =============================================================================
// Packing Tolerances
// =============================================================================

/// Items whose sides differ by less than this are treated as square and
/// never tried rotated (mm)
pub const SQUARE_TOLERANCE_MM: f64 = 0.01;

/// Maximum difference between an orientation's height and a row's fixed
/// height for the orientation to join that row (mm)
pub const ROW_HEIGHT_TOLERANCE_MM: f64 = 0.01;

/// Slack allowed on every width/height fit check (mm)
pub const FIT_EPSILON_MM: f64 = 0.001;

/// Default spacing between items and between rows (mm)
pub const DEFAULT_SPACING_MM: f64 = 5.0;

/// Largest copy count accepted per design; larger values are ignored like
/// any other malformed count
pub const MAX_COPIES: usize = 10_000;

// =============================================================================
// Color Reclassification
// =============================================================================

/// Stroke applied to elements painted in the design's theme stroke color
pub const HIGHLIGHT_STROKE_COLOR: &str = "#e6007e";

/// Stroke that replaces pure black strokes (cut/structure lines)
pub const OUTLINE_STROKE_COLOR: &str = "#ff0000";

/// Stroke applied to every text and tspan element
pub const TEXT_STROKE_COLOR: &str = "#0000ff";

/// Stroke width applied to every text and tspan element
pub const TEXT_STROKE_WIDTH: &str = "0.5";

/// Fill given to text that declares none
pub const TEXT_FILL_COLOR: &str = "#000000";

/// Stroke width applied to reclassified theme elements when none is set
pub const DEFAULT_STROKE_WIDTH: &str = "1";

/// Line join applied to reclassified theme elements when none is set
pub const DEFAULT_STROKE_LINEJOIN: &str = "round";

/// Line cap applied to reclassified theme elements when none is set
pub const DEFAULT_STROKE_LINECAP: &str = "round";

// =============================================================================
// Markup
// =============================================================================

/// Elements that carry no drawable geometry and stay outside the origin
/// shift group
pub const NON_RENDERING_ELEMENTS: [&str; 5] = ["defs", "style", "title", "desc", "metadata"];

/// Prefix of the inline preview data reference
pub const SVG_DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";
