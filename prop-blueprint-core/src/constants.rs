//! Drawing constants shared by the builders and the annotation layer.
//! Lengths are in millimeters (one drawing unit per millimeter).

/// Horizontal shrink of each successive stepped tier.
pub const TIER_SHRINK_MM: f64 = 30.0;
/// Upper bound on generated tiers; keeps primitive counts bounded.
pub const MAX_TIERS: u32 = 64;

/// Distance between the prop bounds and a dimension guide.
pub const ANNOTATION_MARGIN_MM: f64 = 30.0;
/// Distance between a dimension guide and its label.
pub const LABEL_OFFSET_MM: f64 = 10.0;

/// Fraction of the viewport height the prop should occupy after fitting.
pub const FIT_FRACTION: f64 = 0.6;
/// Never magnify small props past this factor.
pub const MAX_FIT_SCALE: f64 = 1.2;

pub const DEFAULT_VIEWPORT_W: f64 = 800.0;
pub const DEFAULT_VIEWPORT_H: f64 = 550.0;

pub const MAIN_STROKE: &str = "#1a1a1a";
pub const MAIN_STROKE_WIDTH: f64 = 1.5;
pub const DETAIL_STROKE_WIDTH: f64 = 1.0;
pub const GUIDE_STROKE: &str = "#cbd5e1";
pub const GUIDE_STROKE_WIDTH: f64 = 1.0;
pub const GUIDE_DASH: [f64; 2] = [4.0, 4.0];
pub const LABEL_FILL: &str = "#475569";
pub const LABEL_FONT_SIZE: f64 = 10.0;
pub const LABEL_FONT_FAMILY: &str = "monospace";

pub const FILL_WHITE: &str = "#ffffff";
pub const FILL_OFF_WHITE: &str = "#fcfcfc";

pub const PLACEHOLDER_TEXT: &str = "NO INPUT";
