use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// One text fragment reported by the OCR engine.
///
/// Coordinates are relative to the image (or sub-image) handed to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub text: String,
    pub bounding_region: Vec<Point>,
    pub confidence: f32,
}

impl Detection {
    /// Axis-aligned rectangle as a four-corner polygon, clockwise from top-left.
    pub fn from_rect(
        text: impl Into<String>,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
        confidence: f32,
    ) -> Self {
        Detection {
            text: text.into(),
            bounding_region: vec![
                Point::new(left, top),
                Point::new(left + width, top),
                Point::new(left + width, top + height),
                Point::new(left, top + height),
            ],
            confidence,
        }
    }
}

/// A detection reduced to what line clustering needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedFragment {
    pub text: String,
    pub left_x: f64,
    pub center_y: f64,
}

impl PositionedFragment {
    /// Left edge is the polygon's minimum x (shifted by `x_offset`), vertical
    /// center is the midpoint of its min/max y.
    ///
    /// Returns None for blank text or an empty polygon.
    pub fn from_detection(detection: &Detection, x_offset: f64) -> Option<Self> {
        let text = detection.text.trim();
        if text.is_empty() || detection.bounding_region.is_empty() {
            return None;
        }

        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for p in &detection.bounding_region {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }

        Some(PositionedFragment {
            text: text.to_string(),
            left_x: min_x + x_offset,
            center_y: (min_y + max_y) / 2.0,
        })
    }
}

/// One row of on-screen text, built from vertically close fragments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLine {
    pub center_y: f64,
    /// Ordered left to right.
    pub fragments: Vec<PositionedFragment>,
    pub text: String,
}

/// A line that yielded a valid canonical phone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoneCandidate {
    pub center_y: f64,
    pub phone: String,
}

/// How a name was extracted from its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameStrength {
    /// Text following a `~` marker.
    Strong,
    /// Whole-line fallback when the marker path found nothing.
    Weak,
}

impl fmt::Display for NameStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameStrength::Strong => f.pad("strong"),
            NameStrength::Weak => f.pad("weak"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameCandidate {
    pub center_y: f64,
    pub name: String,
    pub strength: NameStrength,
}

/// A phone paired with the name line above it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub name: String,
    pub phone: String,
}

/// A contact tagged with the image it came from, as handed to export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcedContact {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Mobile")]
    pub mobile: String,
    #[serde(rename = "SourceFile")]
    pub source_file: String,
}
