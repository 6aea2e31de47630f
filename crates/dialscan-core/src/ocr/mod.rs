pub mod shared;
pub mod tesseract;

use image::DynamicImage;

use crate::error::DialscanError;
use crate::model::Detection;

pub use shared::SharedEngine;
pub use tesseract::TesseractEngine;

/// Trait for OCR backends.
pub trait OcrEngine: Send + Sync {
    /// Detect text in `image`. Coordinates are relative to `image`.
    fn detect(&self, image: &DynamicImage) -> Result<Vec<Detection>, DialscanError>;

    /// Name of this OCR backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
