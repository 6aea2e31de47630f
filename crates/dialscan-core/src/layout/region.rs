use image::imageops::FilterType;
use image::DynamicImage;
use serde::Serialize;

use crate::config::ExtractionConfig;

/// A full-height vertical strip of the working image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnRegion {
    pub x: u32,
    pub width: u32,
}

impl ColumnRegion {
    /// Crop this strip out of `image`.
    pub fn crop(&self, image: &DynamicImage) -> DynamicImage {
        image.crop_imm(self.x, 0, self.width, image.height())
    }
}

/// The two overlapping columns OCR runs on independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnSplit {
    /// Everything left of `name_column_end * width`.
    pub name: ColumnRegion,
    /// Everything right of `phone_column_start * width`.
    pub phone: ColumnRegion,
}

/// Split an image of `width` pixels into the name and phone columns.
///
/// Boundaries truncate to whole pixels. The columns overlap between the two
/// fractions so boxes straddling the visual boundary land in both.
pub fn split_columns(width: u32, config: &ExtractionConfig) -> ColumnSplit {
    let name_end = ((width as f64 * config.name_column_end) as u32).min(width);
    let phone_start = ((width as f64 * config.phone_column_start) as u32).min(width);

    ColumnSplit {
        name: ColumnRegion {
            x: 0,
            width: name_end,
        },
        phone: ColumnRegion {
            x: phone_start,
            width: width - phone_start,
        },
    }
}

/// Downscale `image` to at most `max_width` pixels wide, keeping aspect ratio.
pub fn prepare_image(image: DynamicImage, max_width: Option<u32>) -> DynamicImage {
    let (w, h) = (image.width(), image.height());
    match max_width {
        Some(max_w) if w > max_w => {
            let scale = max_w as f64 / w as f64;
            let new_w = ((w as f64 * scale) as u32).max(1);
            let new_h = ((h as f64 * scale) as u32).max(1);
            tracing::debug!(from = ?(w, h), to = ?(new_w, new_h), "downscaling image");
            image.resize_exact(new_w, new_h, FilterType::Triangle)
        }
        _ => image,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_default_fractions() {
        let split = split_columns(1000, &ExtractionConfig::default());
        assert_eq!(split.name, ColumnRegion { x: 0, width: 780 });
        assert_eq!(split.phone, ColumnRegion { x: 680, width: 320 });
    }

    #[test]
    fn test_split_truncates_fractional_pixels() {
        // 0.78 * 1099 = 857.22, 0.68 * 1099 = 747.32
        let split = split_columns(1099, &ExtractionConfig::default());
        assert_eq!(split.name.width, 857);
        assert_eq!(split.phone.x, 747);
        assert_eq!(split.phone.width, 352);
    }

    #[test]
    fn test_columns_overlap() {
        let split = split_columns(500, &ExtractionConfig::default());
        assert!(split.phone.x < split.name.x + split.name.width);
    }

    #[test]
    fn test_crop_dimensions() {
        let img = DynamicImage::new_rgb8(1000, 400);
        let split = split_columns(1000, &ExtractionConfig::default());
        let phone = split.phone.crop(&img);
        assert_eq!((phone.width(), phone.height()), (320, 400));
        let name = split.name.crop(&img);
        assert_eq!((name.width(), name.height()), (780, 400));
    }

    #[test]
    fn test_prepare_downscales_wide_image() {
        let img = DynamicImage::new_rgb8(2200, 1000);
        let out = prepare_image(img, Some(1100));
        assert_eq!((out.width(), out.height()), (1100, 500));
    }

    #[test]
    fn test_prepare_keeps_narrow_image() {
        let img = DynamicImage::new_rgb8(800, 1600);
        let out = prepare_image(img, Some(1100));
        assert_eq!((out.width(), out.height()), (800, 1600));

        let img = DynamicImage::new_rgb8(3000, 100);
        let out = prepare_image(img, None);
        assert_eq!(out.width(), 3000);
    }
}
