pub mod associate;
pub mod batch;
pub mod config;
pub mod error;
pub mod export;
pub mod layout;
pub mod model;
pub mod normalize;
pub mod ocr;

use image::DynamicImage;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

use associate::{associate, AssociationParams};
use config::ExtractionConfig;
use error::DialscanError;
use layout::{cluster_lines, prepare_image, split_columns, ColumnRegion, ColumnSplit};
use model::{
    ContactRecord, Detection, NameCandidate, PhoneCandidate, PositionedFragment, TextLine,
};
use normalize::{name_candidates, normalize_tilde, phone_candidates, PhoneRules};
use ocr::OcrEngine;

/// Everything the pipeline sees for one image, before association.
#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    pub width: u32,
    pub height: u32,
    pub split: ColumnSplit,
    pub phone_lines: Vec<TextLine>,
    pub name_lines: Vec<TextLine>,
    pub phones: Vec<PhoneCandidate>,
    pub names: Vec<NameCandidate>,
}

/// Reconstructs contacts from contact-list screenshots.
///
/// Holds the OCR engine and layout config; each call is independent.
pub struct ContactExtractor {
    engine: Arc<dyn OcrEngine>,
    config: ExtractionConfig,
    rules: PhoneRules,
}

impl ContactExtractor {
    pub fn new(engine: Arc<dyn OcrEngine>, config: ExtractionConfig) -> Self {
        let rules = PhoneRules::new(&config.country_code);
        ContactExtractor {
            engine,
            config,
            rules,
        }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    pub fn backend_name(&self) -> &str {
        self.engine.backend_name()
    }

    /// Main API entry point: extract contacts from an image file.
    ///
    /// An undecodable image yields an empty list, not an error. OCR failures
    /// propagate.
    pub fn extract_contacts(&self, path: &Path) -> Result<Vec<ContactRecord>, DialscanError> {
        let image = match image::open(path) {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not decode image");
                return Ok(Vec::new());
            }
        };
        self.extract_from_image(image)
    }

    /// Extract contacts from an already decoded image.
    ///
    /// The phone column is read first; the name column is only OCR'd when at
    /// least one valid phone was found.
    pub fn extract_from_image(
        &self,
        image: DynamicImage,
    ) -> Result<Vec<ContactRecord>, DialscanError> {
        let image = prepare_image(image, self.config.max_width);
        let split = split_columns(image.width(), &self.config);

        let phone_lines = self.read_phone_column(&image, split.phone)?;
        let phones = phone_candidates(&phone_lines, &self.rules);
        tracing::debug!(lines = phone_lines.len(), phones = phones.len(), "phone column");
        if phones.is_empty() {
            return Ok(Vec::new());
        }

        let name_lines = self.read_name_column(&image, split.name)?;
        let names = name_candidates(&name_lines, &self.rules);
        tracing::debug!(lines = name_lines.len(), names = names.len(), "name column");
        if names.is_empty() {
            return Ok(Vec::new());
        }

        Ok(associate(&phones, &names, &self.association_params()))
    }

    /// Like [`ContactExtractor::inspect`], reading from a file. Unlike
    /// extraction, an undecodable image is an error here.
    pub fn inspect_file(&self, path: &Path) -> Result<Inspection, DialscanError> {
        let image = image::open(path).map_err(|e| DialscanError::ImageDecode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        self.inspect(image)
    }

    /// Run OCR, clustering and normalization on both columns without
    /// associating or short-circuiting.
    pub fn inspect(&self, image: DynamicImage) -> Result<Inspection, DialscanError> {
        let image = prepare_image(image, self.config.max_width);
        let split = split_columns(image.width(), &self.config);

        let phone_lines = self.read_phone_column(&image, split.phone)?;
        let name_lines = self.read_name_column(&image, split.name)?;
        let phones = phone_candidates(&phone_lines, &self.rules);
        let names = name_candidates(&name_lines, &self.rules);

        Ok(Inspection {
            width: image.width(),
            height: image.height(),
            split,
            phone_lines,
            name_lines,
            phones,
            names,
        })
    }

    fn read_phone_column(
        &self,
        image: &DynamicImage,
        region: ColumnRegion,
    ) -> Result<Vec<TextLine>, DialscanError> {
        let detections = self.engine.detect(&region.crop(image))?;
        tracing::debug!(detections = detections.len(), "phone column OCR");
        Ok(phone_lines(&detections, region.x as f64, &self.config))
    }

    fn read_name_column(
        &self,
        image: &DynamicImage,
        region: ColumnRegion,
    ) -> Result<Vec<TextLine>, DialscanError> {
        let detections = self.engine.detect(&region.crop(image))?;
        tracing::debug!(detections = detections.len(), "name column OCR");
        Ok(name_lines(&detections, region.x as f64, &self.config))
    }

    fn association_params(&self) -> AssociationParams {
        association_params(&self.config)
    }
}

fn association_params(config: &ExtractionConfig) -> AssociationParams {
    AssociationParams {
        max_gap: config.max_gap,
        collision_bucket: config.collision_bucket,
    }
}

fn phone_lines(
    detections: &[Detection],
    x_offset: f64,
    config: &ExtractionConfig,
) -> Vec<TextLine> {
    let fragments = detections
        .iter()
        .filter_map(|d| PositionedFragment::from_detection(d, x_offset))
        .collect();
    cluster_lines(fragments, config.phone_line_tolerance)
}

fn name_lines(
    detections: &[Detection],
    x_offset: f64,
    config: &ExtractionConfig,
) -> Vec<TextLine> {
    let fragments = detections
        .iter()
        .filter_map(|d| PositionedFragment::from_detection(d, x_offset))
        .map(|mut f| {
            f.text = normalize_tilde(&f.text);
            f
        })
        .collect();
    cluster_lines(fragments, config.name_line_tolerance)
}

/// Run the reconstruction on detections already produced for each column.
///
/// Detections carry their own column's coordinates; only vertical positions
/// are compared across columns.
pub fn contacts_from_detections(
    name_detections: &[Detection],
    phone_detections: &[Detection],
    config: &ExtractionConfig,
) -> Vec<ContactRecord> {
    let rules = PhoneRules::new(&config.country_code);

    let phones = phone_candidates(&phone_lines(phone_detections, 0.0, config), &rules);
    if phones.is_empty() {
        return Vec::new();
    }

    let names = name_candidates(&name_lines(name_detections, 0.0, config), &rules);
    if names.is_empty() {
        return Vec::new();
    }

    associate(&phones, &names, &association_params(config))
}
