use dialscan_core::error::DialscanError;
use dialscan_core::ocr::SharedEngine;
use dialscan_core::ContactExtractor;
use std::path::PathBuf;
use std::sync::Arc;

use crate::commands::config;
use crate::output;

pub fn run(
    image_file: PathBuf,
    output_format: &str,
    config_file: Option<PathBuf>,
) -> Result<(), DialscanError> {
    let config = config::resolve(config_file)?;
    let extractor = ContactExtractor::new(Arc::new(SharedEngine::tesseract()), config);

    let inspection = extractor.inspect_file(&image_file)?;

    match output_format {
        "json" => output::json::print(&inspection)?,
        _ => output::table::print_inspection(&inspection),
    }

    Ok(())
}
