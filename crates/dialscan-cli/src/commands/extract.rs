use dialscan_core::batch::run_batch;
use dialscan_core::error::DialscanError;
use dialscan_core::export::{export_to_path, write_csv, ExportFormat};
use dialscan_core::ocr::SharedEngine;
use dialscan_core::ContactExtractor;
use std::path::PathBuf;
use std::sync::Arc;

use crate::commands::config;
use crate::output;

pub fn run(
    images: Vec<PathBuf>,
    output_format: &str,
    output_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
) -> Result<(), DialscanError> {
    let config = config::resolve(config_file)?;
    let extractor = ContactExtractor::new(Arc::new(SharedEngine::tesseract()), config);

    tracing::info!(images = images.len(), "starting extraction");
    let export_format = output_file
        .as_deref()
        .map(ExportFormat::for_output)
        .transpose()?;
    let report = run_batch(&extractor, &images)?;

    match output_file.zip(export_format) {
        Some((path, format)) => {
            export_to_path(&report.rows, &path, format)?;
            eprintln!(
                "Done! Images: {}, Contacts: {}, Failed images: {}. Written to {}",
                report.images,
                report.contacts,
                report.failed,
                path.display()
            );
        }
        None => match output_format {
            "json" => output::json::print(&report.rows)?,
            "csv" => write_csv(&report.rows, std::io::stdout().lock())?,
            _ => output::table::print_contacts(&report),
        },
    }

    Ok(())
}
