use serde::Serialize;
use std::path::Path;

use crate::error::DialscanError;
use crate::model::SourcedContact;
use crate::ContactExtractor;

/// Outcome of processing a batch of screenshots.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Contacts from every image, in input order.
    pub rows: Vec<SourcedContact>,
    pub images: usize,
    pub contacts: usize,
    /// Images that raised an error and were skipped.
    pub failed: usize,
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Extract contacts from each image independently.
///
/// An image that errors is counted in `failed` and skipped. Returns
/// `EmptyBatch` when no image produced a contact.
pub fn run_batch<P: AsRef<Path>>(
    extractor: &ContactExtractor,
    paths: &[P],
) -> Result<BatchReport, DialscanError> {
    let total = paths.len();
    let mut report = BatchReport {
        images: total,
        ..BatchReport::default()
    };

    for (idx, path) in paths.iter().enumerate() {
        let path = path.as_ref();
        let source = source_name(path);
        tracing::info!("[{}/{}] OCR: {}", idx + 1, total, source);

        let contacts = match extractor.extract_contacts(path) {
            Ok(contacts) => contacts,
            Err(e) => {
                report.failed += 1;
                tracing::error!("[{}/{}] failed on {}: {}", idx + 1, total, source, e);
                continue;
            }
        };

        if contacts.is_empty() {
            tracing::info!("[{}/{}] no contacts detected: {}", idx + 1, total, source);
            continue;
        }

        tracing::info!(
            "[{}/{}] found {} contact(s) in {}",
            idx + 1,
            total,
            contacts.len(),
            source
        );
        report.contacts += contacts.len();
        report.rows.extend(contacts.into_iter().map(|c| SourcedContact {
            name: c.name.trim().to_string(),
            mobile: c.phone.trim().to_string(),
            source_file: source.clone(),
        }));
    }

    tracing::info!(
        images = report.images,
        contacts = report.contacts,
        failed = report.failed,
        "batch finished"
    );

    if report.rows.is_empty() {
        return Err(DialscanError::EmptyBatch {
            images: report.images,
            failed: report.failed,
        });
    }

    Ok(report)
}
