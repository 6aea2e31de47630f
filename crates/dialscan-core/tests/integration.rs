//! Integration tests for the extraction pipeline.
//!
//! Uses a MockEngine that returns canned detections per column (told apart by
//! the cropped width), so these tests run without tesseract.

use dialscan_core::batch::run_batch;
use dialscan_core::config::ExtractionConfig;
use dialscan_core::contacts_from_detections;
use dialscan_core::error::DialscanError;
use dialscan_core::model::{ContactRecord, Detection, NameStrength};
use dialscan_core::ocr::OcrEngine;
use dialscan_core::ContactExtractor;
use image::DynamicImage;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// A 1000px-wide screenshot splits into a 780px name column and a 320px
// phone column starting at x=680.
const WIDTH: u32 = 1000;
const HEIGHT: u32 = 900;
const NAME_COLUMN: u32 = 780;
const PHONE_COLUMN: u32 = 320;

#[derive(Default)]
struct MockEngine {
    by_width: HashMap<u32, Vec<Detection>>,
    calls: AtomicUsize,
    fail: bool,
}

impl MockEngine {
    fn new(names: Vec<Detection>, phones: Vec<Detection>) -> Self {
        let mut by_width = HashMap::new();
        by_width.insert(NAME_COLUMN, names);
        by_width.insert(PHONE_COLUMN, phones);
        MockEngine {
            by_width,
            ..MockEngine::default()
        }
    }

    fn failing() -> Self {
        MockEngine {
            fail: true,
            ..MockEngine::default()
        }
    }
}

impl OcrEngine for MockEngine {
    fn detect(&self, image: &DynamicImage) -> Result<Vec<Detection>, DialscanError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(DialscanError::OcrFailed("engine crashed".into()));
        }
        Ok(self.by_width.get(&image.width()).cloned().unwrap_or_default())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

/// A word box `height` 30 whose vertical center is `cy`.
fn det(text: &str, x: f64, cy: f64) -> Detection {
    Detection::from_rect(text, x, cy - 15.0, 100.0, 30.0, 90.0)
}

fn screenshot() -> DynamicImage {
    DynamicImage::new_rgb8(WIDTH, HEIGHT)
}

fn extractor(engine: MockEngine) -> (ContactExtractor, Arc<MockEngine>) {
    let engine = Arc::new(engine);
    let extractor = ContactExtractor::new(engine.clone(), ExtractionConfig::default());
    (extractor, engine)
}

fn contact(name: &str, phone: &str) -> ContactRecord {
    ContactRecord {
        name: name.into(),
        phone: phone.into(),
    }
}

// ---------------------------------------------------------------------------
// Test 1: Name with embedded digits after the marker, phone split in fragments
// ---------------------------------------------------------------------------
#[test]
fn marker_name_pairs_with_phone_on_same_row() {
    let (ex, _) = extractor(MockEngine::new(
        vec![det("John", 20.0, 200.0), det("∼ Doe 9876543210", 130.0, 200.0)],
        vec![
            det("+91", 10.0, 200.0),
            det("98765", 60.0, 201.0),
            det("43210", 180.0, 199.0),
        ],
    ));

    let contacts = ex.extract_from_image(screenshot()).unwrap();

    assert_eq!(contacts, vec![contact("Doe", "+919876543210")]);
}

// ---------------------------------------------------------------------------
// Test 2: A full contact list with header, status lines and duplicates
// ---------------------------------------------------------------------------
#[test]
fn contact_list_with_noise() {
    let (ex, _) = extractor(MockEngine::new(
        vec![
            det("Search", 20.0, 40.0),
            det("~Priya", 20.0, 120.0),
            det("Sharma", 140.0, 122.0),
            det("Hey there! I am using WhatsApp.", 20.0, 160.0),
            det("~ Ravi K", 20.0, 280.0),
            det("last seen today", 20.0, 320.0),
            det("Meena Traders", 20.0, 440.0),
        ],
        vec![
            det("12:45", 200.0, 40.0),
            det("+91 98765 43210", 10.0, 121.0),
            det("91234 56789", 10.0, 281.0),
            // Same number again further down: dropped.
            det("+91 98765 43210", 10.0, 600.0),
            det("70000 00001", 10.0, 441.0),
        ],
    ));

    let contacts = ex.extract_from_image(screenshot()).unwrap();

    assert_eq!(
        contacts,
        vec![
            contact("Priya Sharma", "+919876543210"),
            contact("Ravi K", "+919123456789"),
            contact("Meena Traders", "+917000000001"),
        ]
    );
}

// ---------------------------------------------------------------------------
// Test 3: Two phones share a lone name line
// ---------------------------------------------------------------------------
#[test]
fn lone_name_line_is_reused() {
    let (ex, _) = extractor(MockEngine::new(
        vec![det("~Family Group", 20.0, 300.0)],
        vec![det("9876543210", 10.0, 320.0), det("9123456789", 10.0, 400.0)],
    ));

    let contacts = ex.extract_from_image(screenshot()).unwrap();

    assert_eq!(
        contacts,
        vec![
            contact("Family Group", "+919876543210"),
            contact("Family Group", "+919123456789"),
        ]
    );
}

// ---------------------------------------------------------------------------
// Test 4: No phones -> empty, and the name column is never OCR'd
// ---------------------------------------------------------------------------
#[test]
fn no_phone_detections_short_circuits() {
    let (ex, engine) = extractor(MockEngine::new(vec![det("~Asha", 20.0, 100.0)], vec![]));

    let contacts = ex.extract_from_image(screenshot()).unwrap();

    assert!(contacts.is_empty());
    assert_eq!(engine.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn invalid_phone_lines_yield_nothing() {
    let (ex, _) = extractor(MockEngine::new(
        vec![det("~Asha", 20.0, 100.0)],
        vec![det("98765 4321", 10.0, 110.0), det("Yesterday", 10.0, 200.0)],
    ));

    assert!(ex.extract_from_image(screenshot()).unwrap().is_empty());
}

#[test]
fn junk_name_lines_yield_nothing() {
    let (ex, engine) = extractor(MockEngine::new(
        vec![
            det("Search", 20.0, 40.0),
            det("~ Online", 20.0, 100.0),
            det("Available", 20.0, 200.0),
        ],
        vec![det("9876543210", 10.0, 110.0)],
    ));

    assert!(ex.extract_from_image(screenshot()).unwrap().is_empty());
    assert_eq!(engine.calls.load(Ordering::SeqCst), 2);
}

// ---------------------------------------------------------------------------
// Test 5: Wide screenshots are downscaled before OCR
// ---------------------------------------------------------------------------
#[test]
fn wide_screenshot_is_downscaled() {
    // 2000px -> 1100px: name column 858px, phone column 1100 - 748 = 352px.
    let mut by_width = HashMap::new();
    by_width.insert(858, vec![det("~Asha", 20.0, 100.0)]);
    by_width.insert(352, vec![det("9876543210", 10.0, 120.0)]);
    let engine = MockEngine {
        by_width,
        ..MockEngine::default()
    };
    let (ex, _) = extractor(engine);

    let contacts = ex
        .extract_from_image(DynamicImage::new_rgb8(2000, 1200))
        .unwrap();

    assert_eq!(contacts, vec![contact("Asha", "+919876543210")]);
}

// ---------------------------------------------------------------------------
// Test 6: Inspection exposes lines and candidates without associating
// ---------------------------------------------------------------------------
#[test]
fn inspect_reports_both_columns() {
    let (ex, engine) = extractor(MockEngine::new(
        vec![det("Anita", 20.0, 100.0), det("~Verma", 130.0, 400.0)],
        vec![det("phone", 10.0, 100.0)],
    ));

    let inspection = ex.inspect(screenshot()).unwrap();

    assert_eq!(engine.calls.load(Ordering::SeqCst), 2);
    assert_eq!(inspection.split.phone.x, 680);
    assert_eq!(inspection.phone_lines.len(), 1);
    assert_eq!(inspection.phone_lines[0].fragments[0].left_x, 690.0);
    assert!(inspection.phones.is_empty());
    assert_eq!(inspection.names.len(), 2);
    assert_eq!(inspection.names[0].strength, NameStrength::Weak);
    assert_eq!(inspection.names[1].strength, NameStrength::Strong);
}

// ---------------------------------------------------------------------------
// Test 7: Detection-level entry point
// ---------------------------------------------------------------------------
#[test]
fn contacts_from_detections_matches_pipeline() {
    let names = vec![det("John ~ Doe 9876543210", 0.0, 150.0)];
    let phones = vec![det("+91 98765 43210", 0.0, 150.0)];

    let contacts = contacts_from_detections(&names, &phones, &ExtractionConfig::default());

    assert_eq!(contacts, vec![contact("Doe", "+919876543210")]);
}

#[test]
fn name_beyond_max_gap_is_not_used() {
    let names = vec![det("~Asha", 0.0, 100.0)];
    let phones = vec![det("9876543210", 0.0, 271.0)];

    let contacts = contacts_from_detections(&names, &phones, &ExtractionConfig::default());
    assert!(contacts.is_empty());

    let config = ExtractionConfig {
        max_gap: 200.0,
        ..ExtractionConfig::default()
    };
    let contacts = contacts_from_detections(&names, &phones, &config);
    assert_eq!(contacts, vec![contact("Asha", "+919876543210")]);
}

// ---------------------------------------------------------------------------
// Test 8: File entry point and batch handling
// ---------------------------------------------------------------------------
fn write_png(dir: &tempfile::TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    screenshot().save(&path).unwrap();
    path
}

fn write_garbage(dir: &tempfile::TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, b"definitely not an image").unwrap();
    path
}

fn single_contact_engine() -> MockEngine {
    MockEngine::new(
        vec![det("~Asha", 20.0, 100.0)],
        vec![det("9876543210", 10.0, 120.0)],
    )
}

#[test]
fn undecodable_image_yields_empty_result() {
    let dir = tempfile::tempdir().unwrap();
    let bad = write_garbage(&dir, "broken.png");
    let (ex, engine) = extractor(single_contact_engine());

    assert!(ex.extract_contacts(&bad).unwrap().is_empty());
    assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn batch_tags_rows_with_source_file() {
    let dir = tempfile::tempdir().unwrap();
    let paths = vec![
        write_png(&dir, "first.png"),
        write_garbage(&dir, "broken.png"),
        write_png(&dir, "second.png"),
    ];
    let (ex, _) = extractor(single_contact_engine());

    let report = run_batch(&ex, &paths).unwrap();

    assert_eq!(report.images, 3);
    assert_eq!(report.contacts, 2);
    assert_eq!(report.failed, 0);
    let sources: Vec<_> = report.rows.iter().map(|r| r.source_file.as_str()).collect();
    assert_eq!(sources, vec!["first.png", "second.png"]);
    assert_eq!(report.rows[0].name, "Asha");
    assert_eq!(report.rows[0].mobile, "+919876543210");
}

#[test]
fn batch_counts_failures_and_reports_empty() {
    let dir = tempfile::tempdir().unwrap();
    let paths = vec![write_png(&dir, "a.png"), write_png(&dir, "b.png")];
    let (ex, engine) = extractor(MockEngine::failing());

    let result = run_batch(&ex, &paths);

    assert!(matches!(
        result,
        Err(DialscanError::EmptyBatch {
            images: 2,
            failed: 2
        })
    ));
    assert_eq!(engine.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn empty_batch_is_an_error() {
    let (ex, _) = extractor(single_contact_engine());
    let paths: Vec<PathBuf> = Vec::new();

    assert!(matches!(
        run_batch(&ex, &paths),
        Err(DialscanError::EmptyBatch { images: 0, .. })
    ));
}
