use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DialscanError {
    #[error("failed to decode image {path}: {reason}")]
    ImageDecode { path: PathBuf, reason: String },

    #[error("OCR failed: {0}")]
    OcrFailed(String),

    #[error("tesseract not found. Install it: brew install tesseract (macOS) or apt install tesseract-ocr (Linux)")]
    TesseractNotFound,

    #[error("tesseract failed with exit code {code}: {stderr}")]
    TesseractFailed { code: i32, stderr: String },

    #[error("failed to load config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("unsupported output file {path}: use a .csv or .json extension")]
    UnsupportedExport { path: PathBuf },

    #[error("0 contacts extracted from {images} image(s) ({failed} failed). Try a smaller batch or check screenshot clarity")]
    EmptyBatch { images: usize, failed: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
