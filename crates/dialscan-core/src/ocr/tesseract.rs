use image::DynamicImage;
use std::path::PathBuf;
use std::process::Command;

use crate::error::DialscanError;
use crate::model::Detection;
use crate::ocr::OcrEngine;

/// OCR backend that shells out to the `tesseract` CLI.
///
/// Uses sparse-text page segmentation and TSV output, one detection per word.
pub struct TesseractEngine {
    executable: PathBuf,
    language: String,
}

impl TesseractEngine {
    pub fn new() -> Self {
        TesseractEngine {
            executable: PathBuf::from("tesseract"),
            language: "eng".into(),
        }
    }

    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = executable.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Check if the configured executable runs.
    pub fn is_available(&self) -> bool {
        Command::new(&self.executable)
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    /// Build an engine, failing early when tesseract cannot be run.
    pub fn locate() -> Result<Self, DialscanError> {
        let engine = match std::env::var_os("TESSERACT_PATH") {
            Some(path) => TesseractEngine::new().with_executable(path),
            None => TesseractEngine::new(),
        };
        if !engine.is_available() {
            return Err(DialscanError::TesseractNotFound);
        }
        tracing::info!(executable = %engine.executable.display(), "using tesseract");
        Ok(engine)
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrEngine for TesseractEngine {
    fn detect(&self, image: &DynamicImage) -> Result<Vec<Detection>, DialscanError> {
        let input = tempfile::Builder::new().suffix(".png").tempfile()?;
        image
            .save(input.path())
            .map_err(|e| DialscanError::OcrFailed(format!("failed to write OCR input: {e}")))?;

        let output = Command::new(&self.executable)
            .arg(input.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .arg("--psm")
            .arg("11")
            .arg("tsv")
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    DialscanError::TesseractNotFound
                } else {
                    DialscanError::OcrFailed(format!("tesseract failed to start: {e}"))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(DialscanError::TesseractFailed { code, stderr });
        }

        Ok(parse_tsv(&String::from_utf8_lossy(&output.stdout)))
    }

    fn backend_name(&self) -> &str {
        "tesseract"
    }
}

/// Parse tesseract TSV output into word-level detections.
///
/// Columns: level, page_num, block_num, par_num, line_num, word_num,
/// left, top, width, height, conf, text. Only level-5 (word) rows with
/// non-blank text are kept.
fn parse_tsv(tsv: &str) -> Vec<Detection> {
    let mut out = Vec::new();

    for row in tsv.lines().skip(1) {
        let fields: Vec<&str> = row.splitn(12, '\t').collect();
        if fields.len() < 12 || fields[0] != "5" {
            continue;
        }

        let text = fields[11].trim();
        if text.is_empty() {
            continue;
        }

        let nums: Option<Vec<f64>> = fields[6..10].iter().map(|f| f.parse().ok()).collect();
        let Some(nums) = nums else {
            continue;
        };
        let conf: f32 = fields[10].parse().unwrap_or(-1.0);

        out.push(Detection::from_rect(
            text, nums[0], nums[1], nums[2], nums[3], conf,
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point;

    const SAMPLE: &str = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext
1\t1\t0\t0\t0\t0\t0\t0\t320\t900\t-1\t
4\t1\t1\t1\t1\t0\t12\t88\t250\t30\t-1\t
5\t1\t1\t1\t1\t1\t12\t88\t110\t30\t95.51\t+91
5\t1\t1\t1\t1\t2\t130\t90\t120\t28\t91.2\t98765
5\t1\t1\t1\t1\t3\t260\t90\t60\t28\t-1\t \t
5\t1\t2\t1\t1\t1\t15\t300\t80\t26\t88\tJohn Doe
";

    #[test]
    fn test_parse_tsv_words_only() {
        let dets = parse_tsv(SAMPLE);
        let texts: Vec<_> = dets.iter().map(|d| d.text.as_str()).collect();
        assert_eq!(texts, vec!["+91", "98765", "John Doe"]);
    }

    #[test]
    fn test_parse_tsv_rectangle_polygon() {
        let dets = parse_tsv(SAMPLE);
        assert_eq!(
            dets[1].bounding_region,
            vec![
                Point::new(130.0, 90.0),
                Point::new(250.0, 90.0),
                Point::new(250.0, 118.0),
                Point::new(130.0, 118.0),
            ]
        );
        assert_eq!(dets[1].confidence, 91.2);
    }

    #[test]
    fn test_parse_tsv_skips_malformed_rows() {
        let tsv = "header\n5\t1\t1\t1\t1\t1\tx\t0\t10\t10\t90\tword\n5\t1\n";
        assert!(parse_tsv(tsv).is_empty());
    }

    #[test]
    fn test_parse_tsv_empty() {
        assert!(parse_tsv("").is_empty());
    }
}
