use crate::error::DialscanError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Layout constants for contact-list screenshots.
///
/// All distances are in pixels of the (possibly downscaled) working image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Fraction of the image width where the name column ends.
    pub name_column_end: f64,
    /// Fraction of the image width where the phone column starts.
    pub phone_column_start: f64,
    pub name_line_tolerance: f64,
    pub phone_line_tolerance: f64,
    /// Maximum distance a name line may sit above its phone line.
    pub max_gap: f64,
    /// Step used to bucket name-line positions when detecting reuse.
    pub collision_bucket: f64,
    /// Images wider than this are downscaled before OCR.
    pub max_width: Option<u32>,
    /// Dialing prefix without the `+`.
    pub country_code: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        ExtractionConfig {
            name_column_end: 0.78,
            phone_column_start: 0.68,
            name_line_tolerance: 24.0,
            phone_line_tolerance: 26.0,
            max_gap: 170.0,
            collision_bucket: 5.0,
            max_width: Some(1100),
            country_code: "91".into(),
        }
    }
}

/// Load a config from a JSON file. Missing fields take their defaults.
pub fn load_config(path: &Path) -> Result<ExtractionConfig, DialscanError> {
    let content = std::fs::read_to_string(path).map_err(|e| DialscanError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config: ExtractionConfig =
        serde_json::from_str(&content).map_err(|e| DialscanError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse a config from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<ExtractionConfig, DialscanError> {
    let config: ExtractionConfig = serde_json::from_str(json)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &ExtractionConfig) -> Result<(), DialscanError> {
    for (name, value) in [
        ("name_column_end", config.name_column_end),
        ("phone_column_start", config.phone_column_start),
    ] {
        if value.is_nan() || value <= 0.0 || value > 1.0 {
            return Err(DialscanError::ConfigInvalid(format!(
                "{name} must be in (0, 1], got {value}"
            )));
        }
    }

    if config.phone_column_start >= config.name_column_end {
        return Err(DialscanError::ConfigInvalid(format!(
            "phone_column_start ({}) must be left of name_column_end ({}) so the columns overlap",
            config.phone_column_start, config.name_column_end
        )));
    }

    for (name, value) in [
        ("name_line_tolerance", config.name_line_tolerance),
        ("phone_line_tolerance", config.phone_line_tolerance),
        ("max_gap", config.max_gap),
        ("collision_bucket", config.collision_bucket),
    ] {
        if value.is_nan() || value <= 0.0 {
            return Err(DialscanError::ConfigInvalid(format!(
                "{name} must be positive, got {value}"
            )));
        }
    }

    if config.max_width == Some(0) {
        return Err(DialscanError::ConfigInvalid(
            "max_width must be positive".into(),
        ));
    }

    if config.country_code.is_empty() || !config.country_code.chars().all(|c| c.is_ascii_digit())
    {
        return Err(DialscanError::ConfigInvalid(format!(
            "country_code must be digits only, got '{}'",
            config.country_code
        )));
    }

    Ok(())
}
