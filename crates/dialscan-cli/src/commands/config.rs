use dialscan_core::config::{load_config, ExtractionConfig};
use dialscan_core::error::DialscanError;
use std::path::PathBuf;

/// Load the config file if given, otherwise the built-in defaults.
pub fn resolve(path: Option<PathBuf>) -> Result<ExtractionConfig, DialscanError> {
    match path {
        Some(path) => load_config(&path),
        None => Ok(ExtractionConfig::default()),
    }
}

pub fn show(path: Option<PathBuf>) -> Result<(), DialscanError> {
    let config = resolve(path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
