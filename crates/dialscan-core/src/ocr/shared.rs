use image::DynamicImage;
use std::sync::{Arc, Mutex, OnceLock};

use crate::error::DialscanError;
use crate::model::Detection;
use crate::ocr::{OcrEngine, TesseractEngine};

type EngineInit = Box<dyn Fn() -> Result<Arc<dyn OcrEngine>, DialscanError> + Send + Sync>;

/// An OCR engine built on first use and shared read-only afterwards.
///
/// Concurrent first callers wait for a single initialization. A failed
/// initialization is not cached; the next call retries.
pub struct SharedEngine {
    engine: OnceLock<Arc<dyn OcrEngine>>,
    init_lock: Mutex<()>,
    init: EngineInit,
}

impl SharedEngine {
    pub fn new<F>(init: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn OcrEngine>, DialscanError> + Send + Sync + 'static,
    {
        SharedEngine {
            engine: OnceLock::new(),
            init_lock: Mutex::new(()),
            init: Box::new(init),
        }
    }

    /// Lazily located tesseract backend.
    pub fn tesseract() -> Self {
        SharedEngine::new(|| Ok(Arc::new(TesseractEngine::locate()?) as Arc<dyn OcrEngine>))
    }

    pub fn is_initialized(&self) -> bool {
        self.engine.get().is_some()
    }

    /// The underlying engine, initializing it if needed.
    pub fn get(&self) -> Result<&Arc<dyn OcrEngine>, DialscanError> {
        if let Some(engine) = self.engine.get() {
            return Ok(engine);
        }

        // Held only while no engine is set; the guard protects no data.
        let _guard = self
            .init_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(engine) = self.engine.get() {
            return Ok(engine);
        }

        let engine = (self.init)()?;
        tracing::debug!(backend = engine.backend_name(), "OCR engine initialized");
        Ok(self.engine.get_or_init(|| engine))
    }
}

impl OcrEngine for SharedEngine {
    fn detect(&self, image: &DynamicImage) -> Result<Vec<Detection>, DialscanError> {
        self.get()?.detect(image)
    }

    fn backend_name(&self) -> &str {
        self.engine
            .get()
            .map(|e| e.backend_name())
            .unwrap_or("uninitialized")
    }
}
