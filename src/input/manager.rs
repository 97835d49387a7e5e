//! Input manager for loading documents from disk

use crate::error::{Result, SummarizerError};
use crate::input::format::DocumentFormat;
use log::info;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

/// One loaded document: the raw bytes plus the resolved format hint.
///
/// The bytes are what the hosted summarizer receives; the extractor consumes
/// the same bytes to build the paragraph sequence.
#[derive(Debug, Clone)]
pub struct DocumentSource {
    pub name: String,
    pub bytes: Vec<u8>,
    pub format: DocumentFormat,
}

pub struct InputManager {
    cache: HashMap<String, DocumentSource>,
    enable_cache: bool,
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Load a document into memory, resolving its format from the explicit
    /// hint if given, otherwise from the file extension.
    pub async fn load(&mut self, path: &Path, format_hint: Option<&str>) -> Result<DocumentSource> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached) = self.cache.get(&path_str) {
                info!("Using cached document for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        if !path.exists() {
            return Err(SummarizerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let format = match format_hint {
            Some(hint) => DocumentFormat::from_hint(hint)?,
            None => self.detect_format(path)?,
        };

        info!("Reading {} document: {}", format, path.display());
        let bytes = fs::read(path).await.map_err(SummarizerError::Io)?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path_str.clone());

        let source = DocumentSource { name, bytes, format };

        if self.enable_cache {
            self.cache.insert(path_str, source.clone());
        }

        Ok(source)
    }

    fn detect_format(&self, path: &Path) -> Result<DocumentFormat> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                SummarizerError::InvalidInput(format!("File has no extension: {}", path.display()))
            })?;

        DocumentFormat::from_hint(extension)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
