pub mod compare;
pub mod parse;
pub mod profiles;

use cotiza_core::config::{self, CompareOptions};
use cotiza_core::error::CotizaError;
use cotiza_core::extraction::pdftotext::PdftotextExtractor;
use cotiza_core::extraction::PdfExtractor;
use std::path::Path;

/// Reads PDFs through pdftotext and passes pre-extracted text files through.
pub struct InputExtractor {
    pdf: PdftotextExtractor,
}

impl InputExtractor {
    pub fn new() -> Self {
        Self {
            pdf: PdftotextExtractor::new(),
        }
    }
}

impl Default for InputExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for InputExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, CotizaError> {
        if bytes.starts_with(b"%PDF") {
            return self.pdf.extract_text(bytes);
        }
        String::from_utf8(bytes.to_vec())
            .map_err(|_| CotizaError::Extraction("neither a PDF nor UTF-8 text".into()))
    }

    fn backend_name(&self) -> &str {
        "pdftotext+text"
    }
}

pub fn load_options(config: Option<&Path>) -> Result<CompareOptions, CotizaError> {
    match config {
        Some(path) => config::load_options(path),
        None => Ok(CompareOptions::default()),
    }
}

/// Name shown for a file in tables and diagnostics.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
