pub mod pdftotext;

use crate::error::CotizaError;

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract the text layer of a PDF. Pages are separated by blank lines.
    fn extract_text(&self, pdf_bytes: &[u8]) -> Result<String, CotizaError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
