//! Document decoding: turns request payloads (data URLs / base64) into bytes
//! and dispatches text extraction by format.
//!
//! Decoding can fail and reports `ExtractionError`. Text extraction never fails:
//! unreadable documents yield an empty string.

pub mod text;

#[cfg(test)]
pub mod testing;

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("unsupported document type: {0}")]
    UnsupportedFormat(String),

    #[error("document is {size} bytes, limit is {limit} bytes")]
    TooLarge { size: usize, limit: usize },
}

/// Container formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentFormat {
    /// Detects a resume's format from its file name. Only `.pdf` and `.docx`
    /// are accepted; plain text is reachable through a MIME header only.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())?
            .to_lowercase();
        match extension.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    /// Detects the format from a data-URL header such as
    /// `data:application/pdf;base64`.
    pub fn from_mime_header(header: &str) -> Option<Self> {
        let header = header.to_lowercase();
        if header.contains("pdf") {
            Some(Self::Pdf)
        } else if header.contains("wordprocessingml") {
            Some(Self::Docx)
        } else if header.contains("text/plain") {
            Some(Self::PlainText)
        } else {
            None
        }
    }
}

/// A decoded request payload.
#[derive(Debug, Clone)]
pub struct DecodedPayload {
    /// Header of the data URL (`data:<mime>;base64`), if one was present.
    pub header: Option<String>,
    pub bytes: Vec<u8>,
}

/// Returns true when the value is a `data:` URL rather than inline text.
pub fn is_data_url(value: &str) -> bool {
    value.trim_start().starts_with("data:")
}

/// Decodes `data:<mime>;base64,<payload>` or a bare base64 string.
/// Whitespace inside the payload is ignored.
pub fn decode_payload(content: &str, limit: usize) -> Result<DecodedPayload, ExtractionError> {
    let content = content.trim();
    let (header, encoded) = match content.split_once(',') {
        Some((header, encoded)) if is_data_url(header) => (Some(header.to_string()), encoded),
        _ => (None, content),
    };

    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();

    // Decoded size is at most 3/4 of the encoded length.
    if compact.len() / 4 * 3 > limit {
        return Err(ExtractionError::TooLarge {
            size: compact.len() / 4 * 3,
            limit,
        });
    }

    let bytes = STANDARD.decode(compact.as_bytes())?;
    if bytes.len() > limit {
        return Err(ExtractionError::TooLarge {
            size: bytes.len(),
            limit,
        });
    }

    Ok(DecodedPayload { header, bytes })
}

/// Extracts plain text from a document. Returns an empty string on failure.
///
/// Parsing runs on the blocking pool: PDF and DOCX decoding is CPU-bound and
/// documents can be large.
pub async fn extract_text(bytes: Vec<u8>, format: DocumentFormat) -> String {
    match tokio::task::spawn_blocking(move || extract_blocking(&bytes, format)).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Text extraction task failed: {e}");
            String::new()
        }
    }
}

fn extract_blocking(bytes: &[u8], format: DocumentFormat) -> String {
    match format {
        DocumentFormat::Pdf => text::extract_pdf(bytes),
        DocumentFormat::Docx => text::extract_docx(bytes),
        DocumentFormat::PlainText => text::extract_plain(bytes),
    }
}
