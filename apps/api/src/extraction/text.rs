//! Format-specific text extractors. Each returns an empty string when the
//! document cannot be read.

use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};
use tracing::warn;

pub fn extract_pdf(bytes: &[u8]) -> String {
    // pdf-extract panics on some malformed inputs instead of returning Err.
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("Error reading PDF: {e}");
            String::new()
        }
        Err(_) => {
            warn!("PDF extractor panicked on malformed input");
            String::new()
        }
    }
}

pub fn extract_docx(bytes: &[u8]) -> String {
    let docx = match read_docx(bytes) {
        Ok(docx) => docx,
        Err(e) => {
            warn!("Error reading DOCX: {e:?}");
            return String::new();
        }
    };

    let mut paragraphs = Vec::new();
    for child in docx.document.children {
        if let DocumentChild::Paragraph(p) = child {
            let mut line = String::new();
            for child in p.children {
                if let ParagraphChild::Run(run) = child {
                    for run_child in run.children {
                        if let RunChild::Text(t) = run_child {
                            line.push_str(&t.text);
                        }
                    }
                }
            }
            paragraphs.push(line);
        }
    }
    paragraphs.join("\n")
}

pub fn extract_plain(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
