//! Text extraction from uploaded legal documents.
//!
//! Dispatches on the lowercased file extension and normalizes every format
//! into the same `ParsedDocument` shape. All extraction runs on in-memory
//! buffers; nothing touches the filesystem.

mod docx;
mod pdf;
mod txt;

use thiserror::Error;

/// Extensions accepted by `extract_file`, used in error messages.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[".txt", ".docx", ".pdf"];

/// Documents with fewer whitespace-delimited tokens than this are rejected.
pub const MIN_WORD_COUNT: usize = 10;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: .{0}. Only TXT, DOCX, and PDF files are allowed.")]
    UnsupportedType(String),
    #[error("DOCX extraction failed: {0}")]
    Docx(String),
    #[error("PDF extraction failed: {0}")]
    Pdf(String),
    #[error("Document content is empty")]
    Empty,
    #[error("Document is too short for meaningful analysis (found {found} words, need at least {MIN_WORD_COUNT})")]
    TooShort { found: usize },
}

/// Normalized extraction result for every supported input path.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub content: String,
    pub word_count: usize,
    pub filename: Option<String>,
}

/// Count whitespace-delimited tokens after trimming.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Extract plain text from uploaded file bytes, dispatching by extension.
///
/// The minimum-length floor applies here as well as to pasted text, so a
/// ten-byte upload fails the same way a ten-byte paste does.
pub fn extract_file(bytes: &[u8], filename: &str) -> Result<ParsedDocument, ExtractionError> {
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();

    let text = match ext.as_str() {
        "txt" => txt::extract_txt(bytes),
        "docx" => docx::extract_docx(bytes)?,
        "pdf" => pdf::extract_pdf(bytes)?,
        other => return Err(ExtractionError::UnsupportedType(other.to_string())),
    };

    tracing::debug!(filename, ext = %ext, chars = text.len(), "extracted document text");

    let parsed = validate(text)?;
    Ok(ParsedDocument {
        filename: Some(filename.to_string()),
        ..parsed
    })
}

/// Validate pasted text and compute its word count.
pub fn parse_text(text: &str) -> Result<ParsedDocument, ExtractionError> {
    validate(text.trim().to_string())
}

fn validate(content: String) -> Result<ParsedDocument, ExtractionError> {
    let content = content.trim().to_string();
    if content.is_empty() {
        return Err(ExtractionError::Empty);
    }

    let word_count = count_words(&content);
    if word_count < MIN_WORD_COUNT {
        return Err(ExtractionError::TooShort { found: word_count });
    }

    Ok(ParsedDocument {
        content,
        word_count,
        filename: None,
    })
}
