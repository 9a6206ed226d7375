use super::ExtractionError;

/// Extract text from PDF bytes.
///
/// `pdf-extract` returns all text as one string; an Ok-but-empty result means
/// the file has no text layer (scanned/image-only), which gets its own
/// actionable message distinct from structural failures.
pub fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
        ExtractionError::Pdf(format!(
            "could not read PDF structure ({e}). The file may be corrupt or encrypted; \
             convert it to DOCX/TXT or paste the text instead."
        ))
    })?;

    if text.trim().is_empty() {
        return Err(ExtractionError::Pdf(
            "no extractable text found. The PDF appears to be a scanned/image-only file; \
             convert it to DOCX/TXT or paste the text instead."
                .to_string(),
        ));
    }

    Ok(text)
}
