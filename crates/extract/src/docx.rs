use std::io::{Cursor, Read};

use zip::ZipArchive;

use super::ExtractionError;

/// Extract text from DOCX bytes.
///
/// A DOCX is a zip container; the visible body lives in `word/document.xml`.
pub fn extract_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::Docx(format!("not a valid DOCX container: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractionError::Docx(format!("missing word/document.xml: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractionError::Docx(format!("could not read document body: {e}")))?;

    Ok(document_text(&xml))
}

/// Pull visible text out of the WordprocessingML body: `<w:t>` runs carry the
/// characters, `<w:tab/>` and `<w:br/>` are whitespace, `</w:p>` ends a paragraph.
fn document_text(xml: &str) -> String {
    let mut out = String::new();
    let mut rest = xml;
    let mut in_text_run = false;

    while let Some(open) = rest.find('<') {
        if in_text_run {
            out.push_str(&decode_entities(&rest[..open]));
        }
        let Some(close) = rest[open..].find('>') else {
            break;
        };
        let tag = &rest[open + 1..open + close];
        let name = tag
            .trim_end_matches('/')
            .split_whitespace()
            .next()
            .unwrap_or("");
        match name {
            // Self-closing <w:t/> carries no run content.
            "w:t" => in_text_run = !tag.ends_with('/'),
            "/w:t" => in_text_run = false,
            "w:tab" => out.push('\t'),
            "w:br" | "w:cr" => out.push('\n'),
            "/w:p" => out.push('\n'),
            _ => {}
        }
        rest = &rest[open + close + 1..];
    }

    out
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn docx_with_body(body_xml: &str) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><w:document><w:body>{body_xml}</w:body></w:document>"#
        );
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn extracts_paragraph_runs() {
        let bytes = docx_with_body(
            "<w:p><w:r><w:t>This agreement is binding</w:t></w:r></w:p>\
             <w:p><w:r><w:t>on both named parties.</w:t></w:r></w:p>",
        );
        let text = extract_docx(&bytes).unwrap();
        assert_eq!(text, "This agreement is binding\non both named parties.\n");
    }

    #[test]
    fn preserves_space_attribute_runs_and_tabs() {
        let bytes = docx_with_body(
            r#"<w:p><w:r><w:t xml:space="preserve">Rent: </w:t><w:tab/><w:t>$1,500</w:t></w:r></w:p>"#,
        );
        let text = extract_docx(&bytes).unwrap();
        assert_eq!(text, "Rent: \t$1,500\n");
    }

    #[test]
    fn decodes_xml_entities() {
        let bytes = docx_with_body("<w:p><w:t>Smith &amp; Sons &lt;LLC&gt;</w:t></w:p>");
        let text = extract_docx(&bytes).unwrap();
        assert_eq!(text.trim(), "Smith & Sons <LLC>");
    }

    #[test]
    fn non_zip_bytes_are_rejected() {
        let err = extract_docx(b"plain text pretending to be docx").unwrap_err();
        assert!(err.to_string().contains("DOCX"));
    }

    #[test]
    fn zip_without_document_xml_is_rejected() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("unrelated.txt", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"nope").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let err = extract_docx(&bytes).unwrap_err();
        assert!(err.to_string().contains("word/document.xml"));
    }
}
