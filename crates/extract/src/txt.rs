/// Decode plain text, falling back to lossy conversion for non-UTF-8 bytes.
pub fn extract_txt(bytes: &[u8]) -> String {
    String::from_utf8(bytes.to_vec())
        .unwrap_or_else(|_| String::from_utf8_lossy(bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_utf8() {
        assert_eq!(extract_txt("señor lessee".as_bytes()), "señor lessee");
    }

    #[test]
    fn lossy_fallback_for_invalid_bytes() {
        let text = extract_txt(&[0x48, 0x69, 0xFF]);
        assert!(text.starts_with("Hi"));
    }
}
