use std::fs;
use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::Encoding;

use crate::LoadedText;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadError {
    #[error("could not read file: {message}")]
    Io { message: String },
    #[error("file is not decodable as text ({encoding})")]
    NotText { encoding: String },
}

/// Reads a file and decodes it as text. Extension hints on the picker side
/// are advisory only: whatever decodes cleanly is accepted.
pub fn read_text_file(path: &Path) -> Result<LoadedText, ReadError> {
    let bytes = fs::read(path).map_err(|err| ReadError::Io {
        message: err.to_string(),
    })?;
    let contents = decode_text(&bytes)?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(LoadedText { name, contents })
}

/// Decode raw bytes into UTF-8 using: BOM -> chardetng detection.
fn decode_text(bytes: &[u8]) -> Result<String, ReadError> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    decode_with(bytes, encoding)
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> Result<String, ReadError> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(ReadError::NotText {
            encoding: encoding.name().to_string(),
        });
    }
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::{decode_text, ReadError};

    #[test]
    fn plain_utf8_decodes() {
        assert_eq!(decode_text("hello".as_bytes()).unwrap(), "hello");
    }

    #[test]
    fn utf8_bom_is_honored_and_stripped() {
        let bytes = [0xEF, 0xBB, 0xBF, b'h', b'i'];
        assert_eq!(decode_text(&bytes).unwrap(), "hi");
    }

    #[test]
    fn utf16le_bom_is_honored() {
        let bytes = [0xFF, 0xFE, b'h', 0x00, b'i', 0x00];
        assert_eq!(decode_text(&bytes).unwrap(), "hi");
    }

    #[test]
    fn truncated_utf16_is_rejected() {
        // Lone trailing byte after the BOM cannot form a code unit.
        let bytes = [0xFF, 0xFE, b'h', 0x00, b'i'];
        assert!(matches!(
            decode_text(&bytes),
            Err(ReadError::NotText { .. })
        ));
    }
}
