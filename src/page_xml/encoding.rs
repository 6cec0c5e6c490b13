//! Byte decoding for PAGE XML files.
//!
//! roxmltree parses `&str`, so documents declared in a legacy encoding
//! (`<?xml version="1.0" encoding="ISO-8859-1"?>`) are transcoded to UTF-8
//! first. A byte order mark wins over the declaration; with neither, the input
//! must be UTF-8.

use std::borrow::Cow;
use std::path::Path;
use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::bytes::Regex;

use crate::error::Page2OsdError;

static ENCODING_DECL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^<\?xml\s[^>]*?\bencoding\s*=\s*["']([A-Za-z0-9._:-]+)["']"#)
        .expect("valid encoding declaration regex")
});

/// Decode raw PAGE XML bytes to UTF-8.
///
/// `path` is only used in error messages.
pub fn decode_xml<'a>(bytes: &'a [u8], path: &Path) -> Result<Cow<'a, str>, Page2OsdError> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return decode_strict(encoding, &bytes[bom_len..], path);
    }

    let encoding = declared_encoding(bytes, path)?.unwrap_or(UTF_8);
    decode_strict(encoding, bytes, path)
}

/// The encoding named in the XML declaration, if there is one.
fn declared_encoding(
    bytes: &[u8],
    path: &Path,
) -> Result<Option<&'static Encoding>, Page2OsdError> {
    let Some(captures) = ENCODING_DECL_RE.captures(bytes) else {
        return Ok(None);
    };
    let label = &captures[1];

    // The declaration was readable as ASCII, so a UTF-16 label means UTF-8.
    match Encoding::for_label(label) {
        Some(encoding) => Ok(Some(encoding.output_encoding())),
        None => Err(Page2OsdError::XmlParse {
            path: path.to_path_buf(),
            message: format!(
                "unsupported encoding '{}' in XML declaration",
                String::from_utf8_lossy(label)
            ),
        }),
    }
}

fn decode_strict<'a>(
    encoding: &'static Encoding,
    bytes: &'a [u8],
    path: &Path,
) -> Result<Cow<'a, str>, Page2OsdError> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .ok_or_else(|| Page2OsdError::XmlParse {
            path: path.to_path_buf(),
            message: format!("input is not valid {}", encoding.name()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> Result<Cow<'_, str>, Page2OsdError> {
        decode_xml(bytes, Path::new("p.xml"))
    }

    #[test]
    fn utf8_without_declaration_is_borrowed() {
        let xml = "<PcGts>España</PcGts>";
        let decoded = decode(xml.as_bytes()).expect("decode");
        assert!(matches!(decoded, Cow::Borrowed(_)));
        assert_eq!(decoded, xml);
    }

    #[test]
    fn latin1_declaration_is_transcoded() {
        let mut bytes = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><a>Espa".to_vec();
        bytes.push(0xF1);
        bytes.extend_from_slice(b"a</a>");

        let decoded = decode(&bytes).expect("decode");
        assert!(decoded.ends_with("<a>España</a>"));
    }

    #[test]
    fn single_quoted_lowercase_label_is_accepted() {
        let mut bytes = b"<?xml version='1.0' encoding='latin1' standalone='yes'?><a>".to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(b"</a>");

        assert!(decode(&bytes).expect("decode").ends_with("<a>é</a>"));
    }

    #[test]
    fn bom_wins_over_declaration() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(
            "<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><a>ñ</a>".as_bytes(),
        );

        let decoded = decode(&bytes).expect("decode");
        assert!(decoded.starts_with("<?xml"));
        assert!(decoded.ends_with("<a>ñ</a>"));
    }

    #[test]
    fn invalid_utf8_is_parse_error() {
        let err = decode(b"<a>\xF1</a>").unwrap_err();
        assert!(matches!(err, Page2OsdError::XmlParse { .. }));
    }

    #[test]
    fn unknown_label_is_parse_error() {
        let err = decode(b"<?xml version=\"1.0\" encoding=\"x-klingon\"?><a/>").unwrap_err();
        assert!(err.to_string().contains("x-klingon"));
    }
}
