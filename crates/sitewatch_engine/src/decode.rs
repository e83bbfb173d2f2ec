use chardetng::EncodingDetector;
use encoding_rs::Encoding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBody {
    pub text: String,
    pub encoding_label: &'static str,
    /// True when malformed sequences were replaced with U+FFFD.
    pub had_errors: bool,
}

/// Decode a response body to text: BOM, then Content-Type charset, then
/// chardetng detection.
///
/// Never fails. Malformed input is replaced deterministically so the same
/// bytes always yield the same text and therefore the same fingerprint.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> DecodedBody {
    let encoding = Encoding::for_bom(bytes)
        .map(|(enc, _)| enc)
        .or_else(|| {
            content_type
                .and_then(charset_from_content_type)
                .and_then(|label| Encoding::for_label(label.as_bytes()))
        })
        .unwrap_or_else(|| {
            let mut detector = EncodingDetector::new();
            detector.feed(bytes, true);
            detector.guess(None, true)
        });

    // `decode` strips a matching BOM and handles UTF-16 sniffing for us.
    let (text, used, had_errors) = encoding.decode(bytes);
    DecodedBody {
        text: text.into_owned(),
        encoding_label: used.name(),
        had_errors,
    }
}

fn charset_from_content_type(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(['"', '\'']).to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respects_charset_header() {
        let decoded = decode_body(b"caf\xe9", Some("text/html; charset=ISO-8859-1"));
        assert_eq!(decoded.text, "caf\u{e9}");
        assert!(!decoded.had_errors);
    }

    #[test]
    fn charset_parameter_is_case_insensitive_and_unquoted() {
        assert_eq!(
            charset_from_content_type("text/html; Charset=\"UTF-8\"").as_deref(),
            Some("UTF-8")
        );
        assert_eq!(charset_from_content_type("text/html"), None);
    }

    #[test]
    fn bom_wins_over_header() {
        let decoded = decode_body(b"\xEF\xBB\xBFhello", Some("text/html; charset=ISO-8859-1"));
        assert_eq!(decoded.text, "hello");
        assert_eq!(decoded.encoding_label, "UTF-8");
    }

    #[test]
    fn malformed_utf8_is_replaced_not_rejected() {
        let decoded = decode_body(b"ok \xff\xfe end", Some("text/html; charset=utf-8"));
        assert!(decoded.had_errors);
        assert!(decoded.text.starts_with("ok "));
        assert!(decoded.text.contains('\u{FFFD}'));
        assert_eq!(
            decoded,
            decode_body(b"ok \xff\xfe end", Some("text/html; charset=utf-8"))
        );
    }

    #[test]
    fn plain_ascii_without_hints_decodes() {
        let decoded = decode_body(b"<p>Hello</p>", None);
        assert_eq!(decoded.text, "<p>Hello</p>");
    }
}
