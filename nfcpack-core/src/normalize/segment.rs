use unicode_normalization::{UnicodeNormalization, is_nfc};

use crate::error::{NfcError, Result};

/// Map one path component (or whole file name) to canonical composed
/// form (NFC). Pure and total: already-composed input comes back
/// unchanged, and so does the empty string.
pub fn normalize(segment: &str) -> String {
    if segment.is_empty() || is_nfc(segment) {
        return segment.to_owned();
    }
    segment.nfc().collect()
}

/// Verify the normalization tables compiled into this binary actually
/// compose a known decomposed sequence. Run once at startup, before any
/// file is accepted; a failure here is fatal for the whole tool.
pub fn self_check() -> Result<()> {
    let decomposed = "cafe\u{0301}";
    let composed = normalize(decomposed);
    if composed != "caf\u{e9}" {
        return Err(NfcError::NormalizationUnsupported(format!(
            "expected U+00E9, got {:?}",
            composed
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_decomposed_accent() {
        // "café.txt" with a combining acute on the e
        let nfd = "cafe\u{0301}.txt";
        let out = normalize(nfd);
        assert_eq!(out, "caf\u{e9}.txt");
        assert_ne!(out, nfd);
    }

    #[test]
    fn ascii_is_untouched() {
        assert_eq!(normalize("hello.txt"), "hello.txt");
    }

    #[test]
    fn empty_string_is_untouched() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn idempotent() {
        for s in ["cafe\u{0301}.txt", "caf\u{e9}.txt", "N\u{303}", "plain", ""] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn self_check_passes() {
        self_check().unwrap();
    }
}
