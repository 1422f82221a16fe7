//! Percent-decoding of header values.

use std::borrow::Cow;

/// Decodes `value` with query-string unescape semantics.
///
/// `+` becomes a space and every `%XX` sequence is replaced by the byte it
/// encodes. Returns `None` when an escape is malformed (a `%` not followed by
/// two hex digits). Decoded bytes that are not valid UTF-8 are replaced with
/// U+FFFD, leaving the surrounding text matchable.
///
/// ```
/// use checkheaders_core::decode::url_decode;
///
/// assert_eq!(url_decode("CN%3Dcommon-name").as_deref(), Some("CN=common-name"));
/// assert_eq!(url_decode("a+b").as_deref(), Some("a b"));
/// assert_eq!(url_decode("CN%3DM%FCller").as_deref(), Some("CN=M\u{FFFD}ller"));
/// assert_eq!(url_decode("100%"), None);
/// ```
pub fn url_decode(value: &str) -> Option<String> {
    if !has_valid_escapes(value.as_bytes()) {
        return None;
    }
    let spaced: Cow<'_, str> = if value.contains('+') {
        Cow::Owned(value.replace('+', " "))
    } else {
        Cow::Borrowed(value)
    };
    let bytes = urlencoding::decode_binary(spaced.as_bytes());
    Some(String::from_utf8_lossy(&bytes).into_owned())
}

/// Decodes `value`, falling back to the raw input when decoding fails.
pub(crate) fn url_decode_or_raw(value: &str) -> Cow<'_, str> {
    match url_decode(value) {
        Some(decoded) => Cow::Owned(decoded),
        None => Cow::Borrowed(value),
    }
}

fn has_valid_escapes(bytes: &[u8]) -> bool {
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            match (bytes.get(i + 1), bytes.get(i + 2)) {
                (Some(hi), Some(lo)) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => {
                    i += 3;
                    continue;
                }
                _ => return false,
            }
        }
        i += 1;
    }
    true
}
