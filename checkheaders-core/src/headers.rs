use std::borrow::Cow;

use http::{HeaderMap, HeaderName, Request, request::Parts};

/// Trait for extracting headers from a subject
pub trait HasHeaders {
    fn headers(&self) -> &HeaderMap;

    /// First value of `name`, or an empty string when the header is absent.
    ///
    /// Lookup is case-insensitive. Bytes that are not valid UTF-8 are
    /// replaced rather than discarded, so a present header never reads as absent.
    fn header_value(&self, name: &HeaderName) -> Cow<'_, str> {
        self.headers()
            .get(name)
            .map(|value| String::from_utf8_lossy(value.as_bytes()))
            .unwrap_or(Cow::Borrowed(""))
    }
}

impl HasHeaders for HeaderMap {
    fn headers(&self) -> &HeaderMap {
        self
    }
}

impl HasHeaders for Parts {
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl<B> HasHeaders for Request<B> {
    fn headers(&self) -> &HeaderMap {
        Request::headers(self)
    }
}

impl<T> HasHeaders for &T
where
    T: HasHeaders + ?Sized,
{
    fn headers(&self) -> &HeaderMap {
        (**self).headers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn lookup_is_case_insensitive() {
        let request = Request::builder()
            .header("X-Forwarded-Tls-Client-Cert-Info", "cert")
            .body(())
            .unwrap();
        let name = HeaderName::from_static("x-forwarded-tls-client-cert-info");
        assert_eq!(request.header_value(&name), "cert");
    }

    #[test]
    fn absent_header_reads_empty() {
        let headers = HeaderMap::new();
        let name = HeaderName::from_static("x-missing");
        assert_eq!(headers.header_value(&name), "");
    }

    #[test]
    fn first_value_wins() {
        let mut headers = HeaderMap::new();
        headers.append("x-multi", HeaderValue::from_static("first"));
        headers.append("x-multi", HeaderValue::from_static("second"));
        let name = HeaderName::from_static("x-multi");
        assert_eq!(headers.header_value(&name), "first");
    }

    #[test]
    fn opaque_bytes_are_read_lossily() {
        let mut headers = HeaderMap::new();
        headers.insert("x-bytes", HeaderValue::from_bytes(b"ab\xffcd").unwrap());
        let name = HeaderName::from_static("x-bytes");
        assert_eq!(headers.header_value(&name), "ab\u{fffd}cd");
    }
}
