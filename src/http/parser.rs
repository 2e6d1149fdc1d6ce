use crate::http::request::Method;

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    InvalidRequest,
    InvalidMethod,
    InvalidEncoding,
}

/// First line of an HTTP request, split into its tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLine<'a> {
    pub method: Method,
    /// Request target, query string included.
    pub target: &'a str,
    pub version: Option<&'a str>,
}

impl<'a> RequestLine<'a> {
    /// Request target with any query string removed.
    pub fn path(&self) -> &'a str {
        match self.target.split_once('?') {
            Some((path, _)) => path,
            None => self.target,
        }
    }
}

/// Tokenizes the request line of a (possibly partial) request.
///
/// Only the bytes up to the first line break are inspected, so headers and
/// body never influence the result. A payload without a line break is
/// treated as a bare request line.
pub fn parse_request_line(buf: &[u8]) -> Result<RequestLine<'_>, ParseError> {
    let line_end = buf.iter().position(|&b| b == b'\n').unwrap_or(buf.len());
    let line = &buf[..line_end];
    let line = line.strip_suffix(b"\r").unwrap_or(line);

    let line = std::str::from_utf8(line).map_err(|_| ParseError::InvalidEncoding)?;
    let mut parts = line.split_whitespace();

    let method_str = parts.next().ok_or(ParseError::InvalidRequest)?;
    let target = parts.next().ok_or(ParseError::InvalidRequest)?;
    let version = parts.next();

    if parts.next().is_some() {
        return Err(ParseError::InvalidRequest);
    }

    let method = Method::from_str(method_str).ok_or(ParseError::InvalidMethod)?;

    Ok(RequestLine {
        method,
        target,
        version,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let line = parse_request_line(b"GET /on HTTP/1.1\r\nHost: example.com\r\n\r\n").unwrap();

        assert_eq!(line.method, Method::GET);
        assert_eq!(line.target, "/on");
        assert_eq!(line.version, Some("HTTP/1.1"));
    }

    #[test]
    fn query_string_stripped_from_path() {
        let line = parse_request_line(b"GET /off?x=1 HTTP/1.1\r\n").unwrap();
        assert_eq!(line.target, "/off?x=1");
        assert_eq!(line.path(), "/off");
    }

    #[test]
    fn http09_style_line_has_no_version() {
        let line = parse_request_line(b"GET /").unwrap();
        assert_eq!(line.version, None);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_request_line(b""), Err(ParseError::InvalidRequest));
        assert_eq!(parse_request_line(b"hello"), Err(ParseError::InvalidRequest));
        assert_eq!(
            parse_request_line(b"FETCH / HTTP/1.1\r\n"),
            Err(ParseError::InvalidMethod)
        );
        assert_eq!(
            parse_request_line(b"GET /\xff HTTP/1.1\r\n"),
            Err(ParseError::InvalidEncoding)
        );
    }
}
