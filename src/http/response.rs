use super::{Cookie, Headers, HttpVersion, StatusCode};
use std::collections::HashMap;
use std::time::SystemTime;

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub version: HttpVersion,
    pub status: StatusCode,
    pub headers: Headers,
    /// Rendered `Set-Cookie` values, one header line each.
    pub set_cookies: Vec<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: StatusCode) -> Self {
        let mut headers = HashMap::new();
        headers.insert("server".to_string(), "browserid/0.1".to_string());
        headers.insert("date".to_string(), httpdate::fmt_http_date(SystemTime::now()));

        Self {
            version: HttpVersion::default(),
            status,
            headers,
            set_cookies: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn ok() -> Self {
        Self::new(StatusCode::Ok)
    }

    pub fn bad_request() -> Self {
        let mut response = Self::new(StatusCode::BadRequest);
        response.set_body(b"400 Bad Request\n");
        response.set_header("content-type", "text/plain");
        response
    }

    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_lowercase(), value.to_string());
    }

    pub fn set_body(&mut self, body: &[u8]) {
        self.body = body.to_vec();
        self.set_header("content-length", &self.body.len().to_string());
    }

    pub fn set_body_string(&mut self, body: &str) {
        self.set_body(body.as_bytes());
    }

    pub fn add_cookie(&mut self, cookie: &Cookie) {
        self.set_cookies.push(cookie.to_header_value());
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut response = Vec::new();

        let status_line = format!("{} {}\r\n", self.version, self.status);
        response.extend_from_slice(status_line.as_bytes());

        for (name, value) in &self.headers {
            let header_line = format!("{}: {}\r\n", name, value);
            response.extend_from_slice(header_line.as_bytes());
        }

        for cookie in &self.set_cookies {
            let header_line = format!("set-cookie: {}\r\n", cookie);
            response.extend_from_slice(header_line.as_bytes());
        }

        response.extend_from_slice(b"\r\n");
        response.extend_from_slice(&self.body);

        response
    }
}

impl Default for HttpResponse {
    fn default() -> Self {
        Self::new(StatusCode::Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_line_per_cookie() {
        let mut response = HttpResponse::ok();
        response.add_cookie(&Cookie::new("a", "1"));
        response.add_cookie(&Cookie::new("b", "2"));
        response.set_body_string("hi");

        let text = String::from_utf8(response.to_bytes()).unwrap();
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("set-cookie: a=1; Path=/\r\n"));
        assert!(text.contains("set-cookie: b=2; Path=/\r\n"));
        assert!(text.contains("content-length: 2\r\n"));
        assert!(text.ends_with("\r\n\r\nhi"));
    }
}
