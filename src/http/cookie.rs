use crate::domain::is_valid_hostname;
use std::fmt::Write;
use std::time::SystemTime;

/// An outgoing cookie as written into a `Set-Cookie` header.
#[derive(Debug, Clone, PartialEq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub path: String,
    pub expires: Option<SystemTime>,
    /// `None` produces a host-only cookie.
    pub domain: Option<String>,
}

impl Cookie {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            path: "/".to_string(),
            expires: None,
            domain: None,
        }
    }

    pub fn with_expires(mut self, expires: SystemTime) -> Self {
        self.expires = Some(expires);
        self
    }

    /// Empty domains are treated as host-only.
    pub fn with_domain(mut self, domain: &str) -> Self {
        self.domain = if domain.is_empty() {
            None
        } else {
            Some(domain.to_string())
        };
        self
    }

    pub fn to_header_value(&self) -> String {
        let mut cookie = format!("{}={}", self.name, self.value);

        // Writing into a String cannot fail. A domain that is not a host name
        // is dropped, leaving a host-only cookie.
        if let Some(domain) = &self.domain {
            if is_valid_hostname(domain.trim_start_matches('.')) {
                let _ = write!(&mut cookie, "; Domain={}", domain);
            }
        }

        if !self.path.is_empty() {
            let _ = write!(&mut cookie, "; Path={}", self.path);
        }

        if let Some(expires) = self.expires {
            let _ = write!(&mut cookie, "; Expires={}", httpdate::fmt_http_date(expires));
        }

        cookie
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn renders_all_attributes() {
        let expires = UNIX_EPOCH + Duration::from_secs(784_111_777);
        let cookie = Cookie::new("z", "abcd")
            .with_domain(".example.com")
            .with_expires(expires);

        assert_eq!(
            cookie.to_header_value(),
            "z=abcd; Domain=.example.com; Path=/; Expires=Sun, 06 Nov 1994 08:49:37 GMT"
        );
    }

    #[test]
    fn invalid_domain_is_not_rendered() {
        let cookie = Cookie::new("z", "abcd").with_domain(".com;Max-Age=0;y.com");
        assert_eq!(cookie.to_header_value(), "z=abcd; Path=/");
    }

    #[test]
    fn empty_domain_is_host_only() {
        let cookie = Cookie::new("z", "abcd").with_domain("");
        assert_eq!(cookie.domain, None);
        assert_eq!(cookie.to_header_value(), "z=abcd; Path=/");
    }
}
