use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub mod cookie;
pub mod request;
pub mod response;
pub mod status;

pub use cookie::Cookie;
pub use request::{HttpRequest, ParseError};
pub use response::HttpResponse;
pub use status::StatusCode;

#[derive(Debug, Clone, PartialEq)]
pub struct HttpVersion {
    pub major: u8,
    pub minor: u8,
}

impl Default for HttpVersion {
    fn default() -> Self {
        HttpVersion { major: 1, minor: 1 }
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP/{}.{}", self.major, self.minor)
    }
}

impl FromStr for HttpVersion {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let version_part = s.strip_prefix("HTTP/").ok_or(())?;
        let (major, minor) = version_part.split_once('.').ok_or(())?;
        match (major.parse(), minor.parse()) {
            (Ok(major), Ok(minor)) => Ok(HttpVersion { major, minor }),
            _ => Err(()),
        }
    }
}

/// Header map keyed by lowercase header name.
pub type Headers = HashMap<String, String>;
