//! Cookie domain scoping.
//!
//! Identifier cookies are scoped to the registered domain of the request host
//! (`.example.com` for `www.example.com`) so every subdomain shares them.
//! Local hosts, bare IP addresses and anything that cannot be resolved fall
//! back to a host-only cookie, signalled by an empty domain string.

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::{DomainError, HostParseError};
use publicsuffix::{List, Psl};
use std::fs;
use std::net::{IpAddr, Ipv6Addr};
use std::path::Path;

/// Maps a host name to its registered (eTLD+1) domain.
pub trait DomainResolver: Send + Sync {
    fn registered_domain(&self, host: &str) -> Result<String, DomainError>;
}

/// Resolver backed by the Public Suffix List.
pub struct PublicSuffixResolver {
    list: List,
}

impl PublicSuffixResolver {
    pub fn new(list: List) -> Self {
        Self { list }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DomainError> {
        let content = fs::read_to_string(path)?;
        Self::from_list_str(&content)
    }

    pub fn from_list_str(content: &str) -> Result<Self, DomainError> {
        let list: List = content
            .parse()
            .map_err(|e| DomainError::Load(format!("{}", e)))?;
        Ok(Self::new(list))
    }
}

impl DomainResolver for PublicSuffixResolver {
    fn registered_domain(&self, host: &str) -> Result<String, DomainError> {
        let host = host.trim_end_matches('.').to_lowercase();
        let registered = self
            .list
            .domain(host.as_bytes())
            .and_then(|domain| std::str::from_utf8(domain.as_bytes()).ok())
            .map(str::to_string);
        registered.ok_or(DomainError::NotRegistrable(host))
    }
}

impl<T: DomainResolver + ?Sized> DomainResolver for Box<T> {
    fn registered_domain(&self, host: &str) -> Result<String, DomainError> {
        (**self).registered_domain(host)
    }
}

/// Resolver used when no suffix list is available. Every cookie stays
/// host-only and no diagnostic is raised.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unscoped;

impl DomainResolver for Unscoped {
    fn registered_domain(&self, _host: &str) -> Result<String, DomainError> {
        Err(DomainError::Unavailable)
    }
}

/// Splits `host:port` or `[host]:port`. The port may be empty.
pub fn split_host_port(hostport: &str) -> Result<(&str, &str), HostParseError> {
    if let Some(rest) = hostport.strip_prefix('[') {
        let end = rest.find(']').ok_or(HostParseError::MissingBracket)?;
        let host = &rest[..end];
        let port = rest[end + 1..]
            .strip_prefix(':')
            .ok_or(HostParseError::MissingPort)?;
        if port.contains([':', '[', ']']) {
            return Err(HostParseError::TooManyColons);
        }
        return Ok((host, port));
    }

    let idx = hostport.rfind(':').ok_or(HostParseError::MissingPort)?;
    let (host, port) = (&hostport[..idx], &hostport[idx + 1..]);
    if host.contains(':') {
        return Err(HostParseError::TooManyColons);
    }
    if hostport.contains(['[', ']']) {
        return Err(HostParseError::UnexpectedBracket);
    }
    Ok((host, port))
}

/// Whether `host` is a DNS name made of letters, digits, `-` and `.`, with
/// no empty labels. A single trailing dot is allowed.
pub fn is_valid_hostname(host: &str) -> bool {
    let host = host.strip_suffix('.').unwrap_or(host);
    !host.is_empty()
        && host.len() <= 253
        && host.split('.').all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
        })
}

/// Computes the `Domain` attribute for a cookie set on `host`.
///
/// Returns an empty string for a host-only cookie.
pub fn cookie_domain(
    host: &str,
    resolver: &dyn DomainResolver,
    diagnostics: &dyn DiagnosticSink,
) -> String {
    let mut host = host;

    // A bare v6 literal has colons but no port.
    if host.contains(':') && host.parse::<Ipv6Addr>().is_err() {
        match split_host_port(host) {
            Ok((bare, _)) => host = bare,
            Err(e) => {
                diagnostics.emit(&Diagnostic::MalformedHost {
                    host: host.to_string(),
                    error: e.to_string(),
                });
                return String::new();
            }
        }
    }

    if host.is_empty() || host.eq_ignore_ascii_case("localhost") {
        return String::new();
    }

    if host.parse::<IpAddr>().is_ok() {
        return String::new();
    }

    // The host comes from request headers and ends up inside Set-Cookie.
    if !is_valid_hostname(host) {
        diagnostics.emit(&Diagnostic::MalformedHost {
            host: host.to_string(),
            error: HostParseError::InvalidHostname.to_string(),
        });
        return String::new();
    }

    match resolver.registered_domain(host) {
        Ok(registered) if is_valid_hostname(&registered) => format!(".{}", registered),
        Ok(registered) => {
            diagnostics.emit(&Diagnostic::DomainUnresolved {
                host: host.to_string(),
                error: format!("resolver returned invalid domain {:?}", registered),
            });
            String::new()
        }
        Err(DomainError::Unavailable) => String::new(),
        Err(e) => {
            diagnostics.emit(&Diagnostic::DomainUnresolved {
                host: host.to_string(),
                error: e.to_string(),
            });
            String::new()
        }
    }
}
