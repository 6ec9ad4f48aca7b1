//! Soft-failure events raised while issuing identifiers.
//!
//! None of these abort a request. They are handed to a [`DiagnosticSink`]
//! chosen by the caller; [`LogSink`] forwards them to the `log` facade.

use log::Level;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A cookie with the identifier name was present but failed validation.
    InvalidCookie { name: String, value: String },
    /// The random source errored; the sentinel identifier was returned.
    RandomSourceFailed { error: String },
    /// The request host could not be split into host and port.
    MalformedHost { host: String, error: String },
    /// No registered domain could be found for the host.
    DomainUnresolved { host: String, error: String },
}

impl Diagnostic {
    pub fn level(&self) -> Level {
        match self {
            Diagnostic::RandomSourceFailed { .. } => Level::Error,
            _ => Level::Warn,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InvalidCookie { name, value } => {
                write!(f, "ignoring invalid browserid cookie {}={:?}", name, value)
            }
            Diagnostic::RandomSourceFailed { error } => {
                write!(f, "error generating browserid: {}", error)
            }
            Diagnostic::MalformedHost { host, error } => {
                write!(f, "error parsing host {:?}: {}", host, error)
            }
            Diagnostic::DomainUnresolved { host, error } => {
                write!(f, "error extracting base domain of {:?}: {}", host, error)
            }
        }
    }
}

pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: &Diagnostic);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        log::log!(diagnostic.level(), "{}", diagnostic);
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl DiagnosticSink for Silent {
    fn emit(&self, _diagnostic: &Diagnostic) {}
}
