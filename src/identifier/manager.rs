use super::{generate, validate, Identifier};
use crate::config::IdentifierConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink, LogSink};
use crate::domain::{self, DomainResolver};
use crate::error::ConfigError;
use crate::host::{ForwardedHost, HostResolver};
use crate::http::{Cookie, HttpRequest, HttpResponse};
use crate::random::{OsRandom, RandomSource};
use std::time::SystemTime;

/// Issues and recognises identifier cookies.
///
/// Holds no per-request state, so a single manager can serve concurrent
/// requests.
pub struct IdentifierManager {
    config: IdentifierConfig,
    random: Box<dyn RandomSource>,
    domains: Box<dyn DomainResolver>,
    hosts: Box<dyn HostResolver>,
    diagnostics: Box<dyn DiagnosticSink>,
}

impl IdentifierManager {
    pub fn new<D>(config: IdentifierConfig, domains: D) -> Result<Self, ConfigError>
    where
        D: DomainResolver + 'static,
    {
        config.validate()?;
        Ok(Self {
            config,
            random: Box::new(OsRandom),
            domains: Box::new(domains),
            hosts: Box::new(ForwardedHost),
            diagnostics: Box::new(LogSink),
        })
    }

    pub fn with_random<R: RandomSource + 'static>(mut self, random: R) -> Self {
        self.random = Box::new(random);
        self
    }

    pub fn with_host_resolver<H: HostResolver + 'static>(mut self, hosts: H) -> Self {
        self.hosts = Box::new(hosts);
        self
    }

    pub fn with_diagnostics<S: DiagnosticSink + 'static>(mut self, diagnostics: S) -> Self {
        self.diagnostics = Box::new(diagnostics);
        self
    }

    pub fn config(&self) -> &IdentifierConfig {
        &self.config
    }

    /// Whether the request carries a valid identifier cookie.
    pub fn has_identifier(&self, request: &HttpRequest) -> bool {
        request
            .cookie(&self.config.cookie_name)
            .map_or(false, |value| validate(value, self.config.id_len))
    }

    /// Returns the request's identifier, issuing a new one if it has none.
    ///
    /// A fresh identifier is written to `response` as a `Set-Cookie` and
    /// attached to `request`, so a second call on the same request returns the
    /// same value without writing again. If the random source fails the
    /// sentinel [`Identifier::fail`] is returned and nothing is written.
    pub fn get_or_create(&self, request: &mut HttpRequest, response: &mut HttpResponse) -> Identifier {
        let name = &self.config.cookie_name;

        if let Some(value) = request.cookie(name) {
            if validate(value, self.config.id_len) {
                return Identifier(value.clone());
            }
            self.diagnostics.emit(&Diagnostic::InvalidCookie {
                name: name.clone(),
                value: value.clone(),
            });
        }

        let id = match generate(self.random.as_ref(), self.config.id_len) {
            Ok(id) => id,
            Err(e) => {
                self.diagnostics.emit(&Diagnostic::RandomSourceFailed {
                    error: e.to_string(),
                });
                return Identifier::fail();
            }
        };

        let host = self.hosts.resolve_host(request).unwrap_or_default();
        let mut cookie = Cookie::new(name, id.as_str()).with_domain(&self.cookie_domain(&host));
        if let Some(expires) = SystemTime::now().checked_add(self.config.max_age) {
            cookie = cookie.with_expires(expires);
        }

        response.add_cookie(&cookie);
        request.attach_cookie(name, id.as_str());

        log::debug!("issued browserid cookie for host {:?}", host);
        id
    }

    /// The `Domain` attribute for an identifier cookie set on `host`; empty
    /// means host-only.
    pub fn cookie_domain(&self, host: &str) -> String {
        domain::cookie_domain(host, self.domains.as_ref(), self.diagnostics.as_ref())
    }
}
