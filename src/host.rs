use crate::http::HttpRequest;

/// Determines the client-facing host of a request.
pub trait HostResolver: Send + Sync {
    fn resolve_host(&self, request: &HttpRequest) -> Option<String>;
}

/// Prefers `X-Forwarded-Host` set by a fronting proxy, falling back to `Host`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ForwardedHost;

impl HostResolver for ForwardedHost {
    fn resolve_host(&self, request: &HttpRequest) -> Option<String> {
        request
            .forwarded_host()
            .map(str::to_string)
            .or_else(|| request.host().cloned())
    }
}

/// Uses the `Host` header only.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostHeader;

impl HostResolver for HostHeader {
    fn resolve_host(&self, request: &HttpRequest) -> Option<String> {
        request.host().cloned()
    }
}
