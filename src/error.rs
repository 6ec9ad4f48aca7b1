use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: unknown directive `{name}`")]
    UnknownDirective { line: usize, name: String },

    #[error("line {line}: directive `{directive}` requires a value")]
    MissingValue { line: usize, directive: String },

    #[error("line {line}: invalid number `{value}`")]
    InvalidNumber { line: usize, value: String },

    #[error("line {line}: invalid duration `{value}`")]
    InvalidDuration { line: usize, value: String },

    #[error("line {line}: invalid switch `{value}`, expected on or off")]
    InvalidSwitch { line: usize, value: String },

    #[error("line {line}: unbalanced braces")]
    UnbalancedBraces { line: usize },

    #[error("line {line}: unexpected block `{name}`")]
    UnexpectedBlock { line: usize, name: String },

    #[error("invalid cookie name `{0}`")]
    InvalidCookieName(String),

    #[error("identifier length must be between 1 and {max} bytes, got {len}")]
    InvalidIdLen { len: usize, max: usize },

    #[error("max age must be non-zero and at most {max_secs} seconds")]
    InvalidMaxAge { max_secs: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostParseError {
    #[error("missing port in address")]
    MissingPort,

    #[error("too many colons in address")]
    TooManyColons,

    #[error("missing ']' in address")]
    MissingBracket,

    #[error("unexpected bracket in address")]
    UnexpectedBracket,

    #[error("not a valid host name")]
    InvalidHostname,
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("no registrable domain for `{0}`")]
    NotRegistrable(String),

    #[error("no public suffix list configured")]
    Unavailable,

    #[error("failed to load public suffix list: {0}")]
    Load(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum RandomError {
    #[error("random source failed: {0}")]
    Source(#[from] rand::Error),

    #[error("random source unavailable: {0}")]
    Unavailable(String),
}
