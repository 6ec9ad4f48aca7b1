use crate::error::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DAY_SECS: u64 = 24 * 60 * 60;
const YEAR_SECS: u64 = 365 * DAY_SECS;

/// Largest accepted identifier length in bytes.
pub const MAX_ID_LEN: usize = 1024;
/// Largest accepted cookie lifetime; keeps `Expires` inside the HTTP date range.
pub const MAX_MAX_AGE: Duration = Duration::from_secs(1000 * YEAR_SECS);

/// Settings for issuing identifier cookies.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierConfig {
    pub cookie_name: String,
    pub max_age: Duration,
    /// Number of random bytes per identifier.
    pub id_len: usize,
}

impl Default for IdentifierConfig {
    fn default() -> Self {
        Self {
            cookie_name: "z".to_string(),
            max_age: Duration::from_secs(10 * YEAR_SECS),
            id_len: 16,
        }
    }
}

impl IdentifierConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cookie_name.is_empty() || !self.cookie_name.bytes().all(is_token_byte) {
            return Err(ConfigError::InvalidCookieName(self.cookie_name.clone()));
        }
        if self.id_len == 0 || self.id_len > MAX_ID_LEN {
            return Err(ConfigError::InvalidIdLen {
                len: self.id_len,
                max: MAX_ID_LEN,
            });
        }
        if self.max_age.is_zero() || self.max_age > MAX_MAX_AGE {
            return Err(ConfigError::InvalidMaxAge {
                max_secs: MAX_MAX_AGE.as_secs(),
            });
        }
        Ok(())
    }
}

// RFC 6265 cookie-name is an RFC 2616 token.
fn is_token_byte(b: u8) -> bool {
    b.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?={}".contains(&b)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub identifier: IdentifierConfig,
    pub public_suffix_list: Option<PathBuf>,
    pub trust_forwarded_host: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            identifier: IdentifierConfig::default(),
            public_suffix_list: None,
            trust_forwarded_host: true,
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        let mut brace_level = 0;
        let mut last_line = 0;

        for (index, line) in content.lines().enumerate() {
            let line_no = index + 1;
            last_line = line_no;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(name) = line.strip_suffix('{') {
                let name = name.trim();
                if brace_level != 0 || name != "browserid" {
                    return Err(ConfigError::UnexpectedBlock {
                        line: line_no,
                        name: name.to_string(),
                    });
                }
                brace_level = 1;
                continue;
            }

            if line == "}" {
                if brace_level == 0 {
                    return Err(ConfigError::UnbalancedBraces { line: line_no });
                }
                brace_level -= 1;
                continue;
            }

            if brace_level == 0 {
                return Err(ConfigError::UnexpectedBlock {
                    line: line_no,
                    name: line.to_string(),
                });
            }

            Self::parse_directive(&mut config, line, line_no)?;
        }

        if brace_level != 0 {
            return Err(ConfigError::UnbalancedBraces { line: last_line });
        }

        config.identifier.validate()?;
        Ok(config)
    }

    fn parse_directive(config: &mut Config, line: &str, line_no: usize) -> Result<(), ConfigError> {
        let line = line.trim_end_matches(';');
        let mut parts = line.split_whitespace();
        let directive = parts.next().unwrap_or_default();
        let value = parts.next().ok_or_else(|| ConfigError::MissingValue {
            line: line_no,
            directive: directive.to_string(),
        })?;

        match directive {
            "cookie_name" => {
                config.identifier.cookie_name = value.to_string();
            }
            "max_age" => {
                config.identifier.max_age = parse_duration(value).ok_or_else(|| {
                    ConfigError::InvalidDuration {
                        line: line_no,
                        value: value.to_string(),
                    }
                })?;
            }
            "id_len" => {
                config.identifier.id_len =
                    value.parse().map_err(|_| ConfigError::InvalidNumber {
                        line: line_no,
                        value: value.to_string(),
                    })?;
            }
            "public_suffix_list" => {
                config.public_suffix_list = Some(PathBuf::from(value));
            }
            "trust_forwarded_host" => {
                config.trust_forwarded_host = match value {
                    "on" => true,
                    "off" => false,
                    _ => {
                        return Err(ConfigError::InvalidSwitch {
                            line: line_no,
                            value: value.to_string(),
                        })
                    }
                };
            }
            _ => {
                return Err(ConfigError::UnknownDirective {
                    line: line_no,
                    name: directive.to_string(),
                })
            }
        }

        Ok(())
    }
}

/// Parses `3600`, `45s`, `30m`, `12h`, `7d` or `10y` (365-day years).
fn parse_duration(value: &str) -> Option<Duration> {
    let value = value.to_lowercase();
    let (number, unit) = match value.char_indices().last()? {
        (i, c) if c.is_ascii_alphabetic() => (&value[..i], c),
        _ => (value.as_str(), 's'),
    };

    let multiplier = match unit {
        's' => 1,
        'm' => 60,
        'h' => 60 * 60,
        'd' => DAY_SECS,
        'y' => YEAR_SECS,
        _ => return None,
    };

    let number: u64 = number.parse().ok()?;
    number.checked_mul(multiplier).map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = IdentifierConfig::default();
        assert_eq!(config.cookie_name, "z");
        assert_eq!(config.id_len, 16);
        assert_eq!(config.max_age, Duration::from_secs(10 * 365 * 24 * 3600));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_full_block() {
        let content = r#"
# identifier cookie
browserid {
    cookie_name bid;
    max_age 30d;
    id_len 8;
    public_suffix_list /etc/psl.dat;
    trust_forwarded_host off;
}
"#;
        let config = Config::parse(content).unwrap();
        assert_eq!(config.identifier.cookie_name, "bid");
        assert_eq!(config.identifier.max_age, Duration::from_secs(30 * DAY_SECS));
        assert_eq!(config.identifier.id_len, 8);
        assert_eq!(config.public_suffix_list, Some(PathBuf::from("/etc/psl.dat")));
        assert!(!config.trust_forwarded_host);
    }

    #[test]
    fn empty_content_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn reports_line_numbers() {
        let err = Config::parse("browserid {\n  colour blue;\n}\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownDirective { line: 2, .. }));

        let err = Config::parse("browserid {\n  id_len sixteen;\n}\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { line: 2, .. }));

        let err = Config::parse("browserid {\n  max_age 3w;\n}\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDuration { line: 2, .. }));

        let err = Config::parse("browserid {\n  cookie_name;\n}\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingValue { line: 2, .. }));

        let err = Config::parse("browserid {\n  id_len 4;\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnbalancedBraces { .. }));
    }

    #[test]
    fn rejects_invalid_settings() {
        let err = Config::parse("browserid {\n  id_len 0;\n}\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidIdLen { len: 0, .. }));

        let config = IdentifierConfig {
            cookie_name: "bad name".to_string(),
            ..IdentifierConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidCookieName(_))));

        let config = IdentifierConfig {
            max_age: Duration::ZERO,
            ..IdentifierConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidMaxAge { .. })));
    }

    #[test]
    fn duration_units() {
        assert_eq!(parse_duration("3600"), Some(Duration::from_secs(3600)));
        assert_eq!(parse_duration("45s"), Some(Duration::from_secs(45)));
        assert_eq!(parse_duration("2h"), Some(Duration::from_secs(7200)));
        assert_eq!(parse_duration("10y"), Some(Duration::from_secs(10 * YEAR_SECS)));
        assert_eq!(parse_duration("y"), None);
        assert_eq!(parse_duration(""), None);
    }
}
