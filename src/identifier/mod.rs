//! Browser identifiers: random bytes carried in a cookie as lowercase hex.

use crate::error::RandomError;
use crate::random::RandomSource;
use std::fmt;

pub mod manager;

pub use manager::IdentifierManager;

/// Returned when an identifier could not be generated. Never valid as a
/// stored identifier.
pub const FAIL_ID: &str = "deadbeef0000000000000000deadbeef";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    pub fn fail() -> Self {
        Identifier(FAIL_ID.to_string())
    }

    pub fn is_fail(&self) -> bool {
        self.0 == FAIL_ID
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Checks whether a cookie value is a usable identifier of `id_len` bytes.
///
/// Rejects the empty string and [`FAIL_ID`]; otherwise the value must be
/// lowercase hex that decodes to exactly `id_len` bytes.
pub fn validate(value: &str, id_len: usize) -> bool {
    match value {
        "" | FAIL_ID => false,
        _ => value.len() == 2 * id_len && value.bytes().all(is_lower_hex),
    }
}

fn is_lower_hex(b: u8) -> bool {
    b.is_ascii_digit() || (b'a'..=b'f').contains(&b)
}

/// Draws `id_len` bytes from `random` and hex-encodes them.
pub fn generate(random: &dyn RandomSource, id_len: usize) -> Result<Identifier, RandomError> {
    let mut bytes = vec![0u8; id_len];
    random.fill(&mut bytes)?;
    Ok(Identifier(hex::encode(bytes)))
}
