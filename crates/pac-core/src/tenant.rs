//! Tenant identity

use crate::error::{PacError, PacResult};
use crate::session::SessionPin;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Validated tenant identity.
///
/// Holds the id exactly as the caller supplied it (case included) so the
/// specialized script embeds it verbatim. Construction is the validation
/// boundary: everything downstream may assume canonical GUID form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantId(String);

/// Byte offsets of the hyphens in the 8-4-4-4-12 layout
const HYPHENS: [usize; 4] = [8, 13, 18, 23];

impl TenantId {
    /// Parse a canonical GUID (32 hex digits grouped 8-4-4-4-12,
    /// case-insensitive, hyphen-delimited).
    pub fn parse(value: &str) -> PacResult<Self> {
        // Uuid::try_parse also accepts simple, braced, and urn layouts;
        // require the hyphenated one before handing over hex validation.
        let bytes = value.as_bytes();
        let hyphenated = bytes.len() == 36
            && HYPHENS.iter().all(|&i| bytes[i] == b'-')
            && bytes.iter().filter(|&&b| b == b'-').count() == HYPHENS.len();
        if !hyphenated || Uuid::try_parse(value).is_err() {
            return Err(PacError::InvalidTenantId(value.to_owned()));
        }
        Ok(Self(value.to_owned()))
    }

    /// Tenant id as supplied
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identity embedded in a session-pinned script: `<tenant>_<pin>`
    pub fn pinned(&self, pin: &SessionPin) -> String {
        format!("{}_{}", self.0, pin.as_str())
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TenantId {
    type Err = PacError;

    fn from_str(s: &str) -> PacResult<Self> {
        Self::parse(s)
    }
}
