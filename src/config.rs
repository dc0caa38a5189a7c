use crate::consts::{DEFAULT_CENTURY_BASE, DEFAULT_MAX_YEARS_AHEAD};
use serde::{Deserialize, Serialize};

/// Tunables for expiration validation.
///
/// Missing keys fall back to the defaults when deserialized, so a partial
/// config such as `{"maxYearsAhead": 10}` is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ValidationPolicy {
    /// Added to the two-digit year to get the full year
    pub century_base:    u16,
    /// Latest accepted year, relative to the current one (inclusive)
    pub max_years_ahead: u16,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            century_base:    DEFAULT_CENTURY_BASE,
            max_years_ahead: DEFAULT_MAX_YEARS_AHEAD,
        }
    }
}
