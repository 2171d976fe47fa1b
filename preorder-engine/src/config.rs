//! Report configuration
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | LOG_LEVEL | info | tracing filter directive |
//! | LOG_JSON | false | JSON log lines instead of text |
//! | LOG_DIR | (unset) | daily rolling log files when the directory exists |
//! | SALE_FILE | sale.json | sale document read when no path is given |
//! | OVER_ALLOCATION_POLICY | tolerate | `tolerate` or `strict` |

use std::fmt;
use std::str::FromStr;

use crate::utils::PreorderError;

/// What to do with a bread whose kibbutz allocations exceed its stock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverAllocationPolicy {
    /// Empty general pool, warning logged
    #[default]
    Tolerate,
    /// Fail the report
    Strict,
}

impl FromStr for OverAllocationPolicy {
    type Err = PreorderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tolerate" | "" => Ok(Self::Tolerate),
            "strict" => Ok(Self::Strict),
            other => Err(PreorderError::Config(format!(
                "unknown over-allocation policy '{other}', expected 'tolerate' or 'strict'"
            ))),
        }
    }
}

impl fmt::Display for OverAllocationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tolerate => f.write_str("tolerate"),
            Self::Strict => f.write_str("strict"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    pub sale_file: String,
    pub over_allocation: OverAllocationPolicy,
}

impl Config {
    /// Load from environment variables, falling back to defaults
    ///
    /// Only an unparseable `OVER_ALLOCATION_POLICY` is an error.
    pub fn from_env() -> Result<Self, PreorderError> {
        let over_allocation = match std::env::var("OVER_ALLOCATION_POLICY") {
            Ok(value) => value.parse()?,
            Err(_) => OverAllocationPolicy::default(),
        };

        Ok(Self {
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            sale_file: std::env::var("SALE_FILE").unwrap_or_else(|_| "sale.json".into()),
            over_allocation,
        })
    }

    /// Fixed configuration, independent of the environment
    ///
    /// Used by tests
    pub fn with_overrides(sale_file: impl Into<String>, over_allocation: OverAllocationPolicy) -> Self {
        Self {
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
            sale_file: sale_file.into(),
            over_allocation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;

    #[test]
    fn test_policy_parse() {
        assert_eq!("strict".parse::<OverAllocationPolicy>().unwrap(), OverAllocationPolicy::Strict);
        assert_eq!(" Strict ".parse::<OverAllocationPolicy>().unwrap(), OverAllocationPolicy::Strict);
        assert_eq!("tolerate".parse::<OverAllocationPolicy>().unwrap(), OverAllocationPolicy::Tolerate);
        assert_eq!("".parse::<OverAllocationPolicy>().unwrap(), OverAllocationPolicy::Tolerate);

        let err = "lenient".parse::<OverAllocationPolicy>().unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConfigInvalid);
    }

    #[test]
    fn test_policy_display_round_trips() {
        for policy in [OverAllocationPolicy::Tolerate, OverAllocationPolicy::Strict] {
            assert_eq!(policy.to_string().parse::<OverAllocationPolicy>().unwrap(), policy);
        }
    }

    #[test]
    fn test_overrides() {
        let config = Config::with_overrides("/tmp/sale.json", OverAllocationPolicy::Strict);
        assert_eq!(config.sale_file, "/tmp/sale.json");
        assert_eq!(config.over_allocation, OverAllocationPolicy::Strict);
        assert!(config.log_dir.is_none());
    }
}
