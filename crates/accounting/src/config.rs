//! Engine policies.
//!
//! The defaults reproduce the permissive behavior users are used to: garbage
//! numbers read as zero, a dangling tax reference means 0% tax, and a line with
//! both debit and credit set is a debit. Each policy can be tightened
//! independently through the environment.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use tallybook_core::{DomainError, NumericPolicy};

pub const ENV_NUMERIC_POLICY: &str = "TALLYBOOK_NUMERIC_POLICY";
pub const ENV_MISSING_TAX_RATE: &str = "TALLYBOOK_MISSING_TAX_RATE";
pub const ENV_BALANCE_CONFLICT: &str = "TALLYBOOK_BALANCE_CONFLICT";

/// What to do with a line whose `taxRateId` is not in the lookup table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingTaxRatePolicy {
    /// Compute the line at 0% tax.
    #[default]
    Zero,
    /// Refuse to submit the voucher.
    Reject,
}

impl FromStr for MissingTaxRatePolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero" => Ok(Self::Zero),
            "reject" => Ok(Self::Reject),
            other => Err(DomainError::validation(format!(
                "unknown missing tax rate policy '{other}' (expected zero or reject)"
            ))),
        }
    }
}

/// What to do with a line that has both a positive debit and a positive credit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceConflictPolicy {
    /// Classify the line as a debit.
    #[default]
    Debit,
    /// Refuse to submit the voucher.
    Reject,
}

impl FromStr for BalanceConflictPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debit" => Ok(Self::Debit),
            "reject" => Ok(Self::Reject),
            other => Err(DomainError::validation(format!(
                "unknown balance conflict policy '{other}' (expected debit or reject)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub numeric: NumericPolicy,
    pub missing_tax_rate: MissingTaxRatePolicy,
    pub balance_conflict: BalanceConflictPolicy,
}

impl EngineConfig {
    /// Every policy at its strictest setting.
    pub fn strict() -> Self {
        Self {
            numeric: NumericPolicy::Strict,
            missing_tax_rate: MissingTaxRatePolicy::Reject,
            balance_conflict: BalanceConflictPolicy::Reject,
        }
    }

    /// Read policies from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Read policies through `var`; unknown values keep the default.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            numeric: read_policy(&var, ENV_NUMERIC_POLICY, defaults.numeric),
            missing_tax_rate: read_policy(&var, ENV_MISSING_TAX_RATE, defaults.missing_tax_rate),
            balance_conflict: read_policy(&var, ENV_BALANCE_CONFLICT, defaults.balance_conflict),
        }
    }
}

fn read_policy<T>(var: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr<Err = DomainError> + core::fmt::Debug,
{
    let Some(raw) = var(key) else {
        return default;
    };
    match raw.parse() {
        Ok(policy) => policy,
        Err(err) => {
            tracing::warn!(key, %err, ?default, "ignoring invalid engine policy");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_permissive_defaults() {
        let cfg = EngineConfig::from_vars(vars(&[]));
        assert_eq!(cfg, EngineConfig::default());
        assert_eq!(cfg.numeric, NumericPolicy::Lenient);
        assert_eq!(cfg.missing_tax_rate, MissingTaxRatePolicy::Zero);
        assert_eq!(cfg.balance_conflict, BalanceConflictPolicy::Debit);
    }

    #[test]
    fn each_policy_is_read_independently() {
        let cfg = EngineConfig::from_vars(vars(&[
            (ENV_NUMERIC_POLICY, "strict"),
            (ENV_BALANCE_CONFLICT, "REJECT"),
        ]));
        assert_eq!(cfg.numeric, NumericPolicy::Strict);
        assert_eq!(cfg.missing_tax_rate, MissingTaxRatePolicy::Zero);
        assert_eq!(cfg.balance_conflict, BalanceConflictPolicy::Reject);
    }

    #[test]
    fn invalid_values_fall_back_to_default() {
        let cfg = EngineConfig::from_vars(vars(&[(ENV_MISSING_TAX_RATE, "maybe")]));
        assert_eq!(cfg.missing_tax_rate, MissingTaxRatePolicy::Zero);
    }

    #[test]
    fn strict_profile_tightens_everything() {
        let cfg = EngineConfig::strict();
        assert_eq!(cfg.numeric, NumericPolicy::Strict);
        assert_eq!(cfg.missing_tax_rate, MissingTaxRatePolicy::Reject);
        assert_eq!(cfg.balance_conflict, BalanceConflictPolicy::Reject);
    }
}
