// In: src/config.rs

//! The single source of truth for antijoin configuration.
//!
//! `AntijoinConfig` is built once at the application boundary (from code, a JSON
//! document, or the Python bindings) and handed to an `Antijoiner`. It is plain
//! data: cheap to copy and safe to share across threads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AntijoinError;

//==================================================================================
// I. Core Configuration Enums
//==================================================================================

/// Controls whether elements whose derived key is absent are kept in the
/// complements or dropped from the result.
///
/// Absent-key elements never take part in matching, whatever the policy.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NullValuePolicy {
    /// **Default:** drop absent-key elements from both complements.
    #[default]
    RetainNone,
    /// Keep left absent-key elements, appended to the left complement.
    RetainLeft,
    /// Keep right absent-key elements, appended to the right complement.
    RetainRight,
    /// Keep both sides' absent-key elements.
    RetainFull,
}

impl NullValuePolicy {
    pub const ALL: [NullValuePolicy; 4] = [
        NullValuePolicy::RetainNone,
        NullValuePolicy::RetainLeft,
        NullValuePolicy::RetainRight,
        NullValuePolicy::RetainFull,
    ];

    pub fn retains_left(self) -> bool {
        matches!(self, NullValuePolicy::RetainLeft | NullValuePolicy::RetainFull)
    }

    pub fn retains_right(self) -> bool {
        matches!(self, NullValuePolicy::RetainRight | NullValuePolicy::RetainFull)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NullValuePolicy::RetainNone => "retain_none",
            NullValuePolicy::RetainLeft => "retain_left",
            NullValuePolicy::RetainRight => "retain_right",
            NullValuePolicy::RetainFull => "retain_full",
        }
    }
}

impl fmt::Display for NullValuePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the snake_case names used by serde as well as the upper-case
/// constant spelling (`RETAIN_LEFT`).
impl FromStr for NullValuePolicy {
    type Err = AntijoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retain_none" | "none" => Ok(NullValuePolicy::RetainNone),
            "retain_left" | "left" => Ok(NullValuePolicy::RetainLeft),
            "retain_right" | "right" => Ok(NullValuePolicy::RetainRight),
            "retain_full" | "full" => Ok(NullValuePolicy::RetainFull),
            other => Err(AntijoinError::InvalidConfig(format!(
                "unknown null value policy '{}'",
                other
            ))),
        }
    }
}

/// Selects which engine an `Antijoiner` runs.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum JoinVariant {
    /// **Default:** order- and duplicate-preserving engine with full null policy support.
    #[default]
    List,
    /// Duplicate-free engine. Only `NullValuePolicy::RetainNone` is supported.
    Set,
}

impl fmt::Display for JoinVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinVariant::List => f.write_str("list"),
            JoinVariant::Set => f.write_str("set"),
        }
    }
}

//==================================================================================
// II. The Unified AntijoinConfig
//==================================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct AntijoinConfig {
    #[serde(default)]
    pub null_policy: NullValuePolicy,

    #[serde(default)]
    pub variant: JoinVariant,

    /// If true, every call logs its `AntijoinStats` at `info` level instead of `debug`.
    #[serde(default)]
    pub log_stats: bool,
}

impl AntijoinConfig {
    pub fn new(null_policy: NullValuePolicy) -> Self {
        Self {
            null_policy,
            ..Self::default()
        }
    }

    pub fn with_variant(mut self, variant: JoinVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_log_stats(mut self, log_stats: bool) -> Self {
        self.log_stats = log_stats;
        self
    }

    /// Rejects combinations the engines cannot honour.
    pub fn validate(&self) -> Result<(), AntijoinError> {
        if self.variant == JoinVariant::Set && self.null_policy != NullValuePolicy::RetainNone {
            return Err(AntijoinError::UnsupportedPolicy {
                policy: self.null_policy,
                variant: self.variant,
            });
        }
        Ok(())
    }

    /// Parses and validates a config from a JSON document. Missing fields take
    /// their defaults.
    pub fn from_json(json: &str) -> Result<Self, AntijoinError> {
        let config: AntijoinConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, AntijoinError> {
        Ok(serde_json::to_string(self)?)
    }
}
