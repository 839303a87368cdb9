//! This module serves as the public API for the antijoin engines.
//!
//! It exposes the list-semantics engine (the general form, with full null
//! policy support) and the lighter set-semantics engine, plus `Antijoiner`, a
//! config-driven handle that picks between them.

use std::hash::Hash;

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// Order- and duplicate-preserving engine.
pub mod list;

/// Duplicate-free engine.
pub mod set;


//==================================================================================
// 2. Public API Re-exports
//==================================================================================

pub use self::list::{antijoin, antijoin_by, antijoin_slots, antijoin_with};
pub use self::set::{antijoin_set, antijoin_set_slots};

use crate::config::{AntijoinConfig, JoinVariant};
use crate::error::AntijoinError;
use crate::types::{AntijoinResult, SetAntijoinResult};

//==================================================================================
// 3. Config-driven Facade
//==================================================================================

/// The result of an `Antijoiner` run, shaped by the configured variant.
#[derive(Debug, Clone)]
pub enum AntijoinOutput<L, R>
where
    L: Eq + Hash,
    R: Eq + Hash,
{
    List(AntijoinResult<L, R>),
    Set(SetAntijoinResult<L, R>),
}

impl<L, R> AntijoinOutput<L, R>
where
    L: Eq + Hash,
    R: Eq + Hash,
{
    pub fn into_list(self) -> Option<AntijoinResult<L, R>> {
        match self {
            AntijoinOutput::List(result) => Some(result),
            AntijoinOutput::Set(_) => None,
        }
    }

    pub fn into_set(self) -> Option<SetAntijoinResult<L, R>> {
        match self {
            AntijoinOutput::List(_) => None,
            AntijoinOutput::Set(result) => Some(result),
        }
    }
}

/// A validated, reusable antijoin configuration.
///
/// Holds no state between calls, so one `Antijoiner` can be shared freely
/// across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Antijoiner {
    config: AntijoinConfig,
}

impl Antijoiner {
    pub fn new(config: AntijoinConfig) -> Result<Self, AntijoinError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AntijoinConfig {
        &self.config
    }

    /// The level the list engine logs its per-call summary at.
    fn stats_level(&self) -> log::Level {
        if self.config.log_stats {
            log::Level::Info
        } else {
            log::Level::Debug
        }
    }

    /// Runs the list engine over nullable input slots with the configured
    /// policy. Elements need not be hashable.
    ///
    /// Fails with `InvalidConfig` when the handle is configured for the set
    /// variant.
    pub fn run_list_slots<L, R, X, LI, RI, FL, FR>(
        &self,
        left: LI,
        right: RI,
        left_key_of: FL,
        right_key_of: FR,
    ) -> Result<AntijoinResult<L, R>, AntijoinError>
    where
        LI: IntoIterator<Item = Option<L>>,
        RI: IntoIterator<Item = Option<R>>,
        X: Eq + Hash,
        FL: Fn(&L) -> Option<X>,
        FR: Fn(&R) -> Option<X>,
    {
        if self.config.variant != JoinVariant::List {
            return Err(AntijoinError::InvalidConfig(format!(
                "antijoiner is configured for the {} variant, not list",
                self.config.variant
            )));
        }
        list::execute(
            left,
            right,
            left_key_of,
            right_key_of,
            self.config.null_policy,
            self.stats_level(),
        )
    }

    /// Runs the list engine over plain element sequences.
    pub fn run_list<L, R, X, LI, RI, FL, FR>(
        &self,
        left: LI,
        right: RI,
        left_key_of: FL,
        right_key_of: FR,
    ) -> Result<AntijoinResult<L, R>, AntijoinError>
    where
        LI: IntoIterator<Item = L>,
        RI: IntoIterator<Item = R>,
        X: Eq + Hash,
        FL: Fn(&L) -> Option<X>,
        FR: Fn(&R) -> Option<X>,
    {
        self.run_list_slots(
            left.into_iter().map(Some),
            right.into_iter().map(Some),
            left_key_of,
            right_key_of,
        )
    }

    /// Runs the configured engine over nullable input slots.
    ///
    /// The set variant needs hashable elements; use [`Antijoiner::run_list_slots`]
    /// for list semantics over elements that are not.
    pub fn run_slots<L, R, X, LI, RI, FL, FR>(
        &self,
        left: LI,
        right: RI,
        left_key_of: FL,
        right_key_of: FR,
    ) -> Result<AntijoinOutput<L, R>, AntijoinError>
    where
        LI: IntoIterator<Item = Option<L>>,
        RI: IntoIterator<Item = Option<R>>,
        L: Eq + Hash,
        R: Eq + Hash,
        X: Eq + Hash,
        FL: Fn(&L) -> Option<X>,
        FR: Fn(&R) -> Option<X>,
    {
        match self.config.variant {
            JoinVariant::List => self
                .run_list_slots(left, right, left_key_of, right_key_of)
                .map(AntijoinOutput::List),
            JoinVariant::Set => {
                set::antijoin_set_slots(left, right, left_key_of, right_key_of)
                    .map(AntijoinOutput::Set)
            }
        }
    }

    /// Runs the configured engine over plain element sequences.
    pub fn run<L, R, X, LI, RI, FL, FR>(
        &self,
        left: LI,
        right: RI,
        left_key_of: FL,
        right_key_of: FR,
    ) -> Result<AntijoinOutput<L, R>, AntijoinError>
    where
        LI: IntoIterator<Item = L>,
        RI: IntoIterator<Item = R>,
        L: Eq + Hash,
        R: Eq + Hash,
        X: Eq + Hash,
        FL: Fn(&L) -> Option<X>,
        FR: Fn(&R) -> Option<X>,
    {
        self.run_slots(
            left.into_iter().map(Some),
            right.into_iter().map(Some),
            left_key_of,
            right_key_of,
        )
    }
}
