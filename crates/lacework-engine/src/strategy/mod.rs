//! Solving strategies and their registry.

use std::fmt::Debug;

use crate::solver::SolverSession;

pub mod alternating;
pub mod hidden_single;
pub mod naked_set;
pub mod naked_single;
pub mod pointing_set;
pub mod simple_coloring;

pub use alternating::AlternatingInference;
pub use hidden_single::HiddenSingle;
pub use naked_set::NakedSet;
pub use naked_single::NakedSingle;
pub use pointing_set::PointingSet;
pub use simple_coloring::SimpleColoring;

/// The difficulty tier of a strategy, easiest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum Difficulty {
    /// Direct placements.
    Basic,
    /// Single-unit candidate patterns.
    Easy,
    /// Multi-unit patterns without chains.
    Medium,
    /// Chain and loop patterns over single candidates.
    Hard,
    /// Chain patterns over grouped elements.
    Extreme,
}

/// How many findings of one strategy run get committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitPolicy {
    /// Stop at the first committed finding.
    FirstOnly,
    /// Keep searching and commit every finding.
    All,
}

/// A solving strategy.
///
/// A strategy reads the session's candidate store, proposes changes to
/// its buffer and commits them with a report builder. It never mutates
/// the store itself.
pub trait Strategy: Debug {
    /// The display name of the strategy.
    fn name(&self) -> &'static str;

    /// The difficulty tier, used for ordering and filtering.
    fn difficulty(&self) -> Difficulty;

    /// How many findings a single run commits.
    fn commit_policy(&self) -> CommitPolicy {
        CommitPolicy::FirstOnly
    }

    /// Runs the strategy against the session.
    fn apply(&mut self, session: &mut SolverSession);
}

/// A strategy with its pipeline configuration.
#[derive(Debug)]
pub struct StrategyEntry {
    strategy: Box<dyn Strategy>,
    enabled: bool,
    locked: bool,
}

impl StrategyEntry {
    /// Wraps a strategy, enabled and unlocked.
    #[must_use]
    pub fn new(strategy: Box<dyn Strategy>) -> Self {
        Self {
            strategy,
            enabled: true,
            locked: false,
        }
    }

    /// The wrapped strategy's name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.strategy.name()
    }

    /// The wrapped strategy's difficulty.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.strategy.difficulty()
    }

    /// The wrapped strategy's commit policy.
    #[must_use]
    pub fn commit_policy(&self) -> CommitPolicy {
        self.strategy.commit_policy()
    }

    /// Returns `true` if the pipeline runs this strategy.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables the strategy. Ignored while locked.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !self.locked {
            self.enabled = enabled;
        }
    }

    /// Returns `true` if the enabled flag cannot be changed.
    #[must_use]
    pub fn locked(&self) -> bool {
        self.locked
    }

    /// Freezes the current enabled flag.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub(crate) fn strategy_mut(&mut self) -> &mut dyn Strategy {
        self.strategy.as_mut()
    }
}

/// The default pipeline, ordered easiest to hardest.
#[must_use]
pub fn default_pipeline() -> Vec<StrategyEntry> {
    vec![
        StrategyEntry::new(Box::new(NakedSingle::new())),
        StrategyEntry::new(Box::new(HiddenSingle::new())),
        StrategyEntry::new(Box::new(NakedSet::pair())),
        StrategyEntry::new(Box::new(NakedSet::triple())),
        StrategyEntry::new(Box::new(PointingSet::new())),
        StrategyEntry::new(Box::new(NakedSet::quad())),
        StrategyEntry::new(Box::new(SimpleColoring::new())),
        StrategyEntry::new(Box::new(AlternatingInference::x_cycles())),
        StrategyEntry::new(Box::new(AlternatingInference::x_chains())),
        StrategyEntry::new(Box::new(AlternatingInference::ai_loops())),
        StrategyEntry::new(Box::new(AlternatingInference::ai_chains())),
        StrategyEntry::new(Box::new(AlternatingInference::subsets_loops())),
        StrategyEntry::new(Box::new(AlternatingInference::subsets_chains())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pipeline_is_ordered_by_difficulty() {
        let pipeline = default_pipeline();
        assert!(!pipeline.is_empty());
        for pair in pipeline.windows(2) {
            assert!(pair[0].difficulty() <= pair[1].difficulty());
        }
    }

    #[test]
    fn test_locked_entry_keeps_its_enabled_flag() {
        let mut entry = StrategyEntry::new(Box::new(NakedSingle::new()));
        entry.lock();
        entry.set_enabled(false);
        assert!(entry.enabled());
        assert!(entry.locked());
    }
}
