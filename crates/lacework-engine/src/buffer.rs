//! Buffered changes and committed steps.
//!
//! Strategies never touch the candidate store directly. They propose
//! changes against a buffer, then commit the batch together with a
//! report builder. A commit freezes into an immutable [`ChangeCommit`]
//! the solver applies and logs.

use std::collections::BTreeSet;
use std::fmt::{self, Debug};

use lacework_core::{CellPossibility, SolvingState};

use crate::{
    highlight::{Drawer as _, HighlightSequence, StepColor},
    store::CandidateStore,
};

/// One proposed or applied change.
///
/// Assignments order before eliminations, so the sorted changes of a
/// commit place digits first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::IsVariant)]
pub enum SolverChange {
    /// Places a digit in a cell.
    Assignment(CellPossibility),
    /// Removes a candidate from a cell.
    Elimination(CellPossibility),
}

impl SolverChange {
    /// Returns the cell/digit pair the change touches.
    #[must_use]
    pub fn possibility(&self) -> CellPossibility {
        match self {
            Self::Assignment(cp) | Self::Elimination(cp) => *cp,
        }
    }
}

impl fmt::Display for SolverChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assignment(cp) => write!(f, "{} == {}", cp.cell, cp.digit),
            Self::Elimination(cp) => write!(f, "{} <> {}", cp.cell, cp.digit),
        }
    }
}

/// The compiled explanation of one committed step.
#[derive(Debug, Clone, Default)]
pub struct StepReport {
    /// A one-line human description.
    pub description: String,
    /// The replayable drawing instructions.
    pub highlight: HighlightSequence,
}

/// Builds the explanation of a commit from its changes and the state the
/// strategy saw.
///
/// Builders run lazily: a commit carries its builder and the solver only
/// invokes it when a report is wanted.
pub trait ReportBuilder: Debug {
    /// Produces the report for `changes` found on `previous`.
    fn build(&self, changes: &[SolverChange], previous: &SolvingState) -> StepReport;
}

/// A report builder with a fixed description that highlights the
/// applied changes.
#[derive(Debug, Clone)]
pub struct PlainReportBuilder {
    description: String,
}

impl PlainReportBuilder {
    /// Creates a builder that always reports `description`.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

impl ReportBuilder for PlainReportBuilder {
    fn build(&self, changes: &[SolverChange], _previous: &SolvingState) -> StepReport {
        StepReport {
            description: self.description.clone(),
            highlight: HighlightSequence::compile(|drawer| {
                for change in changes {
                    drawer.highlight_possibility(change.possibility(), StepColor::Change);
                }
            }),
        }
    }
}

/// An immutable committed batch of changes.
#[derive(Debug)]
pub struct ChangeCommit {
    changes: Vec<SolverChange>,
    builder: Box<dyn ReportBuilder>,
}

impl ChangeCommit {
    /// Returns the changes in sorted order, assignments first.
    #[must_use]
    pub fn changes(&self) -> &[SolverChange] {
        &self.changes
    }

    /// Builds the report against the state the changes were found on.
    #[must_use]
    pub fn build_report(&self, previous: &SolvingState) -> StepReport {
        self.builder.build(&self.changes, previous)
    }
}

/// Collects proposed changes and freezes them into commits.
#[derive(Debug, Default)]
pub struct ChangeBuffer {
    assignments: BTreeSet<CellPossibility>,
    eliminations: BTreeSet<CellPossibility>,
    commits: Vec<ChangeCommit>,
    fast_mode: bool,
}

impl ChangeBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if reports are skipped and commits are not kept.
    #[must_use]
    pub fn fast_mode(&self) -> bool {
        self.fast_mode
    }

    /// Switches fast mode on or off.
    pub fn set_fast_mode(&mut self, fast_mode: bool) {
        self.fast_mode = fast_mode;
    }

    /// Proposes removing a candidate.
    ///
    /// Proposals already made or not applicable to `store` are dropped,
    /// so a strategy can propose freely off its pattern.
    pub fn propose_elimination(&mut self, store: &CandidateStore, possibility: CellPossibility) {
        if store.candidates_at(possibility.cell).contains(possibility.digit) {
            self.eliminations.insert(possibility);
        }
    }

    /// Proposes placing a digit. Duplicate or inapplicable proposals are
    /// dropped.
    pub fn propose_assignment(&mut self, store: &CandidateStore, possibility: CellPossibility) {
        if store.candidates_at(possibility.cell).contains(possibility.digit) {
            self.assignments.insert(possibility);
        }
    }

    /// Returns `true` if any change is pending.
    #[must_use]
    pub fn not_empty(&self) -> bool {
        !self.assignments.is_empty() || !self.eliminations.is_empty()
    }

    /// Freezes the pending changes into a commit explained by `builder`.
    ///
    /// Returns `false` without recording anything when the buffer is
    /// empty or in fast mode; fast-mode proposals stay pending for
    /// [`dump_changes`](Self::dump_changes).
    pub fn commit(&mut self, builder: Box<dyn ReportBuilder>) -> bool {
        if self.fast_mode || !self.not_empty() {
            return false;
        }
        let changes = self.drain_sorted();
        self.commits.push(ChangeCommit { changes, builder });
        true
    }

    /// Drains the pending changes without committing them.
    #[must_use]
    pub fn dump_changes(&mut self) -> Vec<SolverChange> {
        self.drain_sorted()
    }

    /// Drains the recorded commits.
    #[must_use]
    pub fn take_commits(&mut self) -> Vec<ChangeCommit> {
        std::mem::take(&mut self.commits)
    }

    /// Returns the recorded commits without draining them.
    #[must_use]
    pub fn commits(&self) -> &[ChangeCommit] {
        &self.commits
    }

    fn drain_sorted(&mut self) -> Vec<SolverChange> {
        let assignments = std::mem::take(&mut self.assignments);
        let eliminations = std::mem::take(&mut self.eliminations);
        assignments
            .into_iter()
            .map(SolverChange::Assignment)
            .chain(eliminations.into_iter().map(SolverChange::Elimination))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use lacework_core::translate;

    use super::*;

    fn store() -> CandidateStore {
        CandidateStore::from_grid(&translate::parse_line(
            "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79",
        ))
    }

    fn builder() -> Box<dyn ReportBuilder> {
        Box::new(PlainReportBuilder::new("test step"))
    }

    #[test]
    fn test_empty_commit_returns_false() {
        let mut buffer = ChangeBuffer::new();
        assert!(!buffer.commit(builder()));
        assert!(buffer.commits().is_empty());
    }

    #[test]
    fn test_duplicate_proposals_merge() {
        let store = store();
        let mut buffer = ChangeBuffer::new();
        let cp = CellPossibility::from_coords(0, 2, 1);
        buffer.propose_elimination(&store, cp);
        buffer.propose_elimination(&store, cp);
        assert!(buffer.commit(builder()));
        assert_eq!(buffer.commits()[0].changes().len(), 1);
    }

    #[test]
    fn test_inapplicable_proposals_are_dropped() {
        let store = store();
        let mut buffer = ChangeBuffer::new();
        // r1c1 is a given, nothing can be proposed against it
        buffer.propose_elimination(&store, CellPossibility::from_coords(0, 0, 5));
        buffer.propose_assignment(&store, CellPossibility::from_coords(0, 0, 5));
        assert!(!buffer.not_empty());
    }

    #[test]
    fn test_commit_order_is_deterministic() {
        let store = store();
        let first = CellPossibility::from_coords(0, 2, 1);
        let second = CellPossibility::from_coords(0, 2, 2);
        let placed = CellPossibility::from_coords(0, 3, 2);

        let mut forward = ChangeBuffer::new();
        forward.propose_elimination(&store, first);
        forward.propose_elimination(&store, second);
        forward.propose_assignment(&store, placed);
        assert!(forward.commit(builder()));

        let mut backward = ChangeBuffer::new();
        backward.propose_assignment(&store, placed);
        backward.propose_elimination(&store, second);
        backward.propose_elimination(&store, first);
        assert!(backward.commit(builder()));

        assert_eq!(forward.commits()[0].changes(), backward.commits()[0].changes());
        assert!(forward.commits()[0].changes()[0].is_assignment());
    }

    #[test]
    fn test_fast_mode_skips_commits() {
        let store = store();
        let mut buffer = ChangeBuffer::new();
        buffer.set_fast_mode(true);
        buffer.propose_elimination(&store, CellPossibility::from_coords(0, 2, 1));
        assert!(!buffer.commit(builder()));
        assert!(buffer.commits().is_empty());
        // The proposal is still there for direct application
        assert_eq!(buffer.dump_changes().len(), 1);
        assert!(!buffer.not_empty());
    }
}
