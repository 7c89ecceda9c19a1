//! Logic-only sudoku deduction engine.
//!
//! The engine solves with human techniques, from naked singles up to
//! alternating inference chains over grouped elements, and keeps a
//! replayable explanation of every step it takes.
//!
//! [`StrategySolver`] is the entry point: it runs an ordered pipeline of
//! [`Strategy`](strategy::Strategy) implementations over a
//! [`CandidateStore`], restarting from the easiest after every applied
//! change.
//!
//! ```
//! use lacework_core::translate;
//! use lacework_engine::{SolverState, StrategySolver};
//!
//! let grid = translate::parse_line(
//!     "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79",
//! );
//! let mut solver = StrategySolver::from_grid(&grid);
//! assert_eq!(solver.solve()?, SolverState::Solved);
//! for step in solver.log() {
//!     println!("{}: {} changes", step.strategy, step.changes.len());
//! }
//! # Ok::<(), lacework_engine::SolverError>(())
//! ```

pub mod als;
pub mod buffer;
pub mod chain;
pub mod error;
pub mod graph;
pub mod highlight;
pub mod inference;
pub mod solver;
pub mod store;
pub mod strategy;

pub use self::{
    buffer::{ChangeBuffer, ChangeCommit, ReportBuilder, SolverChange, StepReport},
    error::SolverError,
    graph::{ConstructRules, GraphElement, LinkGraph, LinkStrength},
    highlight::{Drawer, HighlightSequence, StepColor},
    solver::{PossibleStep, SolverSession, SolverState, SolvingStep, StrategySolver},
    store::CandidateStore,
};
