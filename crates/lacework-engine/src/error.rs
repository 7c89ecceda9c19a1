//! Engine error types.

use lacework_core::CellPossibility;

/// A fatal error raised while applying changes to the candidate store.
///
/// A contradiction means an upstream deduction was unsound; the solve run
/// aborts and the error propagates to the caller with the step log built
/// so far left intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SolverError {
    /// An assignment targeted a digit that is no longer a candidate of
    /// its cell.
    #[display("contradiction: {_0} is not a candidate of its cell")]
    Contradiction(#[error(not(source))] CellPossibility),
}
