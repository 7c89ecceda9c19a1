//! Grid substrate for the Lacework deduction engine.
//!
//! This crate provides the puzzle-agnostic data structures the engine is
//! built on: cell coordinates, bit-packed candidate sets, derived position
//! bitsets, the placed-digit grid and the text formats a grid travels in.
//!
//! # Overview
//!
//! - [`cell`]: [`Cell`] coordinates and [`CellPossibility`] pairs
//! - [`candidates`]: the per-cell [`CandidateSet`] bitset
//! - [`positions`]: derived [`LinePositions`], [`BoxPositions`] and
//!   [`GridPositions`] indexes
//! - [`grid`]: the placed-digit [`Grid`]
//! - [`state`]: [`SolvingState`], the mid-solve per-cell snapshot
//! - [`translate`]: the line, ASCII-grid and base-32 text formats
//!
//! # Examples
//!
//! ```
//! use lacework_core::{Cell, translate};
//!
//! let grid = translate::parse_line("53..7....");
//! assert_eq!(grid.get(Cell::new(0, 0)), 5);
//! assert_eq!(grid.get(Cell::new(0, 2)), 0);
//! ```

pub mod candidates;
pub mod cell;
pub mod grid;
pub mod positions;
pub mod state;
pub mod translate;

pub use self::{
    candidates::CandidateSet,
    cell::{Cell, CellPossibility},
    grid::Grid,
    positions::{BoxPositions, GridPositions, LinePositions},
    state::{CellContent, SolvingState},
};
