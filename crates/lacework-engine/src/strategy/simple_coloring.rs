//! Two-coloring over conjugate pairs.

use std::collections::HashSet;

use lacework_core::{CellPossibility, SolvingState, cell};

use crate::{
    buffer::{ReportBuilder, SolverChange, StepReport},
    chain::coloring::{ColoredComponent, color_all},
    graph::{ConstructRules, GraphElement, LinkStrength},
    highlight::{Drawer as _, HighlightSequence, StepColor},
    inference::{SearchContext, highlight_changes, highlight_element, representative},
    solver::SolverSession,
    strategy::{Difficulty, Strategy},
};

const NAME: &str = "Simple Coloring";

/// Colors the conjugate-pair graph of each digit and reads off the
/// conclusions.
///
/// A color seen twice in one unit is false everywhere, which places the
/// whole opposite color. Otherwise any candidate outside the graph that
/// sees both colors of its digit is false.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleColoring;

impl SimpleColoring {
    /// Creates the strategy.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Strategy for SimpleColoring {
    fn name(&self) -> &'static str {
        NAME
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::Medium
    }

    fn apply(&mut self, session: &mut SolverSession) {
        let (graph, mut context) = session.search_parts(ConstructRules::UNIT_STRONG);
        for component in color_all(graph) {
            if component.len() <= 1 {
                continue;
            }
            let on = possibilities(&component.on);
            let off = possibilities(&component.off);

            let invalid = if twice_in_same_unit(&on) {
                for &cp in &off {
                    context.buffer.propose_assignment(context.store, cp);
                }
                true
            } else if twice_in_same_unit(&off) {
                for &cp in &on {
                    context.buffer.propose_assignment(context.store, cp);
                }
                true
            } else {
                two_colors_elsewhere(&mut context, &on, &off);
                false
            };

            if context.buffer.not_empty() {
                context.buffer.commit(Box::new(ColoringReportBuilder {
                    component,
                    invalid,
                }));
                if context.stop_on_first {
                    return;
                }
            }
        }
    }
}

fn possibilities(elements: &[GraphElement]) -> Vec<CellPossibility> {
    elements
        .iter()
        .filter_map(|element| match element {
            GraphElement::Possibility(cp) => Some(*cp),
            _ => None,
        })
        .collect()
}

/// Returns `true` if two same-colored candidates of one digit share a
/// unit, which falsifies the whole color.
fn twice_in_same_unit(colored: &[CellPossibility]) -> bool {
    for (i, one) in colored.iter().enumerate() {
        for two in &colored[i + 1..] {
            if one.digit == two.digit && one.cell.sees(two.cell) {
                return true;
            }
        }
    }
    false
}

/// Eliminates every candidate outside the graph that sees both colors.
fn two_colors_elsewhere(
    context: &mut SearchContext<'_>,
    on: &[CellPossibility],
    off: &[CellPossibility],
) {
    let in_graph: HashSet<CellPossibility> = on.iter().chain(off).copied().collect();
    for &one in on {
        for &two in off {
            if one.digit != two.digit {
                continue;
            }
            for cell in cell::shared_seen_cells(&[one.cell, two.cell]).iter() {
                let target = CellPossibility::new(cell, one.digit);
                if !in_graph.contains(&target) {
                    context.buffer.propose_elimination(context.store, target);
                }
            }
        }
    }
}

/// Draws the colored component with its propagation links.
#[derive(Debug)]
struct ColoringReportBuilder {
    component: ColoredComponent,
    invalid: bool,
}

impl ReportBuilder for ColoringReportBuilder {
    fn build(&self, changes: &[SolverChange], _previous: &SolvingState) -> StepReport {
        let description = if self.invalid {
            format!("{NAME}: one color twice in a unit")
        } else {
            format!("{NAME}: both colors in sight")
        };
        let highlight = HighlightSequence::compile(|drawer| {
            for element in &self.component.on {
                highlight_element(drawer, element, StepColor::CauseOn);
            }
            for element in &self.component.off {
                highlight_element(drawer, element, StepColor::CauseOff);
            }
            for (child, parent) in &self.component.history {
                drawer.create_link(
                    representative(parent),
                    representative(child),
                    LinkStrength::Strong,
                );
            }
            highlight_changes(drawer, changes);
        });
        StepReport {
            description,
            highlight,
        }
    }
}

#[cfg(test)]
mod tests {
    use lacework_core::{Cell, translate};

    use crate::store::CandidateStore;

    use super::*;

    /// Leaves digit 1 with exactly two positions in column 1, row 6 and
    /// column 5, forming one alternating component.
    fn chained_store() -> CandidateStore {
        let mut store = CandidateStore::from_grid(&translate::parse_line(""));
        for row in 0..9 {
            if row != 0 && row != 5 {
                store.eliminate(Cell::new(row, 0), 1);
            }
        }
        for col in 0..9 {
            if col != 0 && col != 4 {
                store.eliminate(Cell::new(5, col), 1);
            }
        }
        for row in 0..9 {
            if row != 5 && row != 2 {
                store.eliminate(Cell::new(row, 4), 1);
            }
        }
        store
    }

    #[test]
    fn test_candidate_seeing_both_colors_is_eliminated() {
        let mut session = SolverSession::new(chained_store());
        SimpleColoring::new().apply(&mut session);

        let commits = session.take_commits();
        assert_eq!(commits.len(), 1);
        let changes = commits[0].changes();
        // The chain ends r1c1 and r3c5 carry opposite colors; r1c1's box
        // sees r3c5 through row 3, r3c5's box sees r1c1 through row 1
        assert_eq!(
            changes,
            &[
                SolverChange::Elimination(CellPossibility::from_coords(0, 3, 1)),
                SolverChange::Elimination(CellPossibility::from_coords(0, 5, 1)),
                SolverChange::Elimination(CellPossibility::from_coords(2, 1, 1)),
                SolverChange::Elimination(CellPossibility::from_coords(2, 2, 1)),
            ]
        );
    }

    #[test]
    fn test_color_twice_in_a_unit_places_the_opposite() {
        let mut store = CandidateStore::from_grid(&translate::parse_line(""));
        // Conjugate pairs of digit 3: box 1, column 2, row 8, column 6.
        // The resulting coloring puts r1c1 and r1c6 on the same side of
        // row 1, so the other side is true.
        for cell in (0..9).map(|i| Cell::new(i / 3, i % 3)) {
            if cell != Cell::new(0, 0) && cell != Cell::new(1, 1) {
                store.eliminate(cell, 3);
            }
        }
        for row in 0..9 {
            if row != 1 && row != 7 {
                store.eliminate(Cell::new(row, 1), 3);
            }
        }
        for col in 0..9 {
            if col != 1 && col != 5 {
                store.eliminate(Cell::new(7, col), 3);
            }
        }
        for row in 0..9 {
            if row != 7 && row != 0 {
                store.eliminate(Cell::new(row, 5), 3);
            }
        }

        let mut session = SolverSession::new(store);
        SimpleColoring::new().apply(&mut session);

        let commits = session.take_commits();
        assert_eq!(commits.len(), 1);
        assert_eq!(
            commits[0].changes(),
            &[
                SolverChange::Assignment(CellPossibility::from_coords(1, 1, 3)),
                SolverChange::Assignment(CellPossibility::from_coords(7, 5, 3)),
            ]
        );
    }

    #[test]
    fn test_blank_grid_finds_nothing() {
        let store = CandidateStore::from_grid(&translate::parse_line(""));
        let mut session = SolverSession::new(store);
        SimpleColoring::new().apply(&mut session);
        assert!(session.take_commits().is_empty());
    }
}
