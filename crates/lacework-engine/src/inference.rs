//! Inference rule sets shared by the chain and loop searches.
//!
//! A rule set bundles the graph construction rules a search needs with
//! the processing of what the search finds: full loops, terminating
//! inferences and open chains. The searches themselves are agnostic of
//! what their findings mean.

use lacework_core::{Cell, CellPossibility, SolvingState, cell::shared_seen_cells};

use crate::{
    buffer::{ChangeBuffer, ReportBuilder, SolverChange, StepReport},
    chain::{Chain, Loop},
    graph::{ConstructRules, GraphElement, LinkGraph, LinkStrength},
    highlight::{Drawer, HighlightSequence, StepColor},
    store::CandidateStore,
};

/// The mutable surroundings a search runs in.
#[derive(Debug)]
pub struct SearchContext<'a> {
    /// The state the search reads.
    pub store: &'a CandidateStore,
    /// The buffer findings are proposed against.
    pub buffer: &'a mut ChangeBuffer,
    /// Stop the search after the first productive finding.
    pub stop_on_first: bool,
}

/// One family of alternating inferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferenceRules {
    /// The strategy name when run as a loop search.
    pub loop_name: &'static str,
    /// The strategy name when run as a chain search.
    pub chain_name: &'static str,
    /// The graph the family runs on.
    pub rules: ConstructRules,
}

/// X-cycles: one digit, unit links only.
pub const SINGLE_DIGIT: InferenceRules = InferenceRules {
    loop_name: "X-Cycles",
    chain_name: "X-Chains",
    rules: ConstructRules::SINGLE_DIGIT,
};

/// Plain alternating inference chains over single candidates.
pub const SIMPLE: InferenceRules = InferenceRules {
    loop_name: "Alternating Inference Loops",
    chain_name: "Alternating Inference Chains",
    rules: ConstructRules::SIMPLE,
};

/// Alternating inferences extended with groups and almost-locked sets.
pub const SUBSETS: InferenceRules = InferenceRules {
    loop_name: "Subsets Alternating Inference Loops",
    chain_name: "Subsets Alternating Inference Chains",
    rules: ConstructRules::COMPLEX,
};

impl InferenceRules {
    /// Processes an even loop of alternating links.
    ///
    /// Every weak link of the loop has one of its sides true, so
    /// everything excluded by both sides at once goes.
    pub fn process_full_loop(&self, context: &mut SearchContext<'_>, looped: &Loop) -> bool {
        looped.for_each_link(LinkStrength::Weak, |one, two| {
            process_weak_link(context.store, context.buffer, one, two);
        });
        if !context.buffer.not_empty() {
            return false;
        }
        context.buffer.commit(Box::new(LoopReportBuilder::new(
            looped.clone(),
            LoopKind::NiceLoop,
        )));
        context.stop_on_first
    }

    /// Processes an odd loop whose pivot sits between two weak links.
    ///
    /// The pivot cannot be true, its candidate goes.
    pub fn process_weak_inference_loop(
        &self,
        context: &mut SearchContext<'_>,
        inference: &GraphElement,
        looped: &Loop,
    ) -> bool {
        let GraphElement::Possibility(cp) = inference else {
            return false;
        };
        context.buffer.propose_elimination(context.store, *cp);
        if !context.buffer.not_empty() {
            return false;
        }
        context.buffer.commit(Box::new(LoopReportBuilder::new(
            looped.clone(),
            LoopKind::WeakInference,
        )));
        context.stop_on_first
    }

    /// Processes an odd loop whose pivot sits between two strong links.
    ///
    /// The pivot must be true, its candidate is placed.
    pub fn process_strong_inference_loop(
        &self,
        context: &mut SearchContext<'_>,
        inference: &GraphElement,
        looped: &Loop,
    ) -> bool {
        let GraphElement::Possibility(cp) = inference else {
            return false;
        };
        context.buffer.propose_assignment(context.store, *cp);
        if !context.buffer.not_empty() {
            return false;
        }
        context.buffer.commit(Box::new(LoopReportBuilder::new(
            looped.clone(),
            LoopKind::StrongInference,
        )));
        context.stop_on_first
    }

    /// Processes an open chain with strong links at both ends.
    ///
    /// One of the two ends is true, so any candidate excluded by both is
    /// eliminated.
    pub fn process_chain(
        &self,
        context: &mut SearchContext<'_>,
        chain: &Chain,
        graph: &LinkGraph,
    ) -> bool {
        if chain.len() < 3 || chain.len() % 2 == 1 {
            return false;
        }
        let targets: Vec<CellPossibility> = graph
            .neighbors(chain.first(), LinkStrength::Weak)
            .filter_map(|target| {
                let GraphElement::Possibility(cp) = target else {
                    return None;
                };
                graph
                    .are_linked(target, chain.last(), LinkStrength::Weak)
                    .then_some(*cp)
            })
            .collect();
        for cp in targets {
            context.buffer.propose_elimination(context.store, cp);
        }
        if !context.buffer.not_empty() {
            return false;
        }
        context
            .buffer
            .commit(Box::new(ChainReportBuilder::new(chain.clone())));
        context.stop_on_first
    }
}

/// Applies the exclusion a weak link carries once both sides are known to
/// cover a true candidate.
fn process_weak_link(
    store: &CandidateStore,
    buffer: &mut ChangeBuffer,
    one: &GraphElement,
    two: &GraphElement,
) {
    // Two candidates of the same cell: one of them is placed there, the
    // rest of the cell empties out.
    if let (GraphElement::Possibility(p1), GraphElement::Possibility(p2)) = (one, two) {
        if p1.cell == p2.cell {
            for digit in store.candidates_at(p1.cell).iter() {
                if digit != p1.digit && digit != p2.digit {
                    buffer.propose_elimination(store, CellPossibility::new(p1.cell, digit));
                }
            }
            return;
        }
    }

    for digit in one.digits().intersection(two.digits()).iter() {
        let mut cells: Vec<Cell> = one.cells_with(digit).to_vec();
        cells.extend(two.cells_with(digit).iter().copied());
        for cell in shared_seen_cells(&cells).iter() {
            buffer.propose_elimination(store, CellPossibility::new(cell, digit));
        }
    }

    for (set, possibility) in [(one, two), (two, one)] {
        let (GraphElement::AlmostLockedSet(als), GraphElement::Possibility(cp)) =
            (set, possibility)
        else {
            continue;
        };
        // The remaining digits of the set lock into its cells
        for digit in als.digits.iter() {
            if digit == cp.digit {
                continue;
            }
            let cells: Vec<Cell> = als.cells_with(digit).to_vec();
            for cell in shared_seen_cells(&cells).iter() {
                buffer.propose_elimination(store, CellPossibility::new(cell, digit));
            }
        }
    }
}

/// How an alternating loop terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopKind {
    /// An even loop, every weak link carries an exclusion.
    NiceLoop,
    /// An odd loop pinching a candidate between two weak links.
    WeakInference,
    /// An odd loop pinching a candidate between two strong links.
    StrongInference,
}

/// Explains a loop finding.
#[derive(Debug)]
pub struct LoopReportBuilder {
    looped: Loop,
    kind: LoopKind,
}

impl LoopReportBuilder {
    /// Wraps a found loop for reporting.
    #[must_use]
    pub fn new(looped: Loop, kind: LoopKind) -> Self {
        Self { looped, kind }
    }
}

impl ReportBuilder for LoopReportBuilder {
    fn build(&self, changes: &[SolverChange], _previous: &SolvingState) -> StepReport {
        let kind = match self.kind {
            LoopKind::NiceLoop => "Nice loop",
            LoopKind::WeakInference => "Loop with a weak inference",
            LoopKind::StrongInference => "Loop with a strong inference",
        };
        let highlight = HighlightSequence::compile(|drawer| {
            let mut color = if self.looped.links().first() == Some(&LinkStrength::Strong) {
                StepColor::CauseOff
            } else {
                StepColor::CauseOn
            };
            for element in self.looped.elements() {
                highlight_element(drawer, element, color);
                color = if color == StepColor::CauseOn {
                    StepColor::CauseOff
                } else {
                    StepColor::CauseOn
                };
            }
            self.looped.for_each_link(LinkStrength::Strong, |one, two| {
                drawer.create_link(representative(one), representative(two), LinkStrength::Strong);
            });
            self.looped.for_each_link(LinkStrength::Weak, |one, two| {
                drawer.create_link(representative(one), representative(two), LinkStrength::Weak);
            });
            highlight_changes(drawer, changes);
        });
        StepReport {
            description: format!("{kind} found :: {}", self.looped),
            highlight,
        }
    }
}

/// Explains a chain finding.
#[derive(Debug)]
pub struct ChainReportBuilder {
    chain: Chain,
}

impl ChainReportBuilder {
    /// Wraps a found chain for reporting.
    #[must_use]
    pub fn new(chain: Chain) -> Self {
        Self { chain }
    }
}

impl ReportBuilder for ChainReportBuilder {
    fn build(&self, changes: &[SolverChange], _previous: &SolvingState) -> StepReport {
        let highlight = HighlightSequence::compile(|drawer| {
            let mut color = if self.chain.links().first() == Some(&LinkStrength::Strong) {
                StepColor::CauseOff
            } else {
                StepColor::CauseOn
            };
            for element in self.chain.elements() {
                highlight_element(drawer, element, color);
                color = if color == StepColor::CauseOn {
                    StepColor::CauseOff
                } else {
                    StepColor::CauseOn
                };
            }
            for (i, link) in self.chain.links().iter().enumerate() {
                drawer.create_link(
                    representative(&self.chain.elements()[i]),
                    representative(&self.chain.elements()[i + 1]),
                    *link,
                );
            }
            highlight_changes(drawer, changes);
        });
        StepReport {
            description: format!("Chain found :: {}", self.chain),
            highlight,
        }
    }
}

/// Highlights the changes of a commit.
pub fn highlight_changes(drawer: &mut dyn Drawer, changes: &[SolverChange]) {
    for change in changes {
        drawer.highlight_possibility(change.possibility(), StepColor::Change);
    }
}

/// Highlights every candidate an element covers.
pub fn highlight_element(drawer: &mut dyn Drawer, element: &GraphElement, color: StepColor) {
    match element {
        GraphElement::Possibility(cp) => drawer.highlight_possibility(*cp, color),
        GraphElement::Group(group) => {
            for &cell in &group.cells {
                drawer.highlight_possibility(CellPossibility::new(cell, group.digit), color);
            }
        }
        GraphElement::AlmostLockedSet(als) => {
            for (&cell, digits) in als.cells.iter().zip(als.cell_digits.iter()) {
                for digit in digits.iter() {
                    drawer.highlight_possibility(CellPossibility::new(cell, digit), color);
                }
            }
        }
    }
}

/// Picks the candidate used to anchor links drawn from an element.
#[must_use]
pub fn representative(element: &GraphElement) -> CellPossibility {
    match element {
        GraphElement::Possibility(cp) => *cp,
        GraphElement::Group(group) => CellPossibility::new(group.cells[0], group.digit),
        GraphElement::AlmostLockedSet(als) => CellPossibility::new(
            als.cells[0],
            als.cell_digits[0].first().unwrap_or(0),
        ),
    }
}
