//! Depth-first searches for alternating chains and loops.

use std::{
    collections::{HashMap, HashSet},
    fmt::Debug,
};

use crate::{
    chain::{ChainBuilder, Loop},
    graph::{GraphElement, LinkGraph, LinkStrength},
    inference::{InferenceRules, SearchContext},
};

/// Whether an algorithm emits open chains or closed loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmKind {
    /// Open chains with strong links at both ends.
    Chain,
    /// Closed loops, even or terminating.
    Loop,
}

/// A search over the link graph driven by one family of inference rules.
pub trait SearchAlgorithm: Debug {
    /// The kind of construct the algorithm emits, used to pick the
    /// strategy name.
    fn kind(&self) -> AlgorithmKind;

    /// Runs the search. Returns `true` when the search stopped on a
    /// productive finding.
    fn run(
        &mut self,
        context: &mut SearchContext<'_>,
        rules: InferenceRules,
        graph: &LinkGraph,
    ) -> bool;
}

type ExploredSets = HashMap<GraphElement, HashSet<GraphElement>>;

/// Finds alternating loops by depth-first search.
///
/// The path alternates strong and weak links starting strong. Reaching
/// an element already on the path closes a cycle: an even cycle of at
/// least four elements is a nice loop, an odd one pins its pivot between
/// two links of the same strength. Emitted even loops are deduplicated
/// across the whole search, the same cycle is reachable from every one
/// of its elements.
#[derive(Debug)]
pub struct LoopSearch {
    max_loop_size: usize,
    processed: HashSet<Loop>,
}

impl LoopSearch {
    /// Creates a search bounded to loops of `max_loop_size` elements.
    #[must_use]
    pub fn new(max_loop_size: usize) -> Self {
        Self {
            max_loop_size,
            processed: HashSet::new(),
        }
    }

    #[allow(clippy::too_many_lines)]
    fn search(
        &mut self,
        context: &mut SearchContext<'_>,
        rules: InferenceRules,
        graph: &LinkGraph,
        builder: &mut ChainBuilder,
        globally: &mut ExploredSets,
        locally: &mut ExploredSets,
    ) -> bool {
        if builder.len() > self.max_loop_size {
            return false;
        }

        let last = *builder.last_element();
        let before = builder.before_last_element().copied();
        let is_pair = builder.len() % 2 == 0;

        let strong_friends: Vec<GraphElement> =
            graph.neighbors(&last, LinkStrength::Strong).copied().collect();
        for friend in strong_friends {
            if builder.is_trivial()
                && globally.get(&last).is_some_and(|set| set.contains(&friend))
            {
                continue;
            }
            if locally.get(&last).is_some_and(|set| set.contains(&friend)) {
                continue;
            }
            if before == Some(friend) {
                continue;
            }

            let link = if is_pair {
                LinkStrength::Weak
            } else {
                LinkStrength::Strong
            };
            match builder.index_of(&friend) {
                None => {
                    builder.push(link, friend);
                    let stop = self.search(context, rules, graph, builder, globally, locally);
                    builder.pop();
                    if stop {
                        return true;
                    }
                    globally.entry(last).or_default().insert(friend);
                }
                Some(index) => {
                    let cut = builder.cut(index);
                    if cut.first_link() == LinkStrength::Strong && cut.len() >= 4 {
                        if cut.len() % 2 == 0 {
                            let looped = cut.to_loop(LinkStrength::Weak);
                            if !self.processed.contains(&looped) {
                                let stop = rules.process_full_loop(context, &looped);
                                self.processed.insert(looped);
                                if stop {
                                    return true;
                                }
                            }
                        } else if rules.process_strong_inference_loop(
                            context,
                            cut.first_element(),
                            &cut.to_loop(LinkStrength::Strong),
                        ) {
                            return true;
                        }
                    }
                    locally.entry(*cut.first_element()).or_default().insert(last);
                }
            }
        }

        // An odd stub shorter than a closable cycle cannot extend weakly
        if builder.len() % 2 == 1 && builder.len() < 4 {
            return false;
        }
        let weak_friends: Vec<GraphElement> =
            graph.neighbors(&last, LinkStrength::Weak).copied().collect();
        for friend in weak_friends {
            if locally.get(&last).is_some_and(|set| set.contains(&friend)) {
                continue;
            }
            if before == Some(friend) {
                continue;
            }

            match builder.index_of(&friend) {
                None => {
                    if is_pair {
                        builder.push(LinkStrength::Weak, friend);
                        let stop = self.search(context, rules, graph, builder, globally, locally);
                        builder.pop();
                        if stop {
                            return true;
                        }
                    }
                }
                Some(index) => {
                    let cut = builder.cut(index);
                    if cut.first_link() == LinkStrength::Strong && cut.len() >= 4 {
                        if cut.len() % 2 == 0 {
                            let looped = cut.to_loop(LinkStrength::Weak);
                            if !self.processed.contains(&looped) {
                                let stop = rules.process_full_loop(context, &looped);
                                self.processed.insert(looped);
                                if stop {
                                    return true;
                                }
                            }
                        } else if rules.process_weak_inference_loop(
                            context,
                            cut.last_element(),
                            &cut.to_loop(LinkStrength::Weak),
                        ) {
                            return true;
                        }
                    }
                    locally.entry(*cut.first_element()).or_default().insert(last);
                }
            }
        }

        false
    }
}

impl SearchAlgorithm for LoopSearch {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Loop
    }

    fn run(
        &mut self,
        context: &mut SearchContext<'_>,
        rules: InferenceRules,
        graph: &LinkGraph,
    ) -> bool {
        let mut globally = ExploredSets::new();
        let mut locally = ExploredSets::new();
        let starts: Vec<GraphElement> = graph.elements().copied().collect();
        for start in starts {
            let mut builder = ChainBuilder::new(start);
            if self.search(context, rules, graph, &mut builder, &mut globally, &mut locally) {
                return true;
            }
            locally.clear();
        }
        false
    }
}

/// How a chain search prunes its exploration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplorationScope {
    /// Elements fully explored as a start never reappear inside later
    /// chains. Fast, misses chains routed through earlier starts.
    Global,
    /// Only the current path blocks revisits. Exhaustive.
    PerBranch,
}

/// Finds open alternating chains by depth-first search.
///
/// Chains start and end on strong links. Both pruning variants run the
/// same search, they differ only in what counts as already explored.
#[derive(Debug)]
pub struct ChainSearch {
    max_chain_size: usize,
    scope: ExplorationScope,
    explored: HashSet<GraphElement>,
}

impl ChainSearch {
    /// Creates a search with the given pruning scope.
    #[must_use]
    pub fn new(max_chain_size: usize, scope: ExplorationScope) -> Self {
        Self {
            max_chain_size,
            scope,
            explored: HashSet::new(),
        }
    }

    /// The fast, globally pruned variant.
    #[must_use]
    pub fn fast(max_chain_size: usize) -> Self {
        Self::new(max_chain_size, ExplorationScope::Global)
    }

    /// The exhaustive, per-branch variant.
    #[must_use]
    pub fn exhaustive(max_chain_size: usize) -> Self {
        Self::new(max_chain_size, ExplorationScope::PerBranch)
    }

    fn search(
        &mut self,
        context: &mut SearchContext<'_>,
        rules: InferenceRules,
        graph: &LinkGraph,
        builder: &mut ChainBuilder,
    ) -> bool {
        if builder.len() > self.max_chain_size {
            return false;
        }

        let last = *builder.last_element();
        let next_link = if builder.len() % 2 == 1 {
            LinkStrength::Strong
        } else {
            LinkStrength::Weak
        };
        let friends: Vec<GraphElement> = graph.neighbors(&last, next_link).copied().collect();
        for friend in friends {
            if builder.index_of(&friend).is_some() {
                continue;
            }
            if self.scope == ExplorationScope::Global && self.explored.contains(&friend) {
                continue;
            }

            builder.push(next_link, friend);
            if builder.len() >= 4
                && builder.len() % 2 == 0
                && rules.process_chain(context, &builder.to_chain(), graph)
            {
                return true;
            }
            let stop = self.search(context, rules, graph, builder);
            builder.pop();
            if stop {
                return true;
            }
        }

        false
    }
}

impl SearchAlgorithm for ChainSearch {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Chain
    }

    fn run(
        &mut self,
        context: &mut SearchContext<'_>,
        rules: InferenceRules,
        graph: &LinkGraph,
    ) -> bool {
        let starts: Vec<GraphElement> = graph.elements().copied().collect();
        for start in starts {
            let mut builder = ChainBuilder::new(start);
            if self.search(context, rules, graph, &mut builder) {
                return true;
            }
            if self.scope == ExplorationScope::Global {
                self.explored.insert(start);
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use lacework_core::{Cell, CellPossibility};

    use crate::{buffer::ChangeBuffer, inference, store::CandidateStore};

    use super::*;

    fn element(row: u8, col: u8, digit: u8) -> GraphElement {
        GraphElement::from(CellPossibility::from_coords(row, col, digit))
    }

    /// A four-element rectangle of conjugate pairs on one digit. Closing
    /// it weakly makes a nice loop.
    fn rectangle_graph() -> LinkGraph {
        let mut graph = LinkGraph::new();
        graph.add_link(element(0, 0, 4), element(0, 8, 4), LinkStrength::Strong);
        graph.add_link(element(0, 8, 4), element(5, 8, 4), LinkStrength::Weak);
        graph.add_link(element(5, 8, 4), element(5, 0, 4), LinkStrength::Strong);
        graph.add_link(element(5, 0, 4), element(0, 0, 4), LinkStrength::Weak);
        graph
    }

    fn blank_store() -> CandidateStore {
        CandidateStore::from_grid(&lacework_core::Grid::new())
    }

    #[test]
    fn test_loop_search_finds_the_rectangle() {
        let store = blank_store();
        let mut buffer = ChangeBuffer::new();
        let mut context = SearchContext {
            store: &store,
            buffer: &mut buffer,
            stop_on_first: true,
        };

        let graph = rectangle_graph();
        let mut search = LoopSearch::new(8);
        assert!(search.run(&mut context, inference::SINGLE_DIGIT, &graph));

        let commits = buffer.take_commits();
        assert_eq!(commits.len(), 1);
        // Both weak sides eliminate digit 4 from the cells seeing them
        for change in commits[0].changes() {
            assert_eq!(change.possibility().digit, 4);
            assert!(change.is_elimination());
        }
    }

    #[test]
    fn test_loop_search_deduplicates_cycles() {
        let store = blank_store();
        let mut buffer = ChangeBuffer::new();
        let mut context = SearchContext {
            store: &store,
            buffer: &mut buffer,
            stop_on_first: false,
        };

        let graph = rectangle_graph();
        let mut search = LoopSearch::new(8);
        search.run(&mut context, inference::SINGLE_DIGIT, &graph);
        assert!(!context.buffer.take_commits().is_empty());

        // A second pass over the same graph reemits nothing
        search.run(&mut context, inference::SINGLE_DIGIT, &graph);
        assert!(context.buffer.take_commits().is_empty());
    }

    #[test]
    fn test_chain_search_eliminates_common_peers_of_both_ends() {
        let store = blank_store();
        let mut buffer = ChangeBuffer::new();
        let mut context = SearchContext {
            store: &store,
            buffer: &mut buffer,
            stop_on_first: true,
        };

        // Open chain 7r1c1 = 7r1c9 - 7r4c9 = 7r6c8, plus a candidate both
        // ends see
        let mut graph = LinkGraph::new();
        graph.add_link(element(0, 0, 7), element(0, 8, 7), LinkStrength::Strong);
        graph.add_link(element(0, 8, 7), element(3, 8, 7), LinkStrength::Weak);
        graph.add_link(element(3, 8, 7), element(5, 7, 7), LinkStrength::Strong);
        graph.add_link(element(0, 0, 7), element(5, 0, 7), LinkStrength::Weak);
        graph.add_link(element(5, 7, 7), element(5, 0, 7), LinkStrength::Weak);

        let mut search = ChainSearch::exhaustive(8);
        assert!(search.run(&mut context, inference::SINGLE_DIGIT, &graph));

        let commits = buffer.take_commits();
        assert_eq!(commits.len(), 1);
        assert_eq!(
            commits[0].changes(),
            [crate::buffer::SolverChange::Elimination(CellPossibility::new(
                Cell::new(5, 0),
                7,
            ))]
        );
    }

    #[test]
    fn test_fast_chain_search_skips_explored_starts() {
        let store = blank_store();
        let mut buffer = ChangeBuffer::new();
        let mut context = SearchContext {
            store: &store,
            buffer: &mut buffer,
            stop_on_first: false,
        };

        let graph = rectangle_graph();
        let mut fast = ChainSearch::fast(8);
        fast.run(&mut context, inference::SINGLE_DIGIT, &graph);
        let _ = buffer.dump_changes();

        // Every element ended up in the explored set
        assert_eq!(fast.explored.len(), 4);
    }
}
