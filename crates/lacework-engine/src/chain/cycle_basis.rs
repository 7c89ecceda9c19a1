//! Loop enumeration through a cycle basis.
//!
//! A breadth-first spanning forest of the graph turns every non-forest
//! link into a chord, and every chord closes exactly one basis cycle:
//! the two forest paths from its endpoints joined by the chord itself.
//! This visits each candidate cycle once instead of walking every path,
//! at the price of only seeing the basis.

use std::collections::{HashMap, HashSet};

use crate::{
    chain::{Chain, ChainBuilder, Loop},
    graph::{GraphElement, LinkGraph, LinkStrength},
    inference::{InferenceRules, SearchContext},
};

use super::search::{AlgorithmKind, SearchAlgorithm};

/// Finds nice loops by enumerating the cycle basis.
///
/// Every emitted loop is recorded and never processed twice, different
/// chords can close the same cycle.
#[derive(Debug, Default)]
pub struct CycleBasisSearch {
    processed: HashSet<Loop>,
}

impl CycleBasisSearch {
    /// Creates an empty search.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SearchAlgorithm for CycleBasisSearch {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Loop
    }

    fn run(
        &mut self,
        context: &mut SearchContext<'_>,
        rules: InferenceRules,
        graph: &LinkGraph,
    ) -> bool {
        for looped in find_loops(graph) {
            if self.processed.contains(&looped) {
                continue;
            }
            let stop = rules.process_full_loop(context, &looped);
            self.processed.insert(looped);
            if stop {
                return true;
            }
        }
        false
    }
}

/// The forest link leading from an element back toward its root.
#[derive(Debug, Clone, Copy)]
struct EdgeTo {
    link: LinkStrength,
    to: GraphElement,
}

/// Enumerates the alternating loops of the cycle basis.
#[must_use]
pub fn find_loops(graph: &LinkGraph) -> Vec<Loop> {
    let forest = spanning_forest(graph);
    let mut result = Vec::new();
    let mut done: HashSet<(GraphElement, GraphElement)> = HashSet::new();

    for &start in graph.elements() {
        let friends: Vec<GraphElement> =
            graph.neighbors(&start, LinkStrength::Any).copied().collect();
        for friend in friends {
            let in_forest = forest.get(&start).is_some_and(|edge| edge.to == friend)
                || forest.get(&friend).is_some_and(|edge| edge.to == start);
            if in_forest {
                continue;
            }
            let chord = ordered(start, friend);
            if done.contains(&chord) {
                continue;
            }
            done.insert(chord);

            if let Some(looped) = close_chord(graph, &forest, start, friend) {
                result.push(looped);
            }
        }
    }
    result
}

/// Walks the two forest paths from a chord's endpoints until they meet,
/// then joins them into a loop.
fn close_chord(
    graph: &LinkGraph,
    forest: &HashMap<GraphElement, EdgeTo>,
    start: GraphElement,
    friend: GraphElement,
) -> Option<Loop> {
    let chord_link = graph.link_between(&start, &friend);
    let mut path1 = ChainBuilder::new(start);
    let mut path2 = ChainBuilder::new(friend);
    let mut continue1 = true;
    let mut continue2 = true;

    while continue1 || continue2 {
        if continue1 {
            match forest.get(path1.last_element()) {
                Some(edge) => {
                    if let Some(index) = path2.index_of(&edge.to) {
                        return construct_loop(
                            &path1.to_chain(),
                            &path2.to_chain(),
                            index,
                            edge.link,
                            chord_link,
                        );
                    }
                    path1.push(edge.link, edge.to);
                }
                None => continue1 = false,
            }
        }
        if continue2 {
            match forest.get(path2.last_element()) {
                Some(edge) => {
                    if let Some(index) = path1.index_of(&edge.to) {
                        return construct_loop(
                            &path2.to_chain(),
                            &path1.to_chain(),
                            index,
                            edge.link,
                            chord_link,
                        );
                    }
                    path2.push(edge.link, edge.to);
                }
                None => continue2 = false,
            }
        }
    }
    None
}

/// Merges the full path, the meeting link and the reversed prefix of the
/// other path into one cycle, rejecting cycles that do not alternate.
fn construct_loop(
    full_path: &Chain,
    other_path: &Chain,
    index: usize,
    middle_link: LinkStrength,
    chord_link: LinkStrength,
) -> Option<Loop> {
    let mut elements = Vec::with_capacity(full_path.len() + index + 1);
    let mut links = Vec::with_capacity(full_path.len() + index + 1);

    for i in 0..full_path.len() {
        elements.push(full_path.elements()[i]);
        links.push(if i == full_path.len() - 1 {
            middle_link
        } else {
            full_path.links()[i]
        });
    }
    for i in (0..=index).rev() {
        elements.push(other_path.elements()[i]);
        links.push(if i == 0 {
            chord_link
        } else {
            other_path.links()[i - 1]
        });
    }

    alternating(elements, links)
}

/// Validates a cycle as a nice loop.
///
/// The cycle must have even length and admit an alternation where every
/// second link is strong. A strong link can stand in for a weak one, the
/// other direction cannot.
fn alternating(elements: Vec<GraphElement>, links: Vec<LinkStrength>) -> Option<Loop> {
    if elements.len() < 4 || elements.len() % 2 == 1 {
        return None;
    }
    for phase in 0..2_usize {
        if links
            .iter()
            .enumerate()
            .all(|(i, link)| i % 2 == phase || *link == LinkStrength::Strong)
        {
            let assigned: Vec<LinkStrength> = (0..links.len())
                .map(|i| {
                    if i % 2 == phase {
                        LinkStrength::Weak
                    } else {
                        LinkStrength::Strong
                    }
                })
                .collect();
            return Some(Loop::closed(elements, assigned));
        }
    }
    None
}

fn ordered(one: GraphElement, two: GraphElement) -> (GraphElement, GraphElement) {
    if one <= two { (one, two) } else { (two, one) }
}

/// Builds a breadth-first spanning forest over every component.
fn spanning_forest(graph: &LinkGraph) -> HashMap<GraphElement, EdgeTo> {
    let mut forest = HashMap::new();
    let mut roots: HashSet<GraphElement> = HashSet::new();
    let mut queue = std::collections::VecDeque::new();

    for &start in graph.elements() {
        if forest.contains_key(&start) || roots.contains(&start) {
            continue;
        }
        roots.insert(start);
        queue.push_back(start);
        while let Some(current) = queue.pop_front() {
            let friends: Vec<GraphElement> =
                graph.neighbors(&current, LinkStrength::Any).copied().collect();
            for friend in friends {
                if forest.contains_key(&friend) || roots.contains(&friend) {
                    continue;
                }
                let link = graph.link_between(&friend, &current);
                if link == LinkStrength::None {
                    continue;
                }
                forest.insert(friend, EdgeTo { link, to: current });
                queue.push_back(friend);
            }
        }
    }
    forest
}

#[cfg(test)]
mod tests {
    use lacework_core::CellPossibility;

    use crate::{buffer::ChangeBuffer, inference, store::CandidateStore};

    use super::*;

    fn element(row: u8, col: u8, digit: u8) -> GraphElement {
        GraphElement::from(CellPossibility::from_coords(row, col, digit))
    }

    fn rectangle_graph() -> LinkGraph {
        let mut graph = LinkGraph::new();
        graph.add_link(element(0, 0, 4), element(0, 8, 4), LinkStrength::Strong);
        graph.add_link(element(0, 8, 4), element(5, 8, 4), LinkStrength::Weak);
        graph.add_link(element(5, 8, 4), element(5, 0, 4), LinkStrength::Strong);
        graph.add_link(element(5, 0, 4), element(0, 0, 4), LinkStrength::Weak);
        graph
    }

    #[test]
    fn test_basis_finds_the_rectangle_once() {
        let loops = find_loops(&rectangle_graph());
        assert_eq!(loops.len(), 1);
        let looped = &loops[0];
        assert_eq!(looped.len(), 4);
        assert_eq!(looped.links().len() + 1, looped.len());

        let mut strong = 0;
        let mut weak = 0;
        looped.for_each_link(LinkStrength::Strong, |_, _| strong += 1);
        looped.for_each_link(LinkStrength::Weak, |_, _| weak += 1);
        assert_eq!((strong, weak), (2, 2));
    }

    #[test]
    fn test_non_alternating_cycle_is_rejected() {
        // A triangle of weak links closes no nice loop
        let mut graph = LinkGraph::new();
        graph.add_link(element(0, 0, 2), element(0, 4, 2), LinkStrength::Weak);
        graph.add_link(element(0, 4, 2), element(0, 8, 2), LinkStrength::Weak);
        graph.add_link(element(0, 8, 2), element(0, 0, 2), LinkStrength::Weak);
        assert!(find_loops(&graph).is_empty());
    }

    #[test]
    fn test_search_processes_each_loop_once() {
        let store = CandidateStore::from_grid(&lacework_core::Grid::new());
        let mut buffer = ChangeBuffer::new();
        let mut context = SearchContext {
            store: &store,
            buffer: &mut buffer,
            stop_on_first: false,
        };

        let graph = rectangle_graph();
        let mut search = CycleBasisSearch::new();
        search.run(&mut context, inference::SINGLE_DIGIT, &graph);
        assert_eq!(context.buffer.take_commits().len(), 1);

        search.run(&mut context, inference::SINGLE_DIGIT, &graph);
        assert!(context.buffer.take_commits().is_empty());
    }
}
