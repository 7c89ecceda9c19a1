//! Two-coloring of link graph components.
//!
//! Coloring replaces path search with a single breadth-first pass: every
//! element of a component is either with or against its start, and the
//! conclusions fall out of comparing the two classes. Faster than chain
//! search, blind to anything requiring a specific path.

use std::collections::{HashSet, VecDeque};

use crate::graph::{GraphElement, LinkGraph, LinkStrength};

/// The parity of an element relative to its component's start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum ElementColor {
    /// True exactly when the start is true.
    On,
    /// False exactly when the start is true.
    Off,
}

impl ElementColor {
    /// The other color.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::On => Self::Off,
            Self::Off => Self::On,
        }
    }
}

/// One colored connected component.
#[derive(Debug, Default, Clone)]
pub struct ColoredComponent {
    /// Elements colored with the start.
    pub on: Vec<GraphElement>,
    /// Elements colored against the start.
    pub off: Vec<GraphElement>,
    /// The propagation links, child paired with its parent.
    pub history: Vec<(GraphElement, GraphElement)>,
}

impl ColoredComponent {
    /// Returns the total number of colored elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.on.len() + self.off.len()
    }

    /// Returns `true` if nothing is colored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.on.is_empty() && self.off.is_empty()
    }
}

/// Colors every component of the graph, starting each at
/// [`ElementColor::On`].
///
/// Propagation crosses strong links first, then weak ones, flipping the
/// color at every step.
#[must_use]
pub fn color_all(graph: &LinkGraph) -> Vec<ColoredComponent> {
    let mut visited: HashSet<GraphElement> = HashSet::new();
    let mut result = Vec::new();

    for &start in graph.elements() {
        if visited.contains(&start) {
            continue;
        }
        result.push(color_from(graph, start, &mut visited));
    }
    result
}

fn color_from(
    graph: &LinkGraph,
    start: GraphElement,
    visited: &mut HashSet<GraphElement>,
) -> ColoredComponent {
    let mut component = ColoredComponent::default();
    let mut queue: VecDeque<(GraphElement, ElementColor)> = VecDeque::new();

    component.on.push(start);
    visited.insert(start);
    queue.push_back((start, ElementColor::On));

    while let Some((current, color)) = queue.pop_front() {
        let opposite = color.opposite();
        let strong: Vec<GraphElement> =
            graph.neighbors(&current, LinkStrength::Strong).copied().collect();
        let weak: Vec<GraphElement> =
            graph.neighbors(&current, LinkStrength::Weak).copied().collect();
        for friend in strong.into_iter().chain(weak) {
            if visited.contains(&friend) {
                continue;
            }
            visited.insert(friend);
            component.history.push((friend, current));
            match opposite {
                ElementColor::On => component.on.push(friend),
                ElementColor::Off => component.off.push(friend),
            }
            queue.push_back((friend, opposite));
        }
    }
    component
}
