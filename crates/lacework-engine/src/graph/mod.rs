//! The link graph: typed logical links between graph elements.

use std::collections::BTreeMap;

use bitflags::bitflags;

use crate::store::CandidateStore;

pub mod element;
mod rules;

pub use element::{AlmostLockedSet, GraphElement, PossibilityGroup};

/// The logical type of a link between two elements.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::IsVariant)]
#[repr(u32)]
pub enum LinkStrength {
    /// No link. Only ever returned by queries, never stored as an edge.
    #[default]
    None = 0,
    /// Biconditional: exactly one side is true.
    Strong = 1,
    /// One-directional exclusion: both cannot be true.
    Weak = 2,
    /// Wildcard used in queries to accept either strength.
    Any = 3,
}

impl LinkStrength {
    /// Decodes a strength from its packed representation.
    #[must_use]
    pub fn from_bits(bits: u32) -> Self {
        match bits {
            1 => Self::Strong,
            2 => Self::Weak,
            3 => Self::Any,
            _ => Self::None,
        }
    }

    /// Returns the packed representation.
    #[must_use]
    pub fn to_bits(self) -> u32 {
        self as u32
    }
}

bitflags! {
    /// Stable numeric IDs for the graph construction rules.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct ConstructRules: u8 {
        /// Strong links between the two positions of a digit in a unit.
        const UNIT_STRONG = 1 << 0;
        /// Strong links between the two candidates of a bivalue cell.
        const CELL_STRONG = 1 << 1;
        /// Weak links between same-digit candidates sharing a unit.
        const UNIT_WEAK = 1 << 2;
        /// Weak links between the candidates of one cell.
        const CELL_WEAK = 1 << 3;
        /// Pointing/claiming group elements and their links.
        const POINTING_GROUP = 1 << 4;
        /// Almost-locked-set elements and their links.
        const ALMOST_NAKED_SET = 1 << 5;
    }
}

impl ConstructRules {
    /// The rule set the single-digit strategies build on.
    pub const SINGLE_DIGIT: Self = Self::UNIT_STRONG.union(Self::UNIT_WEAK);
    /// The plain possibility graph used by alternating inference chains.
    pub const SIMPLE: Self = Self::SINGLE_DIGIT
        .union(Self::CELL_STRONG)
        .union(Self::CELL_WEAK);
    /// The full graph including group and almost-locked-set elements.
    pub const COMPLEX: Self = Self::SIMPLE
        .union(Self::POINTING_GROUP)
        .union(Self::ALMOST_NAKED_SET);
}

#[derive(Debug, Default, Clone)]
struct Adjacency {
    strong: Vec<GraphElement>,
    weak: Vec<GraphElement>,
}

/// An undirected graph of typed links between logical elements.
///
/// The graph carries the bitmask of construction rules already applied to
/// this instance. [`construct`](Self::construct) is idempotent per rule,
/// and a request that is not a superset of what is applied clears the
/// graph and rebuilds from scratch, so a graph can never be observed in a
/// stale partial state across strategies with different rule needs.
///
/// A strong link always implies the corresponding exclusion, so strong
/// edges are registered in the weak adjacency as well; weak-neighbor
/// queries see them without the construction rules adding them twice.
#[derive(Debug, Default, Clone)]
pub struct LinkGraph {
    nodes: BTreeMap<GraphElement, Adjacency>,
    applied: ConstructRules,
}

impl LinkGraph {
    /// Creates an empty graph with no rules applied.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            applied: ConstructRules::empty(),
        }
    }

    /// Returns the rules already applied to this instance.
    #[must_use]
    pub fn applied(&self) -> ConstructRules {
        self.applied
    }

    /// Removes every node, link and applied rule.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.applied = ConstructRules::empty();
    }

    /// Applies `rules` to the graph.
    ///
    /// Already-applied rules are no-ops. Requesting a set that does not
    /// contain everything already applied rebuilds the graph from
    /// scratch with exactly `rules`.
    pub fn construct(&mut self, rules: ConstructRules, store: &CandidateStore) {
        if self.applied.contains(rules) {
            return;
        }
        if !rules.contains(self.applied) {
            self.clear();
        }
        let missing = rules.difference(self.applied);
        for rule in missing.iter() {
            rules::apply(rule, self, store);
        }
        self.applied |= rules;
        self.normalize();
    }

    /// Adds an undirected link between `one` and `two`.
    ///
    /// `strength` must be [`LinkStrength::Strong`] or
    /// [`LinkStrength::Weak`].
    pub(crate) fn add_link(&mut self, one: GraphElement, two: GraphElement, strength: LinkStrength) {
        debug_assert!(matches!(strength, LinkStrength::Strong | LinkStrength::Weak));
        self.add_half(one, two, strength);
        self.add_half(two, one, strength);
    }

    fn add_half(&mut self, from: GraphElement, to: GraphElement, strength: LinkStrength) {
        let adjacency = self.nodes.entry(from).or_default();
        if strength == LinkStrength::Strong {
            adjacency.strong.push(to);
        }
        adjacency.weak.push(to);
    }

    fn normalize(&mut self) {
        for adjacency in self.nodes.values_mut() {
            adjacency.strong.sort_unstable();
            adjacency.strong.dedup();
            adjacency.weak.sort_unstable();
            adjacency.weak.dedup();
        }
    }

    /// Iterates over every element of the graph in a stable order.
    pub fn elements(&self) -> impl Iterator<Item = &GraphElement> {
        self.nodes.keys()
    }

    /// Iterates over the neighbors of `element` reachable through links
    /// of the given strength.
    ///
    /// Strong links answer to both [`LinkStrength::Strong`] and
    /// [`LinkStrength::Weak`] queries; [`LinkStrength::Any`] is the union.
    pub fn neighbors(
        &self,
        element: &GraphElement,
        strength: LinkStrength,
    ) -> impl Iterator<Item = &GraphElement> {
        let adjacency = self.nodes.get(element);
        let (strong, weak): (&[GraphElement], &[GraphElement]) = match (adjacency, strength) {
            (Some(a), LinkStrength::Strong) => (&a.strong, &[]),
            (Some(a), LinkStrength::Weak | LinkStrength::Any) => (&[], &a.weak),
            _ => (&[], &[]),
        };
        strong.iter().chain(weak.iter())
    }

    /// Returns the strength of the link between two elements, preferring
    /// strong when both are registered.
    #[must_use]
    pub fn link_between(&self, one: &GraphElement, two: &GraphElement) -> LinkStrength {
        let Some(adjacency) = self.nodes.get(one) else {
            return LinkStrength::None;
        };
        if adjacency.strong.binary_search(two).is_ok() {
            LinkStrength::Strong
        } else if adjacency.weak.binary_search(two).is_ok() {
            LinkStrength::Weak
        } else {
            LinkStrength::None
        }
    }

    /// Returns `true` if the two elements are linked with at least the
    /// given strength.
    #[must_use]
    pub fn are_linked(&self, one: &GraphElement, two: &GraphElement, strength: LinkStrength) -> bool {
        match strength {
            LinkStrength::None => false,
            LinkStrength::Strong => self.link_between(one, two) == LinkStrength::Strong,
            LinkStrength::Weak | LinkStrength::Any => {
                self.link_between(one, two) != LinkStrength::None
            }
        }
    }
}
