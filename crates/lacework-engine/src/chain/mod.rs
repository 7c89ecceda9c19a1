//! Chains and loops of alternating links.

use std::fmt::{self, Display};

use crate::graph::{GraphElement, LinkStrength};

pub mod coloring;
pub mod cycle_basis;
pub mod search;

/// An open path of linked elements.
///
/// A chain of `n` elements carries `n - 1` links.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chain {
    elements: Vec<GraphElement>,
    links: Vec<LinkStrength>,
}

impl Chain {
    /// Creates a chain from parallel element and link lists.
    #[must_use]
    pub fn new(elements: Vec<GraphElement>, links: Vec<LinkStrength>) -> Self {
        debug_assert!(links.len() + 1 == elements.len());
        Self { elements, links }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the chain is a single element.
    #[must_use]
    pub fn is_trivial(&self) -> bool {
        self.elements.len() <= 1
    }

    /// The elements in path order.
    #[must_use]
    pub fn elements(&self) -> &[GraphElement] {
        &self.elements
    }

    /// The links in path order, one fewer than the elements.
    #[must_use]
    pub fn links(&self) -> &[LinkStrength] {
        &self.links
    }

    /// The first element.
    #[must_use]
    pub fn first(&self) -> &GraphElement {
        &self.elements[0]
    }

    /// The last element.
    #[must_use]
    pub fn last(&self) -> &GraphElement {
        &self.elements[self.elements.len() - 1]
    }

    /// The largest element rank along the path.
    #[must_use]
    pub fn max_rank(&self) -> usize {
        self.elements.iter().map(GraphElement::rank).max().unwrap_or(0)
    }
}

impl Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (element, link) in self.elements.iter().zip(self.links.iter()) {
            write!(f, "{element} {} ", link_symbol(*link))?;
        }
        write!(f, "{}", self.elements[self.elements.len() - 1])
    }
}

fn link_symbol(link: LinkStrength) -> char {
    if link.is_strong() { '=' } else { '-' }
}

/// A closed path: a chain plus the link from its last element back to the
/// first.
///
/// A loop of `n` elements carries `n` links. Equality and hashing include
/// the closing link, so the same cycle closed differently counts as a
/// different loop.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Loop {
    elements: Vec<GraphElement>,
    links: Vec<LinkStrength>,
    last_link: LinkStrength,
}

impl Loop {
    /// Creates a loop from a path and its closing link.
    #[must_use]
    pub fn new(
        elements: Vec<GraphElement>,
        links: Vec<LinkStrength>,
        last_link: LinkStrength,
    ) -> Self {
        debug_assert!(links.len() + 1 == elements.len());
        Self {
            elements,
            links,
            last_link,
        }
    }

    /// Creates a loop from a link list whose final entry closes the path.
    #[must_use]
    pub fn closed(elements: Vec<GraphElement>, mut links: Vec<LinkStrength>) -> Self {
        debug_assert!(links.len() == elements.len());
        let last_link = links.pop().unwrap_or(LinkStrength::None);
        Self {
            elements,
            links,
            last_link,
        }
    }

    /// Returns the number of elements, which equals the number of links.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the loop has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The elements in cycle order.
    #[must_use]
    pub fn elements(&self) -> &[GraphElement] {
        &self.elements
    }

    /// The links between consecutive elements, without the closing link.
    #[must_use]
    pub fn links(&self) -> &[LinkStrength] {
        &self.links
    }

    /// The link closing the last element back to the first.
    #[must_use]
    pub fn last_link(&self) -> LinkStrength {
        self.last_link
    }

    /// Returns `true` if `element` is on the loop.
    #[must_use]
    pub fn contains(&self, element: &GraphElement) -> bool {
        self.elements.contains(element)
    }

    /// The largest element rank along the cycle.
    #[must_use]
    pub fn max_rank(&self) -> usize {
        self.elements.iter().map(GraphElement::rank).max().unwrap_or(0)
    }

    /// Calls `handler` for every link of the given strength, closing link
    /// included.
    pub fn for_each_link(
        &self,
        strength: LinkStrength,
        mut handler: impl FnMut(&GraphElement, &GraphElement),
    ) {
        for (i, link) in self.links.iter().enumerate() {
            if *link == strength {
                handler(&self.elements[i], &self.elements[i + 1]);
            }
        }
        if self.last_link == strength {
            handler(&self.elements[0], &self.elements[self.elements.len() - 1]);
        }
    }
}

impl Display for Loop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (element, link) in self.elements.iter().zip(self.links.iter()) {
            write!(f, "{element} {} ", link_symbol(*link))?;
        }
        write!(
            f,
            "{} {} .",
            self.elements[self.elements.len() - 1],
            link_symbol(self.last_link)
        )
    }
}

/// A growable path used by the search algorithms.
#[derive(Debug, Clone)]
pub struct ChainBuilder {
    elements: Vec<GraphElement>,
    links: Vec<LinkStrength>,
}

impl ChainBuilder {
    /// Starts a path at `start`.
    #[must_use]
    pub fn new(start: GraphElement) -> Self {
        Self {
            elements: vec![start],
            links: Vec::new(),
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if only the start element is present.
    #[must_use]
    pub fn is_trivial(&self) -> bool {
        self.elements.len() <= 1
    }

    /// Extends the path by one link and element.
    pub fn push(&mut self, link: LinkStrength, element: GraphElement) {
        self.elements.push(element);
        self.links.push(link);
    }

    /// Removes the last element. The start element is never removed.
    pub fn pop(&mut self) {
        if self.elements.len() == 1 {
            return;
        }
        self.elements.pop();
        self.links.pop();
    }

    /// Returns the suffix of the path starting at `index`.
    ///
    /// When the last element links back to the element at `index`, the
    /// cut is the cycle that link closes.
    #[must_use]
    pub fn cut(&self, index: usize) -> Self {
        Self {
            elements: self.elements[index..].to_vec(),
            links: self.links[index..].to_vec(),
        }
    }

    /// The start element.
    #[must_use]
    pub fn first_element(&self) -> &GraphElement {
        &self.elements[0]
    }

    /// The most recently added element.
    #[must_use]
    pub fn last_element(&self) -> &GraphElement {
        &self.elements[self.elements.len() - 1]
    }

    /// The element before the last one, if any.
    #[must_use]
    pub fn before_last_element(&self) -> Option<&GraphElement> {
        (self.elements.len() >= 2).then(|| &self.elements[self.elements.len() - 2])
    }

    /// The first link, [`LinkStrength::None`] when the path is trivial.
    #[must_use]
    pub fn first_link(&self) -> LinkStrength {
        self.links.first().copied().unwrap_or(LinkStrength::None)
    }

    /// The position of `element` on the path, scanning from the end.
    #[must_use]
    pub fn index_of(&self, element: &GraphElement) -> Option<usize> {
        self.elements.iter().rposition(|e| e == element)
    }

    /// Freezes the path into a [`Chain`].
    #[must_use]
    pub fn to_chain(&self) -> Chain {
        Chain::new(self.elements.clone(), self.links.clone())
    }

    /// Closes the path into a [`Loop`] with `last_link`.
    #[must_use]
    pub fn to_loop(&self, last_link: LinkStrength) -> Loop {
        Loop::new(self.elements.clone(), self.links.clone(), last_link)
    }
}
