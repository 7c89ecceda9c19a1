//! Graph construction rules.
//!
//! Each rule scans the candidate store and adds one family of links.
//! Strength classification follows the rank rule: exactly two remaining
//! positions or possibilities make a link strong, more make it weak.

use lacework_core::{Cell, CellPossibility};
use tinyvec::ArrayVec;

use crate::{
    als,
    graph::{
        AlmostLockedSet, ConstructRules, GraphElement, LinkGraph, LinkStrength, PossibilityGroup,
    },
    store::CandidateStore,
};

pub(super) fn apply(rule: ConstructRules, graph: &mut LinkGraph, store: &CandidateStore) {
    if rule == ConstructRules::UNIT_STRONG {
        unit_links(graph, store, LinkStrength::Strong);
    } else if rule == ConstructRules::UNIT_WEAK {
        unit_links(graph, store, LinkStrength::Weak);
    } else if rule == ConstructRules::CELL_STRONG {
        cell_links(graph, store, LinkStrength::Strong);
    } else if rule == ConstructRules::CELL_WEAK {
        cell_links(graph, store, LinkStrength::Weak);
    } else if rule == ConstructRules::POINTING_GROUP {
        pointing_groups(graph, store);
    } else if rule == ConstructRules::ALMOST_NAKED_SET {
        almost_naked_sets(graph, store);
    } else {
        debug_assert!(false, "unknown construction rule: {rule:?}");
    }
}

fn unit_links(graph: &mut LinkGraph, store: &CandidateStore, strength: LinkStrength) {
    let wanted = |count: usize| match strength {
        LinkStrength::Strong => count == 2,
        _ => count > 2,
    };
    for digit in 1..=9 {
        for row in 0..9 {
            let positions = store.row_positions(row, digit);
            if wanted(positions.len()) {
                link_all_pairs(
                    graph,
                    positions.iter().map(|col| Cell::new(row, col)),
                    digit,
                    strength,
                );
            }
        }
        for col in 0..9 {
            let positions = store.col_positions(col, digit);
            if wanted(positions.len()) {
                link_all_pairs(
                    graph,
                    positions.iter().map(|row| Cell::new(row, col)),
                    digit,
                    strength,
                );
            }
        }
        for box_index in 0..9 {
            let positions = store.box_positions(box_index, digit);
            if wanted(positions.len()) {
                link_all_pairs(graph, positions.cells(box_index), digit, strength);
            }
        }
    }
}

fn link_all_pairs(
    graph: &mut LinkGraph,
    cells: impl Iterator<Item = Cell>,
    digit: u8,
    strength: LinkStrength,
) {
    let cells: Vec<Cell> = cells.collect();
    for (i, &one) in cells.iter().enumerate() {
        for &two in &cells[i + 1..] {
            graph.add_link(
                GraphElement::from(CellPossibility::new(one, digit)),
                GraphElement::from(CellPossibility::new(two, digit)),
                strength,
            );
        }
    }
}

fn cell_links(graph: &mut LinkGraph, store: &CandidateStore, strength: LinkStrength) {
    for cell in Cell::all() {
        let candidates = store.candidates_at(cell);
        let wanted = match strength {
            LinkStrength::Strong => candidates.len() == 2,
            _ => candidates.len() > 2,
        };
        if !wanted {
            continue;
        }
        let digits: Vec<u8> = candidates.iter().collect();
        for (i, &one) in digits.iter().enumerate() {
            for &two in &digits[i + 1..] {
                graph.add_link(
                    GraphElement::from(CellPossibility::new(cell, one)),
                    GraphElement::from(CellPossibility::new(cell, two)),
                    strength,
                );
            }
        }
    }
}

fn pointing_groups(graph: &mut LinkGraph, store: &CandidateStore) {
    for digit in 1..=9 {
        for box_index in 0..9 {
            let in_box: Vec<Cell> = store.box_positions(box_index, digit).cells(box_index).collect();
            if in_box.len() < 2 {
                continue;
            }
            for line in 0..3 {
                let base_row = (box_index / 3) * 3 + line;
                let segment: Vec<Cell> =
                    in_box.iter().copied().filter(|c| c.row == base_row).collect();
                if segment.len() > 1 {
                    let group = group_element(digit, &segment);
                    let rest: Vec<Cell> =
                        in_box.iter().copied().filter(|c| c.row != base_row).collect();
                    link_group_to_rest(graph, &group, digit, &rest, |c| c.col);
                    let outside: Vec<Cell> = (0..9)
                        .map(|col| Cell::new(base_row, col))
                        .filter(|c| {
                            c.box_index() != box_index && store.candidates_at(*c).contains(digit)
                        })
                        .collect();
                    link_group_to_rest(graph, &group, digit, &outside, |c| c.box_index());
                }

                let base_col = (box_index % 3) * 3 + line;
                let segment: Vec<Cell> =
                    in_box.iter().copied().filter(|c| c.col == base_col).collect();
                if segment.len() > 1 {
                    let group = group_element(digit, &segment);
                    let rest: Vec<Cell> =
                        in_box.iter().copied().filter(|c| c.col != base_col).collect();
                    link_group_to_rest(graph, &group, digit, &rest, |c| c.row);
                    let outside: Vec<Cell> = (0..9)
                        .map(|row| Cell::new(row, base_col))
                        .filter(|c| {
                            c.box_index() != box_index && store.candidates_at(*c).contains(digit)
                        })
                        .collect();
                    link_group_to_rest(graph, &group, digit, &outside, |c| c.box_index());
                }
            }
        }
    }
}

fn group_element(digit: u8, cells: &[Cell]) -> GraphElement {
    GraphElement::Group(PossibilityGroup::new(
        digit,
        ArrayVec::from_iter(cells.iter().copied()),
    ))
}

/// Links `group` to the other same-digit positions of one of its units.
///
/// Every single position gets a link, strong when it is the only other
/// position. Positions aligned by `axis` into a group of their own also
/// get a group-to-group link, strong when that group covers the whole
/// rest.
fn link_group_to_rest(
    graph: &mut LinkGraph,
    group: &GraphElement,
    digit: u8,
    rest: &[Cell],
    axis: impl Fn(&Cell) -> u8,
) {
    if rest.is_empty() {
        return;
    }
    let single_strength = if rest.len() == 1 {
        LinkStrength::Strong
    } else {
        LinkStrength::Weak
    };
    for &cell in rest {
        graph.add_link(
            *group,
            GraphElement::from(CellPossibility::new(cell, digit)),
            single_strength,
        );
    }

    let mut keys: Vec<u8> = rest.iter().map(&axis).collect();
    keys.sort_unstable();
    keys.dedup();
    for key in keys {
        let aligned: Vec<Cell> = rest.iter().copied().filter(|c| axis(c) == key).collect();
        if aligned.len() < 2 || aligned.len() > 3 {
            continue;
        }
        let other = group_element(digit, &aligned);
        let strength = if aligned.len() == rest.len() {
            LinkStrength::Strong
        } else {
            LinkStrength::Weak
        };
        graph.add_link(*group, other, strength);
    }
}

fn almost_naked_sets(graph: &mut LinkGraph, store: &CandidateStore) {
    for als in als::full_grid(store) {
        if als.cells.len() < 2 {
            continue;
        }
        // A digit held by exactly one cell of the set turns the rest into
        // a locked set once that candidate is asserted false elsewhere.
        let Some((pivot_digit, pivot_cell)) = als.digits.iter().find_map(|digit| {
            let holders = als.cells_with(digit);
            (holders.len() == 1).then(|| (digit, holders[0]))
        }) else {
            continue;
        };
        let pivot = CellPossibility::new(pivot_cell, pivot_digit);

        let remainder = AlmostLockedSet::new(
            als.cells,
            als.cell_digits
                .iter()
                .map(|set| set.difference(lacework_core::CandidateSet::from_iter([pivot_digit])))
                .collect(),
        );
        let element = GraphElement::AlmostLockedSet(remainder);
        graph.add_link(GraphElement::from(pivot), element, LinkStrength::Strong);

        let cells: Vec<Cell> = remainder.cells.iter().copied().collect();
        let same_row = cells.iter().all(|c| c.row == cells[0].row);
        let same_col = cells.iter().all(|c| c.col == cells[0].col);
        let same_box = cells.iter().all(|c| c.box_index() == cells[0].box_index());

        for digit in remainder.digits.iter() {
            if digit == pivot_digit {
                continue;
            }
            let mut targets: Vec<Cell> = Vec::new();
            if same_row {
                targets.extend((0..9).map(|col| Cell::new(cells[0].row, col)));
            }
            if same_col {
                targets.extend((0..9).map(|row| Cell::new(row, cells[0].col)));
            }
            if same_box {
                let box_index = cells[0].box_index();
                targets.extend(store.box_positions(box_index, digit).cells(box_index));
            }
            for target in targets {
                if cells.contains(&target) || !store.candidates_at(target).contains(digit) {
                    continue;
                }
                graph.add_link(
                    element,
                    GraphElement::from(CellPossibility::new(target, digit)),
                    LinkStrength::Weak,
                );
            }
        }
    }
}
