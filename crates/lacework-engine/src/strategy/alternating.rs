//! Alternating inference chains and loops.

use crate::{
    chain::{
        cycle_basis::CycleBasisSearch,
        search::{AlgorithmKind, ChainSearch, LoopSearch, SearchAlgorithm},
    },
    inference::{self, InferenceRules},
    solver::SolverSession,
    strategy::{Difficulty, Strategy},
};

/// Search depth shared by every preset, in graph elements.
const MAX_ELEMENTS: usize = 8;

/// One inference family paired with one search algorithm.
///
/// The family fixes which links exist and what a finding means; the
/// algorithm only decides how the graph is walked. Every combination is a
/// complete strategy.
#[derive(Debug)]
pub struct AlternatingInference {
    rules: InferenceRules,
    algorithm: Box<dyn SearchAlgorithm>,
    difficulty: Difficulty,
}

impl AlternatingInference {
    /// Combines an inference family with a search algorithm.
    #[must_use]
    pub fn with_algorithm(
        rules: InferenceRules,
        algorithm: Box<dyn SearchAlgorithm>,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            rules,
            algorithm,
            difficulty,
        }
    }

    /// Single-digit loops found through the cycle basis.
    #[must_use]
    pub fn x_cycles() -> Self {
        Self::with_algorithm(
            inference::SINGLE_DIGIT,
            Box::new(CycleBasisSearch::new()),
            Difficulty::Hard,
        )
    }

    /// Single-digit open chains with a shared explored set.
    #[must_use]
    pub fn x_chains() -> Self {
        Self::with_algorithm(
            inference::SINGLE_DIGIT,
            Box::new(ChainSearch::fast(MAX_ELEMENTS)),
            Difficulty::Hard,
        )
    }

    /// Full-graph loops over plain candidates.
    #[must_use]
    pub fn ai_loops() -> Self {
        Self::with_algorithm(
            inference::SIMPLE,
            Box::new(LoopSearch::new(MAX_ELEMENTS)),
            Difficulty::Hard,
        )
    }

    /// Full-graph open chains over plain candidates.
    #[must_use]
    pub fn ai_chains() -> Self {
        Self::with_algorithm(
            inference::SIMPLE,
            Box::new(ChainSearch::exhaustive(MAX_ELEMENTS)),
            Difficulty::Hard,
        )
    }

    /// Loops over candidates, groups and almost-locked sets.
    #[must_use]
    pub fn subsets_loops() -> Self {
        Self::with_algorithm(
            inference::SUBSETS,
            Box::new(LoopSearch::new(MAX_ELEMENTS)),
            Difficulty::Extreme,
        )
    }

    /// Open chains over candidates, groups and almost-locked sets.
    #[must_use]
    pub fn subsets_chains() -> Self {
        Self::with_algorithm(
            inference::SUBSETS,
            Box::new(ChainSearch::exhaustive(MAX_ELEMENTS)),
            Difficulty::Extreme,
        )
    }
}

impl Strategy for AlternatingInference {
    fn name(&self) -> &'static str {
        match self.algorithm.kind() {
            AlgorithmKind::Loop => self.rules.loop_name,
            AlgorithmKind::Chain => self.rules.chain_name,
        }
    }

    fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    fn apply(&mut self, session: &mut SolverSession) {
        let rules = self.rules;
        let (graph, mut context) = session.search_parts(rules.rules);
        self.algorithm.run(&mut context, rules, graph);
    }
}

#[cfg(test)]
mod tests {
    use lacework_core::{Cell, translate};

    use crate::store::CandidateStore;

    use super::*;

    /// Leaves digit 4 with exactly two positions in columns 1 and 9, at
    /// rows 1 and 6. The conjugate columns close into a loop over the
    /// full rows.
    fn rectangle_store() -> CandidateStore {
        let mut store = CandidateStore::from_grid(&translate::parse_line(""));
        for row in 0..9 {
            if row != 0 && row != 5 {
                store.eliminate(Cell::new(row, 0), 4);
                store.eliminate(Cell::new(row, 8), 4);
            }
        }
        store
    }

    #[test]
    fn test_names_follow_the_algorithm_kind() {
        assert_eq!(AlternatingInference::x_cycles().name(), "X-Cycles");
        assert_eq!(AlternatingInference::x_chains().name(), "X-Chains");
        assert_eq!(
            AlternatingInference::ai_loops().name(),
            "Alternating Inference Loops"
        );
        assert_eq!(
            AlternatingInference::subsets_chains().name(),
            "Subsets Alternating Inference Chains"
        );
    }

    #[test]
    fn test_x_cycles_find_the_conjugate_rectangle() {
        let mut session = SolverSession::new(rectangle_store());
        AlternatingInference::x_cycles().apply(&mut session);

        let commits = session.take_commits();
        assert_eq!(commits.len(), 1);
        let changes = commits[0].changes();
        // Both weak sides of the loop clear their rows
        assert_eq!(changes.len(), 14);
        for change in changes {
            let cp = change.possibility();
            assert!(change.is_elimination());
            assert_eq!(cp.digit, 4);
            assert!(cp.cell.row == 0 || cp.cell.row == 5);
            assert!(cp.cell.col >= 1 && cp.cell.col <= 7);
        }
    }

    #[test]
    fn test_blank_grid_yields_nothing() {
        let store = CandidateStore::from_grid(&translate::parse_line(""));
        let mut session = SolverSession::new(store);
        AlternatingInference::ai_loops().apply(&mut session);
        assert!(session.take_commits().is_empty());
    }
}
