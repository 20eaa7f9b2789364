//! Depth-first tree walker.
//!
//! The walker visits every node of a thread forest exactly once, applies
//! the qualifying policy, and accumulates per-contributor counts.

use serde::{Deserialize, Serialize};
use tracing::{debug, info_span, warn};

use crate::policy::QualifyingPolicy;
use crate::types::{ContributionTally, NodeLevel, ThreadNode};

/// Counters gathered during a walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkStats {
    /// Number of top-level threads.
    pub roots: usize,
    /// Number of nodes visited (roots included).
    pub nodes_visited: usize,
    /// Number of nodes that qualified.
    pub qualifying: u64,
    /// Deepest level reached; roots are depth 0.
    pub max_depth: usize,
    /// `answers` entries found below the root level and not walked.
    pub ignored_nested_answers: usize,
}

/// Result of walking a forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkReport {
    /// Final per-contributor counts.
    pub tally: ContributionTally,
    /// Walk counters.
    pub stats: WalkStats,
}

/// Depth-first, pre-order forest walker.
///
/// ## Algorithm
///
/// 1. Start with an empty tally
/// 2. For each root:
///    - Classify the node and increment its contributor if it qualifies
///    - Walk comments, then answers
/// 3. For each nested node:
///    - Classify and increment as above
///    - Walk comments only
/// 4. Return the tally
#[derive(Debug, Clone, Default)]
pub struct TreeWalker {
    policy: QualifyingPolicy,
}

impl TreeWalker {
    /// Create a walker with a policy.
    pub fn new(policy: QualifyingPolicy) -> Self {
        Self { policy }
    }

    /// Walk the forest and return the tally.
    pub fn tally(&self, forest: &[ThreadNode]) -> ContributionTally {
        self.walk(forest).tally
    }

    /// Walk the forest and return the tally with walk counters.
    pub fn walk(&self, forest: &[ThreadNode]) -> WalkReport {
        let span = info_span!("walk", roots = forest.len(), policy = self.policy.policy_id());
        let _enter = span.enter();

        let mut tally = ContributionTally::new();
        let mut stats = WalkStats {
            roots: forest.len(),
            ..WalkStats::default()
        };

        for (index, root) in forest.iter().enumerate() {
            let before = stats.nodes_visited;
            self.visit(root, NodeLevel::Root, 0, &mut tally, &mut stats);
            debug!(
                root = index,
                nodes = stats.nodes_visited - before,
                "walked thread"
            );
        }

        if stats.ignored_nested_answers > 0 {
            warn!(
                ignored = stats.ignored_nested_answers,
                "answers below the top level are not counted"
            );
        }

        WalkReport { tally, stats }
    }

    fn visit(
        &self,
        node: &ThreadNode,
        level: NodeLevel,
        depth: usize,
        tally: &mut ContributionTally,
        stats: &mut WalkStats,
    ) {
        stats.nodes_visited += 1;
        stats.max_depth = stats.max_depth.max(depth);

        if self.policy.is_qualifying(&node.text, node.endorsed) {
            tally.increment(node.contributor());
            stats.qualifying += 1;
        }

        if level == NodeLevel::Nested {
            stats.ignored_nested_answers += node.answers.len();
        }

        for child in node.children(level) {
            self.visit(child, NodeLevel::Nested, depth + 1, tally, stats);
        }
    }

    /// Get the policy.
    pub fn policy(&self) -> &QualifyingPolicy {
        &self.policy
    }
}

/// Tally a forest with the default policy.
pub fn tally(forest: &[ThreadNode]) -> ContributionTally {
    TreeWalker::default().tally(forest)
}

/// Count every node the walker would visit.
pub fn count_nodes(forest: &[ThreadNode]) -> usize {
    fn count(node: &ThreadNode, level: NodeLevel) -> usize {
        1 + node
            .children(level)
            .map(|child| count(child, NodeLevel::Nested))
            .sum::<usize>()
    }

    forest.iter().map(|root| count(root, NodeLevel::Root)).sum()
}
