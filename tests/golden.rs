//! Golden tests for the endorsement tally.
//!
//! These tests verify determinism and correctness of the tree walker,
//! classifier, and ranking over realistic export shapes.

use endorsement_tally::{
    count_nodes, is_qualifying, parse_forest, tally, ContributionTally, ContributorId,
    QualifyingPolicy, Ranking, ThreadNode, TreeWalker, UNKNOWN_NAME,
};
use proptest::prelude::*;

// ─────────────────────────────────────────────────────────────────────────────
// Test Helpers
// ─────────────────────────────────────────────────────────────────────────────

const EXPORT: &str = r#"[
  {
    "type": "question",
    "text": "How do we handle SIGCHLD in the shell assignment?",
    "endorsed": false,
    "user": {"name": "Student One", "email": "one@example.edu"},
    "comments": [
      {
        "text": "Install a handler with sigaction and reap children in a loop with waitpid and WNOHANG so that no zombie processes linger after they exit.",
        "endorsed": false,
        "user": {"name": "Student Two"},
        "comments": [
          {"text": "Thanks!", "user": {"name": "Student One"}, "comments": []}
        ]
      }
    ],
    "answers": [
      {
        "text": "See the lecture notes on signals.",
        "endorsed": true,
        "user": {"name": "TA Grace"},
        "comments": [
          {"text": "", "endorsed": true}
        ]
      }
    ]
  },
  {
    "type": "announcement",
    "text": "Office hours are moved to Thursday this week. Please check the calendar for the updated room and bring your laptops for the debugging session.",
    "user": {"name": "TA Grace"}
  },
  {
    "type": "post",
    "text": "Is the deadline extended?",
    "user": {},
    "comments": [
      {"text": "No.", "endorsed": true, "user": {"name": "Prof Hopper"}}
    ]
  }
]"#;

fn long_text(n: usize) -> String {
    "word ".repeat(n / 5 + 1)[..n].to_string()
}

fn build_deep_chain(depth: usize) -> ThreadNode {
    let mut node = ThreadNode::new(long_text(120), false).with_author("Deep");
    for _ in 0..depth {
        node = ThreadNode::new(long_text(120), false)
            .with_author("Deep")
            .with_comment(node);
    }
    node
}

/// Count qualifying nodes independently of the walker.
fn brute_force_qualifying(forest: &[ThreadNode]) -> u64 {
    fn visit(node: &ThreadNode, root: bool, acc: &mut u64) {
        if is_qualifying(&node.text, node.endorsed) {
            *acc += 1;
        }
        for c in &node.comments {
            visit(c, false, acc);
        }
        if root {
            for a in &node.answers {
                visit(a, false, acc);
            }
        }
    }

    let mut acc = 0;
    for root in forest {
        visit(root, true, &mut acc);
    }
    acc
}

// ─────────────────────────────────────────────────────────────────────────────
// CORRECTNESS TESTS
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_export_tally() {
    let forest = parse_forest(EXPORT.as_bytes()).unwrap();
    let result = tally(&forest);

    assert_eq!(result.get(&ContributorId::new("Student One")), 0);
    assert_eq!(result.get(&ContributorId::new("Student Two")), 1);
    assert_eq!(result.get(&ContributorId::new("TA Grace")), 2);
    assert_eq!(result.get(&ContributorId::new("Prof Hopper")), 1);
    assert_eq!(result.get(&ContributorId::new(UNKNOWN_NAME)), 1);
    assert_eq!(result.total(), 5);
}

#[test]
fn test_export_node_count() {
    let forest = parse_forest(EXPORT.as_bytes()).unwrap();
    let report = TreeWalker::default().walk(&forest);

    assert_eq!(count_nodes(&forest), 8);
    assert_eq!(report.stats.nodes_visited, 8);
    assert_eq!(report.stats.roots, 3);
    assert_eq!(report.stats.qualifying, report.tally.total());
    assert_eq!(report.tally.total(), brute_force_qualifying(&forest));
}

#[test]
fn test_export_ranking() {
    let forest = parse_forest(EXPORT.as_bytes()).unwrap();
    let ranking = Ranking::from_tally(&tally(&forest));

    let csv = ranking.to_csv();
    let expected = "Contributor,Verified/Endorsed Count\r\n\
                    TA Grace,2\r\n\
                    Prof Hopper,1\r\n\
                    Student Two,1\r\n\
                    unknown name,1\r\n";
    assert_eq!(csv, expected);

    let console = ranking.render_console();
    let first = console.lines().nth(1).unwrap();
    assert!(first.starts_with("  TA Grace "));
    assert!(first.ends_with("  -> 2"));
}

#[test]
fn test_deep_nesting() {
    let forest = vec![build_deep_chain(200)];
    let report = TreeWalker::default().walk(&forest);

    assert_eq!(report.stats.nodes_visited, 201);
    assert_eq!(report.stats.max_depth, 200);
    assert_eq!(report.tally.get(&ContributorId::new("Deep")), 201);
}

#[test]
fn test_deep_nesting_from_json() {
    let depth = 120;
    let mut json = String::from("[");
    for _ in 0..depth {
        json.push_str(r#"{"endorsed": true, "user": {"name": "Deep"}, "comments": ["#);
    }
    json.push_str(r#"{"endorsed": true, "user": {"name": "Deep"}}"#);
    for _ in 0..depth {
        json.push_str("]}");
    }
    json.push(']');

    let forest = parse_forest(json.as_bytes()).unwrap();
    let report = TreeWalker::default().walk(&forest);

    assert_eq!(report.stats.nodes_visited, depth + 1);
    assert_eq!(report.stats.max_depth, depth);
    assert_eq!(report.tally.get(&ContributorId::new("Deep")), (depth + 1) as u64);
}

#[test]
fn test_answers_only_walked_at_root() {
    let json = r#"[
      {"text": "q", "answers": [
        {"text": "a", "answers": [{"text": "", "endorsed": true, "user": {"name": "Nested"}}]}
      ]}
    ]"#;
    let forest = parse_forest(json.as_bytes()).unwrap();
    let report = TreeWalker::default().walk(&forest);

    assert_eq!(report.stats.nodes_visited, 2);
    assert_eq!(report.stats.ignored_nested_answers, 1);
    assert!(report.tally.is_empty());
}

#[test]
fn test_malformed_node_rejected() {
    let json = r#"[{"text": "fine"}, "not an object"]"#;
    assert!(parse_forest(json.as_bytes()).is_err());
}

#[test]
fn test_custom_policy_walk() {
    let policy = QualifyingPolicy {
        min_unendorsed_chars: 2,
        ..QualifyingPolicy::default()
    };
    let forest = vec![ThreadNode::new("abc", false).with_author("Ada")];

    assert_eq!(TreeWalker::new(policy).tally(&forest).total(), 1);
    assert_eq!(tally(&forest).total(), 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// DETERMINISM TESTS
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_same_forest_same_fingerprint_100_runs() {
    let forest = parse_forest(EXPORT.as_bytes()).unwrap();
    let walker = TreeWalker::default();

    let baseline = walker.tally(&forest).fingerprint();
    for i in 1..100 {
        assert_eq!(
            baseline,
            walker.tally(&forest).fingerprint(),
            "Tally fingerprint must be deterministic (run {} differs from run 0)",
            i
        );
    }
}

#[test]
fn test_root_order_does_not_change_tally() {
    let mut forest = parse_forest(EXPORT.as_bytes()).unwrap();
    let forward = tally(&forest);
    forest.reverse();
    let backward = tally(&forest);

    assert_eq!(forward, backward);
}

#[test]
fn test_per_root_merge_matches_whole_forest() {
    let forest = parse_forest(EXPORT.as_bytes()).unwrap();

    let mut merged = ContributionTally::new();
    for root in &forest {
        merged.merge(&tally(std::slice::from_ref(root)));
    }

    assert_eq!(merged, tally(&forest));
}

// ─────────────────────────────────────────────────────────────────────────────
// PROPERTY TESTS
// ─────────────────────────────────────────────────────────────────────────────

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z ]{0,40}",
        "[a-z ]{90,160}",
        "[a-z ?]{90,160}",
    ]
}

fn arb_leaf() -> impl Strategy<Value = ThreadNode> {
    (
        arb_text(),
        any::<bool>(),
        prop::option::of(prop::sample::select(vec!["Ada", "Bob", "Cy"])),
    )
        .prop_map(|(text, endorsed, author)| {
            let node = ThreadNode::new(text, endorsed);
            match author {
                Some(name) => node.with_author(name),
                None => node,
            }
        })
}

fn arb_node() -> impl Strategy<Value = ThreadNode> {
    arb_leaf().prop_recursive(4, 48, 4, |inner| {
        (
            arb_leaf(),
            prop::collection::vec(inner.clone(), 0..4),
            prop::collection::vec(inner, 0..3),
        )
            .prop_map(|(mut node, comments, answers)| {
                node.comments = comments;
                node.answers = answers;
                node
            })
    })
}

proptest! {
    #[test]
    fn prop_endorsed_always_qualifies(text in arb_text()) {
        prop_assert!(is_qualifying(&text, true));
    }

    #[test]
    fn prop_short_unendorsed_never_qualifies(text in "[a-z ?]{0,100}") {
        prop_assert!(!is_qualifying(&text, false));
    }

    #[test]
    fn prop_long_with_question_never_qualifies(prefix in "[a-z ]{101,140}", suffix in "[a-z ]{0,10}") {
        let text = format!("{}?{}", prefix, suffix);
        prop_assert!(!is_qualifying(&text, false));
    }

    #[test]
    fn prop_long_without_question_qualifies(text in "[a-z ]{101,200}") {
        prop_assert!(is_qualifying(&text, false));
    }

    #[test]
    fn prop_total_matches_brute_force(forest in prop::collection::vec(arb_node(), 0..6)) {
        let report = TreeWalker::default().walk(&forest);

        prop_assert_eq!(report.tally.total(), brute_force_qualifying(&forest));
        prop_assert_eq!(report.stats.nodes_visited, count_nodes(&forest));
        prop_assert_eq!(report.stats.qualifying, report.tally.total());
    }

    #[test]
    fn prop_walk_is_idempotent(forest in prop::collection::vec(arb_node(), 0..6)) {
        let walker = TreeWalker::default();
        prop_assert_eq!(walker.tally(&forest), walker.tally(&forest));
    }

    #[test]
    fn prop_ranking_sorted_descending(forest in prop::collection::vec(arb_node(), 0..6)) {
        let ranking = Ranking::from_tally(&tally(&forest));
        for pair in ranking.entries().windows(2) {
            prop_assert!(
                pair[0].count > pair[1].count
                    || (pair[0].count == pair[1].count && pair[0].contributor < pair[1].contributor)
            );
        }
    }
}
