use mastree::consensus::{greedy_consensus, ConsensusError};
use mastree::model::tree::Tree;
use mastree::newick::parse_newick;

fn forest(texts: &[&str]) -> Vec<Tree> {
    texts.iter().map(|text| parse_newick(text).unwrap()).collect()
}

// ============= Validation Tests =============

#[test]
fn test_empty_corpus_is_rejected() {
    let seeds = forest(&["(a,b);"]);
    let result = greedy_consensus(&seeds, &[1], &[], 50);
    assert!(matches!(result, Err(ConsensusError::NoTrees)));
}

#[test]
fn test_seed_frequency_count_mismatch() {
    let seeds = forest(&["(a,b);", "(c,d);"]);
    let trees = forest(&["((a,b),(c,d));"]);
    let result = greedy_consensus(&seeds, &[1], &trees, 50);
    assert!(matches!(
        result,
        Err(ConsensusError::CountMismatch {
            seeds: 2,
            frequencies: 1,
        })
    ));
}

#[test]
fn test_increasing_frequencies_are_rejected() {
    let seeds = forest(&["(a,b);", "(c,d);", "(a,c);"]);
    let trees = forest(&["((a,b),(c,d));"]);
    let result = greedy_consensus(&seeds, &[3, 1, 2], &trees, 50);
    assert!(matches!(
        result,
        Err(ConsensusError::UnsortedFrequencies(2))
    ));
}

#[test]
fn test_percent_over_hundred_is_rejected() {
    let seeds = forest(&["(a,b);"]);
    let trees = forest(&["((a,b),c);"]);
    let result = greedy_consensus(&seeds, &[1], &trees, 101);
    assert!(matches!(result, Err(ConsensusError::InvalidPercent(101))));
}

// ============= Growth Tests =============

#[test]
fn test_compatible_seeds_merge() {
    // Three of four trees share one shape; two of the seeds describe
    // pieces of it and merge into the full shape with support 3.
    let trees = forest(&[
        "((a,b),(c,(d,e)));",
        "((a,b),(c,(d,e)));",
        "((a,b),(c,(d,e)));",
        "((a,c),(b,(d,e)));",
    ]);
    let seeds = forest(&["((a,b),c);", "(c,(d,e));", "((a,d),e);"]);
    let frequencies = [3, 3, 3];

    let results = greedy_consensus(&seeds, &frequencies, &trees, 50).unwrap();
    assert_eq!(results.len(), 3);

    assert_eq!(results[0].seed_index, 0);
    assert_eq!(results[0].consensus, "((a,b),(c,(d,e)));");
    assert_eq!(results[0].support, 3);

    // The second seed first tries the third (larger label overlap),
    // which no tree contains, then merges with the first
    assert_eq!(results[1].consensus, "((a,b),(c,(d,e)));");
    assert_eq!(results[1].support, 3);

    // The third seed matches no tree and never grows
    assert_eq!(results[2].consensus, "((a,d),e);");
    assert_eq!(results[2].support, 0);
}

#[test]
fn test_unsupported_merge_leaves_seed_unchanged() {
    // Both seeds are in every tree, but the trees disagree on how the
    // combined label set is arranged, so no merged shape clears the
    // cutoff of 2 and the seed is reported as-is.
    let trees = forest(&[
        "((a,b),(c,d));",
        "((a,c),(b,d));",
        "((a,d),(b,c));",
        "(a,(b,(c,d)));",
    ]);
    let seeds = forest(&["(a,b);", "(c,d);"]);

    let results = greedy_consensus(&seeds, &[4, 4], &trees, 50).unwrap();
    assert_eq!(results[0].consensus, "(a,b);");
    assert_eq!(results[0].support, 4);
    assert_eq!(results[1].consensus, "(c,d);");
    assert_eq!(results[1].support, 4);
}

#[test]
fn test_stalled_seed_stops_growing() {
    // The first round pairs the seed with (b,c) by the earliest-wins
    // tie-break, but the trees arrange a, b and c four different ways,
    // so every trial fails and the failures cover all four trees. The
    // later merge with (a,e) would give ((a,b),e) with full support,
    // yet growth has stalled and it is never attempted.
    let trees = forest(&[
        "(((a,b),c),e);",
        "(((a,c),b),e);",
        "(((b,c),a),e);",
        "((a,b,c),e);",
    ]);
    let seeds = forest(&["(a,b);", "(b,c);", "(a,e);"]);
    let frequencies = [4, 4, 4];

    let results = greedy_consensus(&seeds, &frequencies, &trees, 25).unwrap();
    assert_eq!(results[0].consensus, "(a,b);");
    assert_eq!(results[0].support, 4);
}

#[test]
fn test_growth_continues_into_lower_frequency_tier() {
    // The second seed first absorbs its single top-tier partner, then
    // round two anchors at the next frequency down and the tier-two
    // seed brings in the final leaf.
    let trees = forest(&[
        "((a,b),(c,(d,e)));",
        "((a,b),(c,(d,e)));",
        "((a,b),(c,(d,e)));",
        "((a,c),(b,(d,e)));",
    ]);
    let seeds = forest(&["((a,b),c);", "((a,b),d);", "(d,e);"]);
    let frequencies = [3, 2, 2];

    let results = greedy_consensus(&seeds, &frequencies, &trees, 50).unwrap();
    assert_eq!(results[1].consensus, "((a,b),(c,(d,e)));");
    assert_eq!(results[1].support, 3);
}

#[test]
fn test_seed_without_labeled_leaves_does_not_abort_run() {
    // The second seed parses but has no labeled leaves; it is skipped
    // rather than failing the whole corpus, and the healthy seed still
    // comes back with its real support.
    let trees = forest(&["((a,b),c);", "((a,b),d);"]);
    let seeds = forest(&["(a,b);", "(,);"]);

    let results = greedy_consensus(&seeds, &[2, 2], &trees, 50).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].consensus, "(a,b);");
    assert_eq!(results[0].support, 2);
    assert_eq!(results[1].consensus, "(,);");
    assert_eq!(results[1].support, 0);
}

#[test]
fn test_unusable_seed_is_never_a_merge_candidate() {
    // Tier scanning steps over the skipped seed and still reaches the
    // compilable one behind it in the same tier.
    let trees = forest(&["((a,b),(c,d));", "((a,b),(c,d));"]);
    let seeds = forest(&["(a,b);", "(,);", "(c,d);"]);

    let results = greedy_consensus(&seeds, &[2, 2, 2], &trees, 50).unwrap();
    assert_eq!(results[0].consensus, "((a,b),(c,d));");
    assert_eq!(results[0].support, 2);
}

#[test]
fn test_zero_percent_accepts_any_supported_merge() {
    let trees = forest(&["((a,b),(c,d));", "((a,c),(b,d));"]);
    let seeds = forest(&["(a,b);", "(c,d);"]);

    // cutoff 0: a merge needs at least one supporting tree
    let results = greedy_consensus(&seeds, &[2, 2], &trees, 0).unwrap();
    assert_eq!(results[0].consensus, "((a,b),(c,d));");
    assert_eq!(results[0].support, 1);
}
