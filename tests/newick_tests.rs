use mastree::newick::{
    escape_label, parse_forest, parse_newick, to_newick, write_newick_file, NewickError,
};

// ============= Parsing Tests =============

#[test]
fn test_parse_simple_tree() {
    let tree = parse_newick("((Kea,Kaka)nestor,Kakapo)strigops;").unwrap();
    let map = tree.label_map();

    assert_eq!(tree.num_nodes(), 5);
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.root_index(), map["strigops"]);
    assert_eq!(tree[map["nestor"]].children_count(), 2);
    assert_eq!(tree[map["Kea"]].parent_index(), Some(map["nestor"]));
}

#[test]
fn test_parse_multifurcation() {
    let tree = parse_newick("(Weka,Takahe,Pukeko,Coot)rallidae;").unwrap();
    let map = tree.label_map();
    assert_eq!(tree[map["rallidae"]].children_count(), 4);
}

#[test]
fn test_parse_empty_leaf_label() {
    let tree = parse_newick("(,Huia)r;").unwrap();
    assert_eq!(tree.num_leaves(), 2);
    assert_eq!(tree.leaf_labels().len(), 1);
    assert_eq!(to_newick(&tree), "(,Huia)r;");
}

#[test]
fn test_parse_quoted_label_with_escaped_quote() {
    let tree = parse_newick("('Wilson''s Storm Petrel',Kiwi)r;").unwrap();
    let map = tree.label_map();
    assert!(map.contains_key("Wilson's Storm Petrel"));
}

#[test]
fn test_parse_quoted_label_may_hold_delimiters() {
    let tree = parse_newick("('Kea (mountain parrot)':1,Kaka)r;").unwrap();
    let map = tree.label_map();
    assert_eq!(tree[map["Kea (mountain parrot)"]].length(), Some("1"));
}

#[test]
fn test_comments_and_whitespace_are_trivia() {
    let tree = parse_newick("( [note] Kea : 1.0 ,\n\tKaka ) [x] nestor ;").unwrap();
    assert_eq!(to_newick(&tree), "(Kea:1.0,Kaka)nestor;");
}

#[test]
fn test_edge_length_text_kept_verbatim() {
    let input = "((Kea:1e-5,Kaka:0.30)nestor:007,Kakapo:2.)r;";
    let tree = parse_newick(input).unwrap();
    let map = tree.label_map();

    assert_eq!(tree[map["Kea"]].length(), Some("1e-5"));
    assert_eq!(tree[map["Kaka"]].length(), Some("0.30"));
    assert_eq!(tree[map["nestor"]].length(), Some("007"));
    assert_eq!(to_newick(&tree), input);
}

#[test]
fn test_root_length_survives_round_trip() {
    let input = "(Kea,Kaka)nestor:12.5;";
    let tree = parse_newick(input).unwrap();
    assert_eq!(to_newick(&tree), input);
}

#[test]
fn test_single_leaf_tree() {
    let tree = parse_newick("Kakapo;").unwrap();
    assert_eq!(tree.num_nodes(), 1);
    assert_eq!(tree.root().label(), "Kakapo");
}

// ============= Forest Tests =============

#[test]
fn test_parse_forest_multiple_trees() {
    let forest = parse_forest("(A,B)r;\n(C,(D,E)g)h;  (F,G)k;").unwrap();
    assert_eq!(forest.len(), 3);
    assert_eq!(forest[1].num_leaves(), 3);
}

#[test]
fn test_parse_forest_blank_input() {
    assert_eq!(parse_forest("").unwrap().len(), 0);
    assert_eq!(parse_forest("  \n [only a comment] \n").unwrap().len(), 0);
}

// ============= Error Tests =============

#[test]
fn test_missing_semicolon() {
    let result = parse_newick("(A,B)r");
    assert_eq!(result, Err(NewickError::UnexpectedEof { position: 6 }));
}

#[test]
fn test_unclosed_clade() {
    let result = parse_newick("((A,B)f,(C,D)g");
    assert_eq!(result, Err(NewickError::UnexpectedEof { position: 14 }));
}

#[test]
fn test_unclosed_comment() {
    let result = parse_newick("(A,B[never closed;");
    assert!(matches!(result, Err(NewickError::UnclosedComment { .. })));
}

#[test]
fn test_unclosed_quote() {
    let result = parse_newick("('Wilson,B)r;");
    assert!(matches!(result, Err(NewickError::UnclosedQuote { .. })));
}

#[test]
fn test_colon_without_length() {
    let result = parse_newick("(A:,B)r;");
    assert!(matches!(
        result,
        Err(NewickError::Invalid { ref message, .. }) if message.contains("edge length")
    ));
}

#[test]
fn test_trailing_text_after_tree() {
    let result = parse_newick("(A,B)r; junk");
    assert!(matches!(
        result,
        Err(NewickError::Invalid { ref message, .. }) if message.contains("trailing")
    ));
}

// ============= Writing Tests =============

#[test]
fn test_escape_label_plain() {
    assert_eq!(escape_label("Kakapo"), "Kakapo");
}

#[test]
fn test_escape_label_with_space_and_quote() {
    assert_eq!(
        escape_label("Wilson's Storm Petrel"),
        "'Wilson''s Storm Petrel'"
    );
}

#[test]
fn test_single_child_node_round_trip() {
    // A single-child node opens and closes with no comma in between
    let input = "((Kiwi:1)apteryx:2,(Kea,Kaka)nestor)r;";
    let tree = parse_newick(input).unwrap();
    assert_eq!(to_newick(&tree), input);
}

#[test]
fn test_write_newick_file_one_tree_per_line() {
    let forest = parse_forest("(Kea,Kaka)nestor;(Weka,Takahe);").unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.nwk");

    write_newick_file(&path, &forest).unwrap();
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "(Kea,Kaka)nestor;\n(Weka,Takahe);\n"
    );
}

#[test]
fn test_quoted_label_round_trip() {
    let input = "('Wilson''s Storm Petrel':2,Kiwi)r;";
    let tree = parse_newick(input).unwrap();
    assert_eq!(to_newick(&tree), input);
}
