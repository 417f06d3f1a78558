use std::fs;

use mastree::corpus::{read_frequencies, read_trees, CorpusError};
use tempfile::tempdir;

// ============= Tree File Tests =============

#[test]
fn test_read_trees_keeps_line_numbers_and_text() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("trees");
    fs::write(&path, "((Kea,Kaka)nestor,Kakapo);\n\n(Weka,Takahe);\n").unwrap();

    let trees = read_trees(&path.to_string_lossy()).unwrap();
    assert_eq!(trees.len(), 2);
    assert_eq!(trees[0].line, 1);
    assert_eq!(trees[0].text, "((Kea,Kaka)nestor,Kakapo);");
    assert_eq!(trees[1].line, 3);
    assert_eq!(trees[1].tree.num_leaves(), 2);
}

#[test]
fn test_read_trees_skips_unparseable_lines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("trees");
    fs::write(&path, "(Kea,Kaka);\n((Weka;\n(Takahe,Pukeko);\n").unwrap();

    let trees = read_trees(&path.to_string_lossy()).unwrap();
    assert_eq!(trees.len(), 2);
    assert_eq!(trees[1].line, 3);
}

#[test]
fn test_read_trees_missing_file() {
    let result = read_trees("/no/such/file");
    assert!(matches!(result, Err(CorpusError::Io { .. })));
}

// ============= Frequency File Tests =============

#[test]
fn test_read_frequencies() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("counts");
    fs::write(&path, "12\n7\n\n3\n").unwrap();

    let frequencies = read_frequencies(&path).unwrap();
    assert_eq!(frequencies, [12, 7, 3]);
}

#[test]
fn test_read_frequencies_rejects_bad_integer() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("counts");
    fs::write(&path, "12\n-3\n").unwrap();

    let result = read_frequencies(&path);
    assert!(matches!(
        result,
        Err(CorpusError::InvalidFrequency { line: 2, .. })
    ));
}
