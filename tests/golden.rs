//! Regression fixture for a small reference tree.
//!
//! Every run must reproduce `tests/fixtures/seed42_life10.txt` exactly. After
//! an intentional change to the growth tables, re-record it with
//! `HABITREE_BLESS=1 cargo test --test golden`.

use habitree::render::{render, PlainFormatter};
use habitree::{generate, TreeConfig};
use std::env;
use std::fs;
use std::path::PathBuf;

fn reference_config() -> TreeConfig {
    TreeConfig {
        seed: 42,
        life_start: 10,
        multiplier: 3,
        leaves: vec!["&".to_string()],
        width: 20,
        height: 10,
        ..TreeConfig::default()
    }
}

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("seed42_life10.txt")
}

#[test]
fn reference_tree_matches_fixture() {
    let tree = generate(&reference_config()).unwrap();
    let text = render(&tree.canvas, &PlainFormatter);

    assert_eq!(text.lines().count(), 10);
    assert!(text.lines().all(|l| l.chars().count() == 20));

    let path = fixture_path();
    if env::var_os("HABITREE_BLESS").is_some() {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, &text).unwrap();
        return;
    }

    let expected = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("missing fixture {}: {e}", path.display()));
    assert_eq!(text, expected, "tree drifted from {}", path.display());
}

#[test]
fn reference_tree_grows_from_bottom_centre() {
    let tree = generate(&reference_config()).unwrap();
    assert!(tree.completed);
    let bottom = tree.canvas.rows().last().unwrap();
    assert!(bottom[10].is_some(), "no wood at the root column");
}

#[test]
fn reference_tree_is_stable_within_a_run() {
    let a = render(&generate(&reference_config()).unwrap().canvas, &PlainFormatter);
    let b = render(&generate(&reference_config()).unwrap().canvas, &PlainFormatter);
    assert_eq!(a, b);
}
