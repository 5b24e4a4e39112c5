//! Golden tests: segment fixed sentences with a dictionary loaded from disk.
//!
//! The frequency table in `tests/data/dictionary.txt` is deliberately
//! unsorted and repeats one word, so these tests also cover the loader.
//!
//! Run: cargo test -p wordseg --test golden

use std::path::PathBuf;

use serde::Deserialize;
use wordseg::{FileLoader, Segmenter, WordModel};

#[derive(Debug, Deserialize)]
struct GoldenCase {
    input: String,
    segments: Vec<String>,
}

fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

fn load_golden() -> Vec<GoldenCase> {
    let path = data_path("golden.json");
    let contents = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read golden file {}: {}", path.display(), e));
    serde_json::from_str(&contents)
        .unwrap_or_else(|e| panic!("failed to parse golden file {}: {}", path.display(), e))
}

fn create_segmenter() -> Segmenter<WordModel> {
    let loader = FileLoader::new(data_path("dictionary.txt"));
    Segmenter::from_loader(&loader)
        .unwrap_or_else(|e| panic!("failed to load {}: {}", loader.path().display(), e))
}

#[test]
fn golden_segments() {
    let segmenter = create_segmenter();
    let mut mismatches = Vec::new();

    for case in load_golden() {
        let actual = segmenter.segment(&case.input);
        if actual != case.segments {
            mismatches.push(format!(
                "  {:?}\n    expected: {:?}\n    actual:   {:?}",
                case.input, case.segments, actual
            ));
        }
    }

    if !mismatches.is_empty() {
        panic!(
            "{} golden mismatches:\n{}",
            mismatches.len(),
            mismatches.join("\n")
        );
    }
}

#[test]
fn loaded_dictionary_keeps_first_duplicate() {
    let segmenter = create_segmenter();
    let model = segmenter.model();
    assert_eq!(model.len(), 11);
    // Nine words of frequency 1 and two of frequency 2 sum to 13.
    let expected = (13f64.log2() - 1f64.log2()) as f32;
    assert_eq!(model.weight_of("的"), Some(expected));
}

#[test]
fn golden_segments_concatenate_to_input() {
    let segmenter = create_segmenter();
    for case in load_golden() {
        assert_eq!(segmenter.segment(&case.input).concat(), case.input);
    }
}
