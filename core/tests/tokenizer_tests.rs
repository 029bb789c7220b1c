use docsearch_core::tokenizer::{SegmentMode, Segmenter, WordSegmenter};
use std::io::Write;

#[test]
fn it_is_deterministic_per_mode() {
    let seg = WordSegmenter::english();
    let text = "The shared_ptr class template stores a pointer; don't copy it.";
    assert_eq!(seg.segment(text, SegmentMode::Index), seg.segment(text, SegmentMode::Index));
    assert_eq!(seg.segment(text, SegmentMode::Query), seg.segment(text, SegmentMode::Query));
}

#[test]
fn index_mode_is_a_superset_of_query_mode() {
    let seg = WordSegmenter::new();
    let text = "boost::filesystem path_traits can't fail";
    let index = seg.segment(text, SegmentMode::Index);
    for token in seg.segment(text, SegmentMode::Query) {
        assert!(index.contains(&token), "{token} missing from index tokens");
    }
    assert!(index.contains(&"path".to_string()));
    assert!(index.contains(&"traits".to_string()));
}

#[test]
fn it_loads_stop_words_from_a_dictionary() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# common words").unwrap();
    writeln!(file, "the").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "  Of ").unwrap();
    let seg = WordSegmenter::from_dictionary(file.path()).unwrap();
    let words = seg.segment("The Art of Computer Programming", SegmentMode::Query);
    assert_eq!(words, vec!["Art", "Computer", "Programming"]);
}

#[test]
fn missing_dictionary_is_an_error() {
    assert!(WordSegmenter::from_dictionary("/no/such/stop_words.utf8").is_err());
}
