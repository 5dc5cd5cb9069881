//! Tests for hit consolidation through loaded mappings.

use excerptor::consolidate;
use excerptor::fragment::encode_all;
use excerptor::mapping::{CorpusLayout, MappingError, MappingType, Offsets};

use crate::helpers::SENTENCE_MAPPING;

fn mapping() -> std::sync::Arc<dyn excerptor::Mapping> {
    MappingType::Tabular
        .load(SENTENCE_MAPPING.as_bytes())
        .unwrap()
}

#[test]
fn consolidates_hits_into_pages() {
    let mapping = mapping();
    let result = consolidate(vec![0, 1, 4, 5, 9], mapping.as_ref(), Offsets::default(), 100).unwrap();
    assert_eq!(result.indices(), &[1, 3, 4, 5]);
    assert_eq!(encode_all(&result.fragments().unwrap()), "1,3-5");
    assert!(!result.is_truncated());
}

#[test]
fn ceiling_truncates_result() {
    let mapping = mapping();
    let result = consolidate(vec![0, 2, 5, 8], mapping.as_ref(), Offsets::default(), 3).unwrap();
    assert_eq!(encode_all(&result.fragments().unwrap()), "1-2");
    assert!(result.is_truncated());
}

#[test]
fn every_index_stays_within_limit() {
    let mapping = mapping();
    for limit in 0..=6 {
        let result =
            consolidate(0..10, mapping.as_ref(), Offsets::default(), limit).unwrap();
        assert!(result.indices().iter().all(|&i| i <= limit));
        assert!(result.indices().windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn part_offsets_come_from_layout() {
    // second part of a corpus; its sentences follow 40 sentences of part "a"
    // and its pages follow the 12 pages of part "a"
    let mut layout = CorpusLayout::new();
    layout.push("a", 12).unwrap().push("b", 5).unwrap();
    let offsets = layout.offsets_for("b", 40).unwrap();

    let mapping = mapping();
    let result = consolidate(vec![40, 45], mapping.as_ref(), offsets, 17).unwrap();
    assert_eq!(encode_all(&result.fragments().unwrap()), "13,15-16");

    let local = layout.to_local(&result.fragments().unwrap()).unwrap();
    assert_eq!(local.len(), 1);
    assert_eq!(local[0].part, "b");
    assert_eq!(encode_all(&local[0].fragments), "1,3-4");
}

#[test]
fn hits_outside_mapping_fail() {
    let mapping = mapping();
    let err = consolidate(vec![12], mapping.as_ref(), Offsets::default(), 100).unwrap_err();
    assert!(matches!(err, MappingError::OutOfRange { index: 12, len: 10 }));
}

#[test]
fn malformed_mapping_fails_to_load() {
    let err = MappingType::Tabular
        .load("0\t0\t0\n2\t0\t0\n".as_bytes())
        .unwrap_err();
    assert!(matches!(err, MappingError::InconsistentIndex { line: 2, .. }));
}
