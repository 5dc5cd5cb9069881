//! Tests for the fragment model, text codec and set operations.

use excerptor::fragment::{self, set, Fragment, FragmentCodec, FragmentError};

fn frags(s: &str) -> Vec<Fragment> {
    fragment::decode_all(s).unwrap()
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn constructor_rejects_invalid_bounds() {
    assert_eq!(Fragment::new(0, 3).unwrap_err(), FragmentError::ZeroBegin);
    assert_eq!(
        Fragment::new(5, 4).unwrap_err(),
        FragmentError::Inverted { begin: 5, end: 4 }
    );
    assert!(Fragment::single(0).is_err());
}

#[test]
fn builder_defaults_end_to_begin() {
    let fragment = Fragment::builder().begin(4).build().unwrap();
    assert_eq!(fragment, Fragment::single(4).unwrap());

    let fragment = Fragment::builder().begin(4).end(9).build().unwrap();
    assert_eq!(fragment.size(), 6);

    assert_eq!(
        Fragment::builder().end(3).build().unwrap_err(),
        FragmentError::MissingBegin
    );
}

#[test]
fn ordering_is_by_begin_then_end() {
    let mut list = frags("5-6,1-9,1-2,3");
    list.sort();
    assert_eq!(fragment::encode_all(&list), "1-2,1-9,3,5-6");
}

// ============================================================================
// Text Form
// ============================================================================

#[test]
fn encodes_single_and_range() {
    assert_eq!(fragment::encode(&Fragment::single(7).unwrap()), "7");
    assert_eq!(fragment::encode(&Fragment::new(5, 14).unwrap()), "5-14");
    assert_eq!(Fragment::new(5, 5).unwrap().to_string(), "5");
}

#[test]
fn decode_all_preserves_order() {
    let list = frags("9,1-3,5");
    assert_eq!(fragment::encode_all(&list), "9,1-3,5");
}

#[test]
fn decode_rejects_malformed_tokens() {
    for token in ["", "a", "-3", "3-", "1--2", "+4", "0", "0-3", "4-2", " 1", "1-2-3"] {
        assert!(fragment::decode(token).is_err(), "accepted '{}'", token);
    }
    assert!(fragment::decode("99999999999999999999").is_err());
}

#[test]
fn decode_all_rejects_empty_tokens() {
    assert!(fragment::decode_all("1,,2").is_err());
    assert!(fragment::decode_all("1,").is_err());
    assert!(fragment::decode_all("").unwrap().is_empty());
}

#[test]
fn from_str_uses_codec() {
    let fragment: Fragment = "3-8".parse().unwrap();
    assert_eq!((fragment.begin(), fragment.end()), (3, 8));
}

#[test]
fn serializes_as_encoded_string() {
    let list = frags("1-3,7");
    let json = serde_json::to_string(&list).unwrap();
    assert_eq!(json, r#"["1-3","7"]"#);
    let back: Vec<Fragment> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, list);
}

#[test]
fn codec_joins_parts_with_offsets() {
    let mut codec = FragmentCodec::new();
    codec.push_all(&frags("1-2"));
    codec.push_all_with_offset(&frags("1,4-5"), 10).unwrap();
    codec.push_index(30);
    assert_eq!(codec.finish(), "1-2,11,14-15,30");
}

// ============================================================================
// Set Operations
// ============================================================================

#[test]
fn combined_size_examples() {
    let cases = [
        ("1", "2", 2),
        ("1-2", "2-3", 3),
        ("1-2", "1-2", 2),
        ("1-2,3-6,9", "2,3-5,8", 8),
        ("1-4", "2-6", 6),
        ("1-4,8-9", "2-6", 8),
    ];
    for (a, b, expected) in cases {
        assert_eq!(set::combined_size(&frags(a), &frags(b)), expected, "{} + {}", a, b);
        assert_eq!(set::combined_size(&frags(b), &frags(a)), expected, "{} + {}", b, a);
    }
}

#[test]
fn combined_size_with_empty_side() {
    assert_eq!(set::combined_size(&[], &frags("3-5")), 3);
    assert_eq!(set::combined_size(&[], &[]), 0);
}

#[test]
fn merge_coalesces_overlapping_and_adjacent() {
    let mut ours = frags("1-2,8-9");
    set::merge(&mut ours, &frags("3-4,6,9-12"));
    assert_eq!(fragment::encode_all(&ours), "1-4,6,8-12");
}

#[test]
fn merge_with_nested_and_duplicate_fragments() {
    let mut ours = frags("1-10");
    set::merge(&mut ours, &frags("2-3,2-3,10"));
    assert_eq!(fragment::encode_all(&ours), "1-10");
}

#[test]
fn normalize_sorts_and_coalesces() {
    let mut list = frags("9,4-5,1-3,5-6");
    set::normalize(&mut list);
    assert_eq!(fragment::encode_all(&list), "1-6,9");
    assert!(set::is_sorted_disjoint(&list));
}

#[test]
fn from_indices_groups_runs() {
    let list = set::from_indices([1, 2, 3, 7, 9, 10]).unwrap();
    assert_eq!(fragment::encode_all(&list), "1-3,7,9-10");
    assert!(set::from_indices([3, 2]).is_err());
    assert!(set::from_indices([0]).is_err());
}

#[test]
fn total_size_sums_sizes() {
    assert_eq!(set::total_size(&frags("1-3,7,10-11")), 6);
}
