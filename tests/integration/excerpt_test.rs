//! Tests for excerpt handlers obtained through the format registry.

use std::sync::Arc;

use excerptor::excerpt::{
    excerpt_sentences, ExcerptError, HandlerOptions, SourceFormat, MIME_CONLL09, MIME_PDF,
};
use excerptor::fragment::decode_all;
use excerptor::mapping::{MappingType, TabularMapping};

use crate::helpers::{page_tags, sample_pdf, CONLL, SENTENCE_MAPPING};

fn conll_options() -> HandlerOptions {
    HandlerOptions {
        mapping: Some(MappingType::Tabular.load(SENTENCE_MAPPING.as_bytes()).unwrap()),
        ..HandlerOptions::default()
    }
}

// ============================================================================
// PDF
// ============================================================================

#[test]
fn pdf_excerpt_through_registry() {
    let format = SourceFormat::for_content_type(MIME_PDF).unwrap();
    let mut handler = format.handler(HandlerOptions::default()).unwrap();
    handler.init(MIME_PDF, &mut sample_pdf(8).as_slice()).unwrap();
    assert_eq!(handler.segments().unwrap(), 8);

    let mut out = Vec::new();
    handler
        .excerpt(&decode_all("7-8,1,3").unwrap(), &mut out)
        .unwrap();
    assert_eq!(page_tags(&out), vec![7, 8, 1, 3]);
    handler.close();
}

#[test]
fn pdf_full_range_keeps_page_count_and_order() {
    let mut handler = SourceFormat::Pdf.handler(HandlerOptions::default()).unwrap();
    handler.init(MIME_PDF, &mut sample_pdf(5).as_slice()).unwrap();

    let mut out = Vec::new();
    handler.excerpt(&decode_all("1-5").unwrap(), &mut out).unwrap();
    assert_eq!(page_tags(&out), vec![1, 2, 3, 4, 5]);
}

#[test]
fn pdf_excerpt_can_run_twice() {
    let mut handler = SourceFormat::Pdf.handler(HandlerOptions::default()).unwrap();
    handler.init(MIME_PDF, &mut sample_pdf(4).as_slice()).unwrap();

    let mut first = Vec::new();
    handler.excerpt(&decode_all("2").unwrap(), &mut first).unwrap();
    let mut second = Vec::new();
    handler.excerpt(&decode_all("3-4").unwrap(), &mut second).unwrap();
    assert_eq!(page_tags(&first), vec![2]);
    assert_eq!(page_tags(&second), vec![3, 4]);
}

#[test]
fn pdf_rejects_pages_beyond_document() {
    let mut handler = SourceFormat::Pdf.handler(HandlerOptions::default()).unwrap();
    handler.init(MIME_PDF, &mut sample_pdf(4).as_slice()).unwrap();

    let err = handler
        .excerpt(&decode_all("9").unwrap(), &mut Vec::new())
        .unwrap_err();
    assert!(matches!(err, ExcerptError::PageOutOfRange { index: 9, pages: 4 }));
}

#[test]
fn pdf_rejects_garbage_input() {
    let mut handler = SourceFormat::Pdf.handler(HandlerOptions::default()).unwrap();
    let err = handler
        .init(MIME_PDF, &mut "not a pdf".as_bytes())
        .unwrap_err();
    assert!(matches!(err, ExcerptError::Pdf(_)));
}

// ============================================================================
// CoNLL
// ============================================================================

#[test]
fn conll_excerpt_through_registry() {
    let mut handler = SourceFormat::Conll09.handler(conll_options()).unwrap();
    handler.init(MIME_CONLL09, &mut CONLL.as_bytes()).unwrap();
    assert_eq!(handler.segments().unwrap(), 5);
    assert_eq!(handler.segment_label(), "sentence");

    let mut out = Vec::new();
    handler.excerpt(&decode_all("2").unwrap(), &mut out).unwrap();
    let expected = "\
# sentenceIndex=3
# pageIndex=2
1\tLaut\tlaut\tADJD

# sentenceIndex=4
# pageIndex=2
1\tDann\tdann\tADV
2\tRuhe\tRuhe\tNN

";
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

#[test]
fn conll_full_range_emits_every_sentence_once() {
    let mut out = Vec::new();
    let stats = excerpt_sentences(
        CONLL.as_bytes(),
        &TabularMapping::from_spans((0..5).map(|i| (i, i)).collect()),
        &decode_all("1-5").unwrap(),
        &mut out,
        10,
    )
    .unwrap();
    assert_eq!(stats.sentences_read, 5);
    assert_eq!(stats.blocks_written, 5);

    let out = String::from_utf8(out).unwrap();
    for n in 1..=5 {
        assert_eq!(out.matches(&format!("# sentenceIndex={}\n", n)).count(), 1);
    }
    assert!(!out.contains("# newdoc"));
    assert!(!out.contains("# paragraph"));
}

#[test]
fn conll_disjoint_fragments_emit_nothing() {
    let mut out = Vec::new();
    let mapping = MappingType::Tabular.load(SENTENCE_MAPPING.as_bytes()).unwrap();
    let stats = excerpt_sentences(
        CONLL.as_bytes(),
        mapping.as_ref(),
        &decode_all("40-50").unwrap(),
        &mut out,
        10,
    )
    .unwrap();
    assert!(out.is_empty());
    assert_eq!(stats.blocks_written, 0);
}

#[test]
fn conll_handler_shares_mapping() {
    let mapping = MappingType::Tabular.load(SENTENCE_MAPPING.as_bytes()).unwrap();
    let options = HandlerOptions {
        mapping: Some(Arc::clone(&mapping)),
        max_fan_out: 1,
    };
    let mut handler = SourceFormat::Conll09.handler(options).unwrap();
    handler.init("text/x-conll; charset=utf-8", &mut CONLL.as_bytes()).unwrap();
    assert_eq!(Arc::strong_count(&mapping), 2);
}
