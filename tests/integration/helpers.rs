//! Shared fixtures for integration tests

use std::fs;
use std::path::{Path, PathBuf};

use lopdf::{dictionary, Document, Object};

/// Ten sentences; sentence `i` lies on page `i / 2`, sentence 5 spans pages
/// 2 and 3 (all 0-based).
pub const SENTENCE_MAPPING: &str = "\
0\t0\t0
1\t0\t0
2\t1\t1
3\t1\t1
4\t2\t2
5\t2\t3
6\t3\t3
7\t3\t3
8\t4\t4
9\t4\t4
";

/// Five sentences of CoNLL-2009 style annotation.
pub const CONLL: &str = "\
# newdoc id = sample
1\tDer\tder\tART
2\tHund\tHund\tNN

1\tEr\ter\tPPER
2\tbellt\tbellen\tVVFIN

1\tLaut\tlaut\tADJD

# paragraph
1\tDann\tdann\tADV
2\tRuhe\tRuhe\tNN

1\tEnde\tEnde\tNN
";

/// Write `content` to `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write fixture");
    path
}

/// Build a flat PDF whose pages carry their 1-based number under `/Tag`.
pub fn sample_pdf(count: i64) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for n in 1..=count {
        let page = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Tag" => n,
        });
        kids.push(Object::Reference(page));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("Failed to save sample PDF");
    buf
}

/// Page tags of a PDF produced from [`sample_pdf`], in page order.
pub fn page_tags(pdf: &[u8]) -> Vec<i64> {
    let doc = Document::load_mem(pdf).expect("Failed to load PDF");
    doc.get_pages()
        .into_values()
        .map(|id| {
            doc.get_dictionary(id)
                .and_then(|page| page.get(b"Tag"))
                .and_then(Object::as_i64)
                .expect("Page without tag")
        })
        .collect()
}
