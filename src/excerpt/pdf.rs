//! Page extraction from PDF documents.
//!
//! The excerpt is a new document whose page tree holds copies of the
//! selected pages, in fragment order. Only objects reachable from those
//! pages are copied. References to pages outside the selection, or to page
//! tree nodes, become null, so outlines, annotations and other links cannot
//! pull unselected pages into the output. Attributes a page inherits from
//! its ancestors in the page tree are pinned on the copy.

use std::collections::{HashMap, HashSet};
use std::io::{Read, Write};

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId};

use super::{check_content_type, require_fragments, ExcerptError, ExcerptHandler, Loaded, SourceFormat};
use crate::fragment::Fragment;

/// Page attributes that may be inherited from the page tree.
const INHERITABLE: [&[u8]; 4] = [b"MediaBox", b"CropBox", b"Resources", b"Rotate"];

/// Upper bound on page tree depth when resolving inherited attributes.
const MAX_TREE_DEPTH: usize = 64;

/// Excerpt handler for PDF documents, one segment per page.
#[derive(Debug, Default)]
pub struct PdfHandler {
    document: Loaded<Document>,
}

impl PdfHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page object ids in document order.
    fn page_ids(document: &Document) -> Vec<ObjectId> {
        document.get_pages().into_values().collect()
    }
}

impl ExcerptHandler for PdfHandler {
    fn format(&self) -> SourceFormat {
        SourceFormat::Pdf
    }

    fn segment_label(&self) -> &'static str {
        "page"
    }

    fn init(&mut self, content_type: &str, input: &mut dyn Read) -> Result<(), ExcerptError> {
        self.document.ensure_fresh()?;
        check_content_type(self.format(), content_type)?;

        let document = Document::load_from(input)?;
        if document.is_encrypted() {
            return Err(ExcerptError::Encrypted);
        }

        let pages = document.get_pages().len();
        if pages == 0 {
            return Err(ExcerptError::EmptyResource(self.segment_label()));
        }

        tracing::debug!(pages, "loaded PDF document");
        self.document = Loaded::Ready(document);
        Ok(())
    }

    fn segments(&self) -> Result<u64, ExcerptError> {
        Ok(self.document.get()?.get_pages().len() as u64)
    }

    fn excerpt(&self, fragments: &[Fragment], output: &mut dyn Write) -> Result<(), ExcerptError> {
        let source = self.document.get()?;
        require_fragments(fragments)?;

        let pages = Self::page_ids(source);
        let total = pages.len() as u64;
        let mut selected = Vec::new();
        for fragment in fragments {
            if fragment.end() > total {
                return Err(ExcerptError::PageOutOfRange {
                    index: fragment.end(),
                    pages: total,
                });
            }
            selected.extend(fragment.iter().map(|index| pages[(index - 1) as usize]));
        }

        if selected.is_empty() {
            return Err(ExcerptError::EmptyExcerpt);
        }

        let mut copier = PageCopier::new(source, &selected);
        let root = copier.target.new_object_id();

        let mut placed = HashSet::new();
        let mut kids = Vec::with_capacity(selected.len());
        for page_id in selected {
            let target = if placed.insert(page_id) {
                copier.mapped(page_id)
            } else {
                copier.target.new_object_id()
            };

            let mut page = copier.copy_dictionary(source.get_dictionary(page_id)?, &[b"Parent".as_slice()]);
            for key in INHERITABLE {
                if let Some(value) = inherited(source, page_id, key) {
                    page.set(key, copier.copy_object(&value));
                }
            }
            page.set("Parent", root);
            copier.target.objects.insert(target, Object::Dictionary(page));
            kids.push(Object::Reference(target));
        }

        let count = kids.len();
        let mut document = copier.target;
        document.objects.insert(
            root,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count as i64,
            }),
        );
        let catalog = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => root,
        });
        document.trailer.set("Root", catalog);
        tracing::debug!(pages = count, objects = document.objects.len(), "writing PDF excerpt");

        let mut output = output;
        document.save_to(&mut output)?;
        output.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        self.document.close();
    }
}

/// Deep copy of page objects from the source into a fresh document.
struct PageCopier<'a> {
    source: &'a Document,
    target: Document,
    /// Source object id to its id in the target.
    copied: HashMap<ObjectId, ObjectId>,
}

impl<'a> PageCopier<'a> {
    /// Reserve a target id for every selected page up front, so references
    /// between selected pages resolve to their copies.
    fn new(source: &'a Document, pages: &[ObjectId]) -> Self {
        let mut target = Document::with_version(source.version.clone());
        let mut copied = HashMap::new();
        for &page in pages {
            copied.entry(page).or_insert_with(|| target.new_object_id());
        }
        Self {
            source,
            target,
            copied,
        }
    }

    fn mapped(&mut self, page: ObjectId) -> ObjectId {
        let target = &mut self.target;
        *self.copied.entry(page).or_insert_with(|| target.new_object_id())
    }

    fn copy_object(&mut self, object: &Object) -> Object {
        match object {
            Object::Reference(id) => self.copy_reference(*id),
            Object::Array(items) => Object::Array(items.iter().map(|item| self.copy_object(item)).collect()),
            Object::Dictionary(dict) => Object::Dictionary(self.copy_dictionary(dict, &[])),
            Object::Stream(stream) => {
                let mut copy = stream.clone();
                copy.dict = self.copy_dictionary(&stream.dict, &[]);
                Object::Stream(copy)
            }
            other => other.clone(),
        }
    }

    fn copy_dictionary(&mut self, dict: &Dictionary, skip: &[&[u8]]) -> Dictionary {
        let mut copy = Dictionary::new();
        for (key, value) in dict.iter() {
            if skip.contains(&key.as_slice()) {
                continue;
            }
            let value = self.copy_object(value);
            copy.set(key.clone(), value);
        }
        copy
    }

    fn copy_reference(&mut self, id: ObjectId) -> Object {
        if let Some(&copied) = self.copied.get(&id) {
            return Object::Reference(copied);
        }
        let source = self.source;
        let Ok(object) = source.get_object(id) else {
            return Object::Null;
        };
        if is_page_tree_node(object) {
            tracing::trace!(?id, "dropping reference to unselected page");
            return Object::Null;
        }

        let target = self.target.new_object_id();
        self.copied.insert(id, target);
        let copy = self.copy_object(object);
        self.target.objects.insert(target, copy);
        Object::Reference(target)
    }
}

/// Whether `object` is a page or an intermediate page tree node.
fn is_page_tree_node(object: &Object) -> bool {
    let dict = match object {
        Object::Dictionary(dict) => dict,
        _ => return false,
    };
    matches!(
        dict.get(b"Type").and_then(Object::as_name),
        Ok(b"Page") | Ok(b"Pages")
    )
}

/// Value of `key` on the page or the closest ancestor that defines it.
fn inherited(document: &Document, page: ObjectId, key: &[u8]) -> Option<Object> {
    let mut node = page;
    for _ in 0..MAX_TREE_DEPTH {
        let dict = document.get_dictionary(node).ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value.clone());
        }
        node = dict.get(b"Parent").and_then(Object::as_reference).ok()?;
    }
    None
}
