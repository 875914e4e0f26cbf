//! Alphabetical ordering of documents and their members.
//!
//! All sorts are stable and use plain bytewise string comparison.

use crate::model::{Document, Type};
use std::cmp::Ordering;

/// Sort every document's members, then the documents themselves.
///
/// Documents are ordered by `path` immediately followed by `name`, with no
/// separator. As a result `("ab", "c")` and `("a", "bc")` compare equal and
/// keep their input order.
pub fn sort_collection(docs: &mut [Document]) {
    for doc in docs.iter_mut() {
        doc.sort();
    }
    docs.sort_by(compare_documents);
}

fn compare_documents(a: &Document, b: &Document) -> Ordering {
    let left = a.path.bytes().chain(a.name.bytes());
    let right = b.path.bytes().chain(b.name.bytes());
    left.cmp(right)
}

impl Document {
    /// Alphabetize the member lists enabled in this document's sort config.
    /// Type methods are always sorted.
    pub fn sort(&mut self) {
        let cfg = self.sort_config();
        if let Some(functions) = self.functions.as_mut() {
            if cfg.functions {
                functions.sort_by(|a, b| a.signature.cmp(&b.signature));
            }
        }
        if let Some(types) = self.types.as_mut() {
            if cfg.types {
                types.sort_by(|a, b| a.name.cmp(&b.name));
            }
            for t in types.iter_mut() {
                t.sort();
            }
        }
        if let Some(constants) = self.constants.as_mut() {
            if cfg.constants {
                constants.sort_by(|a, b| a.name.cmp(&b.name));
            }
        }
    }
}

impl Type {
    /// Sort methods by signature.
    pub fn sort(&mut self) {
        self.methods.sort_by(|a, b| a.signature.cmp(&b.signature));
    }
}
