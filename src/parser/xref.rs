//! Cross-reference table index.

use std::collections::HashMap;

/// One cross-reference entry: where an object lives in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XrefEntry {
    /// Byte offset in the file (for in-use entries)
    pub offset: u64,
    /// Generation number
    pub generation: u16,
    /// Whether this entry is in use (`n`) or free (`f`)
    pub in_use: bool,
}

/// Index from object number to cross-reference entry.
///
/// Object number 0 is the reserved free-list head in every conformant file.
#[derive(Debug, Clone, Default)]
pub struct XrefTable {
    entries: HashMap<u32, XrefEntry>,
}

impl XrefTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, object_number: u32, entry: XrefEntry) {
        self.entries.insert(object_number, entry);
    }

    pub fn get(&self, object_number: u32) -> Option<&XrefEntry> {
        self.entries.get(&object_number)
    }

    /// Byte offset of an in-use object, if indexed.
    pub fn offset_of(&self, object_number: u32) -> Option<u64> {
        self.entries
            .get(&object_number)
            .filter(|entry| entry.in_use)
            .map(|entry| entry.offset)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &XrefEntry)> {
        self.entries.iter().map(|(number, entry)| (*number, entry))
    }
}
