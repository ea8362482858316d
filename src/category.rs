//! Category name to ID resolution
//!
//! A table is either loaded from a newline-delimited list, where the 0-based
//! line index is the ID, or derived from the object names found in the
//! annotation files, sorted and numbered from 1. Names first seen during
//! conversion are appended with the current table size as their ID.

use indexmap::IndexMap;
use log::{debug, info};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::coco::Category;
use crate::error::Result;
use crate::xml::{read_document_text, read_object_names};

/// Insertion-ordered mapping from category name to ID
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTable {
    ids: IndexMap<String, i64>,
}

impl CategoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a category list file; line `i` gets ID `i`
    ///
    /// Only the line terminator is stripped. A name repeated on a later line
    /// keeps its first position but takes the later index.
    pub fn from_list_file(path: &Path) -> Result<Self> {
        let text = read_document_text(path)?;
        let table = Self::from_list(&text);
        info!(
            "Loaded {} categories from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Build a table from the text of a category list
    pub fn from_list(text: &str) -> Self {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        let mut ids = IndexMap::new();
        for (index, line) in normalized.split_inclusive('\n').enumerate() {
            ids.insert(line.trim_end_matches('\n').to_string(), index as i64);
        }
        Self { ids }
    }

    /// Collect every object name in `xml_files`, dedup, sort, and number from 1
    pub fn from_annotation_files(xml_files: &[PathBuf]) -> Result<Self> {
        let mut names = BTreeSet::new();
        for xml_file in xml_files {
            names.extend(read_object_names(xml_file)?);
        }
        let table = Self::from_names(names);
        info!("Found {} categories in annotation files", table.len());
        Ok(table)
    }

    /// Number already-unique, sorted names from 1
    pub fn from_names<I: IntoIterator<Item = String>>(names: I) -> Self {
        let ids = names
            .into_iter()
            .enumerate()
            .map(|(index, name)| (name, index as i64 + 1))
            .collect();
        Self { ids }
    }

    /// ID of `name`, appending it with `id = len()` when unseen
    ///
    /// With a list file whose IDs do not cover `0..len()` exactly (for
    /// example one with duplicate names) the appended ID can collide with an
    /// existing one.
    pub fn get_or_insert(&mut self, name: &str) -> i64 {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let new_id = self.ids.len() as i64;
        debug!("New category {:?} assigned ID {}", name, new_id);
        self.ids.insert(name.to_string(), new_id);
        new_id
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.ids.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Entries in table order
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.ids.iter().map(|(name, &id)| (name.as_str(), id))
    }

    /// COCO category records in table order
    pub fn to_categories(&self) -> Vec<Category> {
        self.iter()
            .map(|(name, id)| Category::new(id, name.to_string()))
            .collect()
    }
}
