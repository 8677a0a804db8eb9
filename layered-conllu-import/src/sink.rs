//! Output side of an import.

use layered_conllu::ElementTable;
use std::collections::BTreeMap;

/// Host storage for imported layers.
///
/// For each file, [`Importer::import_file`](crate::Importer::import_file)
/// calls `write_text` once, `write_element` once per element table, then
/// `write_structure` once, and only after the whole file parsed.
pub trait AnnotationSink {
    fn write_text(&mut self, file: &str, text: &str) -> Result<(), String>;

    fn write_element(&mut self, file: &str, table: &ElementTable) -> Result<(), String>;

    /// Sorted element and `element:attribute` names of the file.
    fn write_structure(&mut self, file: &str, structure: &[String]) -> Result<(), String>;
}

/// Everything written for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredFile {
    pub text: String,
    pub tables: Vec<ElementTable>,
    pub structure: Vec<String>,
}

/// Keeps imported layers in memory, keyed by file name.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: BTreeMap<String, StoredFile>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, file: &str) -> Option<&StoredFile> {
        self.files.get(file)
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(|name| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn entry(&mut self, file: &str) -> &mut StoredFile {
        self.files.entry(file.to_string()).or_default()
    }
}

impl AnnotationSink for MemorySink {
    fn write_text(&mut self, file: &str, text: &str) -> Result<(), String> {
        self.entry(file).text = text.to_string();
        Ok(())
    }

    fn write_element(&mut self, file: &str, table: &ElementTable) -> Result<(), String> {
        self.entry(file).tables.push(table.clone());
        Ok(())
    }

    fn write_structure(&mut self, file: &str, structure: &[String]) -> Result<(), String> {
        self.entry(file).structure = structure.to_vec();
        Ok(())
    }
}
