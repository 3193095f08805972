// crate modules
use crate::error::Result;
use crate::reader::UsrbinReader;
use crate::record::GridRecord;

// standard library
use std::path::Path;

// external crates
use serde::Serialize;

/// Every record read from a single USRBIN listing
///
/// Records are kept in the order their blocks appear in the file. Nothing else
/// links them, though it is common for adjacent records to share the same
/// binning for different quantities (e.g. dose and fluence).
///
/// A [Document] is built once from the full text and is not modified
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    records: Vec<GridRecord>,
}

impl Document {
    pub(crate) fn new(records: Vec<GridRecord>) -> Self {
        Self { records }
    }

    /// Read a USRBIN listing file
    ///
    /// The `path` may be a [&str], [String], [Path], etc..
    ///
    /// ```rust, no_run
    /// # use ftools_usrbin::Document;
    /// let document = Document::from_file("path/to/file.bnn.lis").unwrap();
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = UsrbinReader::new();
        reader.disable_progress();
        reader.parse(path.as_ref())
    }

    /// Parse listing text that is already in memory
    ///
    /// ```rust
    /// # use ftools_usrbin::Document;
    /// // no blocks at all is fine, just empty
    /// let document = Document::from_text("").unwrap();
    /// assert!(document.is_empty());
    /// ```
    pub fn from_text(text: &str) -> Result<Self> {
        let mut reader = UsrbinReader::new();
        reader.disable_progress();
        reader.parse_text(text)
    }

    /// All records, in file order
    pub fn records(&self) -> &[GridRecord] {
        &self.records
    }

    /// Find a record by its position in the file
    ///
    /// If the record exists it is returned as `Some(&GridRecord)`, otherwise
    /// `None`.
    pub fn get_record(&self, index: usize) -> Option<&GridRecord> {
        self.records.get(index)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Were any records found?
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in file order
    pub fn iter(&self) -> std::slice::Iter<'_, GridRecord> {
        self.records.iter()
    }

    /// Take ownership of the records
    pub fn into_records(self) -> Vec<GridRecord> {
        self.records
    }
}

impl IntoIterator for Document {
    type Item = GridRecord;
    type IntoIter = std::vec::IntoIter<GridRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a GridRecord;
    type IntoIter = std::slice::Iter<'a, GridRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Document with {} record(s)", self.records.len())?;
        for (n, record) in self.records.iter().enumerate() {
            write!(f, "\n[{n}] {record}")?;
        }
        Ok(())
    }
}
