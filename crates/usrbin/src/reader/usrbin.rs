// crate modules
use crate::document::Document;
use crate::error::{Error, Result};
use crate::reader::block::BlockParser;
use crate::reader::cursor::LineCursor;
use crate::record::GridRecord;

// standard library
use std::path::Path;

// external crates
use kdam::{Bar, BarBuilder, BarExt};
use log::{info, warn};

/// A reader for FLUKA USRBIN listing files (`*.bnn.lis`)
///
/// The whole file is read into memory first, then walked block by block with a
/// [LineCursor]. Every block becomes one [GridRecord](crate::GridRecord) in the
/// returned [Document], in file order.
///
/// Notes:
///
/// - There is no record count in the file, reading stops at end of input
/// - Each block needs exactly three axis lines
/// - Every cell of the grid must be filled, otherwise the read fails
/// - Percentage errors are attached to a record only if the block has them
/// - Invalid UTF-8 is replaced rather than rejected, with a warning
///
/// Minimal Example:
/// ```rust, no_run
/// # use ftools_usrbin::reader::UsrbinReader;
/// # use std::path::Path;
/// let path = Path::new("path/to/file.bnn.lis");
/// let reader = UsrbinReader::new();
/// let document = reader.parse(path).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct UsrbinReader {
    /// Optionally extract only a specific record
    target_index: Option<usize>,
    /// Disable progress bar?
    disable_progress: bool,
}

// ! ------------------------------------------------------------------------
// !                                Public API
// ! ------------------------------------------------------------------------

impl UsrbinReader {
    /// Just calls Default::default(), nothing special to be initialised
    pub fn new() -> Self {
        Default::default()
    }

    /// Setter for specifying which record to target
    ///
    /// Reading stops as soon as the target has been extracted, so only the
    /// blocks before it are parsed.
    pub fn set_target_index(&mut self, index: usize) {
        self.target_index = Some(index);
    }

    /// Do not print the progress indicator
    pub fn disable_progress(&mut self) {
        self.disable_progress = true;
    }

    /// Parses all records from a USRBIN listing file
    pub fn parse(&self, path: &Path) -> Result<Document> {
        info!("Reading {}", path.display());
        let text = Self::read_text(path)?;
        self.parse_text(&text)
    }

    /// Parses all records from text already in memory
    pub fn parse_text(&self, text: &str) -> Result<Document> {
        let mut cursor = LineCursor::new(text);
        let mut progress_bar = self.init_progress_bar(cursor.len())?;

        if !self.disable_progress {
            progress_bar.refresh()?;
        }

        let mut records = Vec::new();
        let mut index = 0;
        let mut last_position = 0;
        let mut first_had_errors = None;

        while let Some(record) = BlockParser::new(&mut cursor, index).parse()? {
            progress_bar.update(cursor.position() - last_position)?;
            last_position = cursor.position();
            Self::check_error_grid(&record, index, &mut first_had_errors);

            match self.target_index {
                Some(target) if target == index => {
                    records.push(record);
                    break;
                }
                Some(_) => (),
                None => records.push(record),
            }

            index += 1;
        }

        // need an extra line for clean spacing if the progress bar is printed
        if !self.disable_progress {
            eprintln!()
        }

        if let Some(target) = self.target_index {
            if records.is_empty() {
                return Err(Error::RecordNotFound(target));
            }
        }

        info!("Found {} record(s)", records.len());
        Ok(Document::new(records))
    }
}

// ! ------------------------------------------------------------------------
// !                              Internal helpers
// ! ------------------------------------------------------------------------

impl UsrbinReader {
    /// Read the full file, replacing anything that is not valid UTF-8
    fn read_text(path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)?;
        match String::from_utf8(bytes) {
            Ok(text) => Ok(text),
            Err(e) => {
                warn!(
                    "{} is not valid UTF-8, invalid bytes replaced",
                    path.display()
                );
                Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
            }
        }
    }

    /// Warn when records disagree on having a percentage error grid
    fn check_error_grid(record: &GridRecord, index: usize, first_had_errors: &mut Option<bool>) {
        let has_errors = record.errors().is_some();
        match *first_had_errors {
            None => *first_had_errors = Some(has_errors),
            Some(true) if !has_errors => {
                warn!("Record {index} has no error block, earlier records do")
            }
            Some(false) if has_errors => {
                warn!("Record {index} has an error block, earlier records do not")
            }
            Some(_) => (),
        }
    }

    /// Initialise the progress bar, if wanted
    fn init_progress_bar(&self, total: usize) -> Result<Bar> {
        BarBuilder::default()
            .total(total)
            .unit(" lines")
            .unit_scale(true)
            .disable(self.disable_progress)
            .bar_format("{count}/{total} lines [{rate} lines/s]   ")
            .build()
            .map_err(Error::ProgressBar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_BLOCKS: &str = "\
1
 first
  X coordinate: from 0.0000E+00 to 1.0000E+00 cm,     2 bins ( 5.0000E-01 cm wide)
  Y coordinate: from 0.0000E+00 to 1.0000E+00 cm,     1 bins ( 1.0000E+00 cm wide)
  Z coordinate: from 0.0000E+00 to 1.0000E+00 cm,     1 bins ( 1.0000E+00 cm wide)

   1.0000E+00  2.0000E+00
1
 second
  X coordinate: from 0.0000E+00 to 1.0000E+00 cm,     1 bins ( 1.0000E+00 cm wide)
  Y coordinate: from 0.0000E+00 to 1.0000E+00 cm,     1 bins ( 1.0000E+00 cm wide)
  Z coordinate: from 0.0000E+00 to 1.0000E+00 cm,     1 bins ( 1.0000E+00 cm wide)

   3.0000E+00
";

    fn quiet_reader() -> UsrbinReader {
        let mut reader = UsrbinReader::new();
        reader.disable_progress();
        reader
    }

    #[test]
    fn reads_every_block() {
        let document = quiet_reader().parse_text(TWO_BLOCKS).unwrap();
        assert_eq!(document.len(), 2);
        assert_eq!(document.records()[0].values(), &[1.0, 2.0]);
        assert_eq!(document.records()[1].values(), &[3.0]);
    }

    #[test]
    fn target_stops_early() {
        let mut reader = quiet_reader();
        reader.set_target_index(1);
        let document = reader.parse_text(TWO_BLOCKS).unwrap();
        assert_eq!(document.len(), 1);
        assert_eq!(document.records()[0].values(), &[3.0]);
    }

    #[test]
    fn missing_target() {
        let mut reader = quiet_reader();
        reader.set_target_index(2);
        let result = reader.parse_text(TWO_BLOCKS);
        assert!(matches!(result, Err(Error::RecordNotFound(2))));
    }

    #[test]
    fn failing_block_is_reported_by_index() {
        let text = TWO_BLOCKS.replace("   3.0000E+00", "   3.0000E+00  4.0000E+00");
        let err = quiet_reader().parse_text(&text).unwrap_err();
        assert_eq!(err.block(), Some(1));
        assert!(matches!(err, Error::GridSizeMismatch { block: 1, .. }));
    }

    #[test]
    fn error_grids_may_differ_between_records() {
        let text = TWO_BLOCKS.replace(
            "   1.0000E+00  2.0000E+00\n",
            "   1.0000E+00  2.0000E+00\n\n Percentage errors follow\n   5.0000E+00  6.0000E+00\n",
        );
        let document = quiet_reader().parse_text(&text).unwrap();
        assert_eq!(document.len(), 2);
        assert_eq!(document.records()[0].errors(), Some([5.0, 6.0].as_slice()));
        assert!(document.records()[1].errors().is_none());
        assert_eq!(document.records()[1].values(), &[3.0]);
    }

    #[test]
    fn empty_text_is_an_empty_document() {
        let document = quiet_reader().parse_text("").unwrap();
        assert!(document.is_empty());
    }
}
