//! Parsers and logic for reading USRBIN listing files
//!
//! All functions are re-exported to the crate root for easy access.
//!
//! # Quickstart
//!
//! The simplest methods for reading records from a listing are the
//! convenience functions:
//!
//! ```rust, no_run
//! # use ftools_usrbin::{read_usrbin, read_usrbin_target, Document, GridRecord};
//! // Extract all records from a file into a Document
//! let document: Document = read_usrbin("/path/to/vault.bnn.lis").unwrap();
//!
//! // Extract just the second record from a file
//! let record: GridRecord = read_usrbin_target("/path/to/vault.bnn.lis", 1).unwrap();
//! ```
//!
//! Under the hood these initialise the [UsrbinReader]. This is made public for
//! fine control if absolutely needed, but the convenience functions are the
//! preferred API for this module.
//!
//! # Implementation overview
//!
//! The listing is read fully into memory and split into lines for a
//! [LineCursor]. A small state machine then walks the lines one block at a
//! time:
//!
//! | State             | Leaves when                                        |
//! | ----------------- | -------------------------------------------------- |
//! | `SeekRecordStart` | a line is exactly `1`, or input ends (done)        |
//! | `SeekAxisBlock`   | a line contains `from` followed by a number        |
//! | `InAxisBlock`     | a line is no longer an axis line                   |
//! | `SeekDataBlock`   | a line starts with a scientific number             |
//! | `InDataBlock`     | a line no longer starts with a scientific number   |
//! | `SeekErrorBlock`  | another data run, the next `1`, or input ends      |
//! | `InErrorBlock`    | a line no longer starts with a scientific number   |
//!
//! All state lives in the parse call, nothing is shared between files.
//!
//! # Formatting notes
//!
//! A typical block looks like this (abridged):
//!
//! ```text
//! 1
//!  *****  dose in the vault  *****
//!
//!    Cartesian binning n.   1  "DOSE      " , generalized particle n.  228
//!       X coordinate: from -3.0000E+02 to  3.0000E+02 cm,     3 bins ( 2.0000E+02 cm wide)
//!       Y coordinate: from -1.0000E+02 to  1.0000E+02 cm,     2 bins ( 1.0000E+02 cm wide)
//!       Z coordinate: from  0.0000E+00 to  4.0000E+02 cm,     2 bins ( 2.0000E+02 cm wide)
//!       Data follow in a matrix A(ix,iy,iz), format (1(5x,1p,10(1x,e11.4)))
//!
//!    1.0000E-01  2.0000E-01  3.0000E-01  4.0000E-01  5.0000E-01  6.0000E-01 ...
//!
//!  Percentage errors follow in a matrix A(ix,iy,iz), format (1(5x,1p,10(1x,e11.4)))
//!
//!    1.2000E+01  1.1000E+01  1.0000E+01  9.0000E+00  8.0000E+00  7.0000E+00 ...
//! ```
//!
//! **Axis lines**
//!
//! > The first three numbers on the line are the lower limit, upper limit and
//! > number of bins. Anything after that, such as the bin width, is ignored.
//!
//! **Value order**
//!
//! > Values are written with the first axis varying fastest, which is exactly
//! > the flat layout kept in [GridRecord](crate::GridRecord).
//!
//! **Percentage errors**
//!
//! > The error matrix has no record marker of its own, so it is only taken if
//! > it appears before the next `1` line.

// reader modules
mod block;
mod cursor;
mod parsers;
mod usrbin;

// re-exports for clean API + documentation
#[doc(inline)]
pub use cursor::LineCursor;

#[doc(inline)]
pub use usrbin::UsrbinReader;

#[doc(inline)]
pub use parsers::{extract_all_numbers, is_axis_line, is_float_token_line, is_record_start};

// library imports
use crate::error::{Error, Result};
use crate::{Document, GridRecord};
use rayon::prelude::*;
use std::path::Path;

/// Read all records in a USRBIN listing
///
/// Returns a result containing a [Document] with every record extracted from
/// the file at `path` by the parser.
///
/// - `path` - Path to the listing, can be [&str], [String], [Path], etc...
///
/// Example
/// ```rust, no_run
/// # use ftools_usrbin::{Document, read_usrbin};
/// // Read every record contained in the file
/// let document: Document = read_usrbin("path/to/vault.bnn.lis").unwrap();
/// ```
pub fn read_usrbin<P: AsRef<Path>>(path: P) -> Result<Document> {
    let path: &Path = Path::new(path.as_ref());
    let mut reader = UsrbinReader::new();
    reader.disable_progress();
    reader.parse(path)
}

/// Read only the specified record from a USRBIN listing
///
/// Returns a result of the targeted [GridRecord] if it was successfully
/// extracted from the file at `path`.
///
/// - `path` - Path to the listing, can be [&str], [String], [Path], etc...
/// - `index` - Zero-based position of the record in the file
///
/// Example
/// ```rust, no_run
/// # use ftools_usrbin::{GridRecord, read_usrbin_target};
/// // Read only the first record from the file
/// let record: GridRecord = read_usrbin_target("path/to/vault.bnn.lis", 0).unwrap();
/// ```
pub fn read_usrbin_target<P: AsRef<Path>>(path: P, index: usize) -> Result<GridRecord> {
    let path: &Path = Path::new(path.as_ref());
    let mut reader = UsrbinReader::new();
    reader.disable_progress();
    reader.set_target_index(index);
    reader
        .parse(path)?
        .into_iter()
        .next()
        .ok_or(Error::RecordNotFound(index))
}

/// Read several USRBIN listings in parallel
///
/// Each file gets its own reader, so a failure in one does not affect the
/// others. Results are returned in the same order as `paths`.
///
/// Example
/// ```rust, no_run
/// # use ftools_usrbin::read_usrbin_files;
/// let paths = ["vault_30.bnn.lis", "vault_40.bnn.lis"];
/// for result in read_usrbin_files(&paths) {
///     println!("{}", result.unwrap());
/// }
/// ```
pub fn read_usrbin_files<P: AsRef<Path> + Sync>(paths: &[P]) -> Vec<Result<Document>> {
    paths.par_iter().map(read_usrbin).collect()
}
