//! Module for reading FLUKA USRBIN listing files
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod axis;
mod document;
mod error;
mod record;
mod writer;

pub mod reader;

// inline important the usrbin-related modules for a nice public API
#[doc(inline)]
pub use reader::{read_usrbin, read_usrbin_files, read_usrbin_target};

#[doc(inline)]
pub use axis::Axis;

#[doc(inline)]
pub use record::{Bounds, GridRecord};

#[doc(inline)]
pub use document::Document;

#[doc(inline)]
pub use writer::{write_ascii, write_json};

#[doc(inline)]
pub use error::{Error, Result};
