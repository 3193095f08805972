//! `ftools` is a semi-modular toolkit of libraries for FLUKA output analysis
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use ftools_format as format;

#[cfg(feature = "usrbin")]
#[cfg_attr(docsrs, doc(cfg(feature = "usrbin")))]
#[doc(inline)]
pub use ftools_usrbin as usrbin;
