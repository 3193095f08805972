//! Write operations for USRBIN data

// standard library
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

// crate modules
use crate::document::Document;
use crate::error::Result;
use crate::record::GridRecord;

// ftools modules
use ftools_format::NumFormat;

// external crates
use log::info;

/// Write a full [Document] to a JSON file
///
/// Every record is written with its axes, flat values, and errors (or `null`
/// when the block had none). Values keep the file order, first axis varying
/// fastest.
///
/// ```rust, no_run
/// # use ftools_usrbin::{read_usrbin, write_json};
/// let document = read_usrbin("path/to/vault.bnn.lis").unwrap();
/// write_json(&document, "vault.json").unwrap();
/// ```
pub fn write_json<P: AsRef<Path>>(document: &Document, path: P) -> Result<()> {
    info!("Writing JSON to {}", path.as_ref().display());
    let mut writer = init_writer(path)?;
    serde_json::to_writer_pretty(&mut writer, document)?;
    writer.flush()?;
    Ok(())
}

/// Write a single [GridRecord] to a column formatted text file
///
/// One line per cell, with the coordinate of every axis followed by the value
/// and the percentage error if there is one. Coordinates are those of
/// [Axis::coordinates()](crate::Axis::coordinates).
///
/// ```text
/// #            x            y            z        value        error
///  -3.0000e+02  -1.0000e+02   0.0000e+00   1.0000e-01   1.2000e+01
///   0.0000e+00  -1.0000e+02   0.0000e+00   2.0000e-01   1.1000e+01
/// ```
///
/// ```rust, no_run
/// # use ftools_usrbin::{read_usrbin_target, write_ascii};
/// let record = read_usrbin_target("path/to/vault.bnn.lis", 0).unwrap();
/// write_ascii(&record, "vault_dose.txt").unwrap();
/// ```
pub fn write_ascii<P: AsRef<Path>>(record: &GridRecord, path: P) -> Result<()> {
    info!("Writing columns to {}", path.as_ref().display());
    let mut writer = init_writer(path)?;
    write_columns(record, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Column output for any writer, in file order
fn write_columns<W: Write>(record: &GridRecord, writer: &mut W) -> Result<()> {
    let axes = record.axes();
    let (x, y, z) = (
        axes[0].coordinates(),
        axes[1].coordinates(),
        axes[2].coordinates(),
    );
    let errors = record.errors();

    write!(writer, "#{:>12} {:>12} {:>12} {:>12}", "x", "y", "z", "value")?;
    if errors.is_some() {
        write!(writer, " {:>12}", "error")?;
    }
    writeln!(writer)?;

    // the flat position follows the same i-fastest order as the loops
    let mut p = 0;
    for zk in &z {
        for yj in &y {
            for xi in &x {
                write!(
                    writer,
                    " {:>12} {:>12} {:>12} {:>12}",
                    xi.sci(4, 2),
                    yj.sci(4, 2),
                    zk.sci(4, 2),
                    record.values()[p].sci(4, 2)
                )?;
                if let Some(errors) = errors {
                    write!(writer, " {:>12}", errors[p].sci(4, 2))?;
                }
                writeln!(writer)?;
                p += 1;
            }
        }
    }

    Ok(())
}

/// Initialise a buffered writer from anything that can be turned into a path
fn init_writer<P: AsRef<Path>>(path: P) -> Result<BufWriter<File>> {
    let file = File::create(path)?;
    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::Axis;

    #[test]
    fn columns_follow_file_order() {
        let record = GridRecord::new(
            [
                Axis::new(0.0, 1.0, 2),
                Axis::new(5.0, 5.0, 1),
                Axis::new(0.0, 2.0, 2),
            ],
            vec![1.0, 2.0, 3.0, 4.0],
            Some(vec![10.0, 20.0, 30.0, 40.0]),
        );

        let mut buffer = Vec::new();
        write_columns(&record, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with('#'));
        assert!(lines[0].ends_with("error"));

        // z changes slowest, x fastest
        let third: Vec<&str> = lines[3].split_whitespace().collect();
        assert_eq!(
            third,
            vec!["0.0000e+00", "5.0000e+00", "2.0000e+00", "3.0000e+00", "3.0000e+01"]
        );
    }

    #[test]
    fn no_error_column_without_errors() {
        let record = GridRecord::new(
            [
                Axis::new(0.0, 1.0, 1),
                Axis::new(0.0, 1.0, 1),
                Axis::new(0.0, 1.0, 1),
            ],
            vec![7.5],
            None,
        );

        let mut buffer = Vec::new();
        write_columns(&record, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(!text.contains("error"));
        assert_eq!(text.lines().nth(1).unwrap().split_whitespace().count(), 4);
    }
}
