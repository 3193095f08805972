// crate modules
use crate::axis::Axis;
use crate::error::{Error, Result};
use crate::reader::cursor::LineCursor;
use crate::reader::parsers;
use crate::record::GridRecord;

// ftools modules
use ftools_format::f;

// external crates
use log::{debug, trace};

/// Position of the block parser within the listing
///
/// ```text
/// SeekRecordStart -> SeekAxisBlock -> InAxisBlock -> SeekDataBlock
///     -> InDataBlock -> SeekErrorBlock [-> InErrorBlock] -> done
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    /// Looking for the `1` that opens a block
    SeekRecordStart,
    /// Skipping header lines until the first axis definition
    SeekAxisBlock,
    /// Reading consecutive axis definitions
    InAxisBlock,
    /// Skipping header lines until the first row of values
    SeekDataBlock,
    /// Reading rows of values
    InDataBlock,
    /// Looking for percentage errors before the next block starts
    SeekErrorBlock,
    /// Reading rows of percentage errors
    InErrorBlock,
}

/// Parses a single block of the listing into a [GridRecord]
///
/// Picks up wherever the cursor was left by the previous block and leaves the
/// cursor on the first line not belonging to this one.
pub(crate) struct BlockParser<'c, 'a> {
    cursor: &'c mut LineCursor<'a>,
    /// Zero-based index of the block, for error reporting
    index: usize,
    state: State,
    axes: Vec<Axis>,
    /// Cells in the grid, known once the axis block is closed
    n_cells: usize,
    values: Vec<f64>,
    errors: Vec<f64>,
}

impl<'c, 'a> BlockParser<'c, 'a> {
    pub(crate) fn new(cursor: &'c mut LineCursor<'a>, index: usize) -> Self {
        Self {
            cursor,
            index,
            state: State::SeekRecordStart,
            axes: Vec::with_capacity(3),
            n_cells: 0,
            values: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Run the block to completion
    ///
    /// Returns `None` if the input ends before another block starts.
    pub(crate) fn parse(mut self) -> Result<Option<GridRecord>> {
        loop {
            let line = self.cursor.current();
            trace!("{:>6} {:?}: {:?}", self.cursor.position(), self.state, line);

            let state = self.state;
            self.state = match state {
                State::SeekRecordStart => match line {
                    None => return Ok(None),
                    Some(l) => {
                        self.cursor.advance();
                        if parsers::is_record_start(l) {
                            debug!("Record {} starts", self.index);
                            State::SeekAxisBlock
                        } else {
                            State::SeekRecordStart
                        }
                    }
                },

                State::SeekAxisBlock => {
                    let l = self.require(line)?;
                    if parsers::is_axis_line(l) {
                        State::InAxisBlock
                    } else if parsers::is_record_start(l) {
                        return Err(self.malformed_axis("next record starts before any axis lines"));
                    } else {
                        self.cursor.advance();
                        State::SeekAxisBlock
                    }
                }

                State::InAxisBlock => match line {
                    Some(l) if parsers::is_axis_line(l) => {
                        self.push_axis(l)?;
                        self.cursor.advance();
                        State::InAxisBlock
                    }
                    _ => {
                        self.close_axis_block()?;
                        State::SeekDataBlock
                    }
                },

                State::SeekDataBlock => {
                    let l = self.require(line)?;
                    if parsers::is_float_token_line(l) {
                        State::InDataBlock
                    } else if parsers::is_record_start(l) {
                        return Err(self.malformed_data("next record starts before any data"));
                    } else {
                        self.cursor.advance();
                        State::SeekDataBlock
                    }
                }

                State::InDataBlock => match line {
                    Some(l) if parsers::is_float_token_line(l) => {
                        let row = self.parse_row(l)?;
                        self.values.extend(row);
                        self.cursor.advance();
                        State::InDataBlock
                    }
                    _ => {
                        self.check_grid_size(self.values.len())?;
                        debug!("Values      = {}", self.values.len());
                        State::SeekErrorBlock
                    }
                },

                State::SeekErrorBlock => match line {
                    None => return Ok(Some(self.finish(false))),
                    Some(l) if parsers::is_record_start(l) => return Ok(Some(self.finish(false))),
                    Some(l) if parsers::is_float_token_line(l) => State::InErrorBlock,
                    Some(_) => {
                        self.cursor.advance();
                        State::SeekErrorBlock
                    }
                },

                State::InErrorBlock => match line {
                    Some(l) if parsers::is_float_token_line(l) => {
                        let row = self.parse_row(l)?;
                        self.errors.extend(row);
                        self.cursor.advance();
                        State::InErrorBlock
                    }
                    _ => {
                        self.check_grid_size(self.errors.len())?;
                        debug!("Errors      = {}", self.errors.len());
                        return Ok(Some(self.finish(true)));
                    }
                },
            };
        }
    }

    /// Turn the end-of-input marker into an error for a partial block
    fn require<'l>(&self, line: Option<&'l str>) -> Result<&'l str> {
        line.ok_or_else(|| Error::UnexpectedEndOfInput {
            block: self.index,
            state: f!("{:?}", self.state),
        })
    }

    /// Parse a single axis definition line
    ///
    /// Takes the first two numbers as the limits and the third as the number
    /// of bins, truncated to an integer. Anything beyond (e.g. bin width) is
    /// ignored.
    fn push_axis(&mut self, line: &str) -> Result<()> {
        let n = self.axes.len();
        let numbers = parsers::extract_all_numbers(line);
        if numbers.len() < 3 {
            return Err(self.malformed_axis(f!(
                "axis {n} needs min, max and bins, found {} values in \"{line}\"",
                numbers.len()
            )));
        }

        let mut fields = [0.0; 3];
        for (field, token) in fields.iter_mut().zip(&numbers) {
            *field = token.parse::<f64>().map_err(|_| {
                self.malformed_axis(f!("axis {n} value \"{token}\" is not a number"))
            })?;
        }
        let [min, max, bins] = fields;

        // truncated like any other integer conversion of the bin count
        let bins = bins.trunc();
        if !(1.0..=u32::MAX as f64).contains(&bins) {
            return Err(self.malformed_axis(f!("axis {n} has {bins} bins")));
        }
        // written this way round so NaN limits fail too
        if !(min <= max) {
            return Err(self.malformed_axis(f!("axis {n} has min {min} > max {max}")));
        }

        let axis = Axis::new(min, max, bins as u32);
        debug!("Axis {n}      = {axis}");
        self.axes.push(axis);

        // a fourth line would be consumed as part of this block otherwise
        if self.axes.len() == 3 && self.cursor.peek().is_some_and(parsers::is_axis_line) {
            return Err(self.malformed_axis("more than three axis lines"));
        }

        Ok(())
    }

    /// Axis lines have stopped, make sure there were enough of them
    fn close_axis_block(&mut self) -> Result<()> {
        if self.axes.len() != 3 {
            return Err(self.malformed_axis(f!(
                "expected 3 axis lines, found {}",
                self.axes.len()
            )));
        }

        let n_cells = self
            .axes
            .iter()
            .try_fold(1usize, |n, a| n.checked_mul(a.bin_count as usize))
            .ok_or_else(|| self.malformed_axis("grid too large"))?;
        self.n_cells = n_cells;
        debug!("Cells       = {}", self.n_cells);
        Ok(())
    }

    /// Parse every whitespace separated token in a data row
    fn parse_row(&self, line: &str) -> Result<Vec<f64>> {
        line.split_whitespace()
            .map(|token| {
                token.parse::<f64>().map_err(|_| {
                    self.malformed_data(f!(
                        "value \"{token}\" on line {} is not a number",
                        self.cursor.position() + 1
                    ))
                })
            })
            .collect()
    }

    /// Flat grids must fill every cell exactly
    fn check_grid_size(&self, found: usize) -> Result<()> {
        let expected = self.n_cells;
        if found != expected {
            return Err(Error::GridSizeMismatch {
                block: self.index,
                expected,
                found,
            });
        }
        Ok(())
    }

    /// Build the record from everything collected
    fn finish(self, has_errors: bool) -> GridRecord {
        trace!("Record {} ends on line {}", self.index, self.cursor.position());
        let axes = [self.axes[0], self.axes[1], self.axes[2]];
        let errors = has_errors.then_some(self.errors);
        GridRecord::new(axes, self.values, errors)
    }

    fn malformed_axis(&self, reason: impl Into<String>) -> Error {
        Error::MalformedAxisBlock {
            block: self.index,
            reason: reason.into(),
        }
    }

    fn malformed_data(&self, reason: impl Into<String>) -> Error {
        Error::MalformedDataBlock {
            block: self.index,
            reason: reason.into(),
        }
    }
}
