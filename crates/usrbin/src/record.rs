// crate modules
use crate::axis::Axis;
use crate::error::{Error, Result};

// ftools modules
use ftools_format::OptionFormat;

// external crates
use serde::Serialize;

/// Optional inclusive coordinate bounds `(lower, upper)` for one axis
pub type Bounds = (Option<f64>, Option<f64>);

/// A single binned 3-D grid read from one block of a USRBIN listing
///
/// ### Layout
///
/// The values are stored flat in the same order FLUKA writes them, with the
/// first axis varying fastest. The cell `(i, j, k)` is at flat position
///
/// ```text
/// p = i + nx*j + nx*ny*k
/// ```
///
/// where `(nx, ny, nz)` are the bin counts of the three axes. Use
/// [GridRecord::value()] for checked access, or [GridRecord::to_nested()] for
/// a `[i][j][k]` indexed copy.
///
/// ### Errors
///
/// FLUKA follows each value matrix with a matrix of percentage errors of the
/// same shape. When the block has one it is kept in `errors`.
///
/// A [GridRecord] is only ever built from a complete block, so the number of
/// values always matches the product of the bin counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRecord {
    axes: [Axis; 3],
    values: Vec<f64>,
    errors: Option<Vec<f64>>,
}

impl GridRecord {
    /// Caller guarantees every grid has one entry per cell of `axes`
    pub(crate) fn new(axes: [Axis; 3], values: Vec<f64>, errors: Option<Vec<f64>>) -> Self {
        Self {
            axes,
            values,
            errors,
        }
    }

    /// The three axes, in file order
    pub fn axes(&self) -> &[Axis; 3] {
        &self.axes
    }

    /// Flat values, first axis varying fastest
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Flat percentage errors, if the block contained them
    pub fn errors(&self) -> Option<&[f64]> {
        self.errors.as_deref()
    }

    /// Bin counts of the three axes `(nx, ny, nz)`
    pub fn shape(&self) -> (usize, usize, usize) {
        (
            self.axes[0].bin_count as usize,
            self.axes[1].bin_count as usize,
            self.axes[2].bin_count as usize,
        )
    }

    /// Total number of cells in the grid
    pub fn n_cells(&self) -> usize {
        self.values.len()
    }

    /// Flat position of cell `(i, j, k)`, if it is inside the grid
    ///
    /// ```rust
    /// # use ftools_usrbin::Document;
    /// # let text = "1\n from 0 to 2 , 2 bins\n from 0 to 3 , 3 bins\n from 0 to 1 , 1 bins\n\
    /// #   1.0E+00 2.0E+00 3.0E+00 4.0E+00 5.0E+00 6.0E+00\n";
    /// # let document = Document::from_text(text).unwrap();
    /// // a grid with (nx, ny, nz) = (2, 3, 1)
    /// let record = document.get_record(0).unwrap();
    /// assert_eq!(record.cell_index(1, 2, 0), Some(5));
    /// assert_eq!(record.cell_index(2, 0, 0), None);
    /// ```
    pub fn cell_index(&self, i: usize, j: usize, k: usize) -> Option<usize> {
        let (nx, ny, nz) = self.shape();
        (i < nx && j < ny && k < nz).then_some(i + nx * j + nx * ny * k)
    }

    /// Value of cell `(i, j, k)`
    pub fn value(&self, i: usize, j: usize, k: usize) -> Option<f64> {
        self.cell_index(i, j, k).map(|p| self.values[p])
    }

    /// Percentage error of cell `(i, j, k)`
    pub fn error(&self, i: usize, j: usize, k: usize) -> Option<f64> {
        let p = self.cell_index(i, j, k)?;
        self.errors.as_ref().map(|errors| errors[p])
    }

    /// Copy of the values as nested vectors indexed `[i][j][k]`
    pub fn to_nested(&self) -> Vec<Vec<Vec<f64>>> {
        let (nx, ny, nz) = self.shape();
        (0..nx)
            .map(|i| {
                (0..ny)
                    .map(|j| {
                        (0..nz)
                            .map(|k| self.values[i + nx * j + nx * ny * k])
                            .collect()
                    })
                    .collect()
            })
            .collect()
    }

    /// Extract the part of the grid inside coordinate bounds
    ///
    /// Bounds are given per axis and compared against
    /// [Axis::coordinates()]. Unbounded sides keep the full extent of the axis.
    /// The result is a new record with reduced axes, and errors if present.
    ///
    /// ```rust
    /// # use ftools_usrbin::Document;
    /// # let text = "1\n from 0 to 2 , 3 bins\n from 0 to 1 , 2 bins\n from 0 to 1 , 1 bins\n\
    /// #   1.0E+00 2.0E+00 3.0E+00 4.0E+00 5.0E+00 6.0E+00\n";
    /// # let document = Document::from_text(text).unwrap();
    /// let record = document.get_record(0).unwrap();
    ///
    /// // keep only x >= 1.0, everything else unbounded
    /// let subgrid = record
    ///     .subgrid([(Some(1.0), None), (None, None), (None, None)])
    ///     .unwrap();
    ///
    /// assert_eq!(subgrid.shape(), (2, 2, 1));
    /// assert_eq!(subgrid.values(), &[2.0, 3.0, 5.0, 6.0]);
    /// ```
    pub fn subgrid(&self, bounds: [Bounds; 3]) -> Result<Self> {
        let mut ranges = Vec::with_capacity(3);
        for (n, (axis, (lower, upper))) in self.axes.iter().zip(bounds).enumerate() {
            let range = axis
                .index_range(lower, upper)
                .ok_or(Error::EmptySelection(n))?;
            ranges.push(range);
        }

        let axes = [
            self.axes[0].sub_axis(&ranges[0]),
            self.axes[1].sub_axis(&ranges[1]),
            self.axes[2].sub_axis(&ranges[2]),
        ];

        let (nx, ny, _) = self.shape();
        let select = |grid: &[f64]| -> Vec<f64> {
            let mut selected = Vec::with_capacity(ranges.iter().map(|r| r.len()).product());
            for k in ranges[2].clone() {
                for j in ranges[1].clone() {
                    for i in ranges[0].clone() {
                        selected.push(grid[i + nx * j + nx * ny * k]);
                    }
                }
            }
            selected
        };

        let values = select(&self.values);
        let errors = self.errors.as_deref().map(select);

        Ok(Self::new(axes, values, errors))
    }
}

impl std::fmt::Display for GridRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let (nx, ny, nz) = self.shape();
        writeln!(f, "Grid record ({nx} x {ny} x {nz})")?;
        for (n, axis) in self.axes.iter().enumerate() {
            writeln!(f, "  axis {n}: {axis}")?;
        }
        writeln!(f, "  values: {}", self.values.len())?;
        write!(
            f,
            "  errors: {}",
            self.errors.as_ref().map(|e| e.len()).display()
        )
    }
}
