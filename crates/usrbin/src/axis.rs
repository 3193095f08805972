// standard library
use std::ops::Range;

// external crates
use serde::{Deserialize, Serialize};

/// One of the three binning dimensions of a USRBIN record
///
/// FLUKA writes each axis as a single line of the listing header, for example
///
/// ```text
/// X coordinate: from -3.0000E+02 to  3.0000E+02 cm,    30 bins ( 2.0000E+01 cm wide)
/// ```
///
/// which becomes `Axis { min: -300.0, max: 300.0, bin_count: 30 }`.
///
/// Parsed axes always satisfy `bin_count >= 1` and `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    /// Lower limit of the binning
    pub min: f64,
    /// Upper limit of the binning
    pub max: f64,
    /// Number of bins between the limits
    pub bin_count: u32,
}

impl Axis {
    /// Create a new axis from its limits and number of bins
    pub fn new(min: f64, max: f64, bin_count: u32) -> Self {
        Self {
            min,
            max,
            bin_count,
        }
    }

    /// Width of a single bin
    ///
    /// ```rust
    /// # use ftools_usrbin::Axis;
    /// let axis = Axis::new(-100.0, 100.0, 40);
    /// assert_eq!(axis.width(), 5.0);
    /// ```
    pub fn width(&self) -> f64 {
        (self.max - self.min) / self.bin_count as f64
    }

    /// Evenly spaced coordinates from `min` to `max` inclusive
    ///
    /// One point per bin, linearly interpolated between the two limits. This
    /// is the coordinate vector most plotting tools expect alongside the
    /// values. A single bin gives just the lower limit.
    ///
    /// ```rust
    /// # use ftools_usrbin::Axis;
    /// let axis = Axis::new(0.0, 10.0, 3);
    /// assert_eq!(axis.coordinates(), vec![0.0, 5.0, 10.0]);
    /// ```
    pub fn coordinates(&self) -> Vec<f64> {
        let n = self.bin_count as usize;
        match n {
            0 => Vec::new(),
            1 => vec![self.min],
            _ => {
                let step = (self.max - self.min) / (n - 1) as f64;
                let mut points: Vec<f64> =
                    (0..n).map(|i| self.min + step * i as f64).collect();
                // avoid accumulated rounding on the final point
                points[n - 1] = self.max;
                points
            }
        }
    }

    /// Range of coordinate indices that fall within optional bounds
    ///
    /// Both bounds are inclusive. Returns `None` if no coordinate is inside the
    /// bounds.
    ///
    /// ```rust
    /// # use ftools_usrbin::Axis;
    /// let axis = Axis::new(0.0, 40.0, 5);
    /// assert_eq!(axis.index_range(Some(5.0), Some(30.0)), Some(1..4));
    /// assert_eq!(axis.index_range(None, None), Some(0..5));
    /// assert_eq!(axis.index_range(Some(50.0), None), None);
    /// ```
    pub fn index_range(&self, lower: Option<f64>, upper: Option<f64>) -> Option<Range<usize>> {
        let coordinates = self.coordinates();

        let start = match lower {
            Some(lower) => coordinates.iter().position(|c| *c >= lower)?,
            None => 0,
        };

        let end = match upper {
            Some(upper) => coordinates.iter().rposition(|c| *c <= upper)? + 1,
            None => coordinates.len(),
        };

        (start < end).then_some(start..end)
    }

    /// Reduced axis covering only the coordinates in `range`
    ///
    /// The new limits are the first and last coordinates of the range, so the
    /// coordinates of the sub-axis are identical to the selected ones.
    pub(crate) fn sub_axis(&self, range: &Range<usize>) -> Self {
        let coordinates = self.coordinates();
        Self {
            min: coordinates[range.start],
            max: coordinates[range.end - 1],
            bin_count: range.len() as u32,
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "from {:e} to {:e} in {} bins",
            self.min, self.max, self.bin_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_include_both_limits() {
        let axis = Axis::new(-100.0, 100.0, 41);
        let coordinates = axis.coordinates();
        assert_eq!(coordinates.len(), 41);
        assert_eq!(coordinates[0], -100.0);
        assert_eq!(coordinates[20], 0.0);
        assert_eq!(coordinates[40], 100.0);
    }

    #[test]
    fn single_bin_coordinates() {
        assert_eq!(Axis::new(-5.0, 5.0, 1).coordinates(), vec![-5.0]);
    }

    #[test]
    fn sub_axis_keeps_coordinates() {
        let axis = Axis::new(0.0, 40.0, 5);
        let range = axis.index_range(Some(10.0), Some(30.0)).unwrap();
        let sub = axis.sub_axis(&range);
        assert_eq!(sub, Axis::new(10.0, 30.0, 3));
        assert_eq!(sub.coordinates(), axis.coordinates()[1..4].to_vec());
    }

    #[test]
    fn inverted_bounds_select_nothing() {
        let axis = Axis::new(0.0, 40.0, 5);
        assert_eq!(axis.index_range(Some(30.0), Some(10.0)), None);
    }
}
