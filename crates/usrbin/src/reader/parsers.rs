//! Line classifiers for the USRBIN listing
//!
//! The listing has no formal grammar. Blocks are told apart purely by the
//! shape of a line, so these heuristics must keep the exact anchoring and
//! character classes below or existing listings will misparse.
//!
//! | Check                    | Pattern                          | Anchored |
//! | ------------------------ | -------------------------------- | -------- |
//! | [is_record_start()]      | `1`                              | whole    |
//! | [is_axis_line()]         | `from *-*\d`                     | no       |
//! | [is_float_token_line()]  | `\s*-*\d+\.\d+E\+*-*\d+`         | start    |
//! | [extract_all_numbers()]  | `-*\d+\.*\d*E*\+*-*\d*`          | no       |

// nom parser combinators
use nom::bytes::complete::{tag, take_while};
use nom::character::complete::{char, digit0, digit1, multispace0, satisfy};
use nom::combinator::recognize;
use nom::sequence::tuple;
use nom::IResult;

/// Line marking the start of every block
pub const RECORD_START: &str = "1";

// ! Boolean checks

/// Check for the block-begin marker, the whole line being exactly `1`
pub fn is_record_start(i: &str) -> bool {
    i.trim() == RECORD_START
}

/// Check for `from` followed by a (possibly negative) number anywhere
///
/// e.g.
/// ```text
/// X coordinate: from -3.0000E+02 to  3.0000E+02 cm,    30 bins
/// ```
pub fn is_axis_line(i: &str) -> bool {
    i.match_indices("from")
        .any(|(position, _)| from_marker(&i[position..]).is_ok())
}

/// Check for a line that starts with a fully formed scientific number
///
/// Stricter than [extract_all_numbers()], so that axis lines and headers that
/// happen to contain numbers are never taken as data rows.
///
/// e.g.
/// ```text
///    1.2345E-03  2.3456E-03  3.4567E-03
/// ```
pub fn is_float_token_line(i: &str) -> bool {
    leading_float(i).is_ok()
}

// ! Extractors

/// Every number-like token in the line, in the order they appear
///
/// Matches are leftmost, greedy, and non-overlapping. Note that the grammar is
/// loose and will happily match things like `5E` that are not valid floats,
/// so callers must still check the conversion.
pub fn extract_all_numbers(i: &str) -> Vec<&str> {
    let mut numbers = Vec::new();
    let mut rest = i;

    while !rest.is_empty() {
        match any_number(rest) {
            Ok((remaining, number)) => {
                numbers.push(number);
                rest = remaining;
            }
            Err(_) => {
                // step over a single character and try again
                let mut chars = rest.chars();
                chars.next();
                rest = chars.as_str();
            }
        }
    }

    numbers
}

// ! Parser combinators

/// `from *-*\d`
fn from_marker(i: &str) -> IResult<&str, &str> {
    recognize(tuple((
        tag("from"),
        space_run,
        minus_run,
        satisfy(|c: char| c.is_ascii_digit()),
    )))(i)
}

/// `^\s*-*\d+\.\d+E\+*-*\d+`
fn leading_float(i: &str) -> IResult<&str, &str> {
    recognize(tuple((
        multispace0,
        minus_run,
        digit1,
        char('.'),
        digit1,
        char('E'),
        plus_run,
        minus_run,
        digit1,
    )))(i)
}

/// `-*\d+\.*\d*E*\+*-*\d*`
fn any_number(i: &str) -> IResult<&str, &str> {
    recognize(tuple((
        minus_run,
        digit1,
        dot_run,
        digit0,
        exponent_run,
        plus_run,
        minus_run,
        digit0,
    )))(i)
}

/// Zero or more literal spaces (tabs not included)
fn space_run(i: &str) -> IResult<&str, &str> {
    take_while(|c: char| c == ' ')(i)
}

/// Zero or more `-`
fn minus_run(i: &str) -> IResult<&str, &str> {
    take_while(|c: char| c == '-')(i)
}

/// Zero or more `+`
fn plus_run(i: &str) -> IResult<&str, &str> {
    take_while(|c: char| c == '+')(i)
}

/// Zero or more `.`
fn dot_run(i: &str) -> IResult<&str, &str> {
    take_while(|c: char| c == '.')(i)
}

/// Zero or more `E`
fn exponent_run(i: &str) -> IResult<&str, &str> {
    take_while(|c: char| c == 'E')(i)
}


#[cfg(test)]
mod extractor_tests {
    use super::*;

    #[test]
    fn test_extract_axis_numbers() {
        assert_eq!(
            extract_all_numbers("from -100.0 to 100.0 in 40 bins"),
            vec!["-100.0", "100.0", "40"]
        );
    }

    #[test]
    fn test_extract_fluka_axis_numbers() {
        assert_eq!(
            extract_all_numbers(
                "Y coordinate: from -1.0000E+02 to  1.0000E+02 cm,    20 bins ( 1.0000E+01 cm wide)"
            ),
            vec!["-1.0000E+02", "1.0000E+02", "20", "1.0000E+01"]
        );
    }

    #[test]
    fn test_extract_loose_tokens() {
        // malformed shapes are still matched, conversion is left to the caller
        assert_eq!(extract_all_numbers("5E and 1..2"), vec!["5E", "1..2"]);
        assert_eq!(extract_all_numbers("10.0-5"), vec!["10.0-5"]);
        assert_eq!(extract_all_numbers("--3"), vec!["--3"]);
    }

    #[test]
    fn test_extract_nothing() {
        assert!(extract_all_numbers("").is_empty());
        assert!(extract_all_numbers("no numbers here").is_empty());
        assert!(extract_all_numbers("- . E +").is_empty());
    }

    #[test]
    fn test_extract_skips_multibyte() {
        assert_eq!(extract_all_numbers("µ 12 °"), vec!["12"]);
    }
}
