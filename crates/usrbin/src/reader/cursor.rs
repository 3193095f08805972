/// Position tracking over the lines of a fully read listing
///
/// Every line handed out is stripped of surrounding whitespace. Moving past the
/// final line is the end of input, reported as `None` by [LineCursor::current()]
/// and [LineCursor::peek()] so it can never be mistaken for a real line.
///
/// ```rust
/// # use ftools_usrbin::reader::LineCursor;
/// let mut cursor = LineCursor::new("1\n  from 0 to 1\n");
/// assert_eq!(cursor.current(), Some("1"));
/// assert_eq!(cursor.peek(), Some("from 0 to 1"));
///
/// cursor.advance();
/// cursor.advance();
/// assert_eq!(cursor.current(), None);
/// ```
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    lines: Vec<&'a str>,
    position: usize,
}

impl<'a> LineCursor<'a> {
    /// Split `text` into lines and start at the first one
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
            position: 0,
        }
    }

    /// The stripped line under the cursor, `None` at end of input
    pub fn current(&self) -> Option<&'a str> {
        self.lines.get(self.position).map(|line| line.trim())
    }

    /// The stripped line after the cursor, without moving
    pub fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.position + 1).map(|line| line.trim())
    }

    /// Move forward one line, does nothing once at end of input
    pub fn advance(&mut self) {
        if self.position < self.lines.len() {
            self.position += 1;
        }
    }

    /// Has the cursor moved past the final line?
    pub fn is_end(&self) -> bool {
        self.position >= self.lines.len()
    }

    /// Zero-based index of the current line
    pub fn position(&self) -> usize {
        self.position
    }

    /// Total number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Were there any lines at all?
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
