//! Cell tag parsing and formatting.
//!
//! Converts between cell tags (e.g., "A1", "C12", "Z50") and zero-indexed
//! row/column coordinates. Columns are a single uppercase letter, so a sheet
//! has at most 26 of them.
//!
//! # Examples
//!
//! ```
//! use cellsheet_engine::engine::CellRef;
//!
//! let cell = CellRef::from_tag("B3").unwrap();
//! assert_eq!(cell.col, 1);  // 0-indexed
//! assert_eq!(cell.row, 2);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Number of addressable columns (`A`..=`Z`).
pub const MAX_COLUMNS: usize = 26;

/// A reference to a cell by row and column indices (0-indexed).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse a cell tag such as "A1".
    ///
    /// Returns None unless the tag is exactly one uppercase letter followed by
    /// a 1-based row number. Bounds are not checked here; see [`CellRef::is_within`].
    pub fn from_tag(tag: &str) -> Option<CellRef> {
        let caps = tag_re().captures(tag)?;
        let letter = caps["col"].as_bytes()[0];
        let row = caps["row"].parse::<usize>().ok()?.checked_sub(1)?;
        Some(CellRef::new(row, (letter - b'A') as usize))
    }

    /// Column letter for a 0-based column index, or None past `Z`.
    pub fn col_letter(col: usize) -> Option<char> {
        if col < MAX_COLUMNS {
            Some((b'A' + col as u8) as char)
        } else {
            None
        }
    }

    /// Whether this cell lies inside a grid of `rows` x `cols`.
    pub fn is_within(&self, rows: usize, cols: usize) -> bool {
        self.row < rows && self.col < cols
    }
}

fn tag_re() -> &'static Regex {
    static TAG_RE: OnceLock<Regex> = OnceLock::new();
    TAG_RE.get_or_init(|| {
        Regex::new(r"^(?<col>[A-Z])(?<row>[0-9]+)$").expect("cell tag regex must compile")
    })
}

impl std::str::FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| format!("Invalid cell tag: {}", s))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match CellRef::col_letter(self.col) {
            Some(letter) => write!(f, "{}{}", letter, self.row + 1),
            None => write!(f, "?{}", self.row + 1),
        }
    }
}
