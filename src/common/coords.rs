//! Cell coordinates and ranges in A1 notation.
//!
//! Rows and columns are 1-based everywhere in this crate (row 1 / column 1 is
//! `A1`), matching what a spreadsheet user reads and what SpreadsheetML writes.
//! Ranges are stored as integers and only turned into text at render time, so
//! a range that grows with the hierarchy never goes through string surgery.

use std::fmt;

/// Largest 1-based column index a worksheet accepts (`XFD`).
pub const MAX_COLUMNS: u32 = 16_384;

/// Largest 1-based row index a worksheet accepts.
pub const MAX_ROWS: u32 = 1_048_576;

/// Convert a 1-based column number to its letters (1 -> "A", 27 -> "AA").
///
/// # Examples
///
/// ```
/// use plantilla::common::coords::column_letters;
///
/// assert_eq!(column_letters(1), "A");
/// assert_eq!(column_letters(18), "R");
/// assert_eq!(column_letters(52), "AZ");
/// assert_eq!(column_letters(702), "ZZ");
/// ```
pub fn column_letters(col: u32) -> String {
    let mut letters = String::new();
    let mut col = col;

    while col > 0 {
        col -= 1;
        let letter = ((col % 26) as u8 + b'A') as char;
        letters.insert(0, letter);
        col /= 26;
    }

    letters
}

/// A single cell, 1-based.
///
/// Ordering is row-major, so a `BTreeMap<CellRef, _>` iterates in the order a
/// worksheet's `<sheetData>` has to be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellRef {
    row: u32,
    col: u32,
}

impl CellRef {
    /// Create a cell reference from a 1-based row and column.
    #[inline]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// 1-based row.
    #[inline]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// 1-based column.
    #[inline]
    pub const fn col(&self) -> u32 {
        self.col
    }

    /// Render as A1 notation.
    pub fn to_a1(&self) -> String {
        let mut buf = itoa::Buffer::new();
        let mut out = column_letters(self.col);
        out.push_str(buf.format(self.row));
        out
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1())
    }
}

/// Inclusive rectangular range between two cells.
///
/// # Examples
///
/// ```
/// use plantilla::common::coords::{CellRange, CellRef};
///
/// let range = CellRange::new(CellRef::new(6, 7), CellRef::new(6, 11));
/// assert_eq!(range.to_a1(), "G6:K6");
/// assert_eq!(range.width(), 5);
///
/// let single = CellRange::single(CellRef::new(4, 18));
/// assert_eq!(single.to_a1(), "R4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellRange {
    start: CellRef,
    end: CellRef,
}

impl CellRange {
    /// Create a range from its top-left and bottom-right corners.
    #[inline]
    pub const fn new(start: CellRef, end: CellRef) -> Self {
        Self { start, end }
    }

    /// Range from 1-based corner coordinates.
    #[inline]
    pub const fn from_coords(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> Self {
        Self::new(
            CellRef::new(start_row, start_col),
            CellRef::new(end_row, end_col),
        )
    }

    /// Range covering exactly one cell.
    #[inline]
    pub const fn single(cell: CellRef) -> Self {
        Self::new(cell, cell)
    }

    /// Vertical run of rows `first..=last` in one column.
    #[inline]
    pub const fn column_span(col: u32, first_row: u32, last_row: u32) -> Self {
        Self::from_coords(first_row, col, last_row, col)
    }

    /// Horizontal run of columns `first..=last` in one row.
    #[inline]
    pub const fn row_span(row: u32, first_col: u32, last_col: u32) -> Self {
        Self::from_coords(row, first_col, row, last_col)
    }

    /// Top-left corner.
    #[inline]
    pub const fn start(&self) -> CellRef {
        self.start
    }

    /// Bottom-right corner.
    #[inline]
    pub const fn end(&self) -> CellRef {
        self.end
    }

    /// Whether the corners are ordered and lie inside a worksheet.
    pub fn is_valid(&self) -> bool {
        self.start.row >= 1
            && self.start.col >= 1
            && self.start.row <= self.end.row
            && self.start.col <= self.end.col
            && self.end.row <= MAX_ROWS
            && self.end.col <= MAX_COLUMNS
    }

    /// Number of columns covered.
    #[inline]
    pub fn width(&self) -> u32 {
        self.end.col - self.start.col + 1
    }

    /// Number of rows covered.
    #[inline]
    pub fn height(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    /// Whether the range covers a single cell.
    #[inline]
    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    /// Whether `cell` lies inside the range.
    pub fn contains(&self, cell: CellRef) -> bool {
        (self.start.row..=self.end.row).contains(&cell.row)
            && (self.start.col..=self.end.col).contains(&cell.col)
    }

    /// Whether the two ranges share at least one cell.
    pub fn intersects(&self, other: &CellRange) -> bool {
        self.start.row <= other.end.row
            && other.start.row <= self.end.row
            && self.start.col <= other.end.col
            && other.start.col <= self.end.col
    }

    /// Iterate every cell of the range in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellRef> + '_ {
        (self.start.row..=self.end.row)
            .flat_map(move |row| (self.start.col..=self.end.col).map(move |col| CellRef::new(row, col)))
    }

    /// Render as A1 notation; a single cell renders without a colon.
    pub fn to_a1(&self) -> String {
        if self.is_single() {
            self.start.to_a1()
        } else {
            format!("{}:{}", self.start.to_a1(), self.end.to_a1())
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1())
    }
}
