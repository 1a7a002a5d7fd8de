/// Column positions of a wide time-series export.
///
/// The default matches the Johns Hopkins CSSE global files:
/// `Province/State, Country/Region, Lat, Long, 1/22/20, 1/23/20, ...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesLayout {
    /// Zero-based column holding the country label.
    pub label_column: usize,
    /// Zero-based column of the first reporting date. Every later column is a date.
    pub first_date_column: usize,
}

impl SeriesLayout {
    pub const DEFAULT_LABEL_COLUMN: usize = 1;
    pub const DEFAULT_FIRST_DATE_COLUMN: usize = 4;

    pub fn new(label_column: usize, first_date_column: usize) -> Self {
        Self {
            label_column,
            first_date_column,
        }
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.label_column < self.first_date_column
    }
}

impl Default for SeriesLayout {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LABEL_COLUMN, Self::DEFAULT_FIRST_DATE_COLUMN)
    }
}
