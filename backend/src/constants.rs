//! Game constants.
//!
//! - Grid size: [`GRID_SIZE`] = 182 cells
//! - Value range: [`VALUE_MIN`]..[`VALUE_MAX`] (half-open, 899 candidates)
//! - Cell labels: `"grid-1"`..`"grid-182"` ([`cell_label`])

/// Number of cells in one grid.
pub const GRID_SIZE: usize = 182;

/// Smallest value a cell can hold (inclusive).
pub const VALUE_MIN: u32 = 100;

/// Upper bound on cell values (exclusive).
pub const VALUE_MAX: u32 = 999;

/// Number of distinct candidate values: 999 - 100 = 899.
pub const VALUE_SPAN: usize = (VALUE_MAX - VALUE_MIN) as usize;

/// Prefix shared by every cell label.
pub const LABEL_PREFIX: &str = "grid-";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 9000;

/// Default SQLite database file, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "data/gridguess.sqlite3";

/// Database path value that selects an in-memory SQLite database.
pub const IN_MEMORY_DB_PATH: &str = ":memory:";

/// Default pause before `/restart` answers, in milliseconds.
pub const DEFAULT_RESTART_DELAY_MS: u64 = 2000;

// The draw without replacement needs at least GRID_SIZE candidates.
const _: () = assert!(VALUE_SPAN >= GRID_SIZE);

/// Label of the 1-based cell `index`.
#[inline]
pub fn cell_label(index: usize) -> String {
    format!("{LABEL_PREFIX}{index}")
}

/// Parse a cell label back into its 1-based index.
///
/// Returns `None` for anything outside `"grid-1"`..`"grid-182"`.
pub fn label_index(label: &str) -> Option<usize> {
    let idx: usize = label.strip_prefix(LABEL_PREFIX)?.parse().ok()?;
    (1..=GRID_SIZE).contains(&idx).then_some(idx)
}
