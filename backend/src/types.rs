use serde::Serialize;

use crate::constants::label_index;

/// One labeled grid cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub label: String,
    pub value: u32,
}

/// The labeled cells shown to the player, in generation order.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Grid {
    cells: Vec<Cell>,
}

impl Grid {
    pub fn from_cells(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in generation order (permuted labels zipped with permuted values).
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn values(&self) -> impl Iterator<Item = u32> + '_ {
        self.cells.iter().map(|c| c.value)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.cells.iter().map(|c| c.label.as_str())
    }

    pub fn contains_value(&self, value: u32) -> bool {
        self.cells.iter().any(|c| c.value == value)
    }

    /// Cells sorted by label index (`grid-1` first). Labels that do not parse
    /// sort last, keeping their relative order.
    pub fn in_label_order(&self) -> Vec<&Cell> {
        let mut sorted: Vec<&Cell> = self.cells.iter().collect();
        sorted.sort_by_key(|c| label_index(&c.label).unwrap_or(usize::MAX));
        sorted
    }
}

/// One generated round: the grid plus the number the player must find.
#[derive(Clone, Debug, Serialize)]
pub struct Round {
    pub grid: Grid,
    pub secret: u32,
}

/// Result of checking a guess against the stored secret.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GuessOutcome {
    Correct,
    Incorrect,
}

impl GuessOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            GuessOutcome::Correct => "correct",
            GuessOutcome::Incorrect => "incorrect",
        }
    }
}

/// What `save` does with records left over from unverified rounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RetentionPolicy {
    /// Insert alongside older unread records; `read` returns the newest.
    #[default]
    Accumulate,
    /// Delete older records before inserting, keeping at most one.
    Replace,
}

impl RetentionPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "accumulate" => Some(Self::Accumulate),
            "replace" => Some(Self::Replace),
            _ => None,
        }
    }
}
