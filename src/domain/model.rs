use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Side length of the grid and of every unit.
pub const GRID_SIZE: usize = 9;
/// Side length of one block.
pub const BLOCK_SIZE: usize = 3;
/// Cells in a full grid.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;
/// Rows + columns + blocks.
pub const UNIT_COUNT: usize = 3 * GRID_SIZE;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("input contains only {found} digits, {} required", CELL_COUNT)]
    InsufficientDigits { found: usize },
}

/// Failure detected within a single nine-cell unit.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitError {
    #[error("value {0} is outside 1-9")]
    OutOfRange(u8),

    #[error("digit {0} appears more than once")]
    Duplicate(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Row,
    Column,
    Block,
}

impl UnitKind {
    pub fn all() -> [UnitKind; 3] {
        [UnitKind::Row, UnitKind::Column, UnitKind::Block]
    }

    pub fn plural(&self) -> &'static str {
        match self {
            UnitKind::Row => "Rows",
            UnitKind::Column => "Columns",
            UnitKind::Block => "Blocks",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitKind::Row => write!(f, "row"),
            UnitKind::Column => write!(f, "column"),
            UnitKind::Block => write!(f, "block"),
        }
    }
}

/// Names one of the 27 units. The cell coordinates it covers are derived
/// from kind + index, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId {
    pub kind: UnitKind,
    pub index: usize,
}

impl UnitId {
    pub fn new(kind: UnitKind, index: usize) -> Self {
        debug_assert!(index < GRID_SIZE);
        Self { kind, index }
    }

    /// All 27 units in canonical order: rows 0-8, columns 0-8, blocks 0-8.
    pub fn all() -> impl Iterator<Item = UnitId> {
        UnitKind::all()
            .into_iter()
            .flat_map(|kind| (0..GRID_SIZE).map(move |index| UnitId::new(kind, index)))
    }

    /// The nine (row, column) coordinates this unit covers.
    pub fn cells(&self) -> [(usize, usize); GRID_SIZE] {
        let mut cells = [(0, 0); GRID_SIZE];
        match self.kind {
            UnitKind::Row => {
                for (col, cell) in cells.iter_mut().enumerate() {
                    *cell = (self.index, col);
                }
            }
            UnitKind::Column => {
                for (row, cell) in cells.iter_mut().enumerate() {
                    *cell = (row, self.index);
                }
            }
            UnitKind::Block => {
                let base_row = (self.index / BLOCK_SIZE) * BLOCK_SIZE;
                let base_col = (self.index % BLOCK_SIZE) * BLOCK_SIZE;
                for (i, cell) in cells.iter_mut().enumerate() {
                    *cell = (base_row + i / BLOCK_SIZE, base_col + i % BLOCK_SIZE);
                }
            }
        }
        cells
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.index)
    }
}

/// A fully populated 9x9 grid. Immutable once parsed; validation only
/// ever reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [[u8; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    /// Scans the input left to right, keeping bytes '1'-'9' and treating
    /// everything else as a separator, and fills the grid row-major.
    pub fn parse(input: &[u8]) -> Result<Self, ParseError> {
        let mut cells = [[0u8; GRID_SIZE]; GRID_SIZE];
        let mut filled = 0;

        for &byte in input {
            if filled == CELL_COUNT {
                break;
            }
            if matches!(byte, b'1'..=b'9') {
                cells[filled / GRID_SIZE][filled % GRID_SIZE] = byte - b'0';
                filled += 1;
            }
        }

        if filled < CELL_COUNT {
            return Err(ParseError::InsufficientDigits { found: filled });
        }

        Ok(Self { cells })
    }

    pub fn from_rows(cells: [[u8; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self { cells }
    }

    pub fn value(&self, row: usize, col: usize) -> u8 {
        self.cells[row][col]
    }

    /// The nine values of one unit, in that unit's scan order.
    pub fn unit_values(&self, unit: UnitId) -> [u8; GRID_SIZE] {
        let mut values = [0u8; GRID_SIZE];
        for (slot, (row, col)) in values.iter_mut().zip(unit.cells()) {
            *slot = self.cells[row][col];
        }
        values
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            write!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// Final determination for a full grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid { unit: UnitId, error: UnitError },
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Valid => write!(f, "Grid is valid"),
            Verdict::Invalid { unit, error } => write!(f, "Invalid {}: {}", unit, error),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitFailure {
    pub unit: UnitId,
    pub error: UnitError,
    pub message: String,
}

/// Serializable summary of one validation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub failure: Option<UnitFailure>,
    pub units_checked: usize,
    pub workers: usize,
    pub duration_ms: u64,
    pub completed_at: DateTime<Utc>,
}

/// Verdict plus report, handed from the validate stage to the report stage.
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    pub verdict: Verdict,
    pub report: ValidationReport,
}
