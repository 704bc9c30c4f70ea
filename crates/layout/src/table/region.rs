use core::{fmt, ops::Range};

/// A rectangle of witness cells reserved by one component instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Witness columns covered by the region.
    pub columns: Range<usize>,
    /// Rows covered by the region.
    pub rows: Range<usize>,
}

impl Region {
    pub fn new(columns: Range<usize>, rows: Range<usize>) -> Self {
        Self { columns, rows }
    }

    /// Map a region-local `(column, row)` to the absolute witness cell, if inside the region.
    pub fn cell(&self, local_column: usize, local_row: usize) -> Option<(usize, usize)> {
        (local_column < self.columns.len() && local_row < self.rows.len())
            .then(|| (self.columns.start + local_column, self.rows.start + local_row))
    }

    pub fn contains(&self, column: usize, row: usize) -> bool {
        self.columns.contains(&column) && self.rows.contains(&row)
    }

    /// Returns true if both regions cover at least one common cell.
    pub fn overlaps(&self, other: &Region) -> bool {
        self.shares_columns(&other.columns)
            && self.rows.start < other.rows.end
            && other.rows.start < self.rows.end
    }

    /// Returns true if the region covers any of `columns`.
    pub fn shares_columns(&self, columns: &Range<usize>) -> bool {
        self.columns.start < columns.end && columns.start < self.columns.end
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.rows.is_empty()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "w[{}..{}] x rows[{}..{}]",
            self.columns.start, self.columns.end, self.rows.start, self.rows.end
        )
    }
}

/// Whether a placement may start on rows that already hold other components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSharing {
    /// Rows with free columns may be reused by placing the component next to existing ones.
    Packed,
    /// The component starts below everything placed so far.
    Isolated,
}

/// The earliest collision-free position for a component of a given width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeSlot {
    pub row: usize,
    pub witness_idx: usize,
    /// Constant columns the component would receive.
    pub constants: Range<usize>,
}
