use core::fmt;

/// A column of the constraint table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Column {
    Witness(usize),
    Constant(usize),
    PublicInput(usize),
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Witness(index) => write!(f, "w{index}"),
            Self::Constant(index) => write!(f, "c{index}"),
            Self::PublicInput(index) => write!(f, "p{index}"),
        }
    }
}

/// A single cell of the table, the unit the IR values are bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variable {
    pub column: Column,
    pub row: usize,
}

impl Variable {
    pub const fn witness(column: usize, row: usize) -> Self {
        Self { column: Column::Witness(column), row }
    }

    pub const fn constant(column: usize, row: usize) -> Self {
        Self { column: Column::Constant(column), row }
    }

    pub const fn public_input(column: usize, row: usize) -> Self {
        Self { column: Column::PublicInput(column), row }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.column, self.row)
    }
}
