use core::fmt;

use crate::table::{Column, Region, Variable};

/// A bounded table resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Rows,
    WitnessColumns,
    ConstantColumns,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rows => f.write_str("rows"),
            Self::WitnessColumns => f.write_str("witness columns"),
            Self::ConstantColumns => f.write_str("constant columns"),
        }
    }
}

/// Errors raised while choosing or reserving a placement, or while touching table cells.
///
/// None of these are recoverable: they indicate either a configuration mismatch between the
/// circuit limits and a component, or a lowering bug.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("manifest of component '{component}' is unsatisfiable under the global restriction")]
    UnsatisfiableManifest { component: &'static str },
    #[error("placement needs {requested} {resource}, but the limit is {limit}")]
    AllocationOverflow {
        resource: Resource,
        requested: usize,
        limit: usize,
    },
    #[error("region {region} overlaps reserved region {existing}")]
    RegionOverlap { region: Region, existing: Region },
    #[error("constant column {index} was already handed out (next free column is {next})")]
    ConstantReuse { index: usize, next: usize },
    #[error("witness amount {witness_amount} is not a variant of component '{component}'")]
    InvalidPlacement {
        component: &'static str,
        witness_amount: usize,
    },
    #[error("cell {0} is already assigned")]
    CellOccupied(Variable),
    #[error("cell {0} lies outside every reserved region")]
    UnreservedCell(Variable),
    #[error("cell {0} has no assigned value")]
    UnassignedCell(Variable),
    #[error("column {0} does not exist in this arithmetization")]
    ColumnOutOfBounds(Column),
}
