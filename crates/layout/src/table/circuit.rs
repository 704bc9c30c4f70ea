use alloc::vec::Vec;
use core::ops::Range;

use super::Variable;

/// A gate instance emitted by a component.
///
/// Gate polynomials belong to the component library; the table only records where each gate
/// applies so the final circuit can enable the matching selector on those rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gate {
    pub component: &'static str,
    pub rows: Range<usize>,
    pub columns: Range<usize>,
}

/// An equality constraint between two cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyConstraint {
    pub lhs: Variable,
    pub rhs: Variable,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct Circuit {
    pub gates: Vec<Gate>,
    pub copy_constraints: Vec<CopyConstraint>,
}
