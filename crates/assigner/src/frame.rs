use alloc::{collections::BTreeMap, vec::Vec};

use assigner_layout::Variable;

use crate::{AssignerError, ir::ValueId};

/// Table cells bound to the IR values of the function being lowered.
///
/// Scalars map to one cell, vectors to an ordered list of cells. Bindings are never removed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StackFrame {
    scalars: BTreeMap<ValueId, Variable>,
    vectors: BTreeMap<ValueId, Vec<Variable>>,
}

impl StackFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind_scalar(&mut self, value: ValueId, cell: Variable) {
        log::trace!(target: "assigner", "bind {value} -> {cell}");
        self.scalars.insert(value, cell);
    }

    pub fn bind_vector(&mut self, value: ValueId, cells: Vec<Variable>) {
        log::trace!(target: "assigner", "bind {value} -> {} cells", cells.len());
        self.vectors.insert(value, cells);
    }

    pub fn scalar(&self, value: ValueId) -> Result<Variable, AssignerError> {
        self.scalars
            .get(&value)
            .copied()
            .ok_or(AssignerError::MissingOperandBinding { value })
    }

    pub fn vector(&self, value: ValueId) -> Result<&[Variable], AssignerError> {
        self.vectors
            .get(&value)
            .map(Vec::as_slice)
            .ok_or(AssignerError::MissingOperandBinding { value })
    }

    pub fn scalars(&self) -> &BTreeMap<ValueId, Variable> {
        &self.scalars
    }

    pub fn vectors(&self) -> &BTreeMap<ValueId, Vec<Variable>> {
        &self.vectors
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn bindings_are_kept_apart_by_kind() {
        let mut frame = StackFrame::new();
        let value = ValueId::from(0);
        frame.bind_vector(value, vec![Variable::witness(1, 0), Variable::witness(2, 0)]);

        assert_eq!(frame.vector(value).map(<[Variable]>::len), Ok(2));
        assert_eq!(frame.scalar(value), Err(AssignerError::MissingOperandBinding { value }));
    }
}
