//! Lowering of individual IR operations to placed gadgets.
//!
//! Each handler follows the same protocol: read the operand cells from the stack frame,
//! allocate the gadget through the [`AllocationContext`], emit its circuit and assignments at
//! the allocated start row, and bind the output cells to the instruction result.

mod bit_de_composition;
mod comparison;

use alloc::string::ToString;

use assigner_components::Component;
use assigner_layout::{AllocationContext, ConstraintTable};

pub use self::{
    bit_de_composition::{handle_integer_bit_composition128, handle_integer_bit_decomposition},
    comparison::handle_comparison,
};
use crate::{
    AssignerError, StackFrame,
    ir::{Function, Instruction, Type, ValueId},
};

/// Mutable state a handler works on.
pub struct Lowering<'a> {
    pub allocation: &'a mut AllocationContext,
    pub table: &'a mut ConstraintTable,
    pub frame: &'a mut StackFrame,
    pub function: &'a Function,
}

impl Lowering<'_> {
    pub(crate) fn type_of(&self, value: ValueId) -> Result<Type, AssignerError> {
        self.function
            .value(value)
            .map(|data| data.ty)
            .ok_or(AssignerError::UnknownValue(value))
    }
}

/// Emits `gadget` at `start_row`: constraints first, then the witness.
pub(crate) fn emit<C: Component>(
    gadget: &C,
    table: &mut ConstraintTable,
    input: &C::Input,
    start_row: usize,
) -> Result<C::Output, AssignerError> {
    gadget.generate_circuit(table, input, start_row)?;
    Ok(gadget.generate_assignments(table, input, start_row)?)
}

/// Returns the operands of `inst`, checking there are exactly `N` of them.
pub(crate) fn operands<const N: usize>(inst: &Instruction) -> Result<[ValueId; N], AssignerError> {
    <[ValueId; N]>::try_from(inst.operands.as_slice()).map_err(|_| AssignerError::OperandCount {
        opcode: inst.opcode.to_string(),
        expected: N,
        actual: inst.operands.len(),
    })
}

/// The result value of `inst`, which every lowered operation produces.
pub(crate) fn result(inst: &Instruction) -> Result<ValueId, AssignerError> {
    inst.result
        .ok_or_else(|| AssignerError::MissingResult { opcode: inst.opcode.to_string() })
}
