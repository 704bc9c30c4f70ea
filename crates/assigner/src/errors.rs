use alloc::string::String;

use assigner_components::ComponentError;
use assigner_layout::LayoutError;

use crate::{
    ir::{Type, ValueId},
    utils::indexing::IndexedVecError,
};

/// Errors raised while building or lowering a function.
///
/// Any error aborts the lowering of the current function; the table may then hold a partial
/// circuit and must be discarded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssignerError {
    #[error("operation '{opcode}' has no lowering")]
    UnsupportedOperation { opcode: String },
    #[error("value {value} has no binding in the current stack frame")]
    MissingOperandBinding { value: ValueId },
    #[error("operand {index} of '{opcode}' is invalid: {reason}")]
    InvalidOperand {
        opcode: String,
        index: usize,
        reason: &'static str,
    },
    #[error("'{opcode}' expects {expected} operands, got {actual}")]
    OperandCount {
        opcode: String,
        expected: usize,
        actual: usize,
    },
    #[error("argument {index} does not match parameter type {expected}")]
    ArgumentMismatch { index: usize, expected: Type },
    #[error("function '{function}' takes {expected} arguments, got {actual}")]
    ArgumentCount {
        function: String,
        expected: usize,
        actual: usize,
    },
    #[error("'{opcode}' has no result value")]
    MissingResult { opcode: String },
    #[error("value {0} is not defined in this function")]
    UnknownValue(ValueId),
    #[error(transparent)]
    Arena(#[from] IndexedVecError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Component(#[from] ComponentError),
}
