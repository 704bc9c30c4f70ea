use assigner_layout::{LayoutError, Variable};

/// Errors raised while emitting a gadget's constraints or witnesses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComponentError {
    #[error("component '{component}' expects {expected} inputs, got {actual}")]
    InvalidInputLength {
        component: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("component '{component}' cannot be laid out over {witness_amount} witness columns")]
    InvalidWitnessAmount {
        component: &'static str,
        witness_amount: usize,
    },
    #[error("component '{component}' was allocated without a constant column")]
    MissingConstant { component: &'static str },
    #[error("value {value} does not fit in {bits} bits")]
    ValueOutOfRange { value: u64, bits: usize },
    #[error("input cell {0} holds a non-boolean value")]
    NonBooleanInput(Variable),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}
