use alloc::string::ToString;

use assigner_components::{EqualityFlag, EqualityInput};
use assigner_layout::{ComponentManifest, FlexibleParameters, Variable};

use super::{Lowering, emit};
use crate::{
    AssignerError, ComparisonLayout,
    ir::{Opcode, Predicate},
};

/// Witness columns used by [`ComparisonLayout::Fixed`].
const FIXED_WITNESS: [usize; 5] = [0, 1, 2, 3, 4];

/// Lowers `x <predicate> y` to an equality flag and returns the flag cell.
///
/// Only `eq` and `ne` have a lowering; every other predicate is rejected before anything is
/// placed.
///
/// With [`ComparisonLayout::Fixed`] the caller does not choose the start row: the flag always
/// goes on the table's first row below every reserved region, in witness columns `0..5`.
pub fn handle_comparison(
    lowering: &mut Lowering<'_>,
    predicate: Predicate,
    x: Variable,
    y: Variable,
    layout: ComparisonLayout,
) -> Result<Variable, AssignerError> {
    let inequality = match predicate {
        Predicate::Eq => false,
        Predicate::Ne => true,
        other => {
            return Err(AssignerError::UnsupportedOperation {
                opcode: Opcode::ICmp(other).to_string(),
            });
        },
    };
    let input = EqualityInput { x, y };

    let (gadget, start_row) = match layout {
        ComparisonLayout::Fixed => {
            // one row below everything placed so far, reserved so later placements avoid it
            let start_row = lowering.table.rows_used();
            let parameters = FlexibleParameters {
                witness_amount: FIXED_WITNESS.len(),
                start_row,
                start_witness_idx: 0,
                start_constant_idx: lowering.table.constants_used(),
            };
            let rows = EqualityFlag::rows_amount(FIXED_WITNESS.len(), &());
            lowering.table.reserve(&parameters, rows, 0)?;
            (EqualityFlag::new(FIXED_WITNESS, inequality), start_row)
        },
        ComparisonLayout::Managed => {
            let allocation = lowering.allocation.allocate::<EqualityFlag>(lowering.table, &())?;
            (EqualityFlag::from_allocation(&allocation, inequality)?, allocation.start_row())
        },
    };

    log::debug!(target: "assigner", "icmp {predicate} lowered at row {start_row} ({layout:?})");
    emit(&gadget, lowering.table, &input, start_row)
}
