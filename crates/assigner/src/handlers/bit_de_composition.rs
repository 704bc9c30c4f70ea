use alloc::{string::ToString, vec::Vec};

use assigner_components::{BitComposition, BitDecomposition, BitOrder};
use assigner_layout::{Felt, Variable};
use p3_field::PrimeCharacteristicRing;

use super::{Lowering, emit, operands, result};
use crate::{
    AssignerError,
    ir::{Instruction, Type},
};

/// Width of the value produced by [`handle_integer_bit_composition128`].
const COMPOSITION_BITS: usize = 128;

/// Reads the bit order selected by the `msb_first` operand.
fn bit_order(lowering: &Lowering<'_>, cell: Variable) -> Result<BitOrder, AssignerError> {
    let msb_first = lowering.table.value_of(cell)? != Felt::ZERO;
    Ok(BitOrder::from_msb_flag(msb_first))
}

/// Lowers `bit_decompose(value, msb_first)`.
///
/// The number of bits is the integer width of `value`. The result is bound as a vector of bit
/// cells in the order selected by `msb_first`.
pub fn handle_integer_bit_decomposition(
    lowering: &mut Lowering<'_>,
    inst: &Instruction,
) -> Result<(), AssignerError> {
    let [value, msb_first] = operands::<2>(inst)?;
    let result = result(inst)?;

    let bits = match lowering.type_of(value)? {
        Type::Int { bits } => bits as usize,
        Type::Vector { .. } => {
            return Err(AssignerError::InvalidOperand {
                opcode: inst.opcode.to_string(),
                index: 0,
                reason: "expected an integer",
            });
        },
    };
    let input = lowering.frame.scalar(value)?;
    let mode = bit_order(lowering, lowering.frame.scalar(msb_first)?)?;

    let allocation = lowering.allocation.allocate::<BitDecomposition>(lowering.table, &bits)?;
    let gadget = BitDecomposition::from_allocation(&allocation, bits, mode)?;
    let cells = emit(&gadget, lowering.table, &input, allocation.start_row())?;

    log::debug!(
        target: "assigner",
        "{result} = bit_decompose {value} into {bits} bits ({mode}) at rows {}..{}",
        allocation.start_row(),
        allocation.start_row() + allocation.rows
    );
    lowering.frame.bind_vector(result, cells);
    Ok(())
}

/// Lowers `bit_compose128(low, high, msb_first)`.
///
/// The two operand vectors are concatenated, `low` first, and composed as 128 bits with every
/// input checked to be boolean. The result is bound as a scalar.
pub fn handle_integer_bit_composition128(
    lowering: &mut Lowering<'_>,
    inst: &Instruction,
) -> Result<(), AssignerError> {
    let [low, high, msb_first] = operands::<3>(inst)?;
    let result = result(inst)?;

    for (index, value) in [low, high].into_iter().enumerate() {
        if lowering.type_of(value)?.is_scalar() {
            return Err(AssignerError::InvalidOperand {
                opcode: inst.opcode.to_string(),
                index,
                reason: "expected a vector of bits",
            });
        }
    }
    let bits: Vec<Variable> = lowering
        .frame
        .vector(low)?
        .iter()
        .chain(lowering.frame.vector(high)?)
        .copied()
        .collect();
    let mode = bit_order(lowering, lowering.frame.scalar(msb_first)?)?;

    let allocation =
        lowering.allocation.allocate::<BitComposition>(lowering.table, &COMPOSITION_BITS)?;
    let gadget = BitComposition::from_allocation(&allocation, COMPOSITION_BITS, true, mode)?;
    let cell = emit(&gadget, lowering.table, &bits, allocation.start_row())?;

    log::debug!(
        target: "assigner",
        "{result} = bit_compose128 {low}, {high} ({mode}) at rows {}..{}",
        allocation.start_row(),
        allocation.start_row() + allocation.rows
    );
    lowering.frame.bind_scalar(result, cell);
    Ok(())
}
