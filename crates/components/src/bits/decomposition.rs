use alloc::vec::Vec;

use assigner_layout::{Allocation, ComponentManifest, ConstraintTable, Felt, Manifest, Variable};
use p3_field::{PrimeCharacteristicRing, PrimeField64};
use smallvec::SmallVec;

use super::{BitGrid, MIN_WIDTH, rows_amount, witness_amount};
use crate::{BitOrder, Component, ComponentError};

/// Splits a value into `bits` boolean cells.
///
/// The last accumulator cell is copy-constrained to the input, so the bit cells are bound to
/// the decomposed value. The output lists the bit cells in the requested [`BitOrder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitDecomposition {
    witness: SmallVec<[usize; 16]>,
    bits: usize,
    mode: BitOrder,
}

impl BitDecomposition {
    pub fn from_allocation(
        allocation: &Allocation,
        bits: usize,
        mode: BitOrder,
    ) -> Result<Self, ComponentError> {
        if allocation.witness_columns.len() < MIN_WIDTH {
            return Err(ComponentError::InvalidWitnessAmount {
                component: Self::NAME,
                witness_amount: allocation.witness_columns.len(),
            });
        }
        Ok(Self {
            witness: allocation.witness_columns.iter().copied().collect(),
            bits,
            mode,
        })
    }

    pub fn bits(&self) -> usize {
        self.bits
    }

    pub fn mode(&self) -> BitOrder {
        self.mode
    }

    fn grid(&self, start_row: usize) -> BitGrid<'_> {
        BitGrid::new(&self.witness, self.bits, start_row)
    }

    /// Bits of `value`, most significant first.
    fn split(&self, value: u64) -> Result<Vec<Felt>, ComponentError> {
        if self.bits < u64::BITS as usize && value >> self.bits != 0 {
            return Err(ComponentError::ValueOutOfRange { value, bits: self.bits });
        }
        Ok((0..self.bits)
            .rev()
            .map(|i| Felt::from_bool(i < u64::BITS as usize && (value >> i) & 1 == 1))
            .collect())
    }
}

impl ComponentManifest for BitDecomposition {
    const NAME: &'static str = "bit_decomposition";
    /// Number of bits.
    type Params = usize;

    fn manifest() -> Manifest {
        Manifest::new(witness_amount(), false)
    }

    fn rows_amount(witness_amount: usize, bits: &usize) -> usize {
        rows_amount(witness_amount, *bits)
    }
}

impl Component for BitDecomposition {
    type Input = Variable;
    type Output = Vec<Variable>;

    fn generate_circuit(
        &self,
        table: &mut ConstraintTable,
        input: &Variable,
        start_row: usize,
    ) -> Result<(), ComponentError> {
        let grid = self.grid(start_row);
        grid.record_gate(table, Self::NAME);
        table.add_copy_constraint(*input, grid.result_cell());
        Ok(())
    }

    fn generate_assignments(
        &self,
        table: &mut ConstraintTable,
        input: &Variable,
        start_row: usize,
    ) -> Result<Vec<Variable>, ComponentError> {
        let value = table.value_of(*input)?.as_canonical_u64();
        let bits = self.split(value)?;

        let grid = self.grid(start_row);
        grid.assign(table, &bits)?;
        log::trace!(
            target: "components",
            "decomposed {value} into {} bits over {} rows from row {start_row}",
            self.bits,
            grid.rows()
        );

        let msb_first = (0..self.bits).map(|index| grid.bit_cell(index));
        Ok(match self.mode {
            BitOrder::Msb => msb_first.collect(),
            BitOrder::Lsb => msb_first.rev().collect(),
        })
    }
}
