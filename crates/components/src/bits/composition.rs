use alloc::vec::Vec;

use assigner_layout::{Allocation, ComponentManifest, ConstraintTable, Felt, Manifest, Variable};
use p3_field::PrimeCharacteristicRing;
use smallvec::SmallVec;

use super::{BitGrid, MIN_WIDTH, rows_amount, witness_amount};
use crate::{BitOrder, Component, ComponentError};

/// Packs `bits` bit cells into one value.
///
/// The input cells are copied into the bit columns, and the constant column carries the one
/// used by the booleanity constraint. With `check_input` set, inputs are verified to be boolean
/// before anything is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitComposition {
    witness: SmallVec<[usize; 16]>,
    constant: usize,
    bits: usize,
    check_input: bool,
    mode: BitOrder,
}

impl BitComposition {
    pub fn from_allocation(
        allocation: &Allocation,
        bits: usize,
        check_input: bool,
        mode: BitOrder,
    ) -> Result<Self, ComponentError> {
        if allocation.witness_columns.len() < MIN_WIDTH {
            return Err(ComponentError::InvalidWitnessAmount {
                component: Self::NAME,
                witness_amount: allocation.witness_columns.len(),
            });
        }
        let constant = *allocation
            .constants
            .first()
            .ok_or(ComponentError::MissingConstant { component: Self::NAME })?;
        Ok(Self {
            witness: allocation.witness_columns.iter().copied().collect(),
            constant,
            bits,
            check_input,
            mode,
        })
    }

    pub fn bits(&self) -> usize {
        self.bits
    }

    fn grid(&self, start_row: usize) -> BitGrid<'_> {
        BitGrid::new(&self.witness, self.bits, start_row)
    }

    fn check_length(&self, input: &[Variable]) -> Result<(), ComponentError> {
        if input.len() != self.bits {
            return Err(ComponentError::InvalidInputLength {
                component: Self::NAME,
                expected: self.bits,
                actual: input.len(),
            });
        }
        Ok(())
    }

    /// Input cells reordered most significant first.
    fn msb_first<'a>(&self, input: &'a [Variable]) -> Vec<&'a Variable> {
        match self.mode {
            BitOrder::Msb => input.iter().collect(),
            BitOrder::Lsb => input.iter().rev().collect(),
        }
    }
}

impl ComponentManifest for BitComposition {
    const NAME: &'static str = "bit_composition";
    /// Number of bits.
    type Params = usize;

    fn manifest() -> Manifest {
        Manifest::new(witness_amount(), true)
    }

    fn rows_amount(witness_amount: usize, bits: &usize) -> usize {
        rows_amount(witness_amount, *bits)
    }
}

impl Component for BitComposition {
    type Input = Vec<Variable>;
    type Output = Variable;

    fn generate_circuit(
        &self,
        table: &mut ConstraintTable,
        input: &Vec<Variable>,
        start_row: usize,
    ) -> Result<(), ComponentError> {
        self.check_length(input)?;
        let grid = self.grid(start_row);
        grid.record_gate(table, Self::NAME);
        for (index, bit) in self.msb_first(input).into_iter().enumerate() {
            table.add_copy_constraint(*bit, grid.bit_cell(index));
        }
        Ok(())
    }

    fn generate_assignments(
        &self,
        table: &mut ConstraintTable,
        input: &Vec<Variable>,
        start_row: usize,
    ) -> Result<Variable, ComponentError> {
        self.check_length(input)?;

        let mut bits = Vec::with_capacity(self.bits);
        for cell in self.msb_first(input) {
            let value = table.value_of(*cell)?;
            if self.check_input && value != Felt::ZERO && value != Felt::ONE {
                return Err(ComponentError::NonBooleanInput(*cell));
            }
            bits.push(value);
        }

        let grid = self.grid(start_row);
        grid.assign(table, &bits)?;
        table.assign_constant(self.constant, start_row, Felt::ONE)?;
        log::trace!(
            target: "components",
            "composed {} bits into {} over {} rows from row {start_row}",
            self.bits,
            grid.result_cell(),
            grid.rows()
        );
        Ok(grid.result_cell())
    }
}
