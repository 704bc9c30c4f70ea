//! Bit decomposition and composition.
//!
//! Both gadgets share one layout over `w >= 3` witness columns: column zero carries a running
//! accumulator, the remaining `w - 1` columns carry bits, most significant first, row by row.
//! The bit vector is left-padded with zeros to fill whole rows, and after the last row the
//! accumulator equals the packed value.

mod composition;
mod decomposition;

use alloc::vec::Vec;

use assigner_layout::{ConstraintTable, Felt, Gate, LayoutError, Variable, WitnessAmount};
use p3_field::PrimeCharacteristicRing;

pub use self::{composition::BitComposition, decomposition::BitDecomposition};

/// Smallest layout: an accumulator plus two bits per row.
const MIN_WIDTH: usize = 3;

fn witness_amount() -> WitnessAmount {
    WitnessAmount::AtLeast(MIN_WIDTH)
}

/// Rows needed for `bits` bits; a zero-bit value still takes one all-zero row.
fn rows_amount(witness_amount: usize, bits: usize) -> usize {
    bits.div_ceil(witness_amount.saturating_sub(1).max(1)).max(1)
}

// BIT GRID
// ================================================================================================

/// Cell mapping of the accumulator layout for one placed gadget.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BitGrid<'a> {
    witness: &'a [usize],
    bits: usize,
    start_row: usize,
}

impl<'a> BitGrid<'a> {
    fn new(witness: &'a [usize], bits: usize, start_row: usize) -> Self {
        Self { witness, bits, start_row }
    }

    fn bits_per_row(&self) -> usize {
        self.witness.len() - 1
    }

    fn rows(&self) -> usize {
        rows_amount(self.witness.len(), self.bits)
    }

    fn padding(&self) -> usize {
        self.rows() * self.bits_per_row() - self.bits
    }

    /// Cell holding bit `index`, counted from the most significant bit.
    fn bit_cell(&self, index: usize) -> Variable {
        let slot = self.padding() + index;
        let row = slot / self.bits_per_row();
        let column = self.witness[1 + slot % self.bits_per_row()];
        Variable::witness(column, self.start_row + row)
    }

    fn accumulator_cell(&self, row: usize) -> Variable {
        Variable::witness(self.witness[0], self.start_row + row)
    }

    /// The accumulator cell of the last row, which holds the packed value.
    fn result_cell(&self) -> Variable {
        self.accumulator_cell(self.rows() - 1)
    }

    fn record_gate(&self, table: &mut ConstraintTable, component: &'static str) {
        let first = self.witness.iter().min().copied().unwrap_or_default();
        let last = self.witness.iter().max().copied().unwrap_or_default();
        table.add_gate(Gate {
            component,
            rows: self.start_row..self.start_row + self.rows(),
            columns: first..last + 1,
        });
    }

    /// Writes `bits` (most significant first, without padding) and the running accumulator.
    fn assign(&self, table: &mut ConstraintTable, bits: &[Felt]) -> Result<(), LayoutError> {
        let padded: Vec<Felt> =
            core::iter::repeat_n(Felt::ZERO, self.padding()).chain(bits.iter().copied()).collect();

        let mut accumulator = Felt::ZERO;
        for (row, chunk) in padded.chunks(self.bits_per_row()).enumerate() {
            for (offset, bit) in chunk.iter().enumerate() {
                table.assign_witness(self.witness[1 + offset], self.start_row + row, *bit)?;
                accumulator = accumulator.double() + *bit;
            }
            table.assign_witness(self.witness[0], self.start_row + row, accumulator)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_pads_at_the_front() {
        let witness = [4, 5, 6, 7];
        let grid = BitGrid::new(&witness, 7, 10);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.padding(), 2);
        assert_eq!(grid.bit_cell(0), Variable::witness(7, 10));
        assert_eq!(grid.bit_cell(1), Variable::witness(5, 11));
        assert_eq!(grid.bit_cell(6), Variable::witness(7, 12));
        assert_eq!(grid.result_cell(), Variable::witness(4, 12));
    }

    #[test]
    fn row_cost_shrinks_with_width() {
        assert_eq!(rows_amount(3, 64), 32);
        assert_eq!(rows_amount(5, 64), 16);
        assert_eq!(rows_amount(15, 128), 10);
        assert_eq!(rows_amount(15, 1), 1);
    }
}
