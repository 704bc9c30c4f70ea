use assigner_layout::{
    Allocation, ComponentManifest, ConstraintTable, Felt, Gate, Manifest, Variable, WitnessAmount,
};
use p3_field::{Field, PrimeCharacteristicRing};

use crate::{Component, ComponentError};

/// Number of witness columns the gadget occupies.
const WIDTH: usize = 5;

/// Operands of an equality flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EqualityInput {
    pub x: Variable,
    pub y: Variable,
}

/// Computes `x == y` (or `x != y`) as a boolean cell.
///
/// One row over five witness columns: `x`, `y`, `x - y`, the inverse of `x - y` (zero when
/// `x == y`), and the flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqualityFlag {
    witness: [usize; WIDTH],
    inequality: bool,
}

impl EqualityFlag {
    pub fn new(witness: [usize; WIDTH], inequality: bool) -> Self {
        Self { witness, inequality }
    }

    pub fn from_allocation(
        allocation: &Allocation,
        inequality: bool,
    ) -> Result<Self, ComponentError> {
        let witness = <[usize; WIDTH]>::try_from(allocation.witness_columns.as_slice()).map_err(
            |_| ComponentError::InvalidWitnessAmount {
                component: Self::NAME,
                witness_amount: allocation.witness_columns.len(),
            },
        )?;
        Ok(Self::new(witness, inequality))
    }

    pub fn is_inequality(&self) -> bool {
        self.inequality
    }

    fn flag_cell(&self, start_row: usize) -> Variable {
        Variable::witness(self.witness[4], start_row)
    }
}

impl ComponentManifest for EqualityFlag {
    const NAME: &'static str = "equality_flag";
    type Params = ();

    fn manifest() -> Manifest {
        Manifest::new(WitnessAmount::single(WIDTH), false)
    }

    fn rows_amount(_witness_amount: usize, _params: &()) -> usize {
        1
    }
}

impl Component for EqualityFlag {
    type Input = EqualityInput;
    type Output = Variable;

    fn generate_circuit(
        &self,
        table: &mut ConstraintTable,
        input: &EqualityInput,
        start_row: usize,
    ) -> Result<(), ComponentError> {
        let first = self.witness.iter().min().copied().unwrap_or_default();
        let last = self.witness.iter().max().copied().unwrap_or_default();
        table.add_gate(Gate {
            component: Self::NAME,
            rows: start_row..start_row + 1,
            columns: first..last + 1,
        });
        table.add_copy_constraint(input.x, Variable::witness(self.witness[0], start_row));
        table.add_copy_constraint(input.y, Variable::witness(self.witness[1], start_row));
        Ok(())
    }

    fn generate_assignments(
        &self,
        table: &mut ConstraintTable,
        input: &EqualityInput,
        start_row: usize,
    ) -> Result<Variable, ComponentError> {
        let x = table.value_of(input.x)?;
        let y = table.value_of(input.y)?;
        let diff = x - y;
        let inverse = diff.try_inverse().unwrap_or(Felt::ZERO);
        let equal = diff == Felt::ZERO;
        let flag = Felt::from_bool(equal != self.inequality);

        for (column, value) in self.witness.iter().zip([x, y, diff, inverse, flag]) {
            table.assign_witness(*column, start_row, value)?;
        }
        Ok(self.flag_cell(start_row))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::testing::{context, input};

    #[rstest]
    #[case(7, 7, false, 1)]
    #[case(7, 8, false, 0)]
    #[case(7, 7, true, 0)]
    #[case(0, 9, true, 1)]
    fn flag_matches_predicate(
        #[case] x: u64,
        #[case] y: u64,
        #[case] inequality: bool,
        #[case] expected: u64,
    ) {
        let mut ctx = context(15);
        let mut table = ctx.new_table();
        let input = EqualityInput { x: input(&mut table, x), y: input(&mut table, y) };

        let allocation = ctx.allocate::<EqualityFlag>(&mut table, &()).unwrap();
        let gadget = EqualityFlag::from_allocation(&allocation, inequality).unwrap();
        gadget.generate_circuit(&mut table, &input, allocation.start_row()).unwrap();
        let flag = gadget.generate_assignments(&mut table, &input, allocation.start_row()).unwrap();

        assert_eq!(table.value_of(flag), Ok(Felt::from_u64(expected)));
    }

    #[test]
    fn witness_row_holds_difference_and_inverse() {
        let mut ctx = context(15);
        let mut table = ctx.new_table();
        let input = EqualityInput { x: input(&mut table, 10), y: input(&mut table, 6) };

        let allocation = ctx.allocate::<EqualityFlag>(&mut table, &()).unwrap();
        let gadget = EqualityFlag::from_allocation(&allocation, false).unwrap();
        gadget.generate_assignments(&mut table, &input, 0).unwrap();

        let diff = table.value_of(Variable::witness(2, 0)).unwrap();
        let inverse = table.value_of(Variable::witness(3, 0)).unwrap();
        assert_eq!(diff, Felt::from_u64(4));
        assert_eq!(diff * inverse, Felt::ONE);
    }

    #[test]
    fn inputs_are_copy_constrained_into_the_row() {
        let mut ctx = context(15);
        let mut table = ctx.new_table();
        let input = EqualityInput { x: input(&mut table, 1), y: input(&mut table, 2) };

        let allocation = ctx.allocate::<EqualityFlag>(&mut table, &()).unwrap();
        let gadget = EqualityFlag::from_allocation(&allocation, false).unwrap();
        gadget.generate_circuit(&mut table, &input, 0).unwrap();

        assert_eq!(table.gates().len(), 1);
        assert_eq!(table.gates()[0].columns, 0..5);
        assert_eq!(table.copy_constraints()[0].rhs, Variable::witness(0, 0));
        assert_eq!(table.copy_constraints()[1].rhs, Variable::witness(1, 0));
    }

    #[test]
    fn narrow_tables_cannot_host_the_gadget() {
        let mut ctx = context(4);
        let mut table = ctx.new_table();
        assert!(ctx.allocate::<EqualityFlag>(&mut table, &()).is_err());
    }
}
