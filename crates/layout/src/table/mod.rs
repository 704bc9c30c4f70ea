//! The shared constraint table: circuit gates, copy constraints and the cell assignment.
//!
//! Occupancy is tracked as a list of reserved witness [`Region`]s. Regions never intersect, and
//! cells may only be written inside a region, once. Everything a placement policy needs to know
//! about occupancy is answered by [`ConstraintTable::first_free_row`].
//!
//! Packing works with "lanes": the first component of a given width opens a band of witness
//! columns to the right of the previous bands, and later components of the same width stack
//! below it. Components of different widths therefore share rows but not columns. When the
//! columns run out, new widths fall back to column zero and stack below whatever already
//! occupies those columns.

mod assignment;
mod circuit;
mod region;
mod variable;

use alloc::{collections::BTreeMap, vec::Vec};

use self::assignment::Assignment;
pub use self::{
    circuit::{CopyConstraint, Gate},
    region::{FreeSlot, Region, RowSharing},
    variable::{Column, Variable},
};
use self::circuit::Circuit;
use crate::{
    ArithmetizationParams, Felt, FlexibleParameters, GlobalRestriction, LayoutError,
    errors::Resource,
};

// CONSTRAINT TABLE
// ================================================================================================

#[derive(Debug, Clone)]
pub struct ConstraintTable {
    restriction: GlobalRestriction,
    regions: Vec<Region>,
    /// Witness amount -> first witness column of its lane.
    lanes: BTreeMap<usize, usize>,
    next_lane_column: usize,
    next_constant_column: usize,
    rows_used: usize,
    circuit: Circuit,
    assignment: Assignment,
}

/// Constructors
impl ConstraintTable {
    pub fn new(params: &ArithmetizationParams, restriction: GlobalRestriction) -> Self {
        Self {
            restriction,
            regions: Vec::new(),
            lanes: BTreeMap::new(),
            next_lane_column: 0,
            next_constant_column: 0,
            rows_used: 0,
            circuit: Circuit::default(),
            assignment: Assignment::new(
                restriction.max_witness_columns,
                restriction.max_constant_columns,
                params.public_input_columns,
            ),
        }
    }
}

/// Occupancy
impl ConstraintTable {
    /// Returns the earliest position where a component of `witness_amount` columns can start
    /// without touching any reserved cell.
    ///
    /// Packing is honored only when both the caller asks for it and the global restriction
    /// allows it. The query does not reserve anything.
    pub fn first_free_row(
        &self,
        witness_amount: usize,
        constant_amount: usize,
        sharing: RowSharing,
    ) -> FreeSlot {
        let constants = self.next_constant_column..self.next_constant_column + constant_amount;

        if sharing == RowSharing::Isolated || !self.restriction.packing_enabled {
            return FreeSlot { row: self.rows_used, witness_idx: 0, constants };
        }

        let witness_idx = self.lane_column(witness_amount);
        let columns = witness_idx..witness_idx + witness_amount;
        let row = self
            .regions
            .iter()
            .filter(|region| region.shares_columns(&columns))
            .map(|region| region.rows.end)
            .max()
            .unwrap_or(0);

        FreeSlot { row, witness_idx, constants }
    }

    /// Reserves the region described by `parameters` for a component spanning `rows` rows and
    /// consuming `constant_amount` constant columns.
    ///
    /// All limits are checked before anything is recorded, so a failed reservation leaves the
    /// table untouched.
    pub fn reserve(
        &mut self,
        parameters: &FlexibleParameters,
        rows: usize,
        constant_amount: usize,
    ) -> Result<Region, LayoutError> {
        let start_row = parameters.start_row;
        let end_row = start_row.saturating_add(rows);
        if end_row > self.restriction.max_rows {
            return Err(LayoutError::AllocationOverflow {
                resource: Resource::Rows,
                requested: end_row,
                limit: self.restriction.max_rows,
            });
        }

        let start_column = parameters.start_witness_idx;
        let end_column = start_column.saturating_add(parameters.witness_amount);
        if end_column > self.restriction.max_witness_columns {
            return Err(LayoutError::AllocationOverflow {
                resource: Resource::WitnessColumns,
                requested: end_column,
                limit: self.restriction.max_witness_columns,
            });
        }

        let end_constant = parameters.start_constant_idx.saturating_add(constant_amount);
        if constant_amount > 0 {
            if parameters.start_constant_idx < self.next_constant_column {
                return Err(LayoutError::ConstantReuse {
                    index: parameters.start_constant_idx,
                    next: self.next_constant_column,
                });
            }
            if end_constant > self.restriction.max_constant_columns {
                return Err(LayoutError::AllocationOverflow {
                    resource: Resource::ConstantColumns,
                    requested: end_constant,
                    limit: self.restriction.max_constant_columns,
                });
            }
        }

        let region = Region::new(start_column..end_column, start_row..end_row);
        if let Some(existing) = self.regions.iter().find(|existing| existing.overlaps(&region)) {
            return Err(LayoutError::RegionOverlap { region, existing: existing.clone() });
        }

        if !self.lanes.contains_key(&parameters.witness_amount)
            && start_column == self.next_lane_column
        {
            self.lanes.insert(parameters.witness_amount, start_column);
            self.next_lane_column = end_column;
        }
        if constant_amount > 0 {
            self.next_constant_column = end_constant;
        }
        self.rows_used = self.rows_used.max(end_row);
        if !region.is_empty() {
            self.regions.push(region.clone());
        }

        log::trace!(target: "placement", "reserved {region}, rows used: {}", self.rows_used);
        Ok(region)
    }

    /// Number of rows below which some region has been reserved.
    pub fn rows_used(&self) -> usize {
        self.rows_used
    }

    /// Number of constant columns handed out so far.
    pub fn constants_used(&self) -> usize {
        self.next_constant_column
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn restriction(&self) -> &GlobalRestriction {
        &self.restriction
    }

    fn lane_column(&self, witness_amount: usize) -> usize {
        match self.lanes.get(&witness_amount) {
            Some(column) => *column,
            None if self.next_lane_column + witness_amount
                <= self.restriction.max_witness_columns =>
            {
                self.next_lane_column
            },
            None => 0,
        }
    }
}

/// Assignment
impl ConstraintTable {
    /// Writes a witness cell; the cell must lie in a reserved region and be unassigned.
    pub fn assign_witness(
        &mut self,
        column: usize,
        row: usize,
        value: Felt,
    ) -> Result<Variable, LayoutError> {
        let var = Variable::witness(column, row);
        if !self.regions.iter().any(|region| region.contains(column, row)) {
            return Err(LayoutError::UnreservedCell(var));
        }
        self.assignment.set(var, value)?;
        Ok(var)
    }

    /// Writes a constant cell in a constant column that has already been handed out.
    pub fn assign_constant(
        &mut self,
        column: usize,
        row: usize,
        value: Felt,
    ) -> Result<Variable, LayoutError> {
        let var = Variable::constant(column, row);
        if column >= self.next_constant_column {
            return Err(LayoutError::UnreservedCell(var));
        }
        self.assignment.set(var, value)?;
        Ok(var)
    }

    /// Appends a value to the first public input column.
    pub fn push_public_input(&mut self, value: Felt) -> Result<Variable, LayoutError> {
        let row = self.assignment.column_len(Column::PublicInput(0))?;
        let var = Variable::public_input(0, row);
        self.assignment.set(var, value)?;
        Ok(var)
    }

    /// Returns the value assigned to `var`.
    pub fn value_of(&self, var: Variable) -> Result<Felt, LayoutError> {
        self.assignment.get(var)?.ok_or(LayoutError::UnassignedCell(var))
    }
}

/// Circuit
impl ConstraintTable {
    pub fn add_gate(&mut self, gate: Gate) {
        self.circuit.gates.push(gate);
    }

    pub fn add_copy_constraint(&mut self, lhs: Variable, rhs: Variable) {
        self.circuit.copy_constraints.push(CopyConstraint { lhs, rhs });
    }

    pub fn gates(&self) -> &[Gate] {
        &self.circuit.gates
    }

    pub fn copy_constraints(&self) -> &[CopyConstraint] {
        &self.circuit.copy_constraints
    }
}

// TESTS
// ================================================================================================
