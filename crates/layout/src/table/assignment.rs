use alloc::vec::Vec;

use super::{Column, Variable};
use crate::{Felt, LayoutError};

/// Write-once cell storage, one growable vector per column.
#[derive(Debug, Clone)]
pub(crate) struct Assignment {
    witness: Vec<Vec<Option<Felt>>>,
    constant: Vec<Vec<Option<Felt>>>,
    public_input: Vec<Vec<Option<Felt>>>,
}

impl Assignment {
    pub fn new(witness_columns: usize, constant_columns: usize, public_input_columns: usize) -> Self {
        Self {
            witness: vec![Vec::new(); witness_columns],
            constant: vec![Vec::new(); constant_columns],
            public_input: vec![Vec::new(); public_input_columns],
        }
    }

    pub fn get(&self, var: Variable) -> Result<Option<Felt>, LayoutError> {
        let column = self.column(var.column)?;
        Ok(column.get(var.row).copied().flatten())
    }

    pub fn set(&mut self, var: Variable, value: Felt) -> Result<(), LayoutError> {
        let column = self.column_mut(var.column)?;
        if column.len() <= var.row {
            column.resize(var.row + 1, None);
        }
        let cell = &mut column[var.row];
        if cell.is_some() {
            return Err(LayoutError::CellOccupied(var));
        }
        *cell = Some(value);
        Ok(())
    }

    /// Number of rows holding at least one assigned cell in `column`.
    pub fn column_len(&self, column: Column) -> Result<usize, LayoutError> {
        Ok(self.column(column)?.len())
    }

    fn column(&self, column: Column) -> Result<&Vec<Option<Felt>>, LayoutError> {
        let cells = match column {
            Column::Witness(index) => self.witness.get(index),
            Column::Constant(index) => self.constant.get(index),
            Column::PublicInput(index) => self.public_input.get(index),
        };
        cells.ok_or(LayoutError::ColumnOutOfBounds(column))
    }

    fn column_mut(&mut self, column: Column) -> Result<&mut Vec<Option<Felt>>, LayoutError> {
        let cells = match column {
            Column::Witness(index) => self.witness.get_mut(index),
            Column::Constant(index) => self.constant.get_mut(index),
            Column::PublicInput(index) => self.public_input.get_mut(index),
        };
        cells.ok_or(LayoutError::ColumnOutOfBounds(column))
    }
}
