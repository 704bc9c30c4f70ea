//! Gadgets that can be placed in a [`ConstraintTable`].
//!
//! Every gadget is constructed from an [`Allocation`](assigner_layout::Allocation) handed out by the placement machinery in
//! `assigner-layout`, then asked to emit its constraints and its witness values at the
//! allocated start row. Emission never reserves anything: a gadget only writes to cells its
//! allocation covers.

#![no_std]

#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod bits;
mod equality_flag;
mod errors;

use core::fmt;

use assigner_layout::{ComponentManifest, ConstraintTable};

pub use self::{
    bits::{BitComposition, BitDecomposition},
    equality_flag::{EqualityFlag, EqualityInput},
    errors::ComponentError,
};

// COMPONENT
// ================================================================================================

/// A placed gadget.
///
/// `generate_circuit` records gates and copy constraints; `generate_assignments` computes and
/// writes the witness. Both take the start row the gadget was allocated at.
pub trait Component: ComponentManifest {
    type Input;
    type Output;

    fn generate_circuit(
        &self,
        table: &mut ConstraintTable,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<(), ComponentError>;

    fn generate_assignments(
        &self,
        table: &mut ConstraintTable,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<Self::Output, ComponentError>;
}

// BIT ORDER
// ================================================================================================

/// Ordering of a bit vector.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BitOrder {
    /// Most significant bit first.
    #[default]
    Msb,
    /// Least significant bit first.
    Lsb,
}

impl BitOrder {
    /// `Msb` when `msb_first` is set, `Lsb` otherwise.
    pub fn from_msb_flag(msb_first: bool) -> Self {
        if msb_first { Self::Msb } else { Self::Lsb }
    }
}

impl fmt::Display for BitOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Msb => f.write_str("msb-first"),
            Self::Lsb => f.write_str("lsb-first"),
        }
    }
}
