//! Placement of circuit components in a shared PLONK constraint table.
//!
//! The pipeline for one component invocation is:
//! 1. Narrow the component's declared [`Manifest`] by the [`GlobalRestriction`] of the current
//!    [`ArithmetizationParams`], yielding an effective manifest (cached per component type).
//! 2. Enumerate the admissible widths together with the rows each one needs.
//! 3. Let the active [`Policy`] pick a width and a start position in the [`ConstraintTable`].
//! 4. Reserve the chosen region, handing out fresh constant columns if required.
//!
//! Quick start:
//! ```ignore
//! use assigner_layout::{AllocationContext, ArithmetizationParams, GlobalRestriction, Policy};
//!
//! let params = ArithmetizationParams::default();
//! let mut ctx = AllocationContext::new(params, GlobalRestriction::from(&params));
//! ctx.set_policy(Policy::MinRows);
//! let mut table = ctx.new_table();
//! let allocation = ctx.allocate::<MyComponent>(&mut table, &my_params)?;
//! ```
//!
//! Module map:
//! - `manifest`: witness amount sets and their intersection.
//! - `restriction`: arithmetization parameters and the global restriction.
//! - `component`: the static description every placeable component provides.
//! - `reader`: effective manifests and their cache.
//! - `policy`: placement strategies.
//! - `manager`: policy selection per parameter set.
//! - `context`: the per-run allocation entry point.
//! - `table`: occupancy, cell assignment and recorded gates/copy constraints.

#![no_std]

#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

// Declarations.
mod component;
mod manifest;
mod restriction;

// Placement.
mod context;
mod manager;
mod policy;
mod reader;

// Table state.
mod errors;
pub mod table;

pub use p3_field;
/// Field element stored in table cells.
pub use p3_goldilocks::Goldilocks as Felt;

pub use self::{
    component::ComponentManifest,
    context::{Allocation, AllocationContext},
    errors::{LayoutError, Resource},
    manager::PolicyManager,
    manifest::{Manifest, WitnessAmount, WitnessOptions},
    policy::{FlexibleParameters, Policy, UnknownPolicy, WitnessVariant, WitnessVariants},
    reader::{ManifestCache, ManifestReader},
    restriction::{ArithmetizationParams, GlobalRestriction},
    table::{Column, ConstraintTable, CopyConstraint, FreeSlot, Gate, Region, RowSharing, Variable},
};
