//! Lowering of a typed IR into a PLONK constraint table.
//!
//! The [`Assigner`] walks a [`Function`](ir::Function) in order. Arguments become public input
//! cells, and every instruction is handed to a lowering handler which places a gadget from
//! `assigner-components` through the allocation context of `assigner-layout`, emits it, and
//! binds its output cells in the [`StackFrame`].
//!
//! Quick start:
//! ```ignore
//! use assigner::{Argument, Assigner, AssignerConfig, ir::{FunctionBuilder, Predicate, Type}};
//!
//! let mut builder = FunctionBuilder::new("is_equal");
//! let x = builder.param(Type::Int { bits: 64 })?;
//! let y = builder.param(Type::Int { bits: 64 })?;
//! let flag = builder.icmp(Predicate::Eq, x, y)?;
//!
//! let mut assigner = Assigner::new(AssignerConfig::default());
//! let frame = assigner.assign(&builder.build(), &[Argument::Scalar(3), Argument::Scalar(3)])?;
//! let cell = frame.scalar(flag)?;
//! ```
//!
//! Module map:
//! - `ir`: values, instructions, functions and their builder.
//! - `frame`: cell bindings of IR values.
//! - `handlers`: per-operation lowering through the placement protocol.
//! - `assigner`: argument binding and instruction dispatch.
//! - `config`: run configuration.

#![no_std]

#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod utils;

pub mod handlers;
pub mod ir;

mod assigner;
mod config;
mod errors;
mod frame;

pub use assigner_components as components;
pub use assigner_layout as layout;

pub use self::{
    assigner::{Argument, Assigner},
    config::{AssignerConfig, ComparisonLayout},
    errors::AssignerError,
    frame::StackFrame,
};

/// Installs an `env_logger` logger configured from the `ASSIGNER_LOG` environment variable.
///
/// Calling this more than once is harmless.
#[cfg(feature = "logging")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env("ASSIGNER_LOG").format_timestamp(None).try_init();
}
