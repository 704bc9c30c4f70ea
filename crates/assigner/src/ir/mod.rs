//! A minimal typed IR: functions made of a flat list of instructions over SSA values.
//!
//! Values live in a per-function arena and are referred to by [`ValueId`] handles.

mod builder;

use alloc::{string::String, vec::Vec};
use core::fmt;

use smallvec::SmallVec;

pub use self::builder::FunctionBuilder;
use crate::utils::indexing::IndexVec;

crate::newtype_id!(ValueId, "v");

// TYPES
// ================================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// An integer held in one cell.
    Int { bits: u32 },
    /// A fixed-length vector of cells.
    Vector { len: u32 },
}

impl Type {
    pub const BOOL: Self = Self::Int { bits: 1 };

    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Int { .. })
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int { bits } => write!(f, "i{bits}"),
            Self::Vector { len } => write!(f, "vec<{len}>"),
        }
    }
}

/// Integer comparison predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Predicate {
    Eq,
    Ne,
    Ugt,
    Uge,
    Ult,
    Ule,
    Sgt,
    Sge,
    Slt,
    Sle,
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Ugt => "ugt",
            Self::Uge => "uge",
            Self::Ult => "ult",
            Self::Ule => "ule",
            Self::Sgt => "sgt",
            Self::Sge => "sge",
            Self::Slt => "slt",
            Self::Sle => "sle",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opcode {
    /// Integer comparison producing an `i1`.
    ICmp(Predicate),
    /// `(value, msb_first) -> vec<bits(value)>`
    BitDecompose,
    /// `(low, high, msb_first) -> i128`
    BitCompose128,
    /// A named intrinsic with no lowering of its own.
    Intrinsic(String),
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ICmp(predicate) => write!(f, "icmp {predicate}"),
            Self::BitDecompose => f.write_str("bit_decompose"),
            Self::BitCompose128 => f.write_str("bit_compose128"),
            Self::Intrinsic(name) => write!(f, "intrinsic {name}"),
        }
    }
}

// VALUES AND INSTRUCTIONS
// ================================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueDef {
    /// The n-th function parameter.
    Param(usize),
    /// Result of the n-th instruction of the body.
    Result(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueData {
    pub ty: Type,
    pub def: ValueDef,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub operands: SmallVec<[ValueId; 4]>,
    pub result: Option<ValueId>,
}

// FUNCTION
// ================================================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    name: String,
    values: IndexVec<ValueId, ValueData>,
    params: Vec<ValueId>,
    body: Vec<Instruction>,
}

impl Function {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[ValueId] {
        &self.params
    }

    pub fn body(&self) -> &[Instruction] {
        &self.body
    }

    pub fn value(&self, id: ValueId) -> Option<&ValueData> {
        self.values.get(id)
    }

    pub fn num_values(&self) -> usize {
        self.values.len()
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use itertools::Itertools;

        let params = self
            .params
            .iter()
            .map(|id| (id, &self.values[*id].ty))
            .format_with(", ", |(id, ty), f| f(&format_args!("{id}: {ty}")));
        writeln!(f, "fn {}({params}) {{", self.name)?;
        for inst in &self.body {
            f.write_str("    ")?;
            if let Some(result) = inst.result {
                write!(f, "{result}: {} = ", self.values[result].ty)?;
            }
            writeln!(f, "{} {}", inst.opcode, inst.operands.iter().format(", "))?;
        }
        f.write_str("}")
    }
}
