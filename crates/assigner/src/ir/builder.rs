use alloc::{string::String, vec::Vec};

use smallvec::SmallVec;

use super::{Function, Instruction, Opcode, Predicate, Type, ValueData, ValueDef, ValueId};
use crate::{AssignerError, utils::indexing::IndexVec};

/// Appends parameters and instructions to a [`Function`].
///
/// The builder records result types but does not check operand types; that happens when the
/// function is lowered.
#[derive(Debug)]
pub struct FunctionBuilder {
    name: String,
    values: IndexVec<ValueId, ValueData>,
    params: Vec<ValueId>,
    body: Vec<Instruction>,
}

impl FunctionBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: IndexVec::new(),
            params: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn param(&mut self, ty: Type) -> Result<ValueId, AssignerError> {
        let id = self.values.push(ValueData { ty, def: ValueDef::Param(self.params.len()) })?;
        self.params.push(id);
        Ok(id)
    }

    pub fn icmp(
        &mut self,
        predicate: Predicate,
        lhs: ValueId,
        rhs: ValueId,
    ) -> Result<ValueId, AssignerError> {
        self.push(Opcode::ICmp(predicate), &[lhs, rhs], Type::BOOL)
    }

    /// Decomposes `value` into as many bits as its integer width.
    pub fn bit_decompose(
        &mut self,
        value: ValueId,
        msb_first: ValueId,
    ) -> Result<ValueId, AssignerError> {
        let len = match self.values.get(value).map(|data| data.ty) {
            Some(Type::Int { bits }) => bits,
            _ => 0,
        };
        self.push(Opcode::BitDecompose, &[value, msb_first], Type::Vector { len })
    }

    pub fn bit_compose128(
        &mut self,
        low: ValueId,
        high: ValueId,
        msb_first: ValueId,
    ) -> Result<ValueId, AssignerError> {
        self.push(Opcode::BitCompose128, &[low, high, msb_first], Type::Int { bits: 128 })
    }

    pub fn intrinsic(
        &mut self,
        name: impl Into<String>,
        operands: &[ValueId],
        result_ty: Type,
    ) -> Result<ValueId, AssignerError> {
        self.push(Opcode::Intrinsic(name.into()), operands, result_ty)
    }

    pub fn build(self) -> Function {
        Function {
            name: self.name,
            values: self.values,
            params: self.params,
            body: self.body,
        }
    }

    fn push(
        &mut self,
        opcode: Opcode,
        operands: &[ValueId],
        result_ty: Type,
    ) -> Result<ValueId, AssignerError> {
        let result =
            self.values.push(ValueData { ty: result_ty, def: ValueDef::Result(self.body.len()) })?;
        self.body.push(Instruction {
            opcode,
            operands: SmallVec::from_slice(operands),
            result: Some(result),
        });
        Ok(result)
    }
}
