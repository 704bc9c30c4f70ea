use alloc::{string::ToString, vec::Vec};

use assigner_layout::{AllocationContext, ConstraintTable, Felt, Policy};
use p3_field::PrimeCharacteristicRing;

use crate::{
    AssignerConfig, AssignerError, ComparisonLayout, StackFrame,
    handlers::{
        Lowering, handle_comparison, handle_integer_bit_composition128,
        handle_integer_bit_decomposition, operands, result,
    },
    ir::{Function, Instruction, Opcode, Type},
};

// ARGUMENT
// ================================================================================================

/// A concrete value passed for a function parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    Scalar(u64),
    Vector(Vec<u64>),
}

// ASSIGNER
// ================================================================================================

/// Lowers functions into one shared constraint table.
///
/// The assigner owns the table and the allocation context for the whole run; functions are
/// lowered one after another and each gets a fresh [`StackFrame`].
#[derive(Debug, Clone)]
pub struct Assigner {
    config: AssignerConfig,
    allocation: AllocationContext,
    table: ConstraintTable,
}

/// Constructors
impl Assigner {
    pub fn new(config: AssignerConfig) -> Self {
        let mut allocation = AllocationContext::new(config.params, config.restriction());
        allocation.set_policy(config.policy);
        let table = allocation.new_table();
        Self { config, allocation, table }
    }
}

/// Accessors
impl Assigner {
    pub fn config(&self) -> &AssignerConfig {
        &self.config
    }

    pub fn table(&self) -> &ConstraintTable {
        &self.table
    }

    pub fn into_table(self) -> ConstraintTable {
        self.table
    }

    pub fn policy(&mut self) -> Policy {
        self.allocation.policy()
    }

    /// Changes the placement policy used by later instructions.
    pub fn set_policy(&mut self, policy: Policy) {
        self.config.policy = policy;
        self.allocation.set_policy(policy);
    }

    /// Changes the placement policy by name; unknown names are ignored.
    pub fn set_policy_by_name(&mut self, name: &str) {
        self.allocation.set_policy_by_name(name);
        self.config.policy = self.allocation.policy();
    }
}

/// Lowering
impl Assigner {
    /// Binds `args` to the parameters of `function` as public inputs, then lowers its body in
    /// order.
    ///
    /// Returns the stack frame holding the cells of every value of the function.
    #[tracing::instrument("assign_function", skip_all, fields(function = function.name()))]
    pub fn assign(
        &mut self,
        function: &Function,
        args: &[Argument],
    ) -> Result<StackFrame, AssignerError> {
        let mut frame = StackFrame::new();
        self.bind_arguments(function, args, &mut frame)?;

        let layout = self.config.comparison_layout;
        let mut lowering = Lowering {
            allocation: &mut self.allocation,
            table: &mut self.table,
            frame: &mut frame,
            function,
        };
        for inst in function.body() {
            lower_instruction(&mut lowering, inst, layout)?;
        }

        log::debug!(
            target: "assigner",
            "lowered '{}': {} rows, {} gates, {} copy constraints",
            function.name(),
            self.table.rows_used(),
            self.table.gates().len(),
            self.table.copy_constraints().len()
        );
        Ok(frame)
    }

    fn bind_arguments(
        &mut self,
        function: &Function,
        args: &[Argument],
        frame: &mut StackFrame,
    ) -> Result<(), AssignerError> {
        if args.len() != function.params().len() {
            return Err(AssignerError::ArgumentCount {
                function: function.name().to_string(),
                expected: function.params().len(),
                actual: args.len(),
            });
        }

        for (index, (param, arg)) in function.params().iter().zip(args).enumerate() {
            let ty = function.value(*param).ok_or(AssignerError::UnknownValue(*param))?.ty;
            match (ty, arg) {
                (Type::Int { bits }, Argument::Scalar(value))
                    if bits >= u64::BITS || value >> bits == 0 =>
                {
                    let cell = self.table.push_public_input(Felt::from_u64(*value))?;
                    frame.bind_scalar(*param, cell);
                },
                (Type::Vector { len }, Argument::Vector(values)) if values.len() == len as usize => {
                    let cells = values
                        .iter()
                        .map(|value| self.table.push_public_input(Felt::from_u64(*value)))
                        .collect::<Result<Vec<_>, _>>()?;
                    frame.bind_vector(*param, cells);
                },
                _ => return Err(AssignerError::ArgumentMismatch { index, expected: ty }),
            }
        }
        Ok(())
    }
}

fn lower_instruction(
    lowering: &mut Lowering<'_>,
    inst: &Instruction,
    layout: ComparisonLayout,
) -> Result<(), AssignerError> {
    match &inst.opcode {
        Opcode::ICmp(predicate) => {
            let [x, y] = operands::<2>(inst)?;
            let result = result(inst)?;
            let x = lowering.frame.scalar(x)?;
            let y = lowering.frame.scalar(y)?;
            let flag = handle_comparison(lowering, *predicate, x, y, layout)?;
            lowering.frame.bind_scalar(result, flag);
            Ok(())
        },
        Opcode::BitDecompose => handle_integer_bit_decomposition(lowering, inst),
        Opcode::BitCompose128 => handle_integer_bit_composition128(lowering, inst),
        Opcode::Intrinsic(_) => {
            Err(AssignerError::UnsupportedOperation { opcode: inst.opcode.to_string() })
        },
    }
}
