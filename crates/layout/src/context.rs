use alloc::vec::Vec;

use crate::{
    ArithmetizationParams, ComponentManifest, FlexibleParameters, GlobalRestriction, LayoutError,
    ManifestCache, ManifestReader, Policy, PolicyManager, table::ConstraintTable,
};

// ALLOCATION
// ================================================================================================

/// Everything a component needs to know about where it was placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub parameters: FlexibleParameters,
    pub rows: usize,
    /// Absolute witness column indices, in order.
    pub witness_columns: Vec<usize>,
    /// Constant column indices reserved for this invocation.
    pub constants: Vec<usize>,
    /// Public input cell offsets, relative to the first one the invocation appends.
    pub public_inputs: Vec<usize>,
}

impl Allocation {
    pub fn start_row(&self) -> usize {
        self.parameters.start_row
    }

    pub fn witness_amount(&self) -> usize {
        self.parameters.witness_amount
    }
}

// ALLOCATION CONTEXT
// ================================================================================================

/// Placement state for one compilation run: the restriction, the active policies and the
/// manifest cache.
///
/// The context is owned by whoever drives the run and passed by reference to every allocation.
#[derive(Debug, Clone)]
pub struct AllocationContext {
    params: ArithmetizationParams,
    restriction: GlobalRestriction,
    policies: PolicyManager,
    manifests: ManifestCache,
}

impl AllocationContext {
    pub fn new(params: ArithmetizationParams, restriction: GlobalRestriction) -> Self {
        Self {
            params,
            restriction,
            policies: PolicyManager::new(),
            manifests: ManifestCache::new(),
        }
    }

    pub fn params(&self) -> &ArithmetizationParams {
        &self.params
    }

    pub fn restriction(&self) -> &GlobalRestriction {
        &self.restriction
    }

    /// A fresh, empty table sized for this context.
    pub fn new_table(&self) -> ConstraintTable {
        ConstraintTable::new(&self.params, self.restriction)
    }

    pub fn policy(&mut self) -> Policy {
        self.policies.policy(self.params)
    }

    pub fn set_policy(&mut self, policy: Policy) {
        self.policies.set_policy(self.params, policy);
    }

    pub fn set_policy_by_name(&mut self, name: &str) {
        self.policies.set_policy_by_name(self.params, name);
    }

    pub fn reader<C: ComponentManifest>(&mut self) -> Result<ManifestReader<C>, LayoutError> {
        self.manifests.reader::<C>(self.params, &self.restriction)
    }

    /// Places one invocation of `C` and reserves its cells in `table`.
    pub fn allocate<C: ComponentManifest>(
        &mut self,
        table: &mut ConstraintTable,
        params: &C::Params,
    ) -> Result<Allocation, LayoutError> {
        let reader = self.reader::<C>()?;
        let variants = reader.witness_variants(params)?;
        let constant_amount = reader.constant_amount();
        let parameters =
            self.policies.get_parameters(self.params, table, &variants, constant_amount)?;

        let rows = variants.rows_for(parameters.witness_amount).ok_or(
            LayoutError::InvalidPlacement {
                component: C::NAME,
                witness_amount: parameters.witness_amount,
            },
        )?;
        let region = table.reserve(&parameters, rows, constant_amount)?;

        log::debug!(
            target: "placement",
            "{} placed at {region} with constants {:?}",
            C::NAME,
            reader.constants(parameters.start_constant_idx)
        );

        Ok(Allocation {
            parameters,
            rows,
            witness_columns: region.columns.collect(),
            constants: reader.constants(parameters.start_constant_idx).collect(),
            public_inputs: reader.public_inputs().collect(),
        })
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::{Manifest, WitnessAmount, table::Region};

    /// A component of fixed width whose row count is its parameter.
    struct Block<const W: usize>;

    impl<const W: usize> ComponentManifest for Block<W> {
        const NAME: &'static str = "block";
        type Params = usize;

        fn manifest() -> Manifest {
            Manifest::new(WitnessAmount::single(W), false)
        }

        fn rows_amount(_witness_amount: usize, rows: &usize) -> usize {
            *rows
        }
    }

    /// A flexible component that needs one constant per invocation.
    struct Constrained;

    impl ComponentManifest for Constrained {
        const NAME: &'static str = "constrained";
        type Params = usize;

        fn manifest() -> Manifest {
            Manifest::new(WitnessAmount::range(2, 6), true)
        }

        fn rows_amount(witness_amount: usize, cells: &usize) -> usize {
            cells.div_ceil(witness_amount)
        }
    }

    fn context(witness_columns: usize, constant_columns: usize) -> AllocationContext {
        let params = ArithmetizationParams::new(witness_columns, 1, constant_columns, 0);
        AllocationContext::new(params, GlobalRestriction::from(&params))
    }

    #[test]
    fn repeated_placements_stack_in_the_same_lane() {
        let mut ctx = context(15, 0);
        let mut table = ctx.new_table();

        let first = ctx.allocate::<Block<4>>(&mut table, &5).unwrap();
        let second = ctx.allocate::<Block<4>>(&mut table, &5).unwrap();

        assert_eq!(first.witness_columns, [0, 1, 2, 3]);
        assert_eq!((first.start_row(), second.start_row()), (0, 5));
        assert_eq!(table.regions(), &[Region::new(0..4, 0..5), Region::new(0..4, 5..10)]);
    }

    #[test]
    fn constants_are_unique_and_increasing() {
        let mut ctx = context(15, 4);
        let mut table = ctx.new_table();

        let constants: Vec<usize> = (0..4)
            .flat_map(|_| ctx.allocate::<Constrained>(&mut table, &12).unwrap().constants)
            .collect();
        assert_eq!(constants, [0, 1, 2, 3]);

        assert!(matches!(
            ctx.allocate::<Constrained>(&mut table, &12),
            Err(LayoutError::AllocationOverflow { .. })
        ));
    }

    #[test]
    fn unsatisfiable_component_is_never_placed() {
        let mut ctx = context(3, 0);
        let mut table = ctx.new_table();
        assert_eq!(
            ctx.allocate::<Block<4>>(&mut table, &1),
            Err(LayoutError::UnsatisfiableManifest { component: "block" })
        );
        assert!(table.regions().is_empty());
    }

    #[test]
    fn policy_changes_apply_to_later_allocations() {
        let mut ctx = context(15, 8);
        let mut table = ctx.new_table();

        // default takes the narrowest width
        let narrow = ctx.allocate::<Constrained>(&mut table, &12).unwrap();
        ctx.set_policy_by_name("min_rows");
        let wide = ctx.allocate::<Constrained>(&mut table, &12).unwrap();

        assert_eq!((narrow.witness_amount(), narrow.rows), (2, 6));
        assert_eq!((wide.witness_amount(), wide.rows), (6, 2));
        assert_eq!(ctx.policy(), Policy::MinRows);
    }

    #[rstest]
    #[case(Policy::Default)]
    #[case(Policy::MinRows)]
    #[case(Policy::NoPacking)]
    fn row_limit_is_enforced(#[case] policy: Policy) {
        let params = ArithmetizationParams::new(15, 1, 0, 0);
        let mut ctx = AllocationContext::new(params, GlobalRestriction::new(&params, 8, true));
        ctx.set_policy(policy);
        let mut table = ctx.new_table();

        ctx.allocate::<Block<4>>(&mut table, &5).unwrap();
        assert!(matches!(
            ctx.allocate::<Block<4>>(&mut table, &5),
            Err(LayoutError::AllocationOverflow { requested: 10, limit: 8, .. })
        ));
    }

    fn invocation() -> impl Strategy<Value = (usize, usize)> {
        (0usize..4, 1usize..24)
    }

    fn allocate_any(
        ctx: &mut AllocationContext,
        table: &mut ConstraintTable,
        (kind, size): (usize, usize),
    ) -> Allocation {
        match kind {
            0 => ctx.allocate::<Block<3>>(table, &size),
            1 => ctx.allocate::<Block<5>>(table, &size),
            2 => ctx.allocate::<Block<7>>(table, &size),
            _ => ctx.allocate::<Block<15>>(table, &size),
        }
        .unwrap()
    }

    proptest! {
        #[test]
        fn reserved_regions_never_overlap(
            policy in prop_oneof![Just(Policy::Default), Just(Policy::MinRows), Just(Policy::NoPacking)],
            invocations in prop::collection::vec(invocation(), 1..24),
        ) {
            let mut ctx = context(15, 0);
            ctx.set_policy(policy);
            let mut table = ctx.new_table();
            for call in invocations {
                allocate_any(&mut ctx, &mut table, call);
            }

            let regions = table.regions();
            for (i, lhs) in regions.iter().enumerate() {
                prop_assert!(lhs.columns.end <= 15);
                for rhs in &regions[i + 1..] {
                    prop_assert!(!lhs.overlaps(rhs), "{} overlaps {}", lhs, rhs);
                }
            }
        }
    }
}
