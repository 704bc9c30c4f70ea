use alloc::collections::BTreeMap;

use crate::{
    ArithmetizationParams, FlexibleParameters, LayoutError, Policy, WitnessVariants,
    table::ConstraintTable,
};

/// Active placement policy per arithmetization parameter set.
///
/// Parameter sets with no explicit policy get [`Policy::Default`] on first use. Policies are
/// changed only through explicit configuration calls.
#[derive(Debug, Default, Clone)]
pub struct PolicyManager {
    policies: BTreeMap<ArithmetizationParams, Policy>,
}

impl PolicyManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the policy bound to `params`.
    pub fn set_policy(&mut self, params: ArithmetizationParams, policy: Policy) {
        log::debug!(target: "placement", "policy for {params:?} set to {policy}");
        self.policies.insert(params, policy);
    }

    /// Selects a policy by name; unrecognized names leave the current policy in place.
    pub fn set_policy_by_name(&mut self, params: ArithmetizationParams, name: &str) {
        match name.parse::<Policy>() {
            Ok(policy) => self.set_policy(params, policy),
            Err(err) => log::warn!(target: "placement", "{err}; keeping the current policy"),
        }
    }

    /// The policy bound to `params`, binding [`Policy::Default`] if there is none yet.
    pub fn policy(&mut self, params: ArithmetizationParams) -> Policy {
        *self.policies.entry(params).or_default()
    }

    /// Asks the active policy for `params` to place one of `variants` in `table`.
    pub fn get_parameters(
        &mut self,
        params: ArithmetizationParams,
        table: &ConstraintTable,
        variants: &WitnessVariants,
        constant_amount: usize,
    ) -> Result<FlexibleParameters, LayoutError> {
        self.policy(params).place(variants, constant_amount, table)
    }
}
