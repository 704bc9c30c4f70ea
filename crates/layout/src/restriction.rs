use crate::manifest::{Manifest, WitnessAmount};

/// Column counts of a PLONK arithmetization.
///
/// Every placement decision, cached manifest and active policy is scoped to one parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArithmetizationParams {
    pub witness_columns: usize,
    pub public_input_columns: usize,
    pub constant_columns: usize,
    pub selector_columns: usize,
}

impl ArithmetizationParams {
    pub const fn new(
        witness_columns: usize,
        public_input_columns: usize,
        constant_columns: usize,
        selector_columns: usize,
    ) -> Self {
        Self {
            witness_columns,
            public_input_columns,
            constant_columns,
            selector_columns,
        }
    }
}

impl Default for ArithmetizationParams {
    fn default() -> Self {
        Self::new(15, 1, 5, 30)
    }
}

/// Bounds every component placement must respect for a given parameter set.
///
/// Built once per compilation run and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlobalRestriction {
    pub max_witness_columns: usize,
    pub max_constant_columns: usize,
    pub max_rows: usize,
    pub packing_enabled: bool,
}

impl GlobalRestriction {
    /// Maximum row count used when none is configured.
    pub const DEFAULT_MAX_ROWS: usize = (i32::MAX - 1) as usize;

    /// Derives the column bounds from `params`.
    pub fn new(params: &ArithmetizationParams, max_rows: usize, packing_enabled: bool) -> Self {
        Self {
            max_witness_columns: params.witness_columns,
            max_constant_columns: params.constant_columns,
            max_rows,
            packing_enabled,
        }
    }

    /// The restriction seen as a manifest: any width from one column up to the maximum.
    pub fn as_manifest(&self) -> Manifest {
        Manifest::new(WitnessAmount::range(1, self.max_witness_columns), false)
    }
}

impl From<&ArithmetizationParams> for GlobalRestriction {
    fn from(params: &ArithmetizationParams) -> Self {
        Self::new(params, Self::DEFAULT_MAX_ROWS, true)
    }
}
