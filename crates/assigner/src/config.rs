use assigner_layout::{ArithmetizationParams, GlobalRestriction, Policy};

/// How equality comparisons are laid out.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ComparisonLayout {
    /// Witness columns `0..5` on a fresh row below everything placed so far, without
    /// consulting manifests or the placement policy.
    #[default]
    Fixed,
    /// Placed like every other gadget, through the active policy.
    Managed,
}

/// Configuration of an [`Assigner`](crate::Assigner) run.
///
/// Every `bit_compose128` takes a fresh constant column, so a run can lower at most
/// `params.constant_columns` compositions (5 with the default parameters). The next one fails
/// with an overflow of constant columns.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AssignerConfig {
    pub params: ArithmetizationParams,
    pub max_rows: usize,
    pub packing_enabled: bool,
    pub policy: Policy,
    pub comparison_layout: ComparisonLayout,
}

impl Default for AssignerConfig {
    fn default() -> Self {
        Self {
            params: ArithmetizationParams::default(),
            max_rows: GlobalRestriction::DEFAULT_MAX_ROWS,
            packing_enabled: true,
            policy: Policy::Default,
            comparison_layout: ComparisonLayout::default(),
        }
    }
}

impl AssignerConfig {
    pub fn with_params(mut self, params: ArithmetizationParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    pub fn with_packing(mut self, packing_enabled: bool) -> Self {
        self.packing_enabled = packing_enabled;
        self
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_comparison_layout(mut self, layout: ComparisonLayout) -> Self {
        self.comparison_layout = layout;
        self
    }

    pub fn restriction(&self) -> GlobalRestriction {
        GlobalRestriction::new(&self.params, self.max_rows, self.packing_enabled)
    }
}
