//! Placement policies.
//!
//! A policy looks at every `(witness amount, rows)` variant a component invocation could use,
//! asks the table where each one would start, and picks one. The strategy set is closed, so
//! policies are a plain enum with a single [`Policy::place`] dispatch.

use core::{fmt, str::FromStr};

use smallvec::SmallVec;

use crate::{
    LayoutError,
    table::{ConstraintTable, FreeSlot, RowSharing},
};

// WITNESS VARIANTS
// ================================================================================================

/// One way to lay out a component: its width and the number of rows it then needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WitnessVariant {
    pub witness_amount: usize,
    pub rows: usize,
}

impl WitnessVariant {
    pub const fn new(witness_amount: usize, rows: usize) -> Self {
        Self { witness_amount, rows }
    }
}

/// All variants of one component invocation, in manifest order.
///
/// Widths are unique: a repeated width keeps the row count it was first listed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WitnessVariants {
    component: &'static str,
    variants: SmallVec<[WitnessVariant; 8]>,
}

impl WitnessVariants {
    pub fn new(component: &'static str, variants: impl IntoIterator<Item = WitnessVariant>) -> Self {
        let mut unique = SmallVec::<[WitnessVariant; 8]>::new();
        for variant in variants {
            if unique.iter().all(|kept| kept.witness_amount != variant.witness_amount) {
                unique.push(variant);
            }
        }
        Self { component, variants: unique }
    }

    pub fn component(&self) -> &'static str {
        self.component
    }

    pub fn as_slice(&self) -> &[WitnessVariant] {
        &self.variants
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Rows needed when the component is given `witness_amount` columns, if that is a variant.
    pub fn rows_for(&self, witness_amount: usize) -> Option<usize> {
        self.variants
            .iter()
            .find(|variant| variant.witness_amount == witness_amount)
            .map(|variant| variant.rows)
    }

    fn first(&self) -> Result<&WitnessVariant, LayoutError> {
        self.variants
            .first()
            .ok_or(LayoutError::UnsatisfiableManifest { component: self.component })
    }
}

// FLEXIBLE PARAMETERS
// ================================================================================================

/// A resolved placement: the chosen width and where the component starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlexibleParameters {
    pub witness_amount: usize,
    pub start_row: usize,
    pub start_witness_idx: usize,
    pub start_constant_idx: usize,
}

impl FlexibleParameters {
    fn from_slot(witness_amount: usize, slot: FreeSlot) -> Self {
        Self {
            witness_amount,
            start_row: slot.row,
            start_witness_idx: slot.witness_idx,
            start_constant_idx: slot.constants.start,
        }
    }
}

// POLICY
// ================================================================================================

/// Placement strategy.
///
/// - `Default`: first-fit on the first variant, without looking at the others.
/// - `MinRows`: the variant whose last row ends earliest; ties keep the earliest variant.
/// - `NoPacking`: first variant, started below everything already placed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Policy {
    #[default]
    Default,
    MinRows,
    NoPacking,
}

impl Policy {
    /// Choose a variant and its start position.
    ///
    /// Returns [`LayoutError::UnsatisfiableManifest`] if there is nothing to choose from.
    pub fn place(
        &self,
        variants: &WitnessVariants,
        constant_amount: usize,
        table: &ConstraintTable,
    ) -> Result<FlexibleParameters, LayoutError> {
        let parameters = match self {
            Self::Default => {
                let first = variants.first()?;
                let slot = table.first_free_row(first.witness_amount, constant_amount, RowSharing::Packed);
                log::trace!(
                    target: "placement",
                    "{}: first-fit width {} rows {}..{}",
                    variants.component(),
                    first.witness_amount,
                    slot.row,
                    slot.row + first.rows
                );
                FlexibleParameters::from_slot(first.witness_amount, slot)
            },
            Self::MinRows => {
                let first = variants.first()?;
                let mut best = table.first_free_row(first.witness_amount, constant_amount, RowSharing::Packed);
                let mut best_variant = *first;
                let mut min_end_row = best.row + first.rows;
                for variant in variants.as_slice() {
                    let slot =
                        table.first_free_row(variant.witness_amount, constant_amount, RowSharing::Packed);
                    let end_row = slot.row + variant.rows;
                    if end_row < min_end_row {
                        min_end_row = end_row;
                        best_variant = *variant;
                        best = slot;
                    }
                }
                log::trace!(
                    target: "placement",
                    "{}: min-rows picked width {} ending at row {min_end_row}",
                    variants.component(),
                    best_variant.witness_amount
                );
                FlexibleParameters::from_slot(best_variant.witness_amount, best)
            },
            Self::NoPacking => {
                let first = variants.first()?;
                let slot =
                    table.first_free_row(first.witness_amount, constant_amount, RowSharing::Isolated);
                FlexibleParameters::from_slot(first.witness_amount, slot)
            },
        };
        Ok(parameters)
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::MinRows => "min_rows",
            Self::NoPacking => "no_packing",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a policy name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown placement policy '{0}', expected one of: default, min_rows, no_packing")]
pub struct UnknownPolicy(pub alloc::string::String);

impl FromStr for Policy {
    type Err = UnknownPolicy;

    /// Parses a policy name; names are matched exactly.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        [Self::Default, Self::MinRows, Self::NoPacking]
            .into_iter()
            .find(|policy| policy.name() == name)
            .ok_or_else(|| UnknownPolicy(name.into()))
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec::Vec};

    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::{ArithmetizationParams, GlobalRestriction};

    fn empty_table() -> ConstraintTable {
        let params = ArithmetizationParams::new(15, 1, 4, 0);
        ConstraintTable::new(&params, GlobalRestriction::new(&params, 1 << 16, true))
    }

    /// Reserves `rows` rows of a `witness_amount`-wide lane using first-fit.
    fn occupy(table: &mut ConstraintTable, witness_amount: usize, rows: usize) {
        let variants = WitnessVariants::new("filler", [WitnessVariant::new(witness_amount, rows)]);
        let parameters = Policy::Default.place(&variants, 0, table).unwrap();
        table.reserve(&parameters, rows, 0).unwrap();
    }

    #[rstest]
    #[case(Policy::Default)]
    #[case(Policy::MinRows)]
    #[case(Policy::NoPacking)]
    fn empty_variants_are_unsatisfiable(#[case] policy: Policy) {
        let variants = WitnessVariants::new("gadget", Vec::new());
        assert_eq!(
            policy.place(&variants, 0, &empty_table()),
            Err(LayoutError::UnsatisfiableManifest { component: "gadget" })
        );
    }

    #[test]
    fn default_ignores_cheaper_variants() {
        let variants =
            WitnessVariants::new("gadget", [WitnessVariant::new(3, 12), WitnessVariant::new(4, 9)]);
        let parameters = Policy::Default.place(&variants, 0, &empty_table()).unwrap();
        assert_eq!(
            parameters,
            FlexibleParameters {
                witness_amount: 3,
                start_row: 0,
                start_witness_idx: 0,
                start_constant_idx: 0,
            }
        );
    }

    #[test]
    fn min_rows_prefers_earliest_end_row() {
        let variants =
            WitnessVariants::new("gadget", [WitnessVariant::new(3, 12), WitnessVariant::new(4, 9)]);
        let parameters = Policy::MinRows.place(&variants, 0, &empty_table()).unwrap();
        assert_eq!(parameters.witness_amount, 4);
        assert_eq!(parameters.start_row, 0);
    }

    #[test]
    fn min_rows_accounts_for_occupancy() {
        let mut table = empty_table();
        occupy(&mut table, 4, 10);
        // width 4 would end at 10 + 9 = 19, width 3 opens a new lane and ends at 12
        let variants =
            WitnessVariants::new("gadget", [WitnessVariant::new(4, 9), WitnessVariant::new(3, 12)]);
        let parameters = Policy::MinRows.place(&variants, 0, &table).unwrap();
        assert_eq!((parameters.witness_amount, parameters.start_row), (3, 0));
        assert_eq!(parameters.start_witness_idx, 4);
    }

    #[test]
    fn min_rows_ties_keep_the_first_variant() {
        let variants =
            WitnessVariants::new("gadget", [WitnessVariant::new(5, 6), WitnessVariant::new(6, 6)]);
        let parameters = Policy::MinRows.place(&variants, 0, &empty_table()).unwrap();
        assert_eq!(parameters.witness_amount, 5);
    }

    #[test]
    fn no_packing_never_shares_occupied_rows() {
        let mut table = empty_table();
        let variants = WitnessVariants::new("gadget", [WitnessVariant::new(3, 4)]);

        let first = Policy::NoPacking.place(&variants, 0, &table).unwrap();
        table.reserve(&first, 4, 0).unwrap();
        let second = Policy::NoPacking.place(&variants, 0, &table).unwrap();
        table.reserve(&second, 4, 0).unwrap();
        // a differently sized instance would have fit next to the others, but must not
        let third = Policy::NoPacking
            .place(&WitnessVariants::new("gadget", [WitnessVariant::new(2, 1)]), 0, &table)
            .unwrap();

        assert_eq!(first.start_row, 0);
        assert_eq!(second.start_row, 4);
        assert_eq!(third.start_row, 8);
    }

    #[rstest]
    #[case("default", Policy::Default)]
    #[case("min_rows", Policy::MinRows)]
    #[case("no_packing", Policy::NoPacking)]
    fn policy_names_parse(#[case] name: &str, #[case] expected: Policy) {
        assert_eq!(name.parse::<Policy>(), Ok(expected));
        assert_eq!(expected.to_string(), expected.name());
    }

    #[test]
    fn unknown_policy_name_is_rejected() {
        assert!("fastest".parse::<Policy>().is_err());
    }

    #[rstest]
    #[case("MIN_ROWS")]
    #[case("No_Packing")]
    #[case(" default")]
    fn policy_names_are_case_sensitive(#[case] name: &str) {
        assert_eq!(name.parse::<Policy>(), Err(UnknownPolicy(name.into())));
    }

    #[test]
    fn repeated_widths_keep_the_first_row_count() {
        let variants = WitnessVariants::new(
            "gadget",
            [WitnessVariant::new(3, 10), WitnessVariant::new(4, 7), WitnessVariant::new(3, 5)],
        );
        assert_eq!(variants.as_slice(), &[WitnessVariant::new(3, 10), WitnessVariant::new(4, 7)]);

        let parameters = Policy::MinRows.place(&variants, 0, &empty_table()).unwrap();
        assert_eq!(parameters.witness_amount, 4);
        assert_eq!(variants.rows_for(parameters.witness_amount), Some(7));
    }

    fn variant_strategy() -> impl Strategy<Value = Vec<WitnessVariant>> {
        prop::collection::btree_map(1usize..=15, 1usize..40, 1..8).prop_map(|rows_by_width| {
            rows_by_width.into_iter().map(|(width, rows)| WitnessVariant::new(width, rows)).collect()
        })
    }

    proptest! {
        #[test]
        fn min_rows_is_optimal_over_variants(
            occupancy in prop::collection::vec((1usize..=15, 1usize..20), 0..6),
            variants in variant_strategy(),
        ) {
            let mut table = empty_table();
            for (width, rows) in occupancy {
                occupy(&mut table, width, rows);
            }
            let variants = WitnessVariants::new("gadget", variants);
            let chosen = Policy::MinRows.place(&variants, 0, &table).unwrap();
            let chosen_end = chosen.start_row + variants.rows_for(chosen.witness_amount).unwrap();

            let ends: Vec<usize> = variants
                .as_slice()
                .iter()
                .map(|v| table.first_free_row(v.witness_amount, 0, RowSharing::Packed).row + v.rows)
                .collect();
            prop_assert!(ends.iter().all(|end| chosen_end <= *end));
            let first_best = ends.iter().position(|end| *end == chosen_end).unwrap();
            prop_assert_eq!(variants.as_slice()[first_best].witness_amount, chosen.witness_amount);
        }
    }
}
