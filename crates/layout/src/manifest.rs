use alloc::collections::BTreeSet;
use core::fmt;

use itertools::Itertools;
use smallvec::SmallVec;

/// Enumerated witness amounts, small enough to stay inline for the usual gadget ranges.
pub type WitnessOptions = SmallVec<[usize; 16]>;

// WITNESS AMOUNT
// ================================================================================================

/// The set of witness column counts a component accepts.
///
/// Components usually declare a range or a lower bound; intersecting with a
/// [`crate::GlobalRestriction`] turns every declaration into a bounded set.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WitnessAmount {
    /// An explicit set of accepted amounts.
    Set(BTreeSet<usize>),
    /// Every amount in `min..=max`.
    Range { min: usize, max: usize },
    /// Every amount greater than or equal to the bound.
    AtLeast(usize),
}

impl WitnessAmount {
    /// A single accepted amount.
    pub fn single(amount: usize) -> Self {
        Self::Set(BTreeSet::from([amount]))
    }

    /// The inclusive range `min..=max`.
    pub fn range(min: usize, max: usize) -> Self {
        Self::Range { min, max }
    }

    /// An explicit set of amounts.
    pub fn set(amounts: impl IntoIterator<Item = usize>) -> Self {
        Self::Set(amounts.into_iter().collect())
    }

    /// The empty set.
    pub fn empty() -> Self {
        Self::Set(BTreeSet::new())
    }

    /// Returns true if `amount` is accepted.
    pub fn contains(&self, amount: usize) -> bool {
        match self {
            Self::Set(set) => set.contains(&amount),
            Self::Range { min, max } => (*min..=*max).contains(&amount),
            Self::AtLeast(min) => amount >= *min,
        }
    }

    /// Returns true if no amount is accepted.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Set(set) => set.is_empty(),
            Self::Range { min, max } => min > max,
            Self::AtLeast(_) => false,
        }
    }

    /// Enumerates the accepted amounts in ascending order, or `None` if the set is unbounded.
    pub fn options(&self) -> Option<WitnessOptions> {
        match self {
            Self::Set(set) => Some(set.iter().copied().collect()),
            Self::Range { min, max } => Some((*min..=*max).collect()),
            Self::AtLeast(_) => None,
        }
    }

    /// Returns the amounts accepted by both `self` and `other`.
    ///
    /// The result never contains an amount missing from either operand.
    pub fn intersect(&self, other: &Self) -> Self {
        use WitnessAmount::*;

        match (self, other) {
            (Set(lhs), Set(rhs)) => Set(lhs.intersection(rhs).copied().collect()),
            (Set(set), other) | (other, Set(set)) => {
                Set(set.iter().copied().filter(|amount| other.contains(*amount)).collect())
            },
            (Range { min: a_min, max: a_max }, Range { min: b_min, max: b_max }) => {
                Self::normalized_range(*a_min.max(b_min), *a_max.min(b_max))
            },
            (Range { min, max }, AtLeast(bound)) | (AtLeast(bound), Range { min, max }) => {
                Self::normalized_range((*min).max(*bound), *max)
            },
            (AtLeast(lhs), AtLeast(rhs)) => AtLeast(*lhs.max(rhs)),
        }
    }

    fn normalized_range(min: usize, max: usize) -> Self {
        if min > max { Self::empty() } else { Self::Range { min, max } }
    }
}

impl fmt::Display for WitnessAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set(set) => write!(f, "{{{}}}", set.iter().format(", ")),
            Self::Range { min, max } => write!(f, "[{min}, {max}]"),
            Self::AtLeast(min) => write!(f, "[{min}, inf)"),
        }
    }
}

// MANIFEST
// ================================================================================================

/// The capability surface a component declares: which witness widths it can be laid out with
/// and whether it needs a constant column.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Manifest {
    pub witness_amount: WitnessAmount,
    pub constant_required: bool,
}

impl Manifest {
    pub fn new(witness_amount: WitnessAmount, constant_required: bool) -> Self {
        Self { witness_amount, constant_required }
    }

    /// Returns true if at least one witness amount remains acceptable.
    pub fn is_satisfiable(&self) -> bool {
        !self.witness_amount.is_empty()
    }

    /// Intersects the witness options and ORs the constant requirement.
    ///
    /// The result may be unsatisfiable; callers must check [`Self::is_satisfiable`].
    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            witness_amount: self.witness_amount.intersect(&other.witness_amount),
            constant_required: self.constant_required || other.constant_required,
        }
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn witness_amount_strategy() -> impl Strategy<Value = WitnessAmount> {
        prop_oneof![
            prop::collection::btree_set(0usize..24, 0..8).prop_map(WitnessAmount::Set),
            (0usize..24, 0usize..24).prop_map(|(min, max)| WitnessAmount::range(min, max)),
            (0usize..24).prop_map(WitnessAmount::AtLeast),
        ]
    }

    fn manifest_strategy() -> impl Strategy<Value = Manifest> {
        (witness_amount_strategy(), any::<bool>())
            .prop_map(|(witness_amount, constant_required)| Manifest::new(witness_amount, constant_required))
    }

    #[test]
    fn bounded_intersection_enumerates_common_options() {
        let declared = Manifest::new(WitnessAmount::set([3, 4, 6]), false);
        let restriction = Manifest::new(WitnessAmount::range(1, 5), false);

        let effective = declared.intersect(&restriction);
        assert!(effective.is_satisfiable());
        assert_eq!(effective.witness_amount.options().unwrap().as_slice(), &[3, 4]);
    }

    #[test]
    fn lower_bound_is_clamped_by_range() {
        let declared = WitnessAmount::AtLeast(3);
        let effective = declared.intersect(&WitnessAmount::range(1, 5));
        assert_eq!(effective, WitnessAmount::range(3, 5));
        assert_eq!(declared.options(), None);
    }

    #[test]
    fn disjoint_ranges_are_unsatisfiable() {
        let declared = Manifest::new(WitnessAmount::AtLeast(16), true);
        let restriction = Manifest::new(WitnessAmount::range(1, 15), false);

        let effective = declared.intersect(&restriction);
        assert!(!effective.is_satisfiable());
        assert!(effective.constant_required);
        assert_eq!(effective.witness_amount.options().unwrap().len(), 0);
    }

    proptest! {
        #[test]
        fn intersection_never_widens(lhs in manifest_strategy(), rhs in manifest_strategy()) {
            let result = lhs.intersect(&rhs);
            for amount in 0..32 {
                let expected = lhs.witness_amount.contains(amount) && rhs.witness_amount.contains(amount);
                prop_assert_eq!(result.witness_amount.contains(amount), expected);
            }
            prop_assert_eq!(result.constant_required, lhs.constant_required || rhs.constant_required);
        }

        #[test]
        fn intersection_is_associative(
            a in manifest_strategy(),
            b in manifest_strategy(),
            c in manifest_strategy(),
        ) {
            let left = a.intersect(&b).intersect(&c);
            let right = a.intersect(&b.intersect(&c));
            for amount in 0..32 {
                prop_assert_eq!(left.witness_amount.contains(amount), right.witness_amount.contains(amount));
            }
            prop_assert_eq!(left.is_satisfiable(), right.is_satisfiable());
        }

        #[test]
        fn unsatisfiable_operand_absorbs(manifest in manifest_strategy()) {
            let unsatisfiable = Manifest::new(WitnessAmount::empty(), false);
            prop_assert!(!manifest.intersect(&unsatisfiable).is_satisfiable());
            prop_assert!(!unsatisfiable.intersect(&manifest).is_satisfiable());
        }
    }
}
