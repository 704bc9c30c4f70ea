//! Effective manifests: what a component declares, narrowed by the global restriction.

use alloc::collections::BTreeMap;
use core::{any::TypeId, fmt, marker::PhantomData, ops::Range};

use crate::{
    ArithmetizationParams, ComponentManifest, GlobalRestriction, LayoutError, Manifest,
    WitnessVariant, WitnessVariants,
};

// MANIFEST CACHE
// ================================================================================================

/// Effective manifests, computed once per `(component type, parameter set)`.
#[derive(Debug, Default, Clone)]
pub struct ManifestCache {
    manifests: BTreeMap<(TypeId, ArithmetizationParams), Manifest>,
}

impl ManifestCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a reader over the effective manifest of `C`.
    ///
    /// Fails with [`LayoutError::UnsatisfiableManifest`] if no witness amount declared by `C`
    /// fits within `restriction`.
    pub fn reader<C: ComponentManifest>(
        &mut self,
        params: ArithmetizationParams,
        restriction: &GlobalRestriction,
    ) -> Result<ManifestReader<C>, LayoutError> {
        let manifest = self
            .manifests
            .entry((TypeId::of::<C>(), params))
            .or_insert_with(|| {
                let effective = C::manifest().intersect(&restriction.as_manifest());
                log::debug!(
                    target: "placement",
                    "effective manifest of {}: witness amounts {}, constant required: {}",
                    C::NAME,
                    effective.witness_amount,
                    effective.constant_required
                );
                effective
            });

        if !manifest.is_satisfiable() {
            return Err(LayoutError::UnsatisfiableManifest { component: C::NAME });
        }
        Ok(ManifestReader::new(manifest.clone()))
    }

    pub fn len(&self) -> usize {
        self.manifests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.manifests.is_empty()
    }
}

// MANIFEST READER
// ================================================================================================

/// Answers placement questions for one component type under one parameter set.
pub struct ManifestReader<C: ComponentManifest> {
    manifest: Manifest,
    _component: PhantomData<fn() -> C>,
}

impl<C: ComponentManifest> fmt::Debug for ManifestReader<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManifestReader")
            .field("component", &C::NAME)
            .field("manifest", &self.manifest)
            .finish()
    }
}

impl<C: ComponentManifest> Clone for ManifestReader<C> {
    fn clone(&self) -> Self {
        Self::new(self.manifest.clone())
    }
}

impl<C: ComponentManifest> ManifestReader<C> {
    fn new(manifest: Manifest) -> Self {
        Self { manifest, _component: PhantomData }
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Every admissible width with the row count the component needs for it, in ascending
    /// width order.
    pub fn witness_variants(&self, params: &C::Params) -> Result<WitnessVariants, LayoutError> {
        let options = self.manifest.witness_amount.options().unwrap_or_default();
        let variants = WitnessVariants::new(
            C::NAME,
            options
                .into_iter()
                .map(|width| WitnessVariant::new(width, C::rows_amount(width, params))),
        );
        if variants.is_empty() {
            return Err(LayoutError::UnsatisfiableManifest { component: C::NAME });
        }
        Ok(variants)
    }

    /// Number of constant columns an invocation consumes.
    pub fn constant_amount(&self) -> usize {
        usize::from(self.manifest.constant_required)
    }

    /// Constant columns handed to an invocation whose constants start at `start`.
    pub fn constants(&self, start: usize) -> Range<usize> {
        start..start + self.constant_amount()
    }

    /// Public input cells an invocation appends, relative to its first one.
    pub fn public_inputs(&self) -> Range<usize> {
        0..C::PUBLIC_INPUT_AMOUNT
    }
}

// TESTS
// ================================================================================================
