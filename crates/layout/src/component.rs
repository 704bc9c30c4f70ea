use crate::Manifest;

/// Static description of a component type, as seen by the placement machinery.
///
/// Implementors declare which witness widths they accept and how many rows each width costs.
/// The row count may depend on per-invocation parameters (e.g. the number of bits being
/// decomposed), which is why manifests are cached per type while row counts are not.
pub trait ComponentManifest: 'static {
    /// Name used in diagnostics and gate records.
    const NAME: &'static str;

    /// Public input cells the component appends per invocation.
    const PUBLIC_INPUT_AMOUNT: usize = 0;

    /// Invocation parameters that influence the row count.
    type Params: ?Sized;

    /// The manifest as declared by the component, before any global restriction applies.
    fn manifest() -> Manifest;

    /// Rows needed when laid out with `witness_amount` columns.
    fn rows_amount(witness_amount: usize, params: &Self::Params) -> usize;
}
