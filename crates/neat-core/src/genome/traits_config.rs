use crate::traits::TraitParamMap;

/// The trait parameter maps a genome needs at hand for any trait operation:
/// one map per level traits can be attached at (neuron, link, genome).
/// Bundled together so mutation/mate call sites don't have to thread three
/// separate arguments through every operator.
#[derive(Debug, Clone, Default)]
pub struct TraitConfig {
    pub neuron: TraitParamMap,
    pub link: TraitParamMap,
    pub genome: TraitParamMap,
}
