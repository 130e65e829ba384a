//! Decides what a "test my stack" run does to each live block.

use crate::domain::model::{BlockHandle, MaterialTier, PlacedBlock};

pub trait Tiered {
    fn material_tier(&self) -> Option<MaterialTier>;
}

impl Tiered for PlacedBlock {
    fn material_tier(&self) -> Option<MaterialTier> {
        self.material_tier
    }
}

impl<T: Tiered> Tiered for &T {
    fn material_tier(&self) -> Option<MaterialTier> {
        (*self).material_tier()
    }
}

/// A spawned block as the evaluator sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacedBlockHandle {
    pub handle: BlockHandle,
    pub material_tier: Option<MaterialTier>,
}

impl Tiered for PlacedBlockHandle {
    fn material_tier(&self) -> Option<MaterialTier> {
        self.material_tier
    }
}

/// Both lists keep input order and together cover every input block exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackEvaluation<B> {
    pub to_remove: Vec<B>,
    pub to_release: Vec<B>,
}

impl<B> Default for StackEvaluation<B> {
    fn default() -> Self {
        Self {
            to_remove: Vec::new(),
            to_release: Vec::new(),
        }
    }
}

/// Glass blocks are removed; everything else is unlocked for the physics to act on.
/// Says nothing about whether the tower then stands.
pub fn evaluate<B: Tiered + Clone>(blocks: &[B]) -> StackEvaluation<B> {
    let (to_remove, to_release): (Vec<B>, Vec<B>) = blocks
        .iter()
        .cloned()
        .partition(|b| b.material_tier() == Some(MaterialTier::Glass));
    StackEvaluation {
        to_remove,
        to_release,
    }
}
