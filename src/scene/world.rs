use crate::core::evaluator::{self, PlacedBlockHandle, StackEvaluation};
use crate::domain::model::{BlockHandle, MaterialTier, PlacedBlock};
use crate::domain::ports::SceneHost;
use crate::utils::error::{EtlError, Result};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub block: PlacedBlock,
    /// `None` when mastery had no tier; renders with the host's fallback.
    pub style: Option<MaterialTier>,
    /// Kinematic: physics leaves it where it was placed.
    pub fixed: bool,
    pub highlighted: bool,
}

/// Explicit scene context. Everything spawned lives here until destroyed.
#[derive(Debug, Default)]
pub struct World {
    objects: BTreeMap<BlockHandle, SceneObject>,
    next_id: usize,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn object(&self, handle: BlockHandle) -> Option<&SceneObject> {
        self.objects.get(&handle)
    }

    /// Live objects in spawn order.
    pub fn objects(&self) -> impl Iterator<Item = (BlockHandle, &SceneObject)> {
        self.objects.iter().map(|(h, o)| (*h, o))
    }

    pub fn find_by_standard_id(&self, standard_id: &str) -> Option<BlockHandle> {
        self.objects()
            .find(|(_, o)| o.block.record.standard_id == standard_id)
            .map(|(h, _)| h)
    }

    pub fn live_blocks(&self) -> Vec<PlacedBlockHandle> {
        self.objects()
            .map(|(handle, o)| PlacedBlockHandle {
                handle,
                material_tier: o.block.material_tier,
            })
            .collect()
    }

    /// Removes the glass blocks and unlocks everything left standing.
    pub fn test_stack(&mut self) -> Result<StackEvaluation<PlacedBlockHandle>> {
        let evaluation = evaluator::evaluate(&self.live_blocks());

        for block in &evaluation.to_remove {
            self.destroy(block.handle)?;
        }
        for block in &evaluation.to_release {
            self.set_fixed(block.handle, false)?;
        }

        tracing::info!(
            "Stack test: removed {} glass blocks, released {}",
            evaluation.to_remove.len(),
            evaluation.to_release.len()
        );
        Ok(evaluation)
    }

    fn object_mut(&mut self, handle: BlockHandle) -> Result<&mut SceneObject> {
        self.objects
            .get_mut(&handle)
            .ok_or(EtlError::UnknownBlock(handle))
    }
}

impl SceneHost for World {
    fn spawn(&mut self, block: &PlacedBlock) -> BlockHandle {
        let handle = BlockHandle(self.next_id);
        self.next_id += 1;
        self.objects.insert(
            handle,
            SceneObject {
                block: block.clone(),
                style: block.material_tier,
                fixed: true,
                highlighted: false,
            },
        );
        handle
    }

    fn set_fixed(&mut self, handle: BlockHandle, fixed: bool) -> Result<()> {
        self.object_mut(handle)?.fixed = fixed;
        Ok(())
    }

    fn set_highlighted(&mut self, handle: BlockHandle, highlighted: bool) -> Result<()> {
        self.object_mut(handle)?.highlighted = highlighted;
        Ok(())
    }

    fn destroy(&mut self, handle: BlockHandle) -> Result<()> {
        self.objects
            .remove(&handle)
            .map(|_| ())
            .ok_or(EtlError::UnknownBlock(handle))
    }

    fn block(&self, handle: BlockHandle) -> Option<&PlacedBlock> {
        self.objects.get(&handle).map(|o| &o.block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tower;
    use crate::domain::model::Record;

    fn record(id: i64, mastery: i32) -> Record {
        Record {
            id,
            subject: "Math".to_string(),
            grade: "8th Grade".to_string(),
            mastery,
            domain_id: String::new(),
            domain: "Functions".to_string(),
            cluster: "Define".to_string(),
            standard_id: format!("8.F.{}", id),
            standard_description: String::new(),
        }
    }

    fn world_with(masteries: &[i32]) -> World {
        let mut world = World::new();
        let records = masteries
            .iter()
            .enumerate()
            .map(|(i, &m)| record(i as i64, m))
            .collect();
        for block in tower::build(records).blocks {
            world.spawn(&block);
        }
        world
    }

    #[test]
    fn test_spawn_starts_fixed_with_tier_style() {
        let world = world_with(&[0, 2, 9]);
        let styles: Vec<_> = world.objects().map(|(_, o)| o.style).collect();

        assert_eq!(
            styles,
            vec![Some(MaterialTier::Glass), Some(MaterialTier::Stone), None]
        );
        assert!(world.objects().all(|(_, o)| o.fixed && !o.highlighted));
    }

    #[test]
    fn test_stack_test_removes_glass_and_releases_rest() {
        let mut world = world_with(&[0, 1, 0, 2, 1]);

        let evaluation = world.test_stack().unwrap();

        assert_eq!(evaluation.to_remove.len(), 2);
        assert_eq!(evaluation.to_release.len(), 3);
        assert_eq!(world.len(), 3);
        assert!(world
            .objects()
            .all(|(_, o)| !o.fixed && o.style != Some(MaterialTier::Glass)));
    }

    #[test]
    fn test_destroy_unknown_handle_errors() {
        let mut world = world_with(&[1]);
        let handle = world.find_by_standard_id("8.F.0").unwrap();

        world.destroy(handle).unwrap();

        assert!(matches!(world.destroy(handle), Err(EtlError::UnknownBlock(h)) if h == handle));
        assert!(world.set_fixed(handle, false).is_err());
        assert!(world.block(handle).is_none());
    }

    #[test]
    fn test_stack_test_on_empty_world() {
        let mut world = World::new();
        let evaluation = world.test_stack().unwrap();
        assert!(evaluation.to_remove.is_empty());
        assert!(evaluation.to_release.is_empty());
    }
}
