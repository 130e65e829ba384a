//! Alternating-layer stacking, three blocks per layer.
//!
//! Even layers run along X with identity rotation; odd layers are turned 90°
//! about Y and run along Z, the way a real Jenga tower is built.

use crate::domain::model::Record;
use glam::{Quat, Vec3};
use std::f32::consts::FRAC_PI_2;

pub const BLOCK_SPACING: f32 = 5.0;
pub const LAYER_HEIGHT: f32 = 3.0;
pub const BLOCKS_PER_LAYER: usize = 3;

/// Yaw applied to blocks in turned layers.
pub fn turned_rotation() -> Quat {
    Quat::from_rotation_y(FRAC_PI_2)
}

/// Walks the slots of one tower. A fresh cursor is needed per tower; the
/// counters never carry over between groups.
#[derive(Debug, Clone)]
pub struct LayoutCursor {
    offset: Vec3,
    count: usize,
    height: f32,
    turned: bool,
}

impl LayoutCursor {
    pub fn new(offset: Vec3) -> Self {
        Self {
            offset,
            count: 0,
            height: 0.0,
            turned: false,
        }
    }

    /// Position and rotation of the next slot, then advances.
    pub fn next_slot(&mut self) -> (Vec3, Quat) {
        debug_assert!(self.count < BLOCKS_PER_LAYER);

        let (local, rotation) = if self.turned {
            let z = match self.count {
                0 => BLOCK_SPACING,
                1 => 0.0,
                _ => -BLOCK_SPACING,
            };
            (Vec3::new(BLOCK_SPACING, self.height, z), turned_rotation())
        } else {
            (
                Vec3::new(self.count as f32 * BLOCK_SPACING, self.height, 0.0),
                Quat::IDENTITY,
            )
        };

        self.count += 1;
        if self.count >= BLOCKS_PER_LAYER {
            self.count = 0;
            self.height += LAYER_HEIGHT;
            self.turned = !self.turned;
        }

        (local + self.offset, rotation)
    }
}

impl Iterator for LayoutCursor {
    type Item = (Vec3, Quat);

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_slot())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub record: Record,
    pub position: Vec3,
    pub rotation: Quat,
}

/// Lays out one tower in the given order. Never reorders.
pub fn layout(group: &[Record], offset: Vec3) -> Vec<Placement> {
    group
        .iter()
        .zip(LayoutCursor::new(offset))
        .map(|(record, (position, rotation))| Placement {
            record: record.clone(),
            position,
            rotation,
        })
        .collect()
}
