//! Turns fetched records into a placement plan for all three towers.

use crate::core::classifier::classify;
use crate::core::layout::LayoutCursor;
use crate::domain::model::{GradeGroup, MaterialTier, PlacedBlock, Record, TowerPlan};

/// Builds the whole plan at once: grade 6 first, then 7, then 8.
pub fn build(records: Vec<Record>) -> TowerPlan {
    let total = records.len();
    let groups = classify(records);

    let mut group_sizes = [0; 3];
    for (size, group) in group_sizes.iter_mut().zip(&groups) {
        *size = group.len();
    }
    let placed: usize = group_sizes.iter().sum();

    TowerPlan {
        blocks: PlacementStream::from_groups(groups).collect(),
        group_sizes,
        dropped: total - placed,
    }
}

/// Same placements as [`build`], one block at a time.
///
/// Lets the caller pace the spawn. Dropping the stream part way simply
/// abandons the rest of the placements.
pub fn stream(records: Vec<Record>) -> PlacementStream {
    PlacementStream::from_groups(classify(records))
}

struct ActiveGroup {
    group: GradeGroup,
    records: std::vec::IntoIter<Record>,
    cursor: LayoutCursor,
}

pub struct PlacementStream {
    pending: std::vec::IntoIter<(GradeGroup, Vec<Record>)>,
    active: Option<ActiveGroup>,
}

impl PlacementStream {
    fn from_groups(groups: [Vec<Record>; 3]) -> Self {
        let pending: Vec<_> = GradeGroup::ALL.into_iter().zip(groups).collect();
        Self {
            pending: pending.into_iter(),
            active: None,
        }
    }
}

impl Iterator for PlacementStream {
    type Item = PlacedBlock;

    fn next(&mut self) -> Option<PlacedBlock> {
        loop {
            if let Some(active) = self.active.as_mut() {
                if let Some(record) = active.records.next() {
                    let (position, rotation) = active.cursor.next_slot();
                    return Some(PlacedBlock {
                        material_tier: MaterialTier::from_mastery(record.mastery),
                        record,
                        group: active.group,
                        position,
                        rotation,
                    });
                }
            }

            let (group, records) = self.pending.next()?;
            self.active = Some(ActiveGroup {
                group,
                records: records.into_iter(),
                cursor: LayoutCursor::new(group.offset()),
            });
        }
    }
}
