//! Hands placements to a scene host one at a time.

use crate::domain::model::{BlockHandle, PlacedBlock};
use crate::domain::ports::SceneHost;
use crate::utils::error::Result;
use std::time::Duration;

/// Spawns every block as fixed, sleeping `delay` after each one.
///
/// Dropping the returned future stops the build; placements not yet handed
/// over are discarded.
pub async fn spawn_paced<H, I>(host: &mut H, blocks: I, delay: Duration) -> Result<Vec<BlockHandle>>
where
    H: SceneHost,
    I: IntoIterator<Item = PlacedBlock>,
{
    let mut handles = Vec::new();

    for block in blocks {
        let handle = host.spawn(&block);
        host.set_fixed(handle, true)?;
        tracing::trace!(
            "Spawned {} at {:?} as {}",
            block.record.standard_id,
            block.position,
            handle
        );
        handles.push(handle);

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    tracing::debug!("Spawned {} blocks", handles.len());
    Ok(handles)
}
