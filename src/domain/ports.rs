use crate::domain::model::{BlockDetails, BlockHandle, PlacedBlock, Record, TowerPlan};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn request_timeout(&self) -> Duration;
    /// Pause between successive block placements. Zero spawns everything at once.
    fn stack_delay(&self) -> Duration;

    fn request_headers(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Record>>;
    async fn transform(&self, records: Vec<Record>) -> Result<TowerPlan>;
    async fn load(&self, plan: &TowerPlan) -> Result<String>;
}

/// Whatever owns the visual/physical objects. Spawned objects start fixed.
pub trait SceneHost {
    fn spawn(&mut self, block: &PlacedBlock) -> BlockHandle;
    fn set_fixed(&mut self, handle: BlockHandle, fixed: bool) -> Result<()>;
    fn set_highlighted(&mut self, handle: BlockHandle, highlighted: bool) -> Result<()>;
    fn destroy(&mut self, handle: BlockHandle) -> Result<()>;
    fn block(&self, handle: BlockHandle) -> Option<&PlacedBlock>;
}

/// The panel that shows a clicked block's record.
pub trait DetailView {
    fn set_details(&mut self, details: &BlockDetails);
    fn set_visible(&mut self, visible: bool);
}
