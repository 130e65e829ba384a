use crate::core::{Pipeline, TowerPlan};
use crate::utils::error::Result;

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub plan: TowerPlan,
    pub output_path: String,
}

pub struct TowerEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> TowerEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Fetch, build, write.
    ///
    /// A failed fetch is logged and yields `Ok(None)`: nothing gets built, and
    /// the caller decides whether that matters. Build and write errors propagate.
    pub async fn run(&self) -> Result<Option<BuildOutput>> {
        tracing::info!("Fetching standards...");
        let records = match self.pipeline.extract().await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("Fetch failed: {} (Category: {:?})", e, e.category());
                tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
                return Ok(None);
            }
        };

        tracing::info!("Building tower plan from {} records...", records.len());
        let plan = self.pipeline.transform(records).await?;
        tracing::info!("Planned {} blocks", plan.len());

        let output_path = self.pipeline.load(&plan).await?;
        tracing::info!("Plan saved to: {}", output_path);

        Ok(Some(BuildOutput { plan, output_path }))
    }
}
