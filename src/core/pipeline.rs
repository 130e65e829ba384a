use crate::core::tower;
use crate::core::{ConfigProvider, Pipeline, Record, Storage, TowerPlan};
use crate::domain::model::{GradeGroup, PlacedBlock};
use crate::utils::error::{EtlError, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use std::path::Path;

pub const JSON_FILENAME: &str = "tower_plan.json";
pub const CSV_FILENAME: &str = "tower_plan.csv";

/// Fetches standards over HTTP, builds the tower plan and writes it out.
pub struct StandardsPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> StandardsPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            storage,
            config,
            client,
        })
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

#[derive(Serialize)]
struct PlanDocument<'a> {
    generated_at: DateTime<Utc>,
    source: &'a str,
    group_sizes: GroupSizes,
    dropped: usize,
    blocks: &'a [PlacedBlock],
}

#[derive(Serialize)]
struct GroupSizes {
    grade_6: usize,
    grade_7: usize,
    grade_8: usize,
}

#[derive(Serialize)]
struct CsvRow<'a> {
    grade_group: u8,
    standard_id: &'a str,
    domain: &'a str,
    cluster: &'a str,
    mastery: i32,
    material: &'a str,
    x: f32,
    y: f32,
    z: f32,
    yaw_degrees: f32,
}

fn render_json(plan: &TowerPlan, source: &str) -> Result<Vec<u8>> {
    let document = PlanDocument {
        generated_at: Utc::now(),
        source,
        group_sizes: GroupSizes {
            grade_6: plan.group_sizes[GradeGroup::Sixth.index()],
            grade_7: plan.group_sizes[GradeGroup::Seventh.index()],
            grade_8: plan.group_sizes[GradeGroup::Eighth.index()],
        },
        dropped: plan.dropped,
        blocks: &plan.blocks,
    };
    Ok(serde_json::to_vec_pretty(&document)?)
}

fn render_csv(plan: &TowerPlan) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for block in &plan.blocks {
        writer.serialize(CsvRow {
            grade_group: block.group.level(),
            standard_id: &block.record.standard_id,
            domain: &block.record.domain,
            cluster: &block.record.cluster,
            mastery: block.record.mastery,
            material: block.material_tier.map(|t| t.name()).unwrap_or(""),
            x: block.position.x,
            y: block.position.y,
            z: block.position.z,
            yaw_degrees: block.yaw_degrees(),
        })?;
    }
    writer.into_inner().map_err(|e| EtlError::ProcessingError {
        message: format!("Failed to flush CSV output: {}", e),
    })
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for StandardsPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Record>> {
        let endpoint = self.config.api_endpoint();
        tracing::debug!("Making API request to: {}", endpoint);

        let mut request = self.client.get(endpoint);
        for (name, value) in self.config.request_headers() {
            request = request.header(name, value);
        }

        let response = request.send().await?;
        tracing::debug!("API response status: {}", response.status());
        let response = response.error_for_status()?;

        let body = response.text().await?;
        let records: Vec<Record> = serde_json::from_str(&body)?;

        tracing::info!("Fetched {} standards records", records.len());
        Ok(records)
    }

    async fn transform(&self, records: Vec<Record>) -> Result<TowerPlan> {
        let plan = tower::build(records);

        for group in GradeGroup::ALL {
            tracing::info!("{}: {} blocks", group, plan.group_sizes[group.index()]);
        }
        if plan.dropped > 0 {
            tracing::warn!("{} records had no usable grade and were left out", plan.dropped);
        }

        Ok(plan)
    }

    async fn load(&self, plan: &TowerPlan) -> Result<String> {
        let mut written = Vec::new();

        for format in self.config.output_formats() {
            let (filename, data) = match format.as_str() {
                "json" => (JSON_FILENAME, render_json(plan, self.config.api_endpoint())?),
                "csv" => (CSV_FILENAME, render_csv(plan)?),
                other => {
                    return Err(EtlError::InvalidConfigValueError {
                        field: "output_formats".to_string(),
                        value: other.to_string(),
                        reason: "Unsupported format. Valid formats: json, csv".to_string(),
                    })
                }
            };

            self.storage.write_file(filename, &data).await?;
            let full_path = Path::new(self.config.output_path()).join(filename);
            tracing::debug!("Wrote {} bytes to {}", data.len(), full_path.display());
            written.push(full_path.display().to_string());
        }

        Ok(written.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::MaterialTier;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                EtlError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct TestConfig {
        formats: Vec<String>,
    }

    impl ConfigProvider for TestConfig {
        fn api_endpoint(&self) -> &str {
            "http://localhost/stack"
        }

        fn output_path(&self) -> &str {
            "./out"
        }

        fn output_formats(&self) -> &[String] {
            &self.formats
        }

        fn request_timeout(&self) -> Duration {
            Duration::from_secs(5)
        }

        fn stack_delay(&self) -> Duration {
            Duration::ZERO
        }
    }

    fn sample_records() -> Vec<Record> {
        let json = serde_json::json!([
            {"id": 1, "subject": "Math", "grade": "7th Grade", "mastery": 0,
             "domainid": "RP", "domain": "Ratios", "cluster": "Analyze",
             "standardid": "7.RP.A.1", "standarddescription": "Compute unit rates"},
            {"id": 2, "subject": "Math", "grade": "6th Grade", "mastery": 2,
             "domainid": "G", "domain": "Geometry", "cluster": "Solve",
             "standardid": "6.G.A.1", "standarddescription": "Find area"}
        ]);
        serde_json::from_value(json).unwrap()
    }

    fn pipeline(formats: &[&str]) -> (StandardsPipeline<MockStorage, TestConfig>, MockStorage) {
        let storage = MockStorage::default();
        let config = TestConfig {
            formats: formats.iter().map(|f| f.to_string()).collect(),
        };
        (StandardsPipeline::new(storage.clone(), config).unwrap(), storage)
    }

    #[tokio::test]
    async fn test_transform_builds_plan() {
        let (pipeline, _) = pipeline(&["json"]);
        let plan = pipeline.transform(sample_records()).await.unwrap();

        assert_eq!(plan.group_sizes, [1, 1, 0]);
        assert_eq!(plan.blocks[0].record.standard_id, "6.G.A.1");
        assert_eq!(plan.blocks[1].material_tier, Some(MaterialTier::Glass));
    }

    #[tokio::test]
    async fn test_load_writes_json_and_csv() {
        let (pipeline, storage) = pipeline(&["json", "csv"]);
        let plan = pipeline.transform(sample_records()).await.unwrap();

        let output = pipeline.load(&plan).await.unwrap();
        assert!(output.contains(JSON_FILENAME));
        assert!(output.contains(CSV_FILENAME));

        let json = storage.read_file(JSON_FILENAME).await.unwrap();
        let document: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(document["group_sizes"]["grade_6"], 1);
        assert_eq!(document["blocks"].as_array().unwrap().len(), 2);
        assert_eq!(document["source"], "http://localhost/stack");

        let csv = storage.read_file(CSV_FILENAME).await.unwrap();
        let csv = String::from_utf8(csv).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "grade_group,standard_id,domain,cluster,mastery,material,x,y,z,yaw_degrees"
        );
        assert!(lines.next().unwrap().starts_with("6,6.G.A.1,Geometry,Solve,2,stone,0.0,0.0,-30.0"));
        assert!(lines.next().unwrap().starts_with("7,7.RP.A.1,Ratios,Analyze,0,glass,0.0,0.0,0.0"));
    }

    #[tokio::test]
    async fn test_load_rejects_unknown_format() {
        let (pipeline, _) = pipeline(&["xml"]);
        let result = pipeline.load(&TowerPlan::default()).await;
        assert!(matches!(
            result,
            Err(EtlError::InvalidConfigValueError { .. })
        ));
    }
}
