use clap::Parser;
use jenga_stack::core::spawner;
use jenga_stack::domain::model::BlockDetails;
use jenga_stack::domain::ports::{ConfigProvider, DetailView};
use jenga_stack::utils::{logger, validation::Validate};
use jenga_stack::{
    BlockInspector, CliConfig, EtlError, GradeGroup, LocalStorage, StandardsPipeline, TowerEngine,
    World,
};

/// Prints the selected block's record to the terminal.
struct ConsoleDetailView;

impl DetailView for ConsoleDetailView {
    fn set_details(&mut self, details: &BlockDetails) {
        println!("🔎 {}", details.standard_id);
        println!("   Grade:   {}", details.grade);
        println!("   Domain:  {}", details.domain);
        println!("   Cluster: {}", details.cluster);
        println!("   {}", details.standard_description);
    }

    fn set_visible(&mut self, visible: bool) {
        tracing::debug!("Detail panel visible: {}", visible);
    }
}

fn fail(e: &EtlError) -> ! {
    tracing::error!(
        "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.severity().exit_code());
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting jenga-stack CLI");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        fail(&e);
    }

    let delay = config.stack_delay();
    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = match StandardsPipeline::new(storage, config.clone()) {
        Ok(pipeline) => pipeline,
        Err(e) => fail(&e),
    };
    let engine = TowerEngine::new(pipeline);

    let output = match engine.run().await {
        Ok(Some(output)) => output,
        Ok(None) => {
            println!("⚠️ No standards were fetched, so no tower was built");
            return Ok(());
        }
        Err(e) => fail(&e),
    };

    println!("✅ Tower plan built: {} blocks", output.plan.len());
    for group in GradeGroup::ALL {
        println!("   {}: {} blocks", group, output.plan.group_sizes[group.index()]);
    }
    if output.plan.dropped > 0 {
        println!("   skipped {} records without a usable grade", output.plan.dropped);
    }
    println!("📁 Output saved to: {}", output.output_path);

    // 逐塊生成，Ctrl-C 可中斷
    let mut world = World::new();
    tokio::select! {
        spawned = spawner::spawn_paced(&mut world, output.plan.blocks.iter().cloned(), delay) => {
            if let Err(e) = spawned {
                fail(&e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Interrupted while stacking; discarding the partial tower");
            return Ok(());
        }
    }

    if let Some(standard_id) = &config.inspect {
        match world.find_by_standard_id(standard_id) {
            Some(handle) => {
                let mut inspector = BlockInspector::new(ConsoleDetailView);
                if let Err(e) = inspector.select(&mut world, handle) {
                    fail(&e);
                }
            }
            None => println!("⚠️ No block with standard id {}", standard_id),
        }
    }

    if config.test_stack {
        match world.test_stack() {
            Ok(evaluation) => {
                println!(
                    "🧱 Test my stack: {} glass blocks removed, {} blocks released",
                    evaluation.to_remove.len(),
                    evaluation.to_release.len()
                );
            }
            Err(e) => fail(&e),
        }
    }

    Ok(())
}
