use clap::Parser;
use jenga_stack::core::spawner;
use jenga_stack::domain::ports::ConfigProvider;
use jenga_stack::utils::{logger, validation::Validate};
use jenga_stack::{LocalStorage, StandardsPipeline, TomlConfig, TowerEngine, World};

#[derive(Parser)]
#[command(name = "toml-tower")]
#[command(about = "Build the standards tower from a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "tower-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the stack test setting from config
    #[arg(long)]
    test_stack: Option<bool>,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    let verbose = args.verbose || config.verbose();
    if config.json_logs() {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.severity().exit_code());
    }

    display_config_summary(&config);

    if args.dry_run {
        println!("🔍 DRY RUN MODE - nothing fetched or written");
        return Ok(());
    }

    let test_stack = args.test_stack.unwrap_or_else(|| config.test_stack());
    let delay = config.stack_delay();

    let storage = LocalStorage::new(config.output_path().to_string());
    let engine = TowerEngine::new(StandardsPipeline::new(storage, config)?);

    let output = match engine.run().await {
        Ok(Some(output)) => output,
        Ok(None) => {
            println!("⚠️ No standards were fetched, so no tower was built");
            return Ok(());
        }
        Err(e) => {
            tracing::error!(
                "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.severity().exit_code());
        }
    };

    println!("✅ Tower plan built: {} blocks", output.plan.len());
    println!("📁 Output saved to: {}", output.output_path);

    let mut world = World::new();
    spawner::spawn_paced(&mut world, output.plan.blocks, delay).await?;

    if test_stack {
        let evaluation = world.test_stack()?;
        println!(
            "🧱 Test my stack: {} glass blocks removed, {} blocks released",
            evaluation.to_remove.len(),
            evaluation.to_release.len()
        );
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    println!("📋 Configuration Summary:");
    println!("  Tower: {}", config.tower.name);
    if let Some(description) = &config.tower.description {
        println!("  Description: {}", description);
    }
    println!("  Source: {}", config.api_endpoint());
    println!("  Timeout: {:?}", config.request_timeout());
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output_formats().join(", "));
    println!("  Stack delay: {:?}", config.stack_delay());
    println!("  Test stack: {}", config.test_stack());
    println!();
}
