pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

pub const DEFAULT_ENDPOINT: &str =
    "https://ga1vqcu3o1.execute-api.us-east-1.amazonaws.com/Assessment/stack";

#[cfg(feature = "cli")]
mod cli_config {
    use super::DEFAULT_ENDPOINT;
    use crate::core::ConfigProvider;
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate, MAX_STACK_DELAY_MS};
    use clap::Parser;
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "jenga-stack")]
    #[command(about = "Fetch curriculum standards and stack them into grade towers")]
    pub struct CliConfig {
        #[arg(long, default_value = DEFAULT_ENDPOINT)]
        pub api_endpoint: String,

        #[arg(long, default_value = "./output")]
        pub output_path: String,

        #[arg(long, value_delimiter = ',', default_value = "json")]
        pub output_formats: Vec<String>,

        #[arg(long, default_value = "0", help = "Pause between block placements")]
        pub stack_delay_ms: u64,

        #[arg(long, default_value = "30")]
        pub timeout_seconds: u64,

        #[arg(long, help = "Remove glass blocks and release the rest after building")]
        pub test_stack: bool,

        #[arg(long, value_name = "STANDARD_ID", help = "Show the details of one block")]
        pub inspect: Option<String>,

        #[arg(long, help = "Emit logs as JSON lines")]
        pub json_logs: bool,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl ConfigProvider for CliConfig {
        fn api_endpoint(&self) -> &str {
            &self.api_endpoint
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn output_formats(&self) -> &[String] {
            &self.output_formats
        }

        fn request_timeout(&self) -> Duration {
            Duration::from_secs(self.timeout_seconds)
        }

        fn stack_delay(&self) -> Duration {
            Duration::from_millis(self.stack_delay_ms)
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validation::validate_url("api_endpoint", &self.api_endpoint)?;
            validation::validate_path("output_path", &self.output_path)?;
            validation::validate_output_formats("output_formats", &self.output_formats)?;
            validation::validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
            validation::validate_range("stack_delay_ms", self.stack_delay_ms, 0, MAX_STACK_DELAY_MS)
        }
    }

}
