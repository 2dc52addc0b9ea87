//! Configuration management for the intake assessment tools
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with CQM_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::PricingPolicy;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Pricing table; any field left out keeps its house default
    #[serde(default)]
    pub pricing: PricingPolicy,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Dashboard configuration
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when RUST_LOG is unset
    pub filter: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    /// How many recent rejections the quality summary lists
    pub recent_rejections: usize,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("CQM_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("logging.filter", "cqm_assess=info,coffee_intake=info")?
            .set_default("logging.json", false)?
            .set_default("dashboard.recent_rejections", 10)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CQM_ prefix)
            .add_source(
                Environment::with_prefix("CQM")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            pricing: PricingPolicy::default(),
            logging: LoggingConfig::default(),
            dashboard: DashboardConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "cqm_assess=info,coffee_intake=info".to_string(),
            json: false,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recent_rejections: 10,
        }
    }
}
