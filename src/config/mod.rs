use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

/// Prefix shared by every environment variable the application reads
pub const ENV_PREFIX: &str = "CLIENT_DIRECTORY_";

/// Configuration for the application
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Number of synthetic clients created at startup
    #[serde(default = "default_seed_count")]
    pub seed_count: usize,

    /// Fixed RNG seed; random when unset
    #[serde(default)]
    pub rng_seed: Option<u64>,

    /// Domain used for generated email addresses
    #[serde(default = "default_email_domain")]
    pub email_domain: String,
}

fn default_seed_count() -> usize {
    100
}

fn default_email_domain() -> String {
    "api.doc".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed_count: default_seed_count(),
            rng_seed: None,
            email_domain: default_email_domain(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize `CLIENT_DIRECTORY_*` variables into Config struct
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenv().ok();

        // Parse environment variables into Config struct
        let config = envy::prefixed(ENV_PREFIX).from_env::<Config>()?;

        Ok(config)
    }

    /// Apply command line overrides on top of the environment
    pub fn with_overrides(mut self, seed_count: Option<usize>, rng_seed: Option<u64>) -> Self {
        if let Some(count) = seed_count {
            self.seed_count = count;
        }
        if rng_seed.is_some() {
            self.rng_seed = rng_seed;
        }
        self
    }
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config> {
    let config = Config::load()?;

    tracing::debug!(?config, "configuration loaded");

    Ok(config)
}
