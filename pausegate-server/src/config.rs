//! Server configuration
//!
//! Settings are read from the environment. The object store and the control
//! plane each pick a backend, falling back to local stand-ins when the
//! production settings are absent.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use pausegate_core::domain::PipelineSystemRegistry;

/// Where pause event records live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    S3 {
        bucket: String,
        region: String,
        /// Custom endpoint for S3-compatible services
        endpoint: Option<String>,
    },
    Fs {
        root: PathBuf,
    },
    Memory,
}

/// Which control plane pauses the pipelines
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlBackend {
    GoCd {
        url: String,
        username: String,
        password: String,
        timeout: Duration,
    },
    Log,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP API binds to
    pub bind_addr: String,

    pub store: StoreBackend,

    pub control: ControlBackend,

    /// YAML file mapping pipeline systems to their pipelines.
    /// The built-in registry is used when unset.
    pub systems_file: Option<PathBuf>,

    /// Run a reconciliation sweep before serving requests
    pub reconcile_on_start: bool,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Recognized environment variables:
    /// - PAUSEGATE_BIND_ADDR (default: 0.0.0.0:8080)
    /// - PAUSEGATE_STORE: s3 | fs | memory (default: s3 if PIPELINE_BUCKET_NAME is set, else memory)
    /// - PIPELINE_BUCKET_NAME, AWS_REGION (default: us-east-1), PAUSEGATE_S3_ENDPOINT
    /// - PAUSEGATE_FS_ROOT (default: ./pausegate-data)
    /// - PAUSEGATE_CONTROL: gocd | log (default: gocd if GOCD_SERVER_URL is set, else log)
    /// - GOCD_SERVER_URL, GOCD_USERNAME, GOCD_PASSWORD, GOCD_TIMEOUT (seconds, default: 30)
    /// - PIPELINE_SYSTEMS_FILE (optional)
    /// - PAUSEGATE_RECONCILE_ON_START (default: false)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Creates configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let bind_addr = var("PAUSEGATE_BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());

        let bucket = var("PIPELINE_BUCKET_NAME");
        let store_kind = var("PAUSEGATE_STORE").unwrap_or_else(|| {
            if bucket.is_some() { "s3" } else { "memory" }.to_string()
        });
        let store = match store_kind.to_lowercase().as_str() {
            "s3" => StoreBackend::S3 {
                bucket: bucket.context("PIPELINE_BUCKET_NAME must be set for the s3 store")?,
                region: var("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
                endpoint: var("PAUSEGATE_S3_ENDPOINT"),
            },
            "fs" => StoreBackend::Fs {
                root: var("PAUSEGATE_FS_ROOT")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("./pausegate-data")),
            },
            "memory" => StoreBackend::Memory,
            other => anyhow::bail!("Unknown PAUSEGATE_STORE '{}' (expected s3, fs or memory)", other),
        };

        let gocd_url = var("GOCD_SERVER_URL");
        let control_kind = var("PAUSEGATE_CONTROL").unwrap_or_else(|| {
            if gocd_url.is_some() { "gocd" } else { "log" }.to_string()
        });
        let control = match control_kind.to_lowercase().as_str() {
            "gocd" => {
                let timeout = match var("GOCD_TIMEOUT") {
                    Some(raw) => raw
                        .parse::<u64>()
                        .map(Duration::from_secs)
                        .with_context(|| format!("GOCD_TIMEOUT '{}' is not a number of seconds", raw))?,
                    None => Duration::from_secs(30),
                };
                ControlBackend::GoCd {
                    url: gocd_url.context("GOCD_SERVER_URL must be set for the gocd control plane")?,
                    username: var("GOCD_USERNAME").unwrap_or_default(),
                    password: var("GOCD_PASSWORD").unwrap_or_default(),
                    timeout,
                }
            }
            "log" => ControlBackend::Log,
            other => anyhow::bail!("Unknown PAUSEGATE_CONTROL '{}' (expected gocd or log)", other),
        };

        let reconcile_on_start = match var("PAUSEGATE_RECONCILE_ON_START") {
            Some(raw) => parse_flag(&raw)
                .with_context(|| format!("PAUSEGATE_RECONCILE_ON_START '{}' is not a boolean", raw))?,
            None => false,
        };

        Ok(Self {
            bind_addr,
            store,
            control,
            systems_file: var("PIPELINE_SYSTEMS_FILE").map(PathBuf::from),
            reconcile_on_start,
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_addr.is_empty() {
            anyhow::bail!("bind_addr cannot be empty");
        }

        if let StoreBackend::S3 { bucket, region, .. } = &self.store {
            if bucket.is_empty() {
                anyhow::bail!("S3 bucket name cannot be empty");
            }
            if region.is_empty() {
                anyhow::bail!("S3 region cannot be empty");
            }
        }

        if let ControlBackend::GoCd { url, timeout, .. } = &self.control {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("GoCD server URL must start with http:// or https://");
            }
            if timeout.is_zero() {
                anyhow::bail!("GoCD timeout must be greater than 0");
            }
        }

        Ok(())
    }

    /// Loads the pipeline system registry, from file if configured
    pub fn load_registry(&self) -> anyhow::Result<PipelineSystemRegistry> {
        let registry = match &self.systems_file {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                serde_yaml::from_str::<PipelineSystemRegistry>(&raw)
                    .with_context(|| format!("Failed to parse {}", path.display()))?
            }
            None => PipelineSystemRegistry::builtin(),
        };

        registry.validate()?;
        if registry.is_empty() {
            anyhow::bail!("No pipeline systems configured");
        }

        Ok(registry)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            store: StoreBackend::Memory,
            control: ControlBackend::Log,
            systems_file: None,
            reconcile_on_start: false,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
