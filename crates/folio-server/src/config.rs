use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::info;

pub struct Config {
    pub host: String,
    pub port: u16,
    /// Seed the store with the sample progress updates on startup.
    pub seed_sample: bool,
    /// Front-end bundle served for every non-API path.
    pub static_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("FOLIO_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = lookup("FOLIO_PORT")
            .unwrap_or_else(|| "5000".into())
            .parse()
            .context("FOLIO_PORT is not a valid port")?;
        let seed_sample = match lookup("FOLIO_SEED_SAMPLE") {
            Some(value) => parse_flag(&value).context("FOLIO_SEED_SAMPLE must be true or false")?,
            None => true,
        };
        let static_dir = lookup("FOLIO_STATIC_DIR")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        if let Some(dir) = &static_dir {
            info!("Serving static files from {}", dir.display());
        }

        Ok(Self {
            host,
            port,
            seed_sample,
            static_dir,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("unrecognised flag value '{}'", other),
    }
}
