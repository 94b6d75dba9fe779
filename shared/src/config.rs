use std::{env, path::Path};

use anyhow::{Context, Result};

const DEFAULT_ADDR: &str = "0.0.0.0:8000";

pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: String,
    /// Fixed seed for generated data; entropy when unset
    pub seed: Option<u64>,
}

impl ServerConfig {
    pub fn load(manifest_dir: &Path) -> Result<Self> {
        // Every variable has a default, so a missing .env is not an error.
        #[cfg(debug_assertions)]
        let _ = dotenvy::from_path(manifest_dir.join(".env"));
        #[cfg(not(debug_assertions))]
        let _ = manifest_dir;

        let bind_addr = optional_var("DASHBOARD_ADDR", env::var("DASHBOARD_ADDR"))?
            .unwrap_or_else(|| DEFAULT_ADDR.to_owned());
        let seed = parse_seed(optional_var("DASHBOARD_SEED", env::var("DASHBOARD_SEED"))?)?;

        Ok(Self { bind_addr, seed })
    }
}

/// Unset is `None`; a value that is not unicode is an error rather than a default.
fn optional_var(name: &str, value: Result<String, env::VarError>) -> Result<Option<String>> {
    match value {
        Ok(raw) => Ok(Some(raw)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("{name} is not valid unicode")),
    }
}

fn parse_seed(raw: Option<String>) -> Result<Option<u64>> {
    raw.map(|raw| {
        raw.trim()
            .parse::<u64>()
            .with_context(|| format!("DASHBOARD_SEED must be an unsigned integer, got {raw:?}"))
    })
    .transpose()
}

/// Load server config using the calling crate's manifest directory.
#[macro_export]
macro_rules! load_server_config {
    () => {
        $crate::config::ServerConfig::load(std::path::Path::new(env!("CARGO_MANIFEST_DIR")))
    };
}
