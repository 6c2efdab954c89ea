use std::path::Path;

use anyhow::Context;
use dfwiki_config::Config;

/// Profile picked up from the working directory when `--config` is absent
pub const DEFAULT_PROFILE: &str = "dfwiki.json";

/// Explicit profile, else `./dfwiki.json`, else defaults. Environment
/// overrides apply in every case.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = path {
        return Config::from_file(path)
            .with_context(|| format!("Failed to load profile {}", path.display()));
    }

    let local = Path::new(DEFAULT_PROFILE);
    if local.exists() {
        return Config::from_file(local).context("Failed to load ./dfwiki.json");
    }

    tracing::debug!("No profile found, using defaults");
    Ok(Config::new())
}
