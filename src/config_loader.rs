use crate::config::Config;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{info, warn};
use std::fs::File;
use std::path::Path;

/// Load, parse and validate configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<Config> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration file '{}'", config_path.display()))?;

    let config: Config = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration file '{}'", config_path.display()))?;

    if config.clients.is_empty() {
        warn!("No clients configured; the generated program will contain no capture nodes");
    } else {
        info!("Configuration lists {} capture devices", config.clients.len());
    }

    config.validate()?;

    Ok(config)
}

/// CLI arguments that can override YAML settings
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub fallback_ip: Option<String>,
}

/// Apply CLI overrides to a loaded configuration
pub fn apply_overrides(config: &mut Config, overrides: &CliOverrides) -> Result<()> {
    if let Some(fallback_ip) = &overrides.fallback_ip {
        info!("Overriding fallback IP with {}", fallback_ip);
        config.resolver.fallback_ip = fallback_ip.clone();
    }

    // Re-validate after applying overrides
    config.validate()?;

    Ok(())
}
