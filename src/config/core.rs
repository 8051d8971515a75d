use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Json, Toml, Yaml},
};
use std::path::Path;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Build the layered figment
///
/// Priority, lowest first: embedded defaults, user config, repository config,
/// environment. A custom config file replaces the user and repository layers
/// and must exist.
pub fn figment(custom_config: Option<&str>) -> Result<Figment> {
    let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

    if let Some(custom_path) = custom_config {
        let path = Path::new(custom_path);
        if !path.is_file() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        tracing::debug!("Using custom config file {}", path.display());

        figment = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => figment.merge(Json::file(path)),
            Some("yaml") | Some("yml") => figment.merge(Yaml::file(path)),
            _ => figment.merge(Toml::file(path)),
        };
    } else {
        let user_base = user_config_base();
        figment = figment
            // User config - support multiple formats
            .merge(Toml::file(format!("{user_base}.toml")))
            .merge(Json::file(format!("{user_base}.json")))
            .merge(Yaml::file(format!("{user_base}.yaml")))
            .merge(Yaml::file(format!("{user_base}.yml")))
            // Repository config
            .merge(Toml::file("strproc.toml"))
            .merge(Json::file("strproc.json"))
            .merge(Yaml::file("strproc.yaml"))
            .merge(Yaml::file("strproc.yml"));
    }

    // Environment variables always have highest priority
    Ok(figment.merge(Env::prefixed("STRPROC_").split("__")))
}

/// Look up a single key (dotted path) in the merged configuration
pub fn get_value(custom_config: Option<&str>, key: &str) -> Result<serde_json::Value> {
    figment(custom_config)?
        .extract_inner(key)
        .with_context(|| format!("Configuration key not found: {key}"))
}

/// User config path without extension
fn user_config_base() -> String {
    match std::env::var("HOME") {
        Ok(home) => format!("{home}/.config/strproc/config"),
        Err(_) => "~/.config/strproc/config".to_string(),
    }
}
