//! Configuration management for strproc
//!
//! Processor types can be declared in configuration as an ordered list of
//! builtin filter names. Configuration is layered with figment: embedded
//! defaults, then user config, then repository config, then `STRPROC_*`
//! environment variables.

mod core;


pub use self::core::{figment, get_value};

use crate::error::FilterError;
use crate::filter::FilterRegistry;
use crate::processor::{ProcessorType, ProcessorTypeBuilder};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrprocConfig {
    /// Processor used when none is named on the command line
    pub default_processor: String,

    /// Declared processor types, each an ordered list of filter names
    #[serde(default)]
    pub processors: Vec<ProcessorConfig>,

    /// Terminal output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// One processor type declared in configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    pub name: String,

    /// Filter names, applied in this order
    #[serde(default)]
    pub filters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colored output
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_color() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

/// Export formats for `config show`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl StrprocConfig {
    /// Load the merged configuration
    ///
    /// With `custom_config`, only that file is layered over the defaults
    /// (plus environment variables).
    pub fn load(custom_config: Option<&str>) -> Result<Self> {
        let config: StrprocConfig = figment(custom_config)?
            .extract()
            .context("Failed to extract strproc configuration")?;
        tracing::debug!(
            "Loaded configuration with {} processors",
            config.processors.len()
        );
        Ok(config)
    }

    pub fn processor(&self, name: &str) -> Option<&ProcessorConfig> {
        self.processors.iter().find(|p| p.name == name)
    }

    /// Check names are unique, filters exist and the default processor is declared
    pub fn validate(&self, registry: &FilterRegistry) -> Result<()> {
        let mut seen = HashSet::new();
        for processor in &self.processors {
            if processor.name.is_empty() {
                anyhow::bail!("Processor name cannot be empty");
            }
            if !seen.insert(processor.name.as_str()) {
                anyhow::bail!("Processor '{}' is declared more than once", processor.name);
            }
            if let Some(unknown) = processor.filters.iter().find(|f| !registry.contains(f)) {
                anyhow::bail!(
                    "Processor '{}' uses unknown filter '{}'",
                    processor.name,
                    unknown
                );
            }
        }

        if self.processor(&self.default_processor).is_none() {
            anyhow::bail!(
                "Default processor '{}' is not declared",
                self.default_processor
            );
        }

        Ok(())
    }

    /// Build the processor type declared under `name`
    pub fn processor_type(
        &self,
        name: &str,
        registry: &FilterRegistry,
    ) -> crate::Result<Arc<ProcessorType>> {
        let declared = self
            .processor(name)
            .ok_or_else(|| FilterError::UnknownProcessor(name.to_string()))?;
        declared.build(registry)
    }

    /// Build every declared processor type, in declaration order
    pub fn processor_types(
        &self,
        registry: &FilterRegistry,
    ) -> crate::Result<Vec<Arc<ProcessorType>>> {
        self.processors
            .iter()
            .map(|declared| declared.build(registry))
            .collect()
    }

    pub fn export(&self, format: ConfigFormat) -> Result<String> {
        match format {
            ConfigFormat::Toml => {
                toml::to_string_pretty(self).context("Failed to serialize configuration as TOML")
            }
            ConfigFormat::Json => serde_json::to_string_pretty(self)
                .context("Failed to serialize configuration as JSON"),
        }
    }
}

impl ProcessorConfig {
    pub fn build(&self, registry: &FilterRegistry) -> crate::Result<Arc<ProcessorType>> {
        Ok(ProcessorTypeBuilder::from_registry(&self.name, &self.filters, registry)?.build())
    }
}

impl std::str::FromStr for ConfigFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "toml" => Ok(ConfigFormat::Toml),
            "json" => Ok(ConfigFormat::Json),
            other => anyhow::bail!("Unsupported format: {}. Use toml or json", other),
        }
    }
}
