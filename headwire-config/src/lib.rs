//! Loader for workspace configuration with YAML + environment overlays.
//!
//! Configuration merges three sources, later ones winning: built-in
//! defaults, an optional `headwire.yaml`, and `HEADWIRE`-prefixed
//! environment variables (`__` as the section separator, e.g.
//! `HEADWIRE__EXTRACTOR__BATCH_SIZE=20`). String values may reference
//! environment variables as `${VAR}`; references are expanded recursively
//! with a depth cap so cycles terminate.
use config::{Config, ConfigError, Environment, File};
use headwire_common::{ExtractorConfig, OutputConfig};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

/// Fully merged workspace configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HeadwireConfig {
    pub version: Option<String>,
    /// Pipeline tuning knobs; see [`ExtractorConfig`] for the defaults.
    pub extractor: ExtractorConfig,
    /// Filesystem destinations for results and debug artifacts.
    pub output: OutputConfig,
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hiding the `config` crate wiring (YAML + env overrides).
pub struct HeadwireConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for HeadwireConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadwireConfigLoader {
    /// Start with the defaults: `HEADWIRE_` env overrides, parsed into
    /// scalars where possible so numeric fields round-trip.
    ///
    /// ```
    /// use headwire_config::HeadwireConfigLoader;
    ///
    /// let config = HeadwireConfigLoader::new().load().expect("defaults load");
    /// assert_eq!(config.extractor.batch_size, 10);
    /// assert_eq!(config.extractor.max_concurrent_requests, 5);
    /// ```
    pub fn new() -> Self {
        let builder = Config::builder().add_source(
            Environment::with_prefix("HEADWIRE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );
        Self { builder }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by
    /// suffix. The file must exist.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Merge an inline YAML snippet (tests and CLI overrides).
    ///
    /// ```
    /// use headwire_config::HeadwireConfigLoader;
    ///
    /// let cfg = HeadwireConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// version: "test"
    /// extractor:
    ///   batch_size: 4
    ///   render_hosts: ["elpais.com"]
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.version.as_deref(), Some("test"));
    /// assert_eq!(cfg.extractor.batch_size, 4);
    /// assert_eq!(cfg.extractor.max_retries, 3);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly
    /// typed config, expanding `${VAR}` placeholders first.
    pub fn load(self) -> Result<HeadwireConfig, ConfigError> {
        let cfg = self.builder.build()?;

        // Round-trip through serde_json::Value so expansion can walk every
        // string regardless of nesting.
        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: HeadwireConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}
