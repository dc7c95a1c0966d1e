// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: defaults, TOML file, environment variables and
//! command-line overrides.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::BootstrapConfigLayer;
use crate::sections::{
	AwsConfigLayer, LogFormat, LoggingConfigLayer, ProvisioningConfigLayer, QueueConfigLayer,
	RequestsConfigLayer, StateConfigLayer,
};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
	Cli = 60,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<BootstrapConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<BootstrapConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(BootstrapConfigLayer::default())
	}
}

/// TOML file configuration source. A missing file is not an error.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<BootstrapConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(BootstrapConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: BootstrapConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

type Lookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Environment variable source.
///
/// Variable names follow the AFT deployment (`CT_MGMT_REGION`,
/// `SQS_QUEUE_URL`, ...); bootstrap-only settings use `AFT_BOOTSTRAP_*`.
pub struct EnvSource {
	lookup: Lookup,
}

impl EnvSource {
	/// Read from the process environment.
	pub fn process() -> Self {
		Self::with_lookup(|name| std::env::var(name).ok())
	}

	pub fn with_lookup(lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Self {
		Self {
			lookup: Box::new(lookup),
		}
	}

	fn var(&self, name: &str) -> Option<String> {
		(self.lookup)(name).filter(|s| !s.is_empty())
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<BootstrapConfigLayer, ConfigError> {
		debug!("loading environment variables");
		let format = match self.var("AFT_BOOTSTRAP_LOG_FORMAT") {
			Some(v) => Some(
				v.parse::<LogFormat>()
					.map_err(|message| ConfigError::invalid_value("AFT_BOOTSTRAP_LOG_FORMAT", message))?,
			),
			None => None,
		};

		Ok(BootstrapConfigLayer {
			aws: Some(AwsConfigLayer {
				region: self.var("CT_MGMT_REGION"),
				launch_role_arn: self.var("CT_LAUNCH_ROLE_ARN"),
				session_name: self.var("AFT_BOOTSTRAP_SESSION_NAME"),
			}),
			queue: Some(QueueConfigLayer {
				url: self.var("SQS_QUEUE_URL"),
			}),
			provisioning: Some(ProvisioningConfigLayer {
				product_id: self.var("SC_PRODUCT_ID"),
				artifact_id: self.var("SC_PROVISIONING_ARTIFACT_ID"),
				launch_path_id: self.var("SC_LAUNCH_PATH_ID"),
			}),
			state: Some(StateConfigLayer {
				table_name: self.var("AFT_REQUEST_DDB_TABLE_NAME"),
				customizations_name: self.var("AFT_BOOTSTRAP_CUSTOMIZATIONS_NAME"),
			}),
			requests: Some(RequestsConfigLayer {
				dir: self.var("AFT_BOOTSTRAP_REQUEST_DIR").map(PathBuf::from),
				extension: self.var("AFT_BOOTSTRAP_REQUEST_EXTENSION"),
			}),
			logging: Some(LoggingConfigLayer {
				level: self.var("AFT_BOOTSTRAP_LOG_LEVEL"),
				format,
			}),
		})
	}
}

/// Values given on the command line.
pub struct CliSource {
	layer: BootstrapConfigLayer,
}

impl CliSource {
	pub fn new(layer: BootstrapConfigLayer) -> Self {
		Self { layer }
	}
}

impl ConfigSource for CliSource {
	fn name(&self) -> &'static str {
		"cli"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Cli
	}

	fn load(&self) -> Result<BootstrapConfigLayer, ConfigError> {
		Ok(self.layer.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn env(pairs: &[(&str, &str)]) -> EnvSource {
		let vars: HashMap<String, String> = pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		EnvSource::with_lookup(move |name| vars.get(name).cloned())
	}

	#[test]
	fn test_precedence_ordering() {
		assert!(Precedence::Cli > Precedence::Environment);
		assert!(Precedence::Environment > Precedence::ConfigFile);
		assert!(Precedence::ConfigFile > Precedence::Defaults);
	}

	#[test]
	fn test_defaults_source_returns_empty_layer() {
		let layer = DefaultsSource.load().unwrap();
		assert!(layer.aws.is_none());
		assert!(layer.queue.is_none());
	}

	#[test]
	fn test_toml_source_missing_file_returns_empty() {
		let layer = TomlSource::new("/nonexistent/aft-bootstrap.toml").load().unwrap();
		assert_eq!(layer, BootstrapConfigLayer::default());
	}

	#[test]
	fn test_toml_source_invalid_file_is_error() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("aft-bootstrap.toml");
		std::fs::write(&path, "[aws\nregion = 1").unwrap();
		let err = TomlSource::new(&path).load().unwrap_err();
		assert!(matches!(err, ConfigError::TomlParse { .. }));
	}

	#[test]
	fn test_env_source_maps_deployment_variables() {
		let layer = env(&[
			("CT_MGMT_REGION", "us-east-1"),
			("SQS_QUEUE_URL", "https://sqs.us-east-1.amazonaws.com/1/q.fifo"),
			("SC_LAUNCH_PATH_ID", "lpv3-abc"),
			("AFT_REQUEST_DDB_TABLE_NAME", "aft-request"),
			("AFT_BOOTSTRAP_LOG_FORMAT", "json"),
		])
		.load()
		.unwrap();

		assert_eq!(layer.aws.unwrap().region.as_deref(), Some("us-east-1"));
		assert_eq!(
			layer.provisioning.unwrap().launch_path_id.as_deref(),
			Some("lpv3-abc")
		);
		assert_eq!(layer.state.unwrap().table_name.as_deref(), Some("aft-request"));
		assert_eq!(layer.logging.unwrap().format, Some(LogFormat::Json));
	}

	#[test]
	fn test_env_source_ignores_empty_values() {
		let layer = env(&[("CT_MGMT_REGION", "")]).load().unwrap();
		assert!(layer.aws.unwrap().region.is_none());
	}

	#[test]
	fn test_env_source_rejects_unknown_log_format() {
		let err = env(&[("AFT_BOOTSTRAP_LOG_FORMAT", "xml")]).load().unwrap_err();
		assert!(matches!(err, ConfigError::InvalidValue { .. }));
	}
}
