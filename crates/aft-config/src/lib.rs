// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for AFT account request bootstrap.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file,
//!   environment, command line)
//! - Type-safe configuration, resolved once at startup and passed by reference
//! - Fail-fast validation that reports every missing required value at once
//!
//! # Usage
//!
//! ```ignore
//! use aft_config::{load_layer, BootstrapConfigLayer};
//!
//! let layer = load_layer(None, BootstrapConfigLayer::default())?;
//! let config = layer.finalize()?;
//! println!("queue: {}", config.queue.url);
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::BootstrapConfigLayer;
pub use sections::*;
pub use sources::{CliSource, ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use std::path::Path;

use tracing::{debug, info};

use crate::sections::Required;

/// Fully resolved configuration for a batch run.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapConfig {
	pub aws: AwsConfig,
	pub queue: QueueConfig,
	pub provisioning: ProvisioningConfig,
	pub state: StateConfig,
	pub requests: RequestsConfig,
	pub logging: LoggingConfig,
}

/// Merge all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Command-line overrides
/// 2. Environment variables
/// 3. Config file (when given)
/// 4. Built-in defaults
pub fn load_layer(
	config_file: Option<&Path>,
	overrides: BootstrapConfigLayer,
) -> Result<BootstrapConfigLayer, ConfigError> {
	let mut sources: Vec<Box<dyn ConfigSource>> = vec![
		Box::new(DefaultsSource),
		Box::new(EnvSource::process()),
		Box::new(CliSource::new(overrides)),
	];
	if let Some(path) = config_file {
		sources.push(Box::new(TomlSource::new(path)));
	}

	merge_sources(sources)
}

/// Merge an explicit list of sources in precedence order.
pub fn merge_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<BootstrapConfigLayer, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = BootstrapConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}
	Ok(merged)
}

impl BootstrapConfigLayer {
	/// Resolve into a complete configuration, or fail with every missing
	/// required value listed.
	pub fn finalize(self) -> Result<BootstrapConfig, ConfigError> {
		let mut required = Required::default();

		let aws = self.aws.unwrap_or_default().finalize(&mut required);
		let queue = self.queue.unwrap_or_default().finalize(&mut required);
		let provisioning = self.provisioning.unwrap_or_default().finalize(&mut required);
		let state = self.state.unwrap_or_default().finalize(&mut required);
		let requests = self.requests.unwrap_or_default().finalize();
		let logging = self.logging.unwrap_or_default().finalize();

		let missing = required.into_missing();
		if !missing.is_empty() {
			return Err(ConfigError::MissingFields(missing));
		}

		validate_config(&aws, &queue)?;

		info!(
			region = %aws.region,
			launch_role_arn = %aws.launch_role_arn,
			queue_url = %queue.url,
			product_id = %provisioning.product_id,
			table_name = %state.table_name,
			request_dir = %requests.dir.display(),
			"Bootstrap configuration loaded"
		);

		Ok(BootstrapConfig {
			aws,
			queue,
			provisioning,
			state,
			requests,
			logging,
		})
	}
}

/// Validate value formats that the AWS APIs would otherwise reject per file.
fn validate_config(aws: &AwsConfig, queue: &QueueConfig) -> Result<(), ConfigError> {
	if !aws.launch_role_arn.starts_with("arn:") {
		return Err(ConfigError::invalid_value(
			"aws.launch_role_arn",
			format!("'{}' is not an IAM role ARN", aws.launch_role_arn),
		));
	}
	if !queue.url.starts_with("https://") {
		return Err(ConfigError::invalid_value(
			"queue.url",
			format!("'{}' is not an https queue URL", queue.url),
		));
	}
	Ok(())
}
