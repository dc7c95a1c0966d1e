// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections.

pub mod aws;
pub mod logging;
pub mod provisioning;
pub mod queue;
pub mod requests;
pub mod state;

pub use aws::{AwsConfig, AwsConfigLayer, DEFAULT_SESSION_NAME};
pub use logging::{LogFormat, LoggingConfig, LoggingConfigLayer};
pub use provisioning::{ProvisioningConfig, ProvisioningConfigLayer};
pub use queue::{QueueConfig, QueueConfigLayer};
pub use requests::{RequestsConfig, RequestsConfigLayer, DEFAULT_REQUEST_DIR};
pub use state::{StateConfig, StateConfigLayer, DEFAULT_CUSTOMIZATIONS_NAME};

/// Collects unset required values so they can be reported together.
#[derive(Debug, Default)]
pub(crate) struct Required {
	missing: Vec<String>,
}

impl Required {
	pub(crate) fn take(&mut self, value: Option<String>, key: &str, env: &str) -> String {
		match value.filter(|v| !v.trim().is_empty()) {
			Some(v) => v,
			None => {
				self.missing.push(format!("{key} ({env})"));
				String::new()
			}
		}
	}

	pub(crate) fn into_missing(self) -> Vec<String> {
		self.missing
	}
}
