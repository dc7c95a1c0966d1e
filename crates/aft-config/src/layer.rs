// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration produced by a single source.

use serde::{Deserialize, Serialize};

use crate::sections::{
	AwsConfigLayer, LoggingConfig, LoggingConfigLayer, ProvisioningConfigLayer, QueueConfigLayer,
	RequestsConfig, RequestsConfigLayer, StateConfigLayer,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BootstrapConfigLayer {
	pub aws: Option<AwsConfigLayer>,
	pub queue: Option<QueueConfigLayer>,
	pub provisioning: Option<ProvisioningConfigLayer>,
	pub state: Option<StateConfigLayer>,
	pub requests: Option<RequestsConfigLayer>,
	pub logging: Option<LoggingConfigLayer>,
}

macro_rules! merge_section {
	($self:ident, $other:ident, $field:ident) => {
		if let Some(overlay) = $other.$field {
			match $self.$field.as_mut() {
				Some(base) => base.merge(overlay),
				None => $self.$field = Some(overlay),
			}
		}
	};
}

impl BootstrapConfigLayer {
	pub fn merge(&mut self, other: Self) {
		merge_section!(self, other, aws);
		merge_section!(self, other, queue);
		merge_section!(self, other, provisioning);
		merge_section!(self, other, state);
		merge_section!(self, other, requests);
		merge_section!(self, other, logging);
	}

	/// Resolve only the sections needed to set up logging.
	pub fn logging(&self) -> LoggingConfig {
		self.logging.clone().unwrap_or_default().finalize()
	}

	/// Resolve only the request source sections.
	pub fn requests(&self) -> RequestsConfig {
		self.requests.clone().unwrap_or_default().finalize()
	}
}
