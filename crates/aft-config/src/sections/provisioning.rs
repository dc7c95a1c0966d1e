// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Service Catalog provisioning configuration section.

use serde::{Deserialize, Serialize};

use super::Required;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProvisioningConfigLayer {
	pub product_id: Option<String>,
	pub artifact_id: Option<String>,
	pub launch_path_id: Option<String>,
}

impl ProvisioningConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.product_id.is_some() {
			self.product_id = other.product_id;
		}
		if other.artifact_id.is_some() {
			self.artifact_id = other.artifact_id;
		}
		if other.launch_path_id.is_some() {
			self.launch_path_id = other.launch_path_id;
		}
	}

	pub(crate) fn finalize(self, required: &mut Required) -> ProvisioningConfig {
		ProvisioningConfig {
			product_id: required.take(self.product_id, "provisioning.product_id", "SC_PRODUCT_ID"),
			artifact_id: required.take(
				self.artifact_id,
				"provisioning.artifact_id",
				"SC_PROVISIONING_ARTIFACT_ID",
			),
			launch_path_id: required.take(
				self.launch_path_id,
				"provisioning.launch_path_id",
				"SC_LAUNCH_PATH_ID",
			),
		}
	}
}

/// Account Factory product in the management account's Service Catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProvisioningConfig {
	pub product_id: String,
	pub artifact_id: String,
	pub launch_path_id: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_deserialize_layer_partial() {
		let layer: ProvisioningConfigLayer = toml::from_str(r#"product_id = "prod-abc""#).unwrap();
		assert_eq!(layer.product_id.as_deref(), Some("prod-abc"));
		assert!(layer.artifact_id.is_none());
	}

	#[test]
	fn test_blank_value_counts_as_missing() {
		let layer = ProvisioningConfigLayer {
			product_id: Some("prod-abc".to_string()),
			artifact_id: Some("  ".to_string()),
			launch_path_id: Some("lpv3-abc".to_string()),
		};
		let mut required = Required::default();
		layer.finalize(&mut required);
		assert_eq!(
			required.into_missing(),
			vec!["provisioning.artifact_id (SC_PROVISIONING_ARTIFACT_ID)".to_string()]
		);
	}
}
