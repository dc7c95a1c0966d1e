// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! AWS session configuration section.

use serde::{Deserialize, Serialize};

use super::Required;

pub const DEFAULT_SESSION_NAME: &str = "AFT-Bootstrap-Session";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AwsConfigLayer {
	pub region: Option<String>,
	pub launch_role_arn: Option<String>,
	pub session_name: Option<String>,
}

impl AwsConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.region.is_some() {
			self.region = other.region;
		}
		if other.launch_role_arn.is_some() {
			self.launch_role_arn = other.launch_role_arn;
		}
		if other.session_name.is_some() {
			self.session_name = other.session_name;
		}
	}

	pub(crate) fn finalize(self, required: &mut Required) -> AwsConfig {
		AwsConfig {
			region: required.take(self.region, "aws.region", "CT_MGMT_REGION"),
			launch_role_arn: required.take(
				self.launch_role_arn,
				"aws.launch_role_arn",
				"CT_LAUNCH_ROLE_ARN",
			),
			session_name: self
				.session_name
				.unwrap_or_else(|| DEFAULT_SESSION_NAME.to_string()),
		}
	}
}

/// Region of the Control Tower management account and the role assumed in it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AwsConfig {
	pub region: String,
	pub launch_role_arn: String,
	pub session_name: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_layer_finalize_defaults_session_name() {
		let layer = AwsConfigLayer {
			region: Some("us-east-1".to_string()),
			launch_role_arn: Some("arn:aws:iam::111111111111:role/AWSAFTExecution".to_string()),
			session_name: None,
		};
		let mut required = Required::default();
		let config = layer.finalize(&mut required);
		assert!(required.into_missing().is_empty());
		assert_eq!(config.session_name, DEFAULT_SESSION_NAME);
	}

	#[test]
	fn test_layer_finalize_reports_missing() {
		let mut required = Required::default();
		AwsConfigLayer::default().finalize(&mut required);
		assert_eq!(
			required.into_missing(),
			vec![
				"aws.region (CT_MGMT_REGION)".to_string(),
				"aws.launch_role_arn (CT_LAUNCH_ROLE_ARN)".to_string(),
			]
		);
	}

	#[test]
	fn test_merge_overwrites() {
		let mut base = AwsConfigLayer {
			region: Some("us-east-1".to_string()),
			session_name: Some("base".to_string()),
			..Default::default()
		};
		base.merge(AwsConfigLayer {
			region: Some("eu-west-1".to_string()),
			..Default::default()
		});
		assert_eq!(base.region.as_deref(), Some("eu-west-1"));
		assert_eq!(base.session_name.as_deref(), Some("base"));
	}
}
