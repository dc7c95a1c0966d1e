// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use aft_batch::{ProvisioningClient, ProvisioningError, ProvisioningParameters, TrackingId};
use aft_config::ProvisioningConfig;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_servicecatalog::error::DisplayErrorContext;
use aws_sdk_servicecatalog::types::{ProvisioningParameter, Tag};
use aws_sdk_servicecatalog::Client;
use tracing::{debug, instrument};

/// Provisioning client backed by the Control Tower Account Factory product
/// in Service Catalog.
///
/// No provisioning token is supplied, so a repeated submit for the same
/// account can start a second provisioning attempt.
#[derive(Debug, Clone)]
pub struct ServiceCatalogProvisioner {
	client: Client,
	product_id: String,
	artifact_id: String,
	launch_path_id: String,
}

impl ServiceCatalogProvisioner {
	pub fn new(session: &SdkConfig, config: &ProvisioningConfig) -> Self {
		Self {
			client: Client::new(session),
			product_id: config.product_id.clone(),
			artifact_id: config.artifact_id.clone(),
			launch_path_id: config.launch_path_id.clone(),
		}
	}
}

#[async_trait]
impl ProvisioningClient for ServiceCatalogProvisioner {
	#[instrument(skip(self, parameters), fields(product_id = %self.product_id))]
	async fn submit(
		&self,
		account_name: &str,
		parameters: &ProvisioningParameters,
	) -> Result<TrackingId, ProvisioningError> {
		let output = self
			.client
			.provision_product()
			.product_id(&self.product_id)
			.provisioning_artifact_id(&self.artifact_id)
			.path_id(&self.launch_path_id)
			.provisioned_product_name(account_name)
			.set_provisioning_parameters(Some(provisioning_parameters(parameters)))
			.set_tags(Some(tags(parameters)?))
			.send()
			.await
			.map_err(|e| ProvisioningError::Backend {
				message: DisplayErrorContext(&e).to_string(),
			})?;

		let record_id = output
			.record_detail()
			.and_then(|detail| detail.record_id())
			.ok_or(ProvisioningError::MissingTrackingId)?;
		debug!(record_id = %record_id, "provisioning submitted");
		Ok(TrackingId(record_id.to_string()))
	}
}

pub fn provisioning_parameters(parameters: &ProvisioningParameters) -> Vec<ProvisioningParameter> {
	parameters
		.entries()
		.into_iter()
		.map(|(key, value)| ProvisioningParameter::builder().key(key).value(value).build())
		.collect()
}

pub fn tags(parameters: &ProvisioningParameters) -> Result<Vec<Tag>, ProvisioningError> {
	parameters
		.tags
		.iter()
		.map(|(key, value)| {
			Tag::builder()
				.key(key)
				.value(value)
				.build()
				.map_err(|e| ProvisioningError::InvalidRequest(format!("tag {key}: {e}")))
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::Path;

	fn parameters() -> ProvisioningParameters {
		let request = aft_request::parse_str(
			r#"
locals {
  account_request = {
    control_tower_parameters = {
      AccountEmail              = "a@example.com"
      AccountName               = "Team-A"
      ManagedOrganizationalUnit = "OU-Sandbox"
      SSOUserFirstName          = "Ada"
    }
    account_tags = {
      owner       = "team-a"
      "cost-center" = 42
    }
  }
}
"#,
			Path::new("a.tf"),
		)
		.unwrap();
		ProvisioningParameters::from_request(&request)
	}

	#[test]
	fn submits_the_six_control_tower_parameters() {
		let built = provisioning_parameters(&parameters());
		let keys: Vec<_> = built.iter().filter_map(|p| p.key()).collect();
		assert_eq!(
			keys,
			vec![
				"AccountEmail",
				"AccountName",
				"ManagedOrganizationalUnit",
				"SSOUserEmail",
				"SSOUserFirstName",
				"SSOUserLastName",
			]
		);
		let first_name = built
			.iter()
			.find(|p| p.key() == Some("SSOUserFirstName"))
			.and_then(|p| p.value());
		assert_eq!(first_name, Some("Ada"));
	}

	#[test]
	fn account_tags_become_catalog_tags() {
		let built = tags(&parameters()).unwrap();
		let pairs: Vec<_> = built.iter().map(|t| (t.key(), t.value())).collect();
		assert_eq!(pairs, vec![("cost-center", "42"), ("owner", "team-a")]);
	}
}
