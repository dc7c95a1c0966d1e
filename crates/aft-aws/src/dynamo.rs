// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::collections::HashMap;

use aft_batch::{RecorderError, StateRecord, StateRecorder};
use aft_request::Identity;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use tracing::{debug, instrument};

/// State recorder backed by a DynamoDB table keyed on `id`.
///
/// Writes are unconditional `PutItem` calls, so a second write for the same
/// identity replaces the first.
#[derive(Debug, Clone)]
pub struct DynamoStateRecorder {
	client: Client,
	table_name: String,
}

impl DynamoStateRecorder {
	pub fn new(session: &SdkConfig, table_name: impl Into<String>) -> Self {
		Self {
			client: Client::new(session),
			table_name: table_name.into(),
		}
	}
}

#[async_trait]
impl StateRecorder for DynamoStateRecorder {
	#[instrument(skip(self, record), fields(table = %self.table_name))]
	async fn put(&self, identity: &Identity, record: &StateRecord) -> Result<(), RecorderError> {
		let item = to_item(record)?;
		self.client
			.put_item()
			.table_name(&self.table_name)
			.set_item(Some(item))
			.send()
			.await
			.map_err(|e| RecorderError::Backend {
				message: DisplayErrorContext(&e).to_string(),
			})?;
		debug!(identity = %identity, "state record written");
		Ok(())
	}
}

/// Item layout read by the downstream request processor. Tags and custom
/// fields are stored as JSON strings.
pub fn to_item(record: &StateRecord) -> Result<HashMap<String, AttributeValue>, RecorderError> {
	let parameters = record
		.control_tower_parameters
		.entries()
		.into_iter()
		.map(|(key, value)| (key.to_string(), AttributeValue::S(value.to_string())))
		.collect();

	let mut item = HashMap::new();
	item.insert("id".to_string(), AttributeValue::S(record.id.to_string()));
	item.insert(
		"operation".to_string(),
		AttributeValue::S(record.operation.as_str().to_string()),
	);
	item.insert(
		"control_tower_parameters".to_string(),
		AttributeValue::M(parameters),
	);
	item.insert(
		"account_tags".to_string(),
		AttributeValue::S(record.encoded_tags()?),
	);
	item.insert(
		"custom_fields".to_string(),
		AttributeValue::S(record.encoded_custom_fields()?),
	);
	item.insert(
		"account_customizations_name".to_string(),
		AttributeValue::S(record.account_customizations_name.clone()),
	);
	Ok(item)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::Path;

	fn record() -> StateRecord {
		let request = aft_request::parse_str(
			r#"
locals {
  account_request = {
    control_tower_parameters = {
      AccountEmail              = "a@example.com"
      AccountName               = "Team-A"
      ManagedOrganizationalUnit = "OU-Sandbox"
    }
    account_tags = {
      owner = "team-a"
    }
    account_customizations_name = "sandbox"
  }
}
"#,
			Path::new("a.tf"),
		)
		.unwrap();
		StateRecord::from_request(&request, "aft-account-provisioning-framework")
	}

	#[test]
	fn item_has_downstream_layout() {
		let item = to_item(&record()).unwrap();

		assert_eq!(item["id"], AttributeValue::S("a@example.com".to_string()));
		assert_eq!(item["operation"], AttributeValue::S("ADD".to_string()));
		assert_eq!(
			item["account_tags"],
			AttributeValue::S(r#"{"owner":"team-a"}"#.to_string())
		);
		assert_eq!(item["custom_fields"], AttributeValue::S("{}".to_string()));
		assert_eq!(
			item["account_customizations_name"],
			AttributeValue::S("sandbox".to_string())
		);

		let parameters = item["control_tower_parameters"].as_m().unwrap();
		assert_eq!(parameters.len(), 6);
		assert_eq!(
			parameters["SSOUserEmail"],
			AttributeValue::S("a@example.com".to_string())
		);
	}
}
