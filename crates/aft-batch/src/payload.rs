// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Normalized payloads sent to each sink. None of them carry the source path.

use std::collections::BTreeMap;

use aft_request::{AccountRequest, ControlTowerParameters, Identity};
use serde::{Deserialize, Serialize};

/// Operation marker understood by the downstream request processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
	Add,
}

impl Operation {
	pub fn as_str(&self) -> &'static str {
		match self {
			Operation::Add => "ADD",
		}
	}
}

/// Record persisted to the state store, keyed by identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateRecord {
	pub id: Identity,
	pub operation: Operation,
	pub control_tower_parameters: ControlTowerParameters,
	pub account_tags: BTreeMap<String, String>,
	pub custom_fields: BTreeMap<String, String>,
	pub account_customizations_name: String,
}

impl StateRecord {
	/// `default_customizations` is used when the request names none.
	pub fn from_request(request: &AccountRequest, default_customizations: &str) -> Self {
		Self {
			id: request.identity().clone(),
			operation: Operation::Add,
			control_tower_parameters: request.parameters().clone(),
			account_tags: request.tags().clone(),
			custom_fields: request.custom_fields().clone(),
			account_customizations_name: request
				.customizations_name()
				.unwrap_or(default_customizations)
				.to_string(),
		}
	}

	/// Tags as a JSON string, for stores that only hold flat scalar values.
	pub fn encoded_tags(&self) -> Result<String, serde_json::Error> {
		serde_json::to_string(&self.account_tags)
	}

	/// Custom fields as a JSON string, for stores that only hold flat scalar values.
	pub fn encoded_custom_fields(&self) -> Result<String, serde_json::Error> {
		serde_json::to_string(&self.custom_fields)
	}
}

/// Body of the message placed on the dispatch queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchMessage {
	pub operation: Operation,
	pub control_tower_parameters: ControlTowerParameters,
	pub account_tags: BTreeMap<String, String>,
	pub custom_fields: BTreeMap<String, String>,
}

impl DispatchMessage {
	pub fn from_request(request: &AccountRequest) -> Self {
		Self {
			operation: Operation::Add,
			control_tower_parameters: request.parameters().clone(),
			account_tags: request.tags().clone(),
			custom_fields: request.custom_fields().clone(),
		}
	}

	pub fn to_json(&self) -> Result<String, serde_json::Error> {
		serde_json::to_string(self)
	}
}

/// Fixed parameter set submitted to the provisioning control plane.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvisioningParameters {
	pub control_tower_parameters: ControlTowerParameters,
	pub tags: BTreeMap<String, String>,
}

impl ProvisioningParameters {
	pub fn from_request(request: &AccountRequest) -> Self {
		Self {
			control_tower_parameters: request.parameters().clone(),
			tags: request.tags().clone(),
		}
	}

	pub fn entries(&self) -> [(&'static str, &str); 6] {
		self.control_tower_parameters.entries()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::Path;

	const REQUEST: &str = r#"
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
    custom_fields = {
      budget = 100
    }
  }
}
"#;

	fn request() -> AccountRequest {
		aft_request::parse_str(REQUEST, Path::new("team-a.tf")).unwrap()
	}

	#[test]
	fn dispatch_message_matches_downstream_schema() {
		let json: serde_json::Value =
			serde_json::from_str(&DispatchMessage::from_request(&request()).to_json().unwrap()).unwrap();
		assert_eq!(json["operation"], "ADD");
		assert_eq!(json["control_tower_parameters"]["AccountName"], "Team-A");
		assert_eq!(json["account_tags"]["owner"], "team-a");
		assert_eq!(json["custom_fields"]["budget"], "100");
		assert!(json.get("source_file").is_none());
	}

	#[test]
	fn state_record_uses_default_customizations() {
		let record = StateRecord::from_request(&request(), "aft-account-provisioning-framework");
		assert_eq!(record.id.as_str(), "a@example.com");
		assert_eq!(record.operation, Operation::Add);
		assert_eq!(record.account_customizations_name, "aft-account-provisioning-framework");
		assert_eq!(record.encoded_tags().unwrap(), r#"{"owner":"team-a"}"#);
		assert_eq!(record.encoded_custom_fields().unwrap(), r#"{"budget":"100"}"#);
	}

	#[test]
	fn provisioning_parameters_carry_tags() {
		let params = ProvisioningParameters::from_request(&request());
		assert_eq!(params.entries()[1], ("AccountName", "Team-A"));
		assert_eq!(params.tags.get("owner").map(String::as_str), Some("team-a"));
	}
}
