// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Stable key correlating one request across the state store, the dispatch
/// queue and the control plane. Derived from the account email.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
	pub(crate) fn from_email(email: &str) -> Self {
		Self(email.trim().to_string())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Identity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for Identity {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

/// Account factory parameters, serialized with the key names the Control
/// Tower Service Catalog product expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlTowerParameters {
	#[serde(rename = "AccountEmail")]
	pub account_email: String,
	#[serde(rename = "AccountName")]
	pub account_name: String,
	#[serde(rename = "ManagedOrganizationalUnit")]
	pub organizational_unit: String,
	#[serde(rename = "SSOUserEmail")]
	pub owner_email: String,
	#[serde(rename = "SSOUserFirstName")]
	pub owner_first_name: String,
	#[serde(rename = "SSOUserLastName")]
	pub owner_last_name: String,
}

impl ControlTowerParameters {
	/// Key/value pairs in the order the provisioning product declares them.
	pub fn entries(&self) -> [(&'static str, &str); 6] {
		[
			("AccountEmail", self.account_email.as_str()),
			("AccountName", self.account_name.as_str()),
			("ManagedOrganizationalUnit", self.organizational_unit.as_str()),
			("SSOUserEmail", self.owner_email.as_str()),
			("SSOUserFirstName", self.owner_first_name.as_str()),
			("SSOUserLastName", self.owner_last_name.as_str()),
		]
	}
}

/// Canonical unit of work, built once per request file and read-only after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRequest {
	identity: Identity,
	parameters: ControlTowerParameters,
	tags: BTreeMap<String, String>,
	custom_fields: BTreeMap<String, String>,
	customizations_name: Option<String>,
	source_file: PathBuf,
}

impl AccountRequest {
	pub(crate) fn new(
		parameters: ControlTowerParameters,
		tags: BTreeMap<String, String>,
		custom_fields: BTreeMap<String, String>,
		customizations_name: Option<String>,
		source_file: PathBuf,
	) -> Self {
		Self {
			identity: Identity::from_email(&parameters.account_email),
			parameters,
			tags,
			custom_fields,
			customizations_name,
			source_file,
		}
	}

	pub fn identity(&self) -> &Identity {
		&self.identity
	}

	pub fn parameters(&self) -> &ControlTowerParameters {
		&self.parameters
	}

	pub fn account_name(&self) -> &str {
		&self.parameters.account_name
	}

	pub fn account_email(&self) -> &str {
		&self.parameters.account_email
	}

	pub fn organizational_unit(&self) -> &str {
		&self.parameters.organizational_unit
	}

	pub fn tags(&self) -> &BTreeMap<String, String> {
		&self.tags
	}

	pub fn custom_fields(&self) -> &BTreeMap<String, String> {
		&self.custom_fields
	}

	/// Customizations pipeline named by the request itself, if any.
	pub fn customizations_name(&self) -> Option<&str> {
		self.customizations_name.as_deref()
	}

	/// Origin of the request. Diagnostics only; never sent to a sink.
	pub fn source_file(&self) -> &Path {
		&self.source_file
	}
}
