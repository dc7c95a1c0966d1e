// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request state store configuration section.

use serde::{Deserialize, Serialize};

use super::Required;

pub const DEFAULT_CUSTOMIZATIONS_NAME: &str = "aft-account-provisioning-framework";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StateConfigLayer {
	pub table_name: Option<String>,
	pub customizations_name: Option<String>,
}

impl StateConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.table_name.is_some() {
			self.table_name = other.table_name;
		}
		if other.customizations_name.is_some() {
			self.customizations_name = other.customizations_name;
		}
	}

	pub(crate) fn finalize(self, required: &mut Required) -> StateConfig {
		StateConfig {
			table_name: required.take(
				self.table_name,
				"state.table_name",
				"AFT_REQUEST_DDB_TABLE_NAME",
			),
			customizations_name: self
				.customizations_name
				.unwrap_or_else(|| DEFAULT_CUSTOMIZATIONS_NAME.to_string()),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StateConfig {
	pub table_name: String,
	/// Written to records whose request does not name its own customizations.
	pub customizations_name: String,
}
