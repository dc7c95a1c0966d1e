// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request source configuration section.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_REQUEST_DIR: &str = "./account-requests/terraform";
const DEFAULT_EXTENSION: &str = "tf";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RequestsConfigLayer {
	pub dir: Option<PathBuf>,
	pub extension: Option<String>,
}

impl RequestsConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.dir.is_some() {
			self.dir = other.dir;
		}
		if other.extension.is_some() {
			self.extension = other.extension;
		}
	}

	pub fn finalize(self) -> RequestsConfig {
		RequestsConfig {
			dir: self.dir.unwrap_or_else(|| PathBuf::from(DEFAULT_REQUEST_DIR)),
			extension: self
				.extension
				.unwrap_or_else(|| DEFAULT_EXTENSION.to_string()),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestsConfig {
	pub dir: PathBuf,
	pub extension: String,
}

impl Default for RequestsConfig {
	fn default() -> Self {
		RequestsConfigLayer::default().finalize()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_values() {
		let config = RequestsConfig::default();
		assert_eq!(config.dir, PathBuf::from("./account-requests/terraform"));
		assert_eq!(config.extension, "tf");
	}

	#[test]
	fn test_deserialize_layer_empty() {
		let layer: RequestsConfigLayer = toml::from_str("").unwrap();
		assert!(layer.dir.is_none());
		assert!(layer.extension.is_none());
	}
}
