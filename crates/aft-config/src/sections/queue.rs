// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Dispatch queue configuration section.

use serde::{Deserialize, Serialize};

use super::Required;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QueueConfigLayer {
	pub url: Option<String>,
}

impl QueueConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.url.is_some() {
			self.url = other.url;
		}
	}

	pub(crate) fn finalize(self, required: &mut Required) -> QueueConfig {
		QueueConfig {
			url: required.take(self.url, "queue.url", "SQS_QUEUE_URL"),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueueConfig {
	/// FIFO queue consumed by the account request processor.
	pub url: String,
}
