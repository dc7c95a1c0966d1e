// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

/// Errors from the state store.
#[derive(Debug, thiserror::Error)]
pub enum RecorderError {
	#[error("state store write failed: {message}")]
	Backend { message: String },

	#[error("failed to encode state record: {0}")]
	Encode(#[from] serde_json::Error),
}

/// Errors from the dispatch queue.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
	#[error("queue send failed: {message}")]
	Backend { message: String },

	#[error("failed to encode queue message: {0}")]
	Encode(#[from] serde_json::Error),
}

/// Errors from the provisioning control plane.
#[derive(Debug, thiserror::Error)]
pub enum ProvisioningError {
	#[error("provisioning request failed: {message}")]
	Backend { message: String },

	#[error("invalid provisioning request: {0}")]
	InvalidRequest(String),

	#[error("control plane returned no tracking identifier")]
	MissingTrackingId,
}
