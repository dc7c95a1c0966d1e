// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Interfaces of the three external systems a request is written to.

use std::fmt;
use std::sync::Arc;

use aft_request::Identity;
use async_trait::async_trait;
use serde::Serialize;

use crate::error::{ProvisioningError, QueueError, RecorderError};
use crate::payload::{DispatchMessage, ProvisioningParameters, StateRecord};

/// Identifier assigned by the queue to an enqueued message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MessageId(pub String);

/// Identifier the control plane returns for a provisioning attempt. Printed in
/// the run summary for manual reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TrackingId(pub String);

impl fmt::Display for MessageId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl fmt::Display for TrackingId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Durable store of accepted requests.
///
/// `put` must overwrite: writing the same identity twice leaves one record.
#[async_trait]
pub trait StateRecorder: Send + Sync {
	async fn put(&self, identity: &Identity, record: &StateRecord) -> Result<(), RecorderError>;
}

/// Queue feeding the asynchronous request processor.
///
/// Messages sharing a `group_key` are delivered in order. `dedup_token` is
/// unique per send so retries are never collapsed by the transport.
#[async_trait]
pub trait DispatchQueue: Send + Sync {
	async fn send(
		&self,
		group_key: &str,
		payload: &DispatchMessage,
		dedup_token: &str,
	) -> Result<MessageId, QueueError>;
}

/// Control plane that creates the account.
///
/// Not idempotent: a second submit for the same request may start a second
/// provisioning attempt.
#[async_trait]
pub trait ProvisioningClient: Send + Sync {
	async fn submit(
		&self,
		account_name: &str,
		parameters: &ProvisioningParameters,
	) -> Result<TrackingId, ProvisioningError>;
}

/// Clients shared by every request of a run. Read-only after setup.
#[derive(Clone)]
pub struct Sinks {
	pub recorder: Arc<dyn StateRecorder>,
	pub queue: Arc<dyn DispatchQueue>,
	pub provisioner: Arc<dyn ProvisioningClient>,
}

impl Sinks {
	pub fn new(
		recorder: Arc<dyn StateRecorder>,
		queue: Arc<dyn DispatchQueue>,
		provisioner: Arc<dyn ProvisioningClient>,
	) -> Self {
		Self {
			recorder,
			queue,
			provisioner,
		}
	}
}

impl fmt::Debug for Sinks {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Sinks").finish_non_exhaustive()
	}
}
