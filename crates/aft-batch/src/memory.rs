// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory sinks for tests and dry runs.
//!
//! Each sink records what it was asked to do and can be told to fail for a
//! given key, so batch behaviour can be checked without any cloud account.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

use aft_request::Identity;
use async_trait::async_trait;

use crate::error::{ProvisioningError, QueueError, RecorderError};
use crate::payload::{DispatchMessage, ProvisioningParameters, StateRecord};
use crate::sink::{DispatchQueue, MessageId, ProvisioningClient, StateRecorder, TrackingId};

/// State store keyed by identity with overwrite semantics.
#[derive(Debug, Clone, Default)]
pub struct MemoryStateRecorder {
	records: Arc<Mutex<BTreeMap<Identity, StateRecord>>>,
	puts: Arc<Mutex<usize>>,
	failing: Arc<Mutex<HashSet<String>>>,
}

impl MemoryStateRecorder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Make every `put` for this identity fail.
	pub fn fail_for(&self, identity: &str) {
		self.failing.lock().unwrap().insert(identity.to_string());
	}

	pub fn records(&self) -> BTreeMap<Identity, StateRecord> {
		self.records.lock().unwrap().clone()
	}

	/// Number of successful writes, including overwrites.
	pub fn put_count(&self) -> usize {
		*self.puts.lock().unwrap()
	}
}

#[async_trait]
impl StateRecorder for MemoryStateRecorder {
	async fn put(&self, identity: &Identity, record: &StateRecord) -> Result<(), RecorderError> {
		if self.failing.lock().unwrap().contains(identity.as_str()) {
			return Err(RecorderError::Backend {
				message: format!("injected failure for {identity}"),
			});
		}
		self.records
			.lock()
			.unwrap()
			.insert(identity.clone(), record.clone());
		*self.puts.lock().unwrap() += 1;
		Ok(())
	}
}

/// A message accepted by [`MemoryQueue`].
#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
	pub group_key: String,
	pub dedup_token: String,
	pub body: String,
	pub message_id: MessageId,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryQueue {
	sent: Arc<Mutex<Vec<SentMessage>>>,
	failing: Arc<Mutex<HashSet<String>>>,
}

impl MemoryQueue {
	pub fn new() -> Self {
		Self::default()
	}

	/// Make every send with this group key fail.
	pub fn fail_for(&self, group_key: &str) {
		self.failing.lock().unwrap().insert(group_key.to_string());
	}

	pub fn sent(&self) -> Vec<SentMessage> {
		self.sent.lock().unwrap().clone()
	}
}

#[async_trait]
impl DispatchQueue for MemoryQueue {
	async fn send(
		&self,
		group_key: &str,
		payload: &DispatchMessage,
		dedup_token: &str,
	) -> Result<MessageId, QueueError> {
		if self.failing.lock().unwrap().contains(group_key) {
			return Err(QueueError::Backend {
				message: format!("injected failure for {group_key}"),
			});
		}
		let body = payload.to_json()?;
		let mut sent = self.sent.lock().unwrap();
		let message_id = MessageId(format!("msg-{}", sent.len() + 1));
		sent.push(SentMessage {
			group_key: group_key.to_string(),
			dedup_token: dedup_token.to_string(),
			body,
			message_id: message_id.clone(),
		});
		Ok(message_id)
	}
}

/// A submission accepted by [`MemoryProvisioner`].
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
	pub account_name: String,
	pub parameters: ProvisioningParameters,
	pub tracking_id: TrackingId,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryProvisioner {
	submitted: Arc<Mutex<Vec<Submission>>>,
	failing: Arc<Mutex<HashSet<String>>>,
}

impl MemoryProvisioner {
	pub fn new() -> Self {
		Self::default()
	}

	/// Make every submission for this account name fail.
	pub fn fail_for(&self, account_name: &str) {
		self.failing.lock().unwrap().insert(account_name.to_string());
	}

	/// Clear injected failures, e.g. before a re-run.
	pub fn recover(&self) {
		self.failing.lock().unwrap().clear();
	}

	pub fn submitted(&self) -> Vec<Submission> {
		self.submitted.lock().unwrap().clone()
	}
}

#[async_trait]
impl ProvisioningClient for MemoryProvisioner {
	async fn submit(
		&self,
		account_name: &str,
		parameters: &ProvisioningParameters,
	) -> Result<TrackingId, ProvisioningError> {
		if self.failing.lock().unwrap().contains(account_name) {
			return Err(ProvisioningError::Backend {
				message: format!("injected failure for {account_name}"),
			});
		}
		let mut submitted = self.submitted.lock().unwrap();
		let tracking_id = TrackingId(format!("rec-{}", submitted.len() + 1));
		submitted.push(Submission {
			account_name: account_name.to_string(),
			parameters: parameters.clone(),
			tracking_id: tracking_id.clone(),
		});
		Ok(tracking_id)
	}
}
