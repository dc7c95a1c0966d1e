// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use aft_batch::{DispatchMessage, DispatchQueue, MessageId, QueueError};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sqs::error::DisplayErrorContext;
use aws_sdk_sqs::Client;
use tracing::{debug, instrument};

/// Dispatch queue backed by an SQS FIFO queue.
#[derive(Debug, Clone)]
pub struct SqsDispatchQueue {
	client: Client,
	queue_url: String,
}

impl SqsDispatchQueue {
	pub fn new(session: &SdkConfig, queue_url: impl Into<String>) -> Self {
		Self {
			client: Client::new(session),
			queue_url: queue_url.into(),
		}
	}
}

#[async_trait]
impl DispatchQueue for SqsDispatchQueue {
	#[instrument(skip(self, payload), fields(queue_url = %self.queue_url))]
	async fn send(
		&self,
		group_key: &str,
		payload: &DispatchMessage,
		dedup_token: &str,
	) -> Result<MessageId, QueueError> {
		let body = payload.to_json()?;
		let output = self
			.client
			.send_message()
			.queue_url(&self.queue_url)
			.message_body(body)
			.message_group_id(group_key)
			.message_deduplication_id(dedup_token)
			.send()
			.await
			.map_err(|e| QueueError::Backend {
				message: DisplayErrorContext(&e).to_string(),
			})?;

		let message_id = output.message_id().unwrap_or_default().to_string();
		debug!(message_id = %message_id, "message enqueued");
		Ok(MessageId(message_id))
	}
}
