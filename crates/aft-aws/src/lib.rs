// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! AWS implementations of the batch sinks.
//!
//! The state table is written with the caller's own session; the queue and
//! the Service Catalog product are reached through the assumed launch role.

pub mod catalog;
pub mod dynamo;
pub mod error;
pub mod session;
pub mod sqs;

use std::sync::Arc;

use aft_batch::Sinks;
use aft_config::BootstrapConfig;

pub use catalog::ServiceCatalogProvisioner;
pub use dynamo::DynamoStateRecorder;
pub use error::CredentialError;
pub use session::{Sessions, StsCredentialBroker};
pub use sqs::SqsDispatchQueue;

/// Build the three sinks for a run.
pub fn build_sinks(config: &BootstrapConfig, sessions: &Sessions) -> Sinks {
	Sinks::new(
		Arc::new(DynamoStateRecorder::new(
			&sessions.base,
			&config.state.table_name,
		)),
		Arc::new(SqsDispatchQueue::new(&sessions.delegated, &config.queue.url)),
		Arc::new(ServiceCatalogProvisioner::new(
			&sessions.delegated,
			&config.provisioning,
		)),
	)
}
