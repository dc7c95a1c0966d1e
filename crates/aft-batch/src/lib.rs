// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Batch orchestration of account requests.
//!
//! Every scanned file is parsed and then driven through three side-effecting
//! steps, strictly in order and one file at a time:
//!
//! 1. persist the request to the [`StateRecorder`] (overwrite by identity)
//! 2. enqueue it on the [`DispatchQueue`] (fresh deduplication token per send)
//! 3. submit it to the [`ProvisioningClient`]
//!
//! A failure at any step is recorded on the [`BatchRun`] as
//! [`Outcome::FailedAtStep`] and processing continues with the next file.

pub mod error;
pub mod memory;
pub mod orchestrator;
pub mod outcome;
pub mod payload;
pub mod sink;
pub mod state;

pub use error::{ProvisioningError, QueueError, RecorderError};
pub use orchestrator::{validate_requests, Orchestrator};
pub use outcome::{BatchRun, FileOutcome, Outcome, Summary};
pub use payload::{DispatchMessage, Operation, ProvisioningParameters, StateRecord};
pub use sink::{DispatchQueue, MessageId, ProvisioningClient, Sinks, StateRecorder, TrackingId};
pub use state::{RequestState, Step};
