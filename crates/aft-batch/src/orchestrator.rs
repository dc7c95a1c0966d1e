// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::{Path, PathBuf};

use aft_request::{parse_file, AccountRequest};
use tracing::{debug, error, info, info_span, instrument, warn, Instrument};

use crate::outcome::{BatchRun, Outcome};
use crate::payload::{DispatchMessage, ProvisioningParameters, StateRecord};
use crate::sink::Sinks;
use crate::state::{RequestState, Step};

/// Drives each request file through persist, dispatch and submit.
///
/// Files are processed strictly one after another. Submission is not
/// idempotent, so running requests concurrently would need a deduplication
/// key at the control plane first.
#[derive(Debug)]
pub struct Orchestrator {
	sinks: Sinks,
	default_customizations: String,
}

impl Orchestrator {
	pub fn new(sinks: Sinks, default_customizations: impl Into<String>) -> Self {
		Self {
			sinks,
			default_customizations: default_customizations.into(),
		}
	}

	/// Visit every candidate and return the ordered outcomes. Never aborts
	/// early: a failing file costs one log line and one recorded outcome.
	#[instrument(skip_all)]
	pub async fn run<I>(&self, candidates: I) -> BatchRun
	where
		I: IntoIterator<Item = PathBuf>,
	{
		let mut run = BatchRun::new();
		info!(run_id = %run.run_id, "batch started");

		for path in candidates {
			let span = info_span!("request_file", path = %path.display());
			let outcome = self.process_file(&path).instrument(span).await;
			run.record(path, outcome);
		}

		run.finish();
		info!(
			run_id = %run.run_id,
			accepted = run.summary.accepted,
			skipped = run.summary.skipped_malformed + run.summary.skipped_incomplete,
			failed = run.summary.failed,
			"batch finished"
		);
		run
	}

	pub async fn process_file(&self, path: &Path) -> Outcome {
		match parse_file(path) {
			Ok(request) => self.process_request(&request).await,
			Err(e) => {
				warn!(error = %e, "skipping request file");
				Outcome::skipped(&e)
			}
		}
	}

	/// Run the state machine for one parsed request to a terminal state.
	pub async fn process_request(&self, request: &AccountRequest) -> Outcome {
		let identity = request.identity().clone();
		let mut state = RequestState::Parsed;

		loop {
			state = match self.advance(request, state).await {
				RequestState::Submitted {
					message_id,
					tracking_id,
				} => {
					info!(
						identity = %identity,
						account_name = %request.account_name(),
						message_id = %message_id,
						tracking_id = %tracking_id,
						"account request accepted"
					);
					return Outcome::Accepted {
						identity,
						message_id,
						tracking_id,
					};
				}
				RequestState::Failed { step, cause } => {
					error!(
						identity = %identity,
						step = %step,
						error = %cause,
						"account request failed; re-run the batch to retry"
					);
					return Outcome::FailedAtStep {
						identity,
						step,
						cause,
					};
				}
				next => next,
			};
		}
	}

	async fn advance(&self, request: &AccountRequest, state: RequestState) -> RequestState {
		let identity = request.identity();
		if let Some(step) = state.next_step() {
			debug!(identity = %identity, step = %step, "advancing request");
		}
		match state {
			RequestState::Parsed => {
				let record = StateRecord::from_request(request, &self.default_customizations);
				match self.sinks.recorder.put(identity, &record).await {
					Ok(()) => RequestState::Persisted,
					Err(e) => failed(Step::Persist, e),
				}
			}
			RequestState::Persisted => {
				let message = DispatchMessage::from_request(request);
				let dedup_token = uuid::Uuid::new_v4().to_string();
				match self
					.sinks
					.queue
					.send(identity.as_str(), &message, &dedup_token)
					.await
				{
					Ok(message_id) => RequestState::Dispatched { message_id },
					Err(e) => failed(Step::Dispatch, e),
				}
			}
			RequestState::Dispatched { message_id } => {
				let parameters = ProvisioningParameters::from_request(request);
				match self
					.sinks
					.provisioner
					.submit(request.account_name(), &parameters)
					.await
				{
					Ok(tracking_id) => RequestState::Submitted {
						message_id,
						tracking_id,
					},
					Err(e) => failed(Step::Submit, e),
				}
			}
			terminal => terminal,
		}
	}
}

fn failed(step: Step, cause: impl std::fmt::Display) -> RequestState {
	RequestState::Failed {
		step,
		cause: cause.to_string(),
	}
}

/// Parse every candidate without touching any sink.
pub fn validate_requests<I>(candidates: I) -> BatchRun
where
	I: IntoIterator<Item = PathBuf>,
{
	let mut run = BatchRun::new();
	for path in candidates {
		let outcome = match parse_file(&path) {
			Ok(request) => Outcome::Validated {
				identity: request.identity().clone(),
			},
			Err(e) => {
				warn!(path = %path.display(), error = %e, "invalid request file");
				Outcome::skipped(&e)
			}
		};
		run.record(path, outcome);
	}
	run.finish();
	run
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::memory::{MemoryProvisioner, MemoryQueue, MemoryStateRecorder};
	use std::sync::Arc;

	fn request(email: &str, name: &str, owner: &str) -> AccountRequest {
		let content = format!(
			r#"
locals {{
  account_request = {{
    control_tower_parameters = {{
      AccountEmail              = "{email}"
      AccountName               = "{name}"
      ManagedOrganizationalUnit = "OU-Sandbox"
    }}
    account_tags = {{
      owner = "{owner}"
    }}
  }}
}}
"#
		);
		aft_request::parse_str(&content, Path::new("request.tf")).unwrap()
	}

	struct Harness {
		recorder: Arc<MemoryStateRecorder>,
		queue: Arc<MemoryQueue>,
		provisioner: Arc<MemoryProvisioner>,
		orchestrator: Orchestrator,
	}

	fn harness() -> Harness {
		let recorder = Arc::new(MemoryStateRecorder::new());
		let queue = Arc::new(MemoryQueue::new());
		let provisioner = Arc::new(MemoryProvisioner::new());
		let orchestrator = Orchestrator::new(
			Sinks::new(recorder.clone(), queue.clone(), provisioner.clone()),
			"aft-account-provisioning-framework",
		);
		Harness {
			recorder,
			queue,
			provisioner,
			orchestrator,
		}
	}

	#[tokio::test]
	async fn accepted_request_reaches_every_sink() {
		let h = harness();
		let outcome = h
			.orchestrator
			.process_request(&request("a@example.com", "Team-A", "team-a"))
			.await;

		assert!(matches!(outcome, Outcome::Accepted { .. }));
		assert_eq!(h.recorder.put_count(), 1);
		let sent = h.queue.sent();
		assert_eq!(sent.len(), 1);
		assert_eq!(sent[0].group_key, "a@example.com");
		let submitted = h.provisioner.submitted();
		assert_eq!(submitted.len(), 1);
		assert_eq!(submitted[0].account_name, "Team-A");
	}

	#[tokio::test]
	async fn persist_failure_stops_before_dispatch() {
		let h = harness();
		h.recorder.fail_for("a@example.com");

		let outcome = h
			.orchestrator
			.process_request(&request("a@example.com", "Team-A", "team-a"))
			.await;

		match outcome {
			Outcome::FailedAtStep { step, cause, .. } => {
				assert_eq!(step, Step::Persist);
				assert!(cause.contains("injected"));
			}
			other => panic!("expected failure, got {other:?}"),
		}
		assert!(h.queue.sent().is_empty());
		assert!(h.provisioner.submitted().is_empty());
	}

	#[tokio::test]
	async fn submit_failure_keeps_earlier_side_effects() {
		let h = harness();
		h.provisioner.fail_for("Team-A");

		let outcome = h
			.orchestrator
			.process_request(&request("a@example.com", "Team-A", "team-a"))
			.await;

		assert!(matches!(
			outcome,
			Outcome::FailedAtStep {
				step: Step::Submit,
				..
			}
		));
		assert_eq!(h.recorder.put_count(), 1);
		assert_eq!(h.queue.sent().len(), 1);
	}

	#[tokio::test]
	async fn repeated_processing_overwrites_state_and_uses_fresh_tokens() {
		let h = harness();
		h.orchestrator
			.process_request(&request("a@example.com", "Team-A", "first"))
			.await;
		h.orchestrator
			.process_request(&request("a@example.com", "Team-A", "second"))
			.await;

		let records = h.recorder.records();
		assert_eq!(records.len(), 1);
		let record = records.values().next().unwrap();
		assert_eq!(record.account_tags.get("owner").map(String::as_str), Some("second"));

		let sent = h.queue.sent();
		assert_eq!(sent.len(), 2);
		assert_eq!(sent[0].group_key, sent[1].group_key);
		assert_ne!(sent[0].dedup_token, sent[1].dedup_token);

		// Submission has no idempotency key; both attempts reach the control plane.
		assert_eq!(h.provisioner.submitted().len(), 2);
	}

	#[tokio::test]
	async fn unreadable_file_is_skipped_as_malformed() {
		let h = harness();
		let dir = tempfile::tempdir().unwrap();
		let run = h.orchestrator.run(vec![dir.path().join("absent.tf")]).await;

		assert_eq!(run.summary.skipped_malformed, 1);
		assert_eq!(h.recorder.put_count(), 0);
	}

	#[test]
	fn validate_requests_touches_no_sink() {
		let dir = tempfile::tempdir().unwrap();
		let good = dir.path().join("good.tf");
		std::fs::write(
			&good,
			r#"
locals {
  account_request = {
    control_tower_parameters = {
      AccountEmail              = "a@example.com"
      AccountName               = "Team-A"
      ManagedOrganizationalUnit = "OU-Sandbox"
    }
  }
}
"#,
		)
		.unwrap();
		let bad = dir.path().join("bad.tf");
		std::fs::write(&bad, "locals {").unwrap();

		let run = validate_requests(vec![good, bad]);
		assert_eq!(run.summary.validated, 1);
		assert_eq!(run.summary.skipped_malformed, 1);
	}
}
