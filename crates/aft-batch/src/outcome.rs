// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;
use std::path::PathBuf;

use aft_request::{Identity, ParseError};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::sink::{MessageId, TrackingId};
use crate::state::Step;

/// Result of processing one file. Every scanned file gets exactly one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
	/// Persisted, dispatched and submitted.
	Accepted {
		identity: Identity,
		message_id: MessageId,
		tracking_id: TrackingId,
	},
	/// Parsed successfully in a validation-only run; no sink was called.
	Validated { identity: Identity },
	SkippedMalformed { reason: String },
	SkippedIncomplete { reason: String },
	FailedAtStep {
		identity: Identity,
		step: Step,
		cause: String,
	},
}

impl Outcome {
	pub fn skipped(err: &ParseError) -> Self {
		if err.is_incomplete() {
			Outcome::SkippedIncomplete {
				reason: err.reason(),
			}
		} else {
			Outcome::SkippedMalformed {
				reason: err.reason(),
			}
		}
	}

	pub fn label(&self) -> &'static str {
		match self {
			Outcome::Accepted { .. } => "accepted",
			Outcome::Validated { .. } => "validated",
			Outcome::SkippedMalformed { .. } => "skipped (malformed)",
			Outcome::SkippedIncomplete { .. } => "skipped (incomplete)",
			Outcome::FailedAtStep { .. } => "failed",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileOutcome {
	pub path: PathBuf,
	#[serde(flatten)]
	pub outcome: Outcome,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
	pub accepted: usize,
	pub validated: usize,
	pub skipped_malformed: usize,
	pub skipped_incomplete: usize,
	pub failed: usize,
}

impl Summary {
	pub fn total(&self) -> usize {
		self.accepted + self.validated + self.skipped_malformed + self.skipped_incomplete + self.failed
	}
}

/// One program invocation: the ordered outcome of every visited file.
/// Never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct BatchRun {
	pub run_id: String,
	pub started_at: DateTime<Utc>,
	pub finished_at: Option<DateTime<Utc>>,
	pub summary: Summary,
	outcomes: Vec<FileOutcome>,
}

impl BatchRun {
	pub fn new() -> Self {
		Self {
			run_id: uuid::Uuid::new_v4().to_string(),
			started_at: Utc::now(),
			finished_at: None,
			summary: Summary::default(),
			outcomes: Vec::new(),
		}
	}

	pub fn record(&mut self, path: PathBuf, outcome: Outcome) {
		match &outcome {
			Outcome::Accepted { .. } => self.summary.accepted += 1,
			Outcome::Validated { .. } => self.summary.validated += 1,
			Outcome::SkippedMalformed { .. } => self.summary.skipped_malformed += 1,
			Outcome::SkippedIncomplete { .. } => self.summary.skipped_incomplete += 1,
			Outcome::FailedAtStep { .. } => self.summary.failed += 1,
		}
		self.outcomes.push(FileOutcome { path, outcome });
	}

	pub fn finish(&mut self) {
		self.finished_at = Some(Utc::now());
	}

	pub fn outcomes(&self) -> &[FileOutcome] {
		&self.outcomes
	}

	/// `true` when any file was skipped or failed.
	pub fn has_problems(&self) -> bool {
		self.summary.skipped_malformed + self.summary.skipped_incomplete + self.summary.failed > 0
	}
}

impl Default for BatchRun {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Display for BatchRun {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = &self.summary;
		writeln!(
			f,
			"Batch {}: {} file(s), {} accepted, {} validated, {} skipped, {} failed",
			self.run_id,
			s.total(),
			s.accepted,
			s.validated,
			s.skipped_malformed + s.skipped_incomplete,
			s.failed,
		)?;
		for entry in &self.outcomes {
			write!(f, "  {:<22} {}", entry.outcome.label(), entry.path.display())?;
			match &entry.outcome {
				Outcome::Accepted {
					identity,
					message_id,
					tracking_id,
				} => write!(f, " [{identity}] message={message_id} tracking={tracking_id}")?,
				Outcome::Validated { identity } => write!(f, " [{identity}]")?,
				Outcome::SkippedMalformed { reason } | Outcome::SkippedIncomplete { reason } => {
					write!(f, ": {reason}")?
				}
				Outcome::FailedAtStep {
					identity,
					step,
					cause,
				} => write!(f, " [{identity}] at {step}: {cause}")?,
			}
			writeln!(f)?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn record_keeps_order_and_counts() {
		let mut run = BatchRun::new();
		run.record(
			PathBuf::from("a.tf"),
			Outcome::SkippedMalformed {
				reason: "invalid HCL".to_string(),
			},
		);
		run.record(
			PathBuf::from("b.tf"),
			Outcome::SkippedIncomplete {
				reason: "AccountEmail is missing".to_string(),
			},
		);
		run.finish();

		assert_eq!(run.summary.skipped_malformed, 1);
		assert_eq!(run.summary.skipped_incomplete, 1);
		assert_eq!(run.summary.total(), 2);
		assert!(run.has_problems());
		assert!(run.finished_at.is_some());
		let paths: Vec<_> = run.outcomes().iter().map(|o| o.path.clone()).collect();
		assert_eq!(paths, vec![PathBuf::from("a.tf"), PathBuf::from("b.tf")]);
	}

	#[test]
	fn empty_run_has_no_problems() {
		let run = BatchRun::default();
		assert!(!run.has_problems());
		assert!(run.to_string().contains("0 file(s)"));
	}

	#[test]
	fn outcome_serializes_with_tag() {
		let entry = FileOutcome {
			path: PathBuf::from("b.tf"),
			outcome: Outcome::SkippedIncomplete {
				reason: "AccountEmail is missing".to_string(),
			},
		};
		let json = serde_json::to_value(&entry).unwrap();
		assert_eq!(json["outcome"], "skipped_incomplete");
		assert_eq!(json["path"], "b.tf");
		assert_eq!(json["reason"], "AccountEmail is missing");
	}
}
