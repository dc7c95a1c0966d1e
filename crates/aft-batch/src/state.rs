// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-request state machine.
//!
//! ```text
//! Parsed --persist--> Persisted --dispatch--> Dispatched --submit--> Submitted
//!    \                    \                       \
//!     +--------------------+-----------------------+--> Failed(step)
//! ```

use std::fmt;

use serde::Serialize;

use crate::sink::{MessageId, TrackingId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
	Persist,
	Dispatch,
	Submit,
}

impl Step {
	pub fn as_str(&self) -> &'static str {
		match self {
			Step::Persist => "persist",
			Step::Dispatch => "dispatch",
			Step::Submit => "submit",
		}
	}
}

impl fmt::Display for Step {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestState {
	Parsed,
	Persisted,
	Dispatched {
		message_id: MessageId,
	},
	Submitted {
		message_id: MessageId,
		tracking_id: TrackingId,
	},
	Failed {
		step: Step,
		cause: String,
	},
}

impl RequestState {
	/// Step that moves this state forward, `None` once terminal.
	pub fn next_step(&self) -> Option<Step> {
		match self {
			RequestState::Parsed => Some(Step::Persist),
			RequestState::Persisted => Some(Step::Dispatch),
			RequestState::Dispatched { .. } => Some(Step::Submit),
			RequestState::Submitted { .. } | RequestState::Failed { .. } => None,
		}
	}
}
