// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;
use std::path::PathBuf;

/// Errors raised before any file is visited.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
	#[error("request directory does not exist: {}", .path.display())]
	RootNotFound { path: PathBuf },

	#[error("request path is not a directory: {}", .path.display())]
	NotADirectory { path: PathBuf },

	#[error("cannot access request directory {}: {source}", .path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

/// A single reason a request block was rejected as incomplete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldProblem {
	Missing(&'static str),
	InvalidEmail(&'static str),
}

impl FieldProblem {
	pub fn field(&self) -> &'static str {
		match self {
			FieldProblem::Missing(field) | FieldProblem::InvalidEmail(field) => field,
		}
	}
}

impl fmt::Display for FieldProblem {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FieldProblem::Missing(field) => write!(f, "{field} is missing"),
			FieldProblem::InvalidEmail(field) => write!(f, "{field} is not a valid email address"),
		}
	}
}

/// Per-file parse failures. None of these abort a batch.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
	#[error("failed to read {}: {source}", .path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("malformed request document {}: {reason}", .path.display())]
	Malformed { path: PathBuf, reason: String },

	#[error("incomplete account request in {}: {}", .path.display(), join_problems(.problems))]
	Incomplete {
		path: PathBuf,
		problems: Vec<FieldProblem>,
	},
}

impl ParseError {
	/// `true` when the document was readable and well-formed but failed
	/// required-field validation.
	pub fn is_incomplete(&self) -> bool {
		matches!(self, ParseError::Incomplete { .. })
	}

	/// Short reason without the path prefix, for summaries.
	pub fn reason(&self) -> String {
		match self {
			ParseError::Read { source, .. } => format!("unreadable: {source}"),
			ParseError::Malformed { reason, .. } => reason.clone(),
			ParseError::Incomplete { problems, .. } => join_problems(problems),
		}
	}
}

fn join_problems(problems: &[FieldProblem]) -> String {
	problems
		.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join(", ")
}
