// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

/// Failure to establish the delegated session. Fatal for the whole run.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
	#[error("failed to assume role {role_arn}: {message}")]
	AssumeRole { role_arn: String, message: String },

	#[error("assume role for {role_arn} returned no credentials")]
	NoCredentials { role_arn: String },
}
