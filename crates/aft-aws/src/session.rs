// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Credential broker: turns ambient credentials into a delegated session.

use std::time::SystemTime;

use aft_config::AwsConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::provider::SharedCredentialsProvider;
use aws_credential_types::Credentials;
use aws_sdk_sts::error::DisplayErrorContext;
use tracing::{info, instrument};

use crate::error::CredentialError;

const PROVIDER_NAME: &str = "aft-bootstrap-assume-role";

/// Sessions used during a run.
///
/// `base` carries the caller's own credentials and is used for the state
/// table, which lives in the calling account. `delegated` carries the
/// assumed-role credentials used for the queue and the control plane.
#[derive(Debug, Clone)]
pub struct Sessions {
	pub base: SdkConfig,
	pub delegated: SdkConfig,
}

#[derive(Debug, Clone)]
pub struct StsCredentialBroker {
	region: String,
	role_arn: String,
	session_name: String,
}

impl StsCredentialBroker {
	pub fn new(config: &AwsConfig) -> Self {
		Self {
			region: config.region.clone(),
			role_arn: config.launch_role_arn.clone(),
			session_name: config.session_name.clone(),
		}
	}

	/// Load the base session from the default provider chain and assume the
	/// launch role. Credentials are fetched eagerly so a bad role fails the
	/// run before any file is touched.
	#[instrument(skip(self), fields(region = %self.region, role_arn = %self.role_arn))]
	pub async fn delegate(&self) -> Result<Sessions, CredentialError> {
		let base = aws_config::defaults(BehaviorVersion::latest())
			.region(Region::new(self.region.clone()))
			.load()
			.await;

		let sts = aws_sdk_sts::Client::new(&base);
		let output = sts
			.assume_role()
			.role_arn(&self.role_arn)
			.role_session_name(&self.session_name)
			.send()
			.await
			.map_err(|e| CredentialError::AssumeRole {
				role_arn: self.role_arn.clone(),
				message: DisplayErrorContext(&e).to_string(),
			})?;

		let assumed = output
			.credentials()
			.ok_or_else(|| CredentialError::NoCredentials {
				role_arn: self.role_arn.clone(),
			})?;

		let credentials = Credentials::new(
			assumed.access_key_id(),
			assumed.secret_access_key(),
			Some(assumed.session_token().to_string()),
			SystemTime::try_from(*assumed.expiration()).ok(),
			PROVIDER_NAME,
		);

		let delegated = base
			.to_builder()
			.credentials_provider(SharedCredentialsProvider::new(credentials))
			.build();

		info!(session_name = %self.session_name, "assumed launch role");
		Ok(Sessions { base, delegated })
	}
}
