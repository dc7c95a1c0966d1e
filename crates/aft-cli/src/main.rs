// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `aft-bootstrap` binary.

mod args;

use std::process::ExitCode;

use aft_aws::StsCredentialBroker;
use aft_batch::{validate_requests, BatchRun, Orchestrator};
use aft_config::{LogFormat, LoggingConfig};
use aft_request::RequestScanner;
use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use args::{Args, Command, OutputFormat};

const EXIT_FATAL: u8 = 1;
const EXIT_PROBLEMS: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
	let args = Args::parse();

	// Load .env file if present
	dotenvy::dotenv().ok();

	match execute(&args).await {
		Ok(run) => {
			if let Err(e) = print_summary(&run, args.output) {
				eprintln!("error: {e:#}");
				return ExitCode::from(EXIT_FATAL);
			}
			ExitCode::from(exit_code(&run, args.strict))
		}
		Err(e) => {
			tracing::error!(error = %format!("{e:#}"), "bootstrap aborted");
			eprintln!("error: {e:#}");
			ExitCode::from(EXIT_FATAL)
		}
	}
}

/// Everything that can abort before the first file is processed returns
/// `Err`; per-file problems are part of the returned run.
async fn execute(args: &Args) -> anyhow::Result<BatchRun> {
	let layer = aft_config::load_layer(args.config.as_deref(), args.overrides())?;
	init_tracing(&layer.logging());

	match args.command() {
		Command::Validate => {
			let requests = layer.requests();
			let scanner = RequestScanner::new(&requests.dir, &requests.extension)?;
			tracing::info!(request_dir = %scanner.root().display(), "validating request files");
			Ok(validate_requests(scanner.into_candidates()))
		}
		Command::Run => {
			let config = layer.finalize()?;
			let scanner = RequestScanner::new(&config.requests.dir, &config.requests.extension)?;
			let sessions = StsCredentialBroker::new(&config.aws)
				.delegate()
				.await
				.context("could not establish the delegated AWS session")?;
			let sinks = aft_aws::build_sinks(&config, &sessions);
			let orchestrator = Orchestrator::new(sinks, config.state.customizations_name.clone());
			Ok(orchestrator.run(scanner.into_candidates()).await)
		}
	}
}

/// A subscriber installed earlier (tests) is left in place.
fn init_tracing(logging: &LoggingConfig) {
	let filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));
	let registry = tracing_subscriber::registry().with(filter);

	// Logs go to stderr so stdout carries only the summary.
	let result = match logging.format {
		LogFormat::Pretty => registry
			.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
			.try_init(),
		LogFormat::Json => registry
			.with(
				tracing_subscriber::fmt::layer()
					.json()
					.with_writer(std::io::stderr),
			)
			.try_init(),
	};
	if let Err(e) = result {
		tracing::debug!(error = %e, "tracing subscriber already installed");
	}
}

fn print_summary(run: &BatchRun, output: OutputFormat) -> anyhow::Result<()> {
	match output {
		OutputFormat::Text => print!("{run}"),
		OutputFormat::Json => println!("{}", serde_json::to_string_pretty(run)?),
	}
	Ok(())
}

fn exit_code(run: &BatchRun, strict: bool) -> u8 {
	if strict && run.has_problems() {
		EXIT_PROBLEMS
	} else {
		0
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use aft_batch::Outcome;
	use std::path::PathBuf;

	fn run_with_skip() -> BatchRun {
		let mut run = BatchRun::new();
		run.record(
			PathBuf::from("b.tf"),
			Outcome::SkippedIncomplete {
				reason: "AccountEmail is missing".to_string(),
			},
		);
		run.finish();
		run
	}

	#[test]
	fn problems_only_fail_in_strict_mode() {
		let run = run_with_skip();
		assert_eq!(exit_code(&run, false), 0);
		assert_eq!(exit_code(&run, true), EXIT_PROBLEMS);
		assert_eq!(exit_code(&BatchRun::new(), true), 0);
	}

	#[tokio::test]
	async fn validate_needs_no_aws_configuration() {
		let dir = tempfile::tempdir().unwrap();
		std::fs::write(
			dir.path().join("a.tf"),
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
		let request_dir = dir.path().to_string_lossy().into_owned();
		let args =
			Args::try_parse_from(["aft-bootstrap", "validate", "--request-dir", request_dir.as_str()])
				.unwrap();

		let run = execute(&args).await.unwrap();
		assert_eq!(run.summary.validated, 1);
	}

	#[tokio::test]
	async fn missing_request_dir_is_fatal() {
		let dir = tempfile::tempdir().unwrap();
		let missing = dir.path().join("absent").to_string_lossy().into_owned();
		let args =
			Args::try_parse_from(["aft-bootstrap", "validate", "--request-dir", missing.as_str()])
				.unwrap();

		assert!(execute(&args).await.is_err());
	}
}
