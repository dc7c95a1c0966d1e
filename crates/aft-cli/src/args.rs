// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use aft_config::{BootstrapConfigLayer, RequestsConfigLayer};
use clap::{Parser, Subcommand, ValueEnum};

/// Bootstrap AFT account requests: persist, enqueue and provision every
/// request file in a directory.
#[derive(Parser, Debug)]
#[command(name = "aft-bootstrap", version)]
pub struct Args {
	#[command(subcommand)]
	pub command: Option<Command>,

	/// Optional TOML configuration file
	#[arg(long, global = true, env = "AFT_BOOTSTRAP_CONFIG")]
	pub config: Option<PathBuf>,

	/// Directory holding the account request files
	#[arg(long, global = true)]
	pub request_dir: Option<PathBuf>,

	/// Format of the run summary printed on stdout
	#[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
	pub output: OutputFormat,

	/// Exit with status 2 when any file was skipped or failed
	#[arg(long, global = true)]
	pub strict: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
	/// Process every request file (default)
	Run,
	/// Scan and parse request files without contacting AWS
	Validate,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
	Text,
	Json,
}

impl Args {
	pub fn command(&self) -> Command {
		self.command.unwrap_or(Command::Run)
	}

	/// Configuration layer holding the values given as flags.
	pub fn overrides(&self) -> BootstrapConfigLayer {
		BootstrapConfigLayer {
			requests: self.request_dir.clone().map(|dir| RequestsConfigLayer {
				dir: Some(dir),
				extension: None,
			}),
			..Default::default()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn run_is_the_default_command() {
		let args = Args::try_parse_from(["aft-bootstrap"]).unwrap();
		assert_eq!(args.command(), Command::Run);
		assert_eq!(args.output, OutputFormat::Text);
		assert!(!args.strict);
		assert!(args.overrides().requests.is_none());
	}

	#[test]
	fn global_flags_follow_the_subcommand() {
		let args = Args::try_parse_from([
			"aft-bootstrap",
			"validate",
			"--request-dir",
			"requests",
			"--output",
			"json",
			"--strict",
		])
		.unwrap();
		assert_eq!(args.command(), Command::Validate);
		assert_eq!(args.output, OutputFormat::Json);
		assert!(args.strict);
		let requests = args.overrides().requests.unwrap();
		assert_eq!(requests.dir, Some(PathBuf::from("requests")));
	}

	#[test]
	fn unknown_output_format_is_rejected() {
		assert!(Args::try_parse_from(["aft-bootstrap", "--output", "yaml"]).is_err());
	}
}
