// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Decoding of `account_request` blocks from Terraform/HCL files.
//!
//! The request is looked up in `locals { account_request = { ... } }` first,
//! then in `module "<name>" { control_tower_parameters = ... }` blocks. A file
//! holds exactly one request. Either a complete [`AccountRequest`] is produced
//! or a [`ParseError`] is returned.

use std::collections::BTreeMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::trace;

use crate::email::is_valid_email;
use crate::error::{FieldProblem, ParseError};
use crate::model::{AccountRequest, ControlTowerParameters};
use crate::shape::OneOrMany;

pub const DEFAULT_OWNER_FIRST_NAME: &str = "Account";
pub const DEFAULT_OWNER_LAST_NAME: &str = "Owner";

type Object = Map<String, Value>;

#[derive(Debug, Default, Deserialize)]
struct RawParameters {
	#[serde(rename = "AccountEmail")]
	account_email: Option<String>,
	#[serde(rename = "AccountName")]
	account_name: Option<String>,
	#[serde(rename = "ManagedOrganizationalUnit")]
	organizational_unit: Option<String>,
	#[serde(rename = "SSOUserEmail")]
	owner_email: Option<String>,
	#[serde(rename = "SSOUserFirstName", alias = "firstName")]
	owner_first_name: Option<String>,
	#[serde(rename = "SSOUserLastName", alias = "lastName")]
	owner_last_name: Option<String>,
}

/// Read and parse a request file.
pub fn parse_file(path: &Path) -> Result<AccountRequest, ParseError> {
	let content = std::fs::read_to_string(path).map_err(|source| ParseError::Read {
		path: path.to_path_buf(),
		source,
	})?;
	parse_str(&content, path)
}

/// Parse request file content. `source` is recorded on the request for
/// diagnostics only.
pub fn parse_str(content: &str, source: &Path) -> Result<AccountRequest, ParseError> {
	let malformed = |reason: String| ParseError::Malformed {
		path: source.to_path_buf(),
		reason,
	};

	let document: Value =
		hcl::from_str(content).map_err(|e| malformed(format!("invalid HCL: {e}")))?;
	let block = locate_request_block(&document).map_err(malformed)?;
	trace!(path = %source.display(), "located account request block");

	let parameters = match section::<OneOrMany<Object>>(&block, "control_tower_parameters")
		.map_err(&malformed)?
	{
		Some(shape) => {
			let object = shape.into_single().map_err(|len| {
				malformed(format!(
					"control_tower_parameters must be a single object, found a sequence of {len}"
				))
			})?;
			serde_json::from_value::<RawParameters>(Value::Object(object))
				.map_err(|e| malformed(format!("control_tower_parameters: {e}")))?
		}
		None => RawParameters::default(),
	};
	let tags = section(&block, "account_tags")
		.and_then(|shape| scalar_map("account_tags", shape))
		.map_err(&malformed)?;
	let custom_fields = section(&block, "custom_fields")
		.and_then(|shape| scalar_map("custom_fields", shape))
		.map_err(&malformed)?;
	let customizations_name =
		section::<String>(&block, "account_customizations_name").map_err(&malformed)?;

	let parameters = validate(parameters).map_err(|problems| ParseError::Incomplete {
		path: source.to_path_buf(),
		problems,
	})?;

	Ok(AccountRequest::new(
		parameters,
		tags,
		custom_fields,
		non_empty(customizations_name),
		source.to_path_buf(),
	))
}

/// Exactly one request block must be found. `locals` entries take priority
/// over `module` blocks; several candidates of the same kind are rejected.
fn locate_request_block(document: &Value) -> Result<Object, String> {
	let mut found = Vec::new();
	if let Some(locals) = document.get("locals") {
		for block in objects(locals, "locals")? {
			if let Some(request) = block.get("account_request") {
				found.extend(objects(request, "account_request")?);
			}
		}
	}

	if found.is_empty() {
		if let Some(modules) = document.get("module") {
			for labelled in objects(modules, "module")? {
				for body in labelled.values() {
					found.extend(
						objects(body, "module")?
							.into_iter()
							.filter(|block| block.contains_key("control_tower_parameters")),
					);
				}
			}
		}
	}

	match found.len() {
		0 => Err("no account_request block found".to_string()),
		1 => Ok(found.remove(0)),
		n => Err(format!("found {n} account requests, expected exactly one")),
	}
}

/// Decode one optional section of the request block, naming it on failure.
fn section<T: DeserializeOwned>(block: &Object, key: &str) -> Result<Option<T>, String> {
	match block.get(key) {
		None | Some(Value::Null) => Ok(None),
		Some(value) => serde_json::from_value(value.clone())
			.map(Some)
			.map_err(|_| format!("{key} has an unexpected structure")),
	}
}

fn objects(value: &Value, name: &str) -> Result<Vec<Object>, String> {
	serde_json::from_value::<OneOrMany<Object>>(value.clone())
		.map(OneOrMany::into_vec)
		.map_err(|_| format!("{name} must be an object or a sequence of objects"))
}

fn scalar_map(
	name: &str,
	shape: Option<OneOrMany<Object>>,
) -> Result<BTreeMap<String, String>, String> {
	let Some(shape) = shape else {
		return Ok(BTreeMap::new());
	};
	let object = shape.into_single().map_err(|len| {
		format!("{name} must be a single mapping, found a sequence of {len}")
	})?;

	object
		.into_iter()
		.map(|(key, value)| match value {
			Value::String(s) => Ok((key, s)),
			Value::Number(n) => Ok((key, n.to_string())),
			Value::Bool(b) => Ok((key, b.to_string())),
			_ => Err(format!("{name}.{key} must be a string, number or bool")),
		})
		.collect()
}

fn validate(raw: RawParameters) -> Result<ControlTowerParameters, Vec<FieldProblem>> {
	let mut problems = Vec::new();

	let account_email = required(&mut problems, "AccountEmail", raw.account_email);
	let account_name = required(&mut problems, "AccountName", raw.account_name);
	let organizational_unit = required(
		&mut problems,
		"ManagedOrganizationalUnit",
		raw.organizational_unit,
	);

	if let Some(email) = &account_email {
		if !is_valid_email(email) {
			problems.push(FieldProblem::InvalidEmail("AccountEmail"));
		}
	}

	let owner_email = non_empty(raw.owner_email);
	if let Some(email) = &owner_email {
		if !is_valid_email(email) {
			problems.push(FieldProblem::InvalidEmail("SSOUserEmail"));
		}
	}

	match (account_email, account_name, organizational_unit) {
		(Some(account_email), Some(account_name), Some(organizational_unit))
			if problems.is_empty() =>
		{
			Ok(ControlTowerParameters {
				owner_email: owner_email.unwrap_or_else(|| account_email.clone()),
				account_email,
				account_name,
				organizational_unit,
				owner_first_name: non_empty(raw.owner_first_name)
					.unwrap_or_else(|| DEFAULT_OWNER_FIRST_NAME.to_string()),
				owner_last_name: non_empty(raw.owner_last_name)
					.unwrap_or_else(|| DEFAULT_OWNER_LAST_NAME.to_string()),
			})
		}
		_ => Err(problems),
	}
}

fn required(
	problems: &mut Vec<FieldProblem>,
	field: &'static str,
	value: Option<String>,
) -> Option<String> {
	let value = non_empty(value);
	if value.is_none() {
		problems.push(FieldProblem::Missing(field));
	}
	value
}

fn non_empty(value: Option<String>) -> Option<String> {
	value
		.map(|v| v.trim().to_string())
		.filter(|v| !v.is_empty())
}
