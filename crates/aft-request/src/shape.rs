// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HCL decoders disagree on whether a block is a single object or a list of
//! objects (repeated blocks, `[ { ... } ]` literals). [`OneOrMany`] accepts
//! both and is collapsed before any field is read.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
	Many(Vec<T>),
	One(T),
}

impl<T> OneOrMany<T> {
	pub fn into_vec(self) -> Vec<T> {
		match self {
			OneOrMany::Many(items) => items,
			OneOrMany::One(item) => vec![item],
		}
	}

	/// Collapse to exactly one value. Returns the sequence length on failure.
	pub fn into_single(self) -> Result<T, usize> {
		match self {
			OneOrMany::One(item) => Ok(item),
			OneOrMany::Many(mut items) if items.len() == 1 => Ok(items.remove(0)),
			OneOrMany::Many(items) => Err(items.len()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::{json, Map, Value};

	#[test]
	fn object_decodes_as_one() {
		let shape: OneOrMany<Map<String, Value>> = serde_json::from_value(json!({"a": 1})).unwrap();
		assert!(matches!(shape, OneOrMany::One(_)));
	}

	#[test]
	fn array_decodes_as_many() {
		let shape: OneOrMany<Map<String, Value>> =
			serde_json::from_value(json!([{"a": 1}, {"b": 2}])).unwrap();
		assert_eq!(shape.into_vec().len(), 2);
	}

	#[test]
	fn single_element_sequence_collapses() {
		let one: OneOrMany<Map<String, Value>> = serde_json::from_value(json!({"a": 1})).unwrap();
		let many: OneOrMany<Map<String, Value>> = serde_json::from_value(json!([{"a": 1}])).unwrap();
		assert_eq!(one.into_single(), many.into_single());
	}

	#[test]
	fn ambiguous_sequence_does_not_collapse() {
		let shape: OneOrMany<Map<String, Value>> = serde_json::from_value(json!([{}, {}])).unwrap();
		assert_eq!(shape.into_single(), Err(2));

		let empty: OneOrMany<Map<String, Value>> = serde_json::from_value(json!([])).unwrap();
		assert_eq!(empty.into_single(), Err(0));
	}

	#[test]
	fn scalar_is_rejected() {
		let shape: Result<OneOrMany<Map<String, Value>>, _> = serde_json::from_value(json!("text"));
		assert!(shape.is_err());
	}
}
