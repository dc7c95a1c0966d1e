// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Account request discovery and parsing.
//!
//! This crate provides:
//! - [`RequestScanner`]: walks a directory tree and yields candidate request files
//! - [`parse_file`] / [`parse_str`]: decode an `account_request` HCL block into a
//!   canonical [`AccountRequest`]
//! - [`OneOrMany`]: normalization of the "single object or sequence" ambiguity
//!   in HCL-to-JSON decoding
//!
//! # Usage
//!
//! ```ignore
//! use aft_request::{parse_file, RequestScanner};
//!
//! let scanner = RequestScanner::new("./account-requests/terraform", "tf")?;
//! for path in scanner.into_candidates() {
//!     match parse_file(&path) {
//!         Ok(request) => println!("{}", request.identity()),
//!         Err(e) => eprintln!("{e}"),
//!     }
//! }
//! ```

pub mod email;
pub mod error;
pub mod model;
pub mod parser;
pub mod scanner;
pub mod shape;

pub use email::is_valid_email;
pub use error::{FieldProblem, ParseError, ScanError};
pub use model::{AccountRequest, ControlTowerParameters, Identity};
pub use parser::{parse_file, parse_str, DEFAULT_OWNER_FIRST_NAME, DEFAULT_OWNER_LAST_NAME};
pub use scanner::{Candidates, RequestScanner, DEFAULT_EXTENSION};
pub use shape::OneOrMany;
