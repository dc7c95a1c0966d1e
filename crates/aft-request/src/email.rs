// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use lettre::Address;

/// Validate an email address format.
///
/// Uses [`lettre`]'s [`Address`] parser, so only a bare `local@domain` is
/// accepted. Display-name forms such as `Name <user@example.com>` are
/// rejected because account emails are sent verbatim to the control plane.
///
/// # Example
///
/// ```
/// use aft_request::is_valid_email;
///
/// assert!(is_valid_email("user@example.com"));
/// assert!(!is_valid_email("User Name <user@example.com>"));
/// assert!(!is_valid_email("not-an-email"));
/// assert!(!is_valid_email(""));
/// ```
pub fn is_valid_email(email: &str) -> bool {
	email.parse::<Address>().is_ok()
}
