// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Discovery of request files under a root directory.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, FilterEntry, WalkDir};

use crate::error::ScanError;

pub const DEFAULT_EXTENSION: &str = "tf";

/// Validated request root. Contents are not opened here.
#[derive(Debug, Clone)]
pub struct RequestScanner {
	root: PathBuf,
	extension: String,
}

impl RequestScanner {
	/// Fails unless `root` exists and is a directory.
	pub fn new(root: impl Into<PathBuf>, extension: impl AsRef<str>) -> Result<Self, ScanError> {
		let root = root.into();
		let metadata = std::fs::metadata(&root).map_err(|source| {
			if source.kind() == std::io::ErrorKind::NotFound {
				ScanError::RootNotFound { path: root.clone() }
			} else {
				ScanError::Io {
					path: root.clone(),
					source,
				}
			}
		})?;
		if !metadata.is_dir() {
			return Err(ScanError::NotADirectory { path: root });
		}

		let extension = extension.as_ref().trim_start_matches('.').to_string();
		debug!(root = %root.display(), extension = %extension, "request scanner ready");
		Ok(Self { root, extension })
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Single-pass, lazy walk of the tree in file-name order.
	///
	/// Hidden directories (`.terraform`, `.git`) are not descended into;
	/// hidden files are still returned. Request files that cannot be read
	/// are returned so they get an outcome. Other unreadable entries are
	/// logged and skipped.
	pub fn into_candidates(self) -> Candidates {
		let walker = WalkDir::new(&self.root)
			.follow_links(true)
			.sort_by_file_name()
			.into_iter()
			.filter_entry(is_visible as fn(&DirEntry) -> bool);
		Candidates {
			walker,
			extension: self.extension,
		}
	}
}

pub struct Candidates {
	walker: FilterEntry<walkdir::IntoIter, fn(&DirEntry) -> bool>,
	extension: String,
}

impl Iterator for Candidates {
	type Item = PathBuf;

	fn next(&mut self) -> Option<PathBuf> {
		loop {
			let entry = match self.walker.next()? {
				Ok(entry) => entry,
				// A request file that cannot be stat'ed is still a candidate;
				// the parser reports it as unreadable.
				Err(e) => match e.path() {
					Some(path) if e.depth() > 0 && has_extension(path, &self.extension) => {
						return Some(path.to_path_buf());
					}
					_ => {
						warn!(error = %e, "skipping unreadable entry in request directory");
						continue;
					}
				},
			};
			if entry.file_type().is_file() && has_extension(entry.path(), &self.extension) {
				return Some(entry.into_path());
			}
		}
	}
}

fn is_visible(entry: &DirEntry) -> bool {
	entry.depth() == 0
		|| !entry.file_type().is_dir()
		|| !entry
			.file_name()
			.to_str()
			.is_some_and(|name| name.starts_with('.'))
}

fn has_extension(path: &Path, extension: &str) -> bool {
	path
		.extension()
		.and_then(OsStr::to_str)
		.is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}
