//! # headstat-git
//!
//! Read-only status queries against the HEAD of a local git repository.
//!
//! ## Overview
//!
//! Opening a repository resolves HEAD once. Four facts can then be read:
//! - The current branch (empty when HEAD is detached)
//! - The files touched by the HEAD commit relative to its first parent
//! - The HEAD commit message
//! - The tags pointing at HEAD
//!
//! ## Key Types
//!
//! - [`Repository`] - An opened repository with its resolved HEAD
//! - [`Reporter`] - The capability interface the report is built from
//! - [`Status`] - The assembled result
//! - [`GitError`] - Errors raised while opening or querying
//!
//! ## Usage
//!
//! ```rust,ignore
//! use headstat_git::{report, Repository};
//! use std::path::Path;
//!
//! let repo = Repository::open(Path::new("."))?;
//! let status = report(&repo)?;
//!
//! println!("On branch {}", status.branch);
//! for file in &status.files {
//!     println!("  {}", file);
//! }
//! ```
//!
//! Nothing in this crate writes to the repository.

mod diff;
mod error;
mod repository;
mod status;

pub use error::GitError;
pub use repository::Repository;
pub use status::{report, Reporter, Status};
