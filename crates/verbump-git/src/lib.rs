//! Git abstraction layer for verbump.
//!
//! This crate provides the Git operations needed to detect and release versions:
//! - [`GitProvider`]: The operations verbump needs from a repository
//! - [`Repository`]: A `git2`-backed provider bound to a release root path
//! - [`MockRepository`]: A scripted provider recording every mutating call

mod error;
mod mock;
mod provider;
mod repository;

pub use error::{GitError, GitResult};
pub use mock::{MockCall, MockOperation, MockRepository};
pub use provider::{ChangeType, DiffEntry, GitProvider, Tag, TagOptions};
pub use repository::Repository;
