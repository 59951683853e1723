//! # propdiff
//!
//! A structural diff tool for versioned property configurations. Two versions
//! of a property (metadata, hostname bindings and rule tree) are compared
//! block by block and every disagreement is reported under the labels of the
//! two versions.

pub mod cli;
pub mod commands;
pub mod config;
pub mod diff;
pub mod error;
pub mod output;
pub mod resolver;
pub mod store;
pub mod tree;
pub mod view;

pub use diff::{DiffEngine, DiffNode, PruneMode};
pub use error::{PropdiffError, Result};
pub use resolver::{PropertyVersionIndex, VersionId, VersionRef, VersionResolver, VersionSelector};
pub use store::{PropertyDocument, PropertyRecord, PropertyStore, VersionSource};
pub use tree::ConfigTree;
pub use view::{diff_versions, VersionDiff, VersionLabel, VersionView};

/// Current format version for propdiff store files
pub const FORMAT_VERSION: &str = "1.0.0";
