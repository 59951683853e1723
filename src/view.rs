//! Version views and their three-block diffs

use crate::diff::{Change, DiffEngine, DiffNode, PruneMode};
use crate::error::Result;
use crate::resolver::{VersionId, VersionRef, VersionResolver};
use crate::store::VersionSource;
use crate::tree::ConfigTree;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Display label for one side of a comparison, e.g. `www.example.com VERSION 5`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionLabel(String);

impl VersionLabel {
    pub fn new(property_name: &str, version: &VersionId) -> Self {
        Self(format!("{} VERSION {}", property_name, version))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VersionLabel {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for VersionLabel {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for VersionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The metadata, hostnames and rules of one property version
///
/// Missing or null blocks are read as empty mappings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VersionView {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub meta: ConfigTree,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub hostnames: ConfigTree,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub rules: ConfigTree,
}

impl VersionView {
    pub const RULES: &'static str = "rules";
    pub const META: &'static str = "meta";
    pub const HOSTNAMES: &'static str = "hostnames";

    pub fn new(meta: ConfigTree, hostnames: ConfigTree, rules: ConfigTree) -> Self {
        Self {
            meta,
            hostnames,
            rules,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<ConfigTree, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ConfigTree>::deserialize(deserializer)?.unwrap_or_default())
}

/// Differences between two versions, grouped by block
#[derive(Debug, Clone, PartialEq)]
pub struct VersionDiff {
    from_label: VersionLabel,
    to_label: VersionLabel,
    blocks: IndexMap<&'static str, DiffNode>,
}

impl VersionDiff {
    pub fn new(from_label: VersionLabel, to_label: VersionLabel) -> Self {
        Self {
            from_label,
            to_label,
            blocks: IndexMap::new(),
        }
    }

    pub(crate) fn insert_block(&mut self, block: &'static str, node: DiffNode) {
        self.blocks.insert(block, node);
    }

    pub fn from_label(&self) -> &VersionLabel {
        &self.from_label
    }

    pub fn to_label(&self) -> &VersionLabel {
        &self.to_label
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn block(&self, name: &str) -> Option<&DiffNode> {
        self.blocks.get(name)
    }

    pub fn blocks(&self) -> impl Iterator<Item = (&'static str, &DiffNode)> {
        self.blocks.iter().map(|(name, node)| (*name, node))
    }

    /// Every leaf change, with the block name as the first path segment
    pub fn changes(&self) -> Vec<Change<'_>> {
        self.blocks
            .iter()
            .flat_map(|(name, node)| {
                node.changes().into_iter().map(move |mut change| {
                    change.path.insert(0, *name);
                    change
                })
            })
            .collect()
    }

    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        for (name, node) in &self.blocks {
            object.insert(name.to_string(), node.to_json(&self.from_label, &self.to_label));
        }
        Value::Object(object)
    }
}

impl Serialize for VersionDiff {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Resolve both references, fetch both versions and diff them
pub fn diff_versions<S: VersionSource + ?Sized>(
    source: &S,
    from: &VersionRef,
    to: &VersionRef,
    prune_mode: PruneMode,
) -> Result<VersionDiff> {
    let from_property = source.find_property(&from.property)?;
    let to_property = if to.property == from.property {
        from_property.clone()
    } else {
        source.find_property(&to.property)?
    };

    let from_version = VersionResolver::resolve_required(
        &from.selector,
        &from_property.property_name,
        &from_property.index,
    )?;
    let to_version =
        VersionResolver::resolve_required(&to.selector, &to_property.property_name, &to_property.index)?;

    let engine = DiffEngine::new(
        VersionLabel::new(&from_property.property_name, &from_version),
        VersionLabel::new(&to_property.property_name, &to_version),
    )?
    .with_prune_mode(prune_mode);

    log::info!(
        "Getting difference between version {} and {}",
        from_version,
        to_version
    );

    let from_view = source.fetch_version_view(&from_property, &from_version)?;
    let to_view = source.fetch_version_view(&to_property, &to_version)?;

    Ok(engine.compare_views(&from_view, &to_view))
}
