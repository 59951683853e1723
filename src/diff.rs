//! Structural diff engine for configuration trees
//!
//! The comparison walks both trees together and records every point where
//! they disagree. Mapping nodes recurse per key, sequences are compared by
//! value membership, and anything else becomes a leaf carrying both values.
//! Equal children leave an empty placeholder branch behind, which the pruning
//! pass removes.

use crate::error::{PropdiffError, Result};
use crate::tree::ConfigTree;
use crate::view::{VersionDiff, VersionLabel, VersionView};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One node of a diff tree
#[derive(Debug, Clone, PartialEq)]
pub enum DiffNode {
    /// Leaf disagreement; a side is `None` when the key exists on the other side only
    Divergence {
        from: Option<ConfigTree>,
        to: Option<ConfigTree>,
    },
    /// Per-key differences of two mappings
    Branch(IndexMap<String, DiffNode>),
}

/// How far the pruning pass descends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PruneMode {
    /// Only drop empty branches directly under the root
    TopLevel,
    /// Drop empty branches at every depth
    #[default]
    Recursive,
}

impl PruneMode {
    pub fn parse(s: &str) -> std::result::Result<Self, String> {
        match s.to_lowercase().as_str() {
            "top" | "top-level" => Ok(Self::TopLevel),
            "recursive" => Ok(Self::Recursive),
            _ => Err(format!("Invalid prune mode: {}. Use 'top' or 'recursive'", s)),
        }
    }
}

/// A flattened leaf of a diff tree
#[derive(Debug, Clone, PartialEq)]
pub struct Change<'a> {
    pub path: Vec<&'a str>,
    pub from: Option<&'a ConfigTree>,
    pub to: Option<&'a ConfigTree>,
}

impl Change<'_> {
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }
}

impl DiffNode {
    fn divergence(from: &ConfigTree, to: &ConfigTree) -> Self {
        Self::Divergence {
            from: Some(from.clone()),
            to: Some(to.clone()),
        }
    }

    fn placeholder() -> Self {
        Self::Branch(IndexMap::new())
    }

    /// True for a branch without children
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Branch(children) if children.is_empty())
    }

    pub fn get(&self, key: &str) -> Option<&DiffNode> {
        match self {
            Self::Branch(children) => children.get(key),
            Self::Divergence { .. } => None,
        }
    }

    /// Remove empty placeholder branches
    pub fn prune(&mut self, mode: PruneMode) {
        let Self::Branch(children) = self else {
            return;
        };

        if mode == PruneMode::Recursive {
            for child in children.values_mut() {
                child.prune(mode);
            }
        }
        children.retain(|_, child| !child.is_empty());
    }

    /// Flatten into leaf changes, depth first in key order
    pub fn changes(&self) -> Vec<Change<'_>> {
        let mut out = Vec::new();
        self.collect_changes(&mut Vec::new(), &mut out);
        out
    }

    fn collect_changes<'a>(&'a self, path: &mut Vec<&'a str>, out: &mut Vec<Change<'a>>) {
        match self {
            Self::Divergence { from, to } => out.push(Change {
                path: path.clone(),
                from: from.as_ref(),
                to: to.as_ref(),
            }),
            Self::Branch(children) => {
                for (key, child) in children {
                    path.push(key);
                    child.collect_changes(path, out);
                    path.pop();
                }
            }
        }
    }

    /// Render with the two labels as leaf keys
    pub fn to_json(&self, from_label: &VersionLabel, to_label: &VersionLabel) -> Value {
        match self {
            Self::Divergence { from, to } => {
                let mut object = Map::new();
                if let Some(from) = from {
                    object.insert(from_label.to_string(), from.into());
                }
                if let Some(to) = to {
                    object.insert(to_label.to_string(), to.into());
                }
                Value::Object(object)
            }
            Self::Branch(children) => Value::Object(
                children
                    .iter()
                    .map(|(key, child)| (key.clone(), child.to_json(from_label, to_label)))
                    .collect(),
            ),
        }
    }
}

/// Compare two trees without pruning
///
/// Returns `None` when the trees are equal. Mapping results may contain empty
/// placeholder branches for children that turned out equal.
pub fn compare(from: &ConfigTree, to: &ConfigTree) -> Option<DiffNode> {
    if from == to {
        return None;
    }

    match (from, to) {
        (ConfigTree::Mapping(from_map), ConfigTree::Mapping(to_map)) => {
            let mut acc = IndexMap::new();

            for (key, from_child) in from_map {
                let node = match to_map.get(key) {
                    None => DiffNode::Divergence {
                        from: Some(from_child.clone()),
                        to: None,
                    },
                    Some(to_child) => {
                        compare(from_child, to_child).unwrap_or_else(DiffNode::placeholder)
                    }
                };
                acc.insert(key.clone(), node);
            }

            for (key, to_child) in to_map {
                if !from_map.contains_key(key) {
                    acc.insert(
                        key.clone(),
                        DiffNode::Divergence {
                            from: None,
                            to: Some(to_child.clone()),
                        },
                    );
                }
            }

            Some(DiffNode::Branch(acc))
        }
        (ConfigTree::Sequence(from_items), ConfigTree::Sequence(to_items)) => {
            let only_from = missing_from(from_items, to_items);
            let only_to = missing_from(to_items, from_items);

            // Reordering and repeated elements are not distinguished
            if only_from.is_empty() && only_to.is_empty() {
                return None;
            }

            Some(DiffNode::Divergence {
                from: Some(ConfigTree::Sequence(only_from)),
                to: Some(ConfigTree::Sequence(only_to)),
            })
        }
        _ => {
            if from.kind() != to.kind() {
                log::debug!("Node changed from {} to {}", from.kind(), to.kind());
            }
            Some(DiffNode::divergence(from, to))
        }
    }
}

/// Elements of `items` that occur nowhere in `other`, in original order
fn missing_from(items: &[ConfigTree], other: &[ConfigTree]) -> Vec<ConfigTree> {
    items
        .iter()
        .filter(|item| !other.contains(item))
        .cloned()
        .collect()
}

/// Diff engine bound to the labels of the two sides being compared
#[derive(Debug, Clone)]
pub struct DiffEngine {
    from_label: VersionLabel,
    to_label: VersionLabel,
    prune_mode: PruneMode,
}

impl DiffEngine {
    /// Create an engine; the labels become result keys so they must differ
    pub fn new(from_label: VersionLabel, to_label: VersionLabel) -> Result<Self> {
        if from_label == to_label {
            return Err(PropdiffError::DuplicateLabels {
                label: from_label.to_string(),
            });
        }

        Ok(Self {
            from_label,
            to_label,
            prune_mode: PruneMode::default(),
        })
    }

    pub fn with_prune_mode(mut self, mode: PruneMode) -> Self {
        self.prune_mode = mode;
        self
    }

    pub fn from_label(&self) -> &VersionLabel {
        &self.from_label
    }

    pub fn to_label(&self) -> &VersionLabel {
        &self.to_label
    }

    pub fn prune_mode(&self) -> PruneMode {
        self.prune_mode
    }

    /// Compare two trees and prune the result
    pub fn compare(&self, from: &ConfigTree, to: &ConfigTree) -> Option<DiffNode> {
        let mut node = compare(from, to)?;
        node.prune(self.prune_mode);
        if node.is_empty() {
            None
        } else {
            Some(node)
        }
    }

    /// Diff one block of a version
    ///
    /// The block map is the top level of a version diff, so in
    /// `PruneMode::TopLevel` the block node itself keeps its placeholders and
    /// only an empty block is dropped.
    fn compare_block(&self, from: &ConfigTree, to: &ConfigTree) -> Option<DiffNode> {
        match self.prune_mode {
            PruneMode::TopLevel => compare(from, to).filter(|node| !node.is_empty()),
            PruneMode::Recursive => self.compare(from, to),
        }
    }

    /// Compare the rules, meta and hostnames blocks of two versions
    pub fn compare_views(&self, from: &VersionView, to: &VersionView) -> VersionDiff {
        let mut diff = VersionDiff::new(self.from_label.clone(), self.to_label.clone());

        for (block, from_tree, to_tree) in [
            (VersionView::RULES, &from.rules, &to.rules),
            (VersionView::META, &from.meta, &to.meta),
            (VersionView::HOSTNAMES, &from.hostnames, &to.hostnames),
        ] {
            match self.compare_block(from_tree, to_tree) {
                Some(node) => {
                    log::debug!("Block '{}' differs in {} place(s)", block, node.changes().len());
                    diff.insert_block(block, node);
                }
                None => log::debug!("Block '{}' unchanged", block),
            }
        }

        diff
    }
}
