//! Untyped configuration trees
//!
//! A [`ConfigTree`] is the in-memory form of one block of a property version
//! (metadata, hostnames or rules). It mirrors JSON but is a closed sum type so
//! the diff engine can match on it exhaustively.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

/// A recursively nested configuration value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum ConfigTree {
    /// Ordered mapping from string keys to subtrees
    Mapping(IndexMap<String, ConfigTree>),
    /// Ordered sequence of subtrees
    Sequence(Vec<ConfigTree>),
    /// Leaf value
    Scalar(Scalar),
}

/// Leaf values of a configuration tree
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

/// Shape of a tree node, used for logging and classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeKind {
    Mapping,
    Sequence,
    Scalar,
}

impl ConfigTree {
    pub fn empty_mapping() -> Self {
        Self::Mapping(IndexMap::new())
    }

    pub fn null() -> Self {
        Self::Scalar(Scalar::Null)
    }

    pub fn kind(&self) -> TreeKind {
        match self {
            Self::Mapping(_) => TreeKind::Mapping,
            Self::Sequence(_) => TreeKind::Sequence,
            Self::Scalar(_) => TreeKind::Scalar,
        }
    }

    pub fn as_mapping(&self) -> Option<&IndexMap<String, ConfigTree>> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[ConfigTree]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a child of a mapping node
    pub fn get(&self, key: &str) -> Option<&ConfigTree> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// True for an empty mapping or an empty sequence
    pub fn is_empty_container(&self) -> bool {
        match self {
            Self::Mapping(map) => map.is_empty(),
            Self::Sequence(items) => items.is_empty(),
            Self::Scalar(_) => false,
        }
    }
}

impl Default for ConfigTree {
    fn default() -> Self {
        Self::empty_mapping()
    }
}

impl From<Value> for ConfigTree {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Scalar(Scalar::Null),
            Value::Bool(b) => Self::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Self::Scalar(Scalar::Number(n)),
            Value::String(s) => Self::Scalar(Scalar::String(s)),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Mapping(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<ConfigTree> for Value {
    fn from(tree: ConfigTree) -> Self {
        match tree {
            ConfigTree::Scalar(scalar) => scalar.into(),
            ConfigTree::Sequence(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            ConfigTree::Mapping(map) => {
                let mut object = Map::with_capacity(map.len());
                for (key, value) in map {
                    object.insert(key, value.into());
                }
                Value::Object(object)
            }
        }
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Null => Value::Null,
            Scalar::Bool(b) => Value::Bool(b),
            Scalar::Number(n) => Value::Number(n),
            Scalar::String(s) => Value::String(s),
        }
    }
}

impl From<&ConfigTree> for Value {
    fn from(tree: &ConfigTree) -> Self {
        tree.clone().into()
    }
}

impl fmt::Display for ConfigTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::from(self))
    }
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mapping => "mapping",
            Self::Sequence => "sequence",
            Self::Scalar => "scalar",
        };
        f.write_str(name)
    }
}
