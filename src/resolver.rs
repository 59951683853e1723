//! Version selector resolution

use crate::error::{PropdiffError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Reference to a version of a property (by alias or literal id)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSelector {
    /// Most recently created version
    Latest,
    /// Version active on the staging network
    Staging,
    /// Version active on the production network
    Production,
    /// Concrete version identifier, passed through unchanged
    Literal(String),
}

impl VersionSelector {
    /// Aliases match exactly; anything else is a literal
    pub fn parse(s: &str) -> Self {
        match s {
            "LATEST" => Self::Latest,
            "STAGING" => Self::Staging,
            "PRODUCTION" => Self::Production,
            other => Self::Literal(other.to_string()),
        }
    }

    pub fn is_alias(&self) -> bool {
        !matches!(self, Self::Literal(_))
    }
}

impl fmt::Display for VersionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => f.write_str("LATEST"),
            Self::Staging => f.write_str("STAGING"),
            Self::Production => f.write_str("PRODUCTION"),
            Self::Literal(id) => f.write_str(id),
        }
    }
}

/// A concrete version identifier
///
/// Version numbers arrive as JSON numbers from the property API but may be
/// opaque strings elsewhere, so both forms are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct VersionId(String);

impl VersionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for VersionId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl From<&str> for VersionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl<'de> Deserialize<'de> for VersionId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawVersion {
            Number(serde_json::Number),
            Text(String),
        }

        Ok(match RawVersion::deserialize(deserializer)? {
            RawVersion::Number(n) => Self(n.to_string()),
            RawVersion::Text(s) => Self(s),
        })
    }
}

/// Known version pointers for one property
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyVersionIndex {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_version: Option<VersionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staging_version: Option<VersionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_version: Option<VersionId>,
}

/// Resolves version selectors against a property's version index
pub struct VersionResolver;

impl VersionResolver {
    /// Map a selector to a concrete version id
    ///
    /// Aliases that were never assigned resolve to `None`. Literals are
    /// returned as-is without checking that the version exists.
    pub fn resolve(selector: &VersionSelector, index: &PropertyVersionIndex) -> Option<VersionId> {
        match selector {
            VersionSelector::Staging => index.staging_version.clone(),
            VersionSelector::Production => index.production_version.clone(),
            VersionSelector::Latest => index.latest_version.clone(),
            VersionSelector::Literal(id) => Some(VersionId::new(id.clone())),
        }
    }

    /// Resolve a selector, treating an unassigned alias as "no such version"
    pub fn resolve_required(
        selector: &VersionSelector,
        property: &str,
        index: &PropertyVersionIndex,
    ) -> Result<VersionId> {
        let resolved = Self::resolve(selector, index)
            .ok_or_else(|| PropdiffError::version_not_found(property, selector.to_string()))?;
        log::debug!("Resolved {}@{} to version {}", property, selector, resolved);
        Ok(resolved)
    }
}

/// A `<property>@<selector>` reference naming one side of a comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRef {
    pub property: String,
    pub selector: VersionSelector,
}

impl VersionRef {
    pub fn new(property: impl Into<String>, selector: VersionSelector) -> Self {
        Self {
            property: property.into(),
            selector,
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        let (property, selector) = s.rsplit_once('@').ok_or_else(|| {
            PropdiffError::invalid_input(format!(
                "Invalid version reference '{}'. Use <property>@<version>",
                s
            ))
        })?;

        if property.is_empty() || selector.is_empty() {
            return Err(PropdiffError::invalid_input(format!(
                "Invalid version reference '{}'. Both property and version are required",
                s
            )));
        }

        Ok(Self::new(property, VersionSelector::parse(selector)))
    }
}

impl fmt::Display for VersionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.property, self.selector)
    }
}
