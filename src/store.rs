//! Property store: the local source of property versions
//!
//! A store is a `.propdiff/` directory holding one JSON document per property.
//! Each document carries the property's version pointers and the fetched
//! views of its versions.

use crate::config::StoreConfig;
use crate::error::{PropdiffError, Result};
use crate::resolver::{PropertyVersionIndex, VersionId};
use crate::view::VersionView;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Source of property version snapshots
pub trait VersionSource {
    /// Look up a property by name
    fn find_property(&self, name: &str) -> Result<PropertyRecord>;

    /// Fetch the meta, hostnames and rules of one concrete version
    fn fetch_version_view(&self, property: &PropertyRecord, version: &VersionId) -> Result<VersionView>;
}

/// Identity and version pointers of a property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRecord {
    pub property_name: String,
    pub property_id: Option<String>,
    pub index: PropertyVersionIndex,
}

/// On-disk document for one property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDocument {
    pub property_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    #[serde(flatten)]
    pub index: PropertyVersionIndex,
    #[serde(default)]
    pub versions: IndexMap<String, VersionView>,
}

impl PropertyDocument {
    pub fn new(property_name: impl Into<String>) -> Self {
        Self {
            property_name: property_name.into(),
            property_id: None,
            index: PropertyVersionIndex::default(),
            versions: IndexMap::new(),
        }
    }

    pub fn with_version(mut self, version: impl Into<VersionId>, view: VersionView) -> Self {
        let version: VersionId = version.into();
        self.versions.insert(version.to_string(), view);
        self
    }

    pub fn record(&self) -> PropertyRecord {
        PropertyRecord {
            property_name: self.property_name.clone(),
            property_id: self.property_id.clone(),
            index: self.index.clone(),
        }
    }

    pub fn version_view(&self, version: &VersionId) -> Result<&VersionView> {
        self.versions
            .get(version.as_str())
            .ok_or_else(|| PropdiffError::version_not_found(&self.property_name, version.as_str()))
    }
}

/// Manages the .propdiff store directory
#[derive(Debug, Clone)]
pub struct PropertyStore {
    /// Project root directory (where .propdiff/ lives)
    pub root: PathBuf,
    /// .propdiff/ directory path
    pub store_dir: PathBuf,
    /// .propdiff/properties/ directory path
    pub properties_dir: PathBuf,
}

impl PropertyStore {
    /// Find the store that contains `start_dir` (or the working directory)
    pub fn find(start_dir: Option<&Path>) -> Result<Self> {
        let current_dir = std::env::current_dir()?;
        let start = start_dir.unwrap_or(&current_dir);

        Self::find_existing(start)?.ok_or_else(|| {
            PropdiffError::store(format!(
                "No propdiff store found from {}. Run `propdiff init` first",
                start.display()
            ))
        })
    }

    /// Find existing .propdiff store by walking up the directory tree
    fn find_existing(start_dir: &Path) -> Result<Option<Self>> {
        let mut current = start_dir;

        loop {
            let store_dir = current.join(".propdiff");
            if store_dir.is_dir() {
                return Ok(Some(Self::from_root(current.to_path_buf())));
            }

            // A repository root bounds the search
            if current.join(".git").exists() {
                break;
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        Ok(None)
    }

    /// Create a new store in the specified root directory
    pub fn create_new(root: PathBuf) -> Result<Self> {
        let store = Self::from_root(root);

        fs::create_dir_all(&store.properties_dir)?;
        store.create_config_with_force(false)?;

        log::info!("Created propdiff store at: {}", store.root.display());

        Ok(store)
    }

    pub fn from_root(root: PathBuf) -> Self {
        let store_dir = root.join(".propdiff");
        let properties_dir = store_dir.join("properties");

        Self {
            root,
            store_dir,
            properties_dir,
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.store_dir.join("config.json")
    }

    /// Write the configuration file, keeping an existing one unless forced
    pub fn create_config_with_force(&self, force: bool) -> Result<()> {
        let config_path = self.config_path();
        if config_path.exists() && !force {
            return Ok(());
        }

        StoreConfig::new_stamped().save(config_path)
    }

    pub fn load_config(&self) -> Result<StoreConfig> {
        StoreConfig::load(self.config_path())
    }

    /// Path of the document for a property name
    pub fn property_path(&self, name: &str) -> PathBuf {
        let file_name: String = name
            .chars()
            .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
            .collect();
        self.properties_dir.join(format!("{}.json", file_name))
    }

    pub fn save_property(&self, document: &PropertyDocument) -> Result<PathBuf> {
        if document.property_name.trim().is_empty() {
            return Err(PropdiffError::store("Cannot save a property without a name"));
        }

        fs::create_dir_all(&self.properties_dir)?;
        let path = self.property_path(&document.property_name);

        // Distinct names can map to the same file once separators are replaced
        if path.exists() {
            if let Ok(existing) = read_document(&path) {
                if existing.property_name != document.property_name {
                    return Err(PropdiffError::store(format!(
                        "Cannot save '{}': {} already holds property '{}'",
                        document.property_name,
                        path.display(),
                        existing.property_name
                    )));
                }
            }
        }

        fs::write(&path, serde_json::to_string_pretty(document)?)?;
        log::debug!("Saved property '{}' to {}", document.property_name, path.display());
        Ok(path)
    }

    /// Load a property document by property name
    pub fn load_property(&self, name: &str) -> Result<PropertyDocument> {
        let direct = self.property_path(name);
        if direct.exists() {
            let document = read_document(&direct)?;
            if document.property_name == name {
                return Ok(document);
            }
        }

        for document in self.documents()? {
            if document.property_name == name {
                return Ok(document);
            }
        }

        Err(PropdiffError::PropertyNotFound {
            name: name.to_string(),
        })
    }

    /// List the names of all stored properties
    pub fn list_properties(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .documents()?
            .into_iter()
            .map(|document| document.property_name)
            .collect();
        names.sort();
        Ok(names)
    }

    /// Every readable property document; unreadable files are skipped
    fn documents(&self) -> Result<Vec<PropertyDocument>> {
        let mut documents = Vec::new();

        if !self.properties_dir.exists() {
            return Ok(documents);
        }

        for entry in WalkDir::new(&self.properties_dir).max_depth(1).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }

            match read_document(path) {
                Ok(document) => documents.push(document),
                Err(e) => log::warn!("Skipping unreadable property document {}: {}", path.display(), e),
            }
        }

        Ok(documents)
    }
}

fn read_document(path: &Path) -> Result<PropertyDocument> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

impl VersionSource for PropertyStore {
    fn find_property(&self, name: &str) -> Result<PropertyRecord> {
        Ok(self.load_property(name)?.record())
    }

    fn fetch_version_view(&self, property: &PropertyRecord, version: &VersionId) -> Result<VersionView> {
        let document = self.load_property(&property.property_name)?;
        document.version_view(version).cloned()
    }
}
