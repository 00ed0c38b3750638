//! Raw project input contracts: manifest, lockfile and registry metadata
//!
//! These types mirror the on-disk `package.json` / `package-lock.json`
//! structures and the npm registry document, reduced to the fields analysis
//! needs. Deserialization is lenient: unknown fields are ignored and optional
//! fields default, so partially populated input degrades to "unknown" rather
//! than failing the scan.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Project name used when the manifest does not declare one.
pub const DEFAULT_ROOT_NAME: &str = "root";

/// Path prefix of installed packages in the lockfile's `packages` map.
const NODE_MODULES_PREFIX: &str = "node_modules/";

/// `package.json` subset
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    pub name: Option<String>,
    #[serde(default)]
    pub dependencies: HashMap<String, String>,
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: HashMap<String, String>,
}

impl Manifest {
    /// Project name, defaulting to [`DEFAULT_ROOT_NAME`].
    pub fn root_name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_ROOT_NAME)
    }

    /// Union of `dependencies` and `devDependencies`.
    ///
    /// A name present in either map counts as direct; on a name collision the
    /// `devDependencies` range wins.
    pub fn direct_dependencies(&self) -> HashMap<&str, &str> {
        let mut direct: HashMap<&str, &str> = self
            .dependencies
            .iter()
            .map(|(name, range)| (name.as_str(), range.as_str()))
            .collect();
        for (name, range) in &self.dev_dependencies {
            direct.insert(name.as_str(), range.as_str());
        }
        direct
    }
}

/// One entry of the lockfile's `packages` map
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LockfileEntry {
    pub version: Option<String>,
    #[serde(default)]
    pub dependencies: HashMap<String, String>,
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: HashMap<String, String>,
    #[serde(default, rename = "optionalDependencies")]
    pub optional_dependencies: HashMap<String, String>,
}

impl LockfileEntry {
    /// Names of all children this entry declares, across its `dependencies`,
    /// `devDependencies` and `optionalDependencies` maps.
    pub fn declared_children(&self) -> impl Iterator<Item = &str> {
        self.dependencies
            .keys()
            .chain(self.dev_dependencies.keys())
            .chain(self.optional_dependencies.keys())
            .map(String::as_str)
    }
}

/// A `packages` entry together with the path it is keyed by
#[derive(Debug, Clone)]
pub struct LockfileRecord {
    /// Installation path: `""` for the project root, `node_modules/...` for
    /// installed packages, anything else for workspace-local entries
    pub path: String,
    pub entry: LockfileEntry,
}

impl LockfileRecord {
    /// Package name of an installed entry: the last `node_modules/` segment
    /// of the path. `None` for the root entry and workspace-local paths.
    pub fn package_name(&self) -> Option<&str> {
        if !self.path.starts_with(NODE_MODULES_PREFIX) {
            return None;
        }
        self.path
            .split(NODE_MODULES_PREFIX)
            .last()
            .filter(|name| !name.is_empty())
    }
}

/// `package-lock.json` subset: the `packages` map, in file order.
///
/// Only the keyed-by-path `packages` representation (lockfile v2/v3) is
/// supported; lockfiles without it produce an empty listing. Entries that do
/// not match the expected shape degrade to an empty entry instead of failing.
#[derive(Debug, Clone, Default)]
pub struct Lockfile {
    pub packages: Vec<LockfileRecord>,
}

impl Lockfile {
    /// Distinct installed package names, in first-seen order.
    pub fn package_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for record in &self.packages {
            if let Some(name) = record.package_name() {
                if !names.iter().any(|seen| seen == name) {
                    names.push(name.to_string());
                }
            }
        }
        names
    }
}

impl<'de> Deserialize<'de> for Lockfile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            packages: serde_json::Map<String, serde_json::Value>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let packages = raw
            .packages
            .into_iter()
            .map(|(path, value)| LockfileRecord {
                entry: serde_json::from_value(value).unwrap_or_default(),
                path,
            })
            .collect();

        Ok(Lockfile { packages })
    }
}

/// Parsed project input for one scan
#[derive(Debug, Clone)]
pub struct RawProject {
    pub manifest: Manifest,
    pub lockfile: Lockfile,
    /// Raw lockfile bytes, kept for stable project fingerprinting
    pub lockfile_bytes: Vec<u8>,
}

/// npm registry document subset for one package.
///
/// Every field defaults so a sparse registry response still deserializes;
/// whatever is missing simply yields no heuristic findings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "dist-tags")]
    pub dist_tags: DistTags,
    /// Tag/version to publish-timestamp map (RFC 3339 strings)
    #[serde(default)]
    pub time: HashMap<String, String>,
    pub maintainers: Option<Vec<serde_json::Value>>,
    pub deprecated: Option<String>,
    pub description: Option<String>,
}

/// `dist-tags` object of a registry document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DistTags {
    pub latest: Option<String>,
}

impl RegistryMetadata {
    /// Publish instant of the latest dist-tag, when present and parseable.
    pub fn latest_publish(&self) -> Option<DateTime<Utc>> {
        let latest = self.dist_tags.latest.as_deref()?;
        self.time.get(latest)?.parse::<DateTime<Utc>>().ok()
    }

    /// Number of listed maintainers, when the registry reports any.
    pub fn maintainer_count(&self) -> Option<usize> {
        self.maintainers.as_ref().map(Vec::len)
    }
}
