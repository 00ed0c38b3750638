//! Filesystem project loader
//!
//! Reads and parses a project's `package.json` and `package-lock.json`.
//! Malformed top-level input surfaces here, before the analysis core: the
//! core itself never sees unparseable documents.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::project::{Lockfile, Manifest, RawProject};

/// Manifest file name expected in the project directory.
pub const MANIFEST_FILE: &str = "package.json";
/// Lockfile name expected in the project directory.
pub const LOCKFILE_FILE: &str = "package-lock.json";

/// Errors raised while loading project input
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load `package.json` and `package-lock.json` from `dir`.
pub async fn load_project(dir: &Path) -> Result<RawProject, LoaderError> {
    let manifest_path = dir.join(MANIFEST_FILE);
    let lockfile_path = dir.join(LOCKFILE_FILE);

    let manifest_bytes = read_file(&manifest_path).await?;
    let lockfile_bytes = read_file(&lockfile_path).await?;

    let manifest: Manifest =
        serde_json::from_slice(&manifest_bytes).map_err(|source| LoaderError::Parse {
            path: manifest_path,
            source,
        })?;
    let lockfile: Lockfile =
        serde_json::from_slice(&lockfile_bytes).map_err(|source| LoaderError::Parse {
            path: lockfile_path,
            source,
        })?;

    debug!(
        project = manifest.root_name(),
        entries = lockfile.packages.len(),
        "loaded project data"
    );

    Ok(RawProject {
        manifest,
        lockfile,
        lockfile_bytes,
    })
}

async fn read_file(path: &Path) -> Result<Vec<u8>, LoaderError> {
    tokio::fs::read(path).await.map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_project(dir: &Path, manifest: &str, lockfile: &str) {
        std::fs::write(dir.join(MANIFEST_FILE), manifest).unwrap();
        std::fs::write(dir.join(LOCKFILE_FILE), lockfile).unwrap();
    }

    #[tokio::test]
    async fn loads_a_valid_project() {
        let dir = tempfile::tempdir().unwrap();
        write_project(
            dir.path(),
            r#"{ "name": "fixture-app", "dependencies": { "lodash": "^4.17.21" } }"#,
            r#"{
                "packages": {
                    "": { "name": "fixture-app" },
                    "node_modules/lodash": { "version": "4.17.21" }
                }
            }"#,
        );

        let project = load_project(dir.path()).await.unwrap();

        assert_eq!(project.manifest.root_name(), "fixture-app");
        assert_eq!(project.lockfile.packages.len(), 2);
        assert!(!project.lockfile_bytes.is_empty());
    }

    #[tokio::test]
    async fn missing_lockfile_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "{}").unwrap();

        let err = load_project(dir.path()).await.unwrap_err();

        assert!(matches!(err, LoaderError::Io { .. }));
        assert!(err.to_string().contains(LOCKFILE_FILE));
    }

    #[tokio::test]
    async fn malformed_manifest_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        write_project(dir.path(), "not json", "{}");

        let err = load_project(dir.path()).await.unwrap_err();

        assert!(matches!(err, LoaderError::Parse { .. }));
        assert!(err.to_string().contains(MANIFEST_FILE));
    }
}
