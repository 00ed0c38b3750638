//! Common test fixtures shared across integration tests

use std::path::Path;

/// Manifest for a project with one floating direct dependency.
pub const DRIFTING_MANIFEST: &str = r#"{
    "name": "fixture-app",
    "dependencies": { "lodash": "^4.17.21" },
    "devDependencies": { "jest": "29.7.0" }
}"#;

/// Lockfile matching [`DRIFTING_MANIFEST`], with a nested duplicate install
/// of `ms` so transitive drift fires as well.
pub const DRIFTING_LOCKFILE: &str = r#"{
    "name": "fixture-app",
    "lockfileVersion": 3,
    "packages": {
        "": {
            "name": "fixture-app",
            "dependencies": { "lodash": "^4.17.21" },
            "devDependencies": { "jest": "29.7.0" }
        },
        "node_modules/lodash": { "version": "4.17.21" },
        "node_modules/jest": { "version": "29.7.0" },
        "node_modules/debug": {
            "version": "4.3.4",
            "dependencies": { "ms": "2.1.2" }
        },
        "node_modules/ms": { "version": "2.1.2" },
        "node_modules/debug/node_modules/ms": { "version": "2.0.0" }
    }
}"#;

/// Manifest and lockfile for a fully pinned, single-version project.
pub const CLEAN_MANIFEST: &str = r#"{
    "name": "clean-app",
    "dependencies": { "left-pad": "1.3.0" }
}"#;

pub const CLEAN_LOCKFILE: &str = r#"{
    "name": "clean-app",
    "lockfileVersion": 3,
    "packages": {
        "": {
            "name": "clean-app",
            "dependencies": { "left-pad": "1.3.0" }
        },
        "node_modules/left-pad": { "version": "1.3.0" }
    }
}"#;

/// Write a manifest/lockfile pair into `dir`.
pub fn write_project(dir: &Path, manifest: &str, lockfile: &str) {
    std::fs::write(dir.join("package.json"), manifest).unwrap();
    std::fs::write(dir.join("package-lock.json"), lockfile).unwrap();
}
