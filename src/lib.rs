//! depdrift - Dependency drift and supply-chain risk analysis for npm projects
//!
//! This crate inspects a Node project's `package.json` and `package-lock.json`,
//! reconstructs the resolved dependency graph (augmented with npm registry
//! metadata), and flags two classes of risk:
//!
//! - **Drift** — direct dependencies on floating ranges, and the same package
//!   resolving to multiple versions across the graph
//! - **Security heuristics** — deprecated, unmaintained, and single-maintainer
//!   packages, derived from registry metadata
//!
//! Findings are grouped per dependency and assembled into a stable, versioned
//! report with an overall risk level, a recommended action, and a process exit
//! code encoding the worst finding.
//!
//! # Architecture
//!
//! ```text
//! depdrift/
//! ├── domain/           # Pure data model
//! │   ├── graph.rs      # Dependency graph and nodes
//! │   ├── issues.rs     # Risk levels, drift and security issues
//! │   └── project.rs    # Manifest, lockfile and registry input contracts
//! ├── application/      # Use cases
//! │   ├── graph_builder.rs
//! │   ├── drift.rs      # Drift analyzer
//! │   ├── security.rs   # Security analyzer
//! │   └── reporting/    # Report assembly and output formats
//! ├── infrastructure/   # External integrations
//! │   ├── project/      # Filesystem project loader
//! │   └── registry/     # npm registry metadata client
//! ├── cli/              # Command-line interface
//! └── config/           # Configuration management
//! ```
//!
//! # Configuration
//!
//! Environment variables use the `DEPDRIFT__` prefix with double underscore
//! separators:
//!
//! ```bash
//! DEPDRIFT__REGISTRY__URL=https://registry.npmjs.org
//! DEPDRIFT__ANALYSIS__UNMAINTAINED_AFTER_MONTHS=18
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;

pub use config::Config;
pub use logging::init_tracing;
