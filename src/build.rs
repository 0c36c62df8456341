//! `remix build`: write the route manifest for an app root.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::config::AppConfig;
use crate::routing::router::RouteEntry;
use crate::routing::{RouteTable, RoutingError};

pub const MANIFEST_FILE_NAME: &str = "manifest.json";

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("route registration failed: {0}")]
    Routes(#[from] RoutingError),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Contents of `manifest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildManifest {
    pub version: String,
    pub routes: Vec<RouteEntry>,
}

/// Result of a successful build.
#[derive(Debug)]
pub struct BuildOutput {
    pub manifest: BuildManifest,
    pub path: PathBuf,
}

/// Write the manifest for `routes` under `<root>/<build.output_dir>/`.
pub fn build(root: &Path, config: &AppConfig, routes: &RouteTable) -> Result<BuildOutput, BuildError> {
    let manifest = BuildManifest {
        version: crate::cli::VERSION.to_string(),
        routes: routes.manifest(),
    };

    let out_dir = root.join(&config.build.output_dir);
    fs::create_dir_all(&out_dir).map_err(|source| BuildError::Io {
        path: out_dir.clone(),
        source,
    })?;

    let path = out_dir.join(MANIFEST_FILE_NAME);
    let mut json = serde_json::to_string_pretty(&manifest)?;
    json.push('\n');
    fs::write(&path, json).map_err(|source| BuildError::Io {
        path: path.clone(),
        source,
    })?;

    tracing::info!(
        path = %path.display(),
        routes = manifest.routes.len(),
        "Build manifest written"
    );
    Ok(BuildOutput { manifest, path })
}
