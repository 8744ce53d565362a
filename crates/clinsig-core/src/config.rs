//! Loading and validating annotation configs.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use clinsig_model::{AnnotationConfig, AnnotationError};

use crate::ops::{OpRegistry, default_registry};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config {origin}: {source}")]
    Toml {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid post-annotation: {0}")]
    PostAnnotation(#[from] AnnotationError),

    #[error("duplicate post-annotation name: {name}")]
    DuplicateName { name: String },

    #[error("post-annotation using op '{op}' needs a name")]
    MissingName { op: String },
}

/// Read, parse and validate a config file against the built-in ops.
pub fn load_config(path: &Path) -> Result<AnnotationConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&text, &path.display().to_string())
}

/// Parse and validate config text; `origin` names it in error messages.
pub fn parse_config(text: &str, origin: &str) -> Result<AnnotationConfig, ConfigError> {
    let config: AnnotationConfig = toml::from_str(text).map_err(|source| ConfigError::Toml {
        origin: origin.to_string(),
        source,
    })?;
    validate_config(&config, default_registry())?;
    tracing::debug!(
        origin,
        fields = config.fields.len(),
        post_annotations = config.post_annotations.len(),
        "loaded annotation config"
    );
    Ok(config)
}

/// Check every post-annotation against `registry`.
///
/// Ops must exist, field counts must fit the op, threshold ops need a
/// cutoff, and output names must be unique. Only `delete` may go unnamed.
pub fn validate_config(config: &AnnotationConfig, registry: &OpRegistry) -> Result<(), ConfigError> {
    let mut seen = BTreeSet::new();
    for post in &config.post_annotations {
        let op = registry
            .get(&post.op)
            .ok_or_else(|| AnnotationError::UnknownOp {
                op: post.op.clone(),
            })?;
        if !op.arity().accepts(post.fields.len()) {
            return Err(AnnotationError::FieldCount {
                name: post.name.clone(),
                op: post.op.clone(),
                expected: op.arity().to_string(),
                actual: post.fields.len(),
            }
            .into());
        }
        if op.requires_cutoff() && post.cutoff.is_none() {
            return Err(AnnotationError::MissingCutoff {
                name: post.name.clone(),
                op: post.op.clone(),
            }
            .into());
        }
        if post.name.is_empty() {
            if post.op != "delete" {
                return Err(ConfigError::MissingName {
                    op: post.op.clone(),
                });
            }
            continue;
        }
        if !seen.insert(post.name.as_str()) {
            return Err(ConfigError::DuplicateName {
                name: post.name.clone(),
            });
        }
    }
    Ok(())
}
