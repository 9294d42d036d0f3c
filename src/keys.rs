//! Content key, branch, and label codec.
//!
//! Everything the engine writes into the version-control namespace goes
//! through here: content keys (`<collection>/<slug><suffix>`), workflow
//! branches (`cms/<content key>`) and review labels (`<prefix><STATUS>`).
//! All functions are pure. The deployment-derived ref suffix and the
//! label prefix are injected at construction so multiple engine instances
//! can coexist in one process.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Fixed first segment of every workflow branch name.
pub const CMS_BRANCH_PREFIX: &str = "cms";

/// Default namespace for review labels. Configurable so multiple tools
/// sharing a repository's label namespace do not collide.
pub const DEFAULT_LABEL_PREFIX: &str = "copydesk/";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("malformed content key '{0}': expected '<collection>/<slug>'")]
    MalformedContentKey(String),
    #[error("branch '{0}' is not a workflow branch")]
    NotACmsBranch(String),
    #[error("label '{0}' does not carry the workflow label prefix")]
    NotACmsLabel(String),
}

/// Deployment-path-derived disambiguator appended to every content key,
/// so multiple deployments sharing one repository keep separate ref
/// namespaces. Empty for a root mount, else `(<path>)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefSuffix(String);

impl RefSuffix {
    /// Suffix for an engine mounted at the site root.
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Derive the suffix from the deployment base path. The leading `/`
    /// is dropped; a non-empty remainder is wrapped in parentheses.
    pub fn from_base_path(path: &str) -> Self {
        let clean = path.strip_prefix('/').unwrap_or(path);
        if clean.is_empty() {
            Self::root()
        } else {
            Self(format!("({clean})"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Canonical identifier for an entry: which collection it belongs to and
/// its slug within that collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentKey {
    pub collection: String,
    pub slug: String,
}

impl ContentKey {
    pub fn new(collection: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            slug: slug.into(),
        }
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.slug)
    }
}

/// Translator between CMS identifiers and version-control identifiers.
#[derive(Debug, Clone)]
pub struct KeyCodec {
    suffix: RefSuffix,
    label_prefix: String,
}

impl KeyCodec {
    /// An empty `label_prefix` falls back to [`DEFAULT_LABEL_PREFIX`].
    pub fn new(suffix: RefSuffix, label_prefix: impl Into<String>) -> Self {
        let label_prefix = label_prefix.into();
        let label_prefix = if label_prefix.is_empty() {
            DEFAULT_LABEL_PREFIX.to_string()
        } else {
            label_prefix
        };
        Self {
            suffix,
            label_prefix,
        }
    }

    pub fn with_defaults(suffix: RefSuffix) -> Self {
        Self::new(suffix, "")
    }

    pub fn ref_suffix(&self) -> &RefSuffix {
        &self.suffix
    }

    pub fn label_prefix(&self) -> &str {
        &self.label_prefix
    }

    /// Serialize a collection/slug pair into the content key embedded in
    /// branch names and review requests.
    pub fn generate_content_key(&self, collection: &str, slug: &str) -> String {
        format!("{collection}/{slug}{}", self.suffix.as_str())
    }

    /// Parse a content key back into its parts. Splits on the first `/`
    /// (slugs may contain further slashes) and strips one trailing ref
    /// suffix if present.
    pub fn parse_content_key(&self, content_key: &str) -> Result<ContentKey, KeyError> {
        let (collection, rest) = content_key
            .split_once('/')
            .ok_or_else(|| KeyError::MalformedContentKey(content_key.to_string()))?;
        if collection.is_empty() {
            return Err(KeyError::MalformedContentKey(content_key.to_string()));
        }
        let slug = if self.suffix.is_empty() {
            rest
        } else {
            rest.strip_suffix(self.suffix.as_str()).unwrap_or(rest)
        };
        Ok(ContentKey::new(collection, slug))
    }

    /// Whether a ref was produced by a deployment with this suffix.
    /// Always true for a root mount, whose suffix is empty.
    pub fn has_ref_suffix(&self, r: &str) -> bool {
        r.ends_with(self.suffix.as_str())
    }

    pub fn branch_from_content_key(&self, content_key: &str) -> String {
        format!("{CMS_BRANCH_PREFIX}/{content_key}")
    }

    /// Inverse of [`branch_from_content_key`](Self::branch_from_content_key).
    /// A branch outside the workflow namespace is an explicit error, never
    /// a garbage slice.
    pub fn content_key_from_branch(&self, branch: &str) -> Result<String, KeyError> {
        branch
            .strip_prefix(CMS_BRANCH_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
            .map(str::to_string)
            .ok_or_else(|| KeyError::NotACmsBranch(branch.to_string()))
    }

    pub fn is_cms_branch(&self, branch: &str) -> bool {
        branch
            .strip_prefix(CMS_BRANCH_PREFIX)
            .is_some_and(|rest| rest.starts_with('/'))
    }

    pub fn is_cms_label(&self, label: &str) -> bool {
        label.starts_with(&self.label_prefix)
    }

    /// Strip the label prefix, yielding the raw status string.
    pub fn label_to_status(&self, label: &str) -> Result<String, KeyError> {
        label
            .strip_prefix(&self.label_prefix)
            .map(str::to_string)
            .ok_or_else(|| KeyError::NotACmsLabel(label.to_string()))
    }

    pub fn status_to_label(&self, status: &str) -> String {
        format!("{}{status}", self.label_prefix)
    }
}
