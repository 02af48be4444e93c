//! Domain types for web-resource deployment.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A logical resource name with the deployment-wide prefix applied
/// (`<prefix>_<logical>`).
///
/// The natural key matching local files to remote records. Comparison
/// against remote names is case-insensitive; see [`RemoteIndex`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedName(pub String);

impl QualifiedName {
    /// Apply `prefix` to a logical resource name.
    pub fn new(prefix: &str, logical: &str) -> Self {
        Self(format!("{prefix}_{logical}"))
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for QualifiedName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for QualifiedName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Opaque identifier of a remote web-resource record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId(pub String);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ResourceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Platform content type of a web resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    #[default]
    Html,
    Css,
    Js,
}

impl ResourceType {
    /// Classify a file by the last dot-delimited segment of its name,
    /// case-insensitively.
    ///
    /// `css` and `js` map to their types; everything else, including `html`,
    /// missing, and unrecognized extensions, is HTML. Total — never fails.
    pub fn classify(file_name: &str) -> Self {
        let ext = file_name.rsplit('.').next().unwrap_or("");
        match ext.to_ascii_lowercase().as_str() {
            "css" => ResourceType::Css,
            "js" => ResourceType::Js,
            _ => ResourceType::Html,
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceType::Html => write!(f, "html"),
            ResourceType::Css => write!(f, "css"),
            ResourceType::Js => write!(f, "js"),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A local file staged for deployment.
///
/// Immutable after creation; file bytes are captured once when the manifest
/// is loaded and never re-read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentUnit {
    /// Path of the source file on disk (working folder + mapping entry).
    pub source_path: PathBuf,
    /// Name as declared in the mapping, without the prefix.
    pub logical_name: String,
    pub qualified_name: QualifiedName,
    pub resource_type: ResourceType,
    pub content: Vec<u8>,
}

/// Read model of an existing remote web resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRecord {
    pub id: ResourceId,
    pub name: String,
}

/// Case-insensitive map from qualified name to remote record identifier.
///
/// Built fresh from each lookup and discarded after use.
#[derive(Debug, Clone, Default)]
pub struct RemoteIndex {
    entries: HashMap<String, ResourceId>,
}

impl RemoteIndex {
    pub fn from_records(records: &[RemoteRecord]) -> Self {
        let entries = records
            .iter()
            .map(|r| (r.name.to_lowercase(), r.id.clone()))
            .collect();
        Self { entries }
    }

    pub fn get(&self, name: &QualifiedName) -> Option<&ResourceId> {
        self.entries.get(&name.0.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_name_applies_prefix() {
        let name = QualifiedName::new("contoso", "LoginScript");
        assert_eq!(name.to_string(), "contoso_LoginScript");
    }

    #[test]
    fn newtype_display() {
        assert_eq!(QualifiedName::from("foo").to_string(), "foo");
        assert_eq!(ResourceId::from("a-b-c").to_string(), "a-b-c");
    }

    #[test]
    fn newtype_equality() {
        let a = QualifiedName::from("x");
        let b = QualifiedName::from(String::from("x"));
        assert_eq!(a, b);
    }

    #[test]
    fn resource_type_display() {
        assert_eq!(ResourceType::Html.to_string(), "html");
        assert_eq!(ResourceType::Css.to_string(), "css");
        assert_eq!(ResourceType::Js.to_string(), "js");
    }

    #[test]
    fn index_matches_case_insensitively() {
        let records = vec![RemoteRecord {
            id: ResourceId::from("id-1"),
            name: "Contoso_LoginScript".to_string(),
        }];
        let index = RemoteIndex::from_records(&records);
        assert_eq!(
            index.get(&QualifiedName::from("contoso_loginscript")),
            Some(&ResourceId::from("id-1"))
        );
        assert_eq!(
            index.get(&QualifiedName::from("CONTOSO_LOGINSCRIPT")),
            Some(&ResourceId::from("id-1"))
        );
        assert!(index.get(&QualifiedName::from("contoso_other")).is_none());
    }

    #[test]
    fn index_empty_by_default() {
        let index = RemoteIndex::default();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
    }
}
