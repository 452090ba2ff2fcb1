//! Package manifest (`package.json`) discovery and parsing.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ToolError, ToolResult};
use crate::fs::{FsError, find_files};

/// File name of the manifests this module understands.
pub const MANIFEST_FILE: &str = "package.json";

/// The subset of `package.json` the package tool reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    pub name: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub private: Option<bool>,
    #[serde(default)]
    pub scripts: BTreeMap<String, String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub peer_dependencies: BTreeMap<String, String>,
}

impl PackageManifest {
    /// Parse manifest text; `path` only labels the error.
    pub fn parse(path: &str, text: &str) -> ToolResult<Self> {
        serde_json::from_str(text).map_err(|e| ToolError::Parse {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

/// A manifest together with its location relative to the search base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedManifest {
    pub path: String,
    pub manifest: PackageManifest,
}

/// Find and parse every manifest below `base`, skipping dependency caches.
///
/// A single unreadable or malformed manifest fails the whole scan.
pub fn load_manifests(base: &Path) -> ToolResult<Vec<LocatedManifest>> {
    find_files(base, &format!("**/{MANIFEST_FILE}"))?
        .into_iter()
        .map(|relative| {
            let path = base.join(&relative);
            let text = std::fs::read_to_string(&path).map_err(|e| FsError::from_io(&path, e))?;
            let manifest = PackageManifest::parse(&relative, &text)?;
            Ok(LocatedManifest {
                path: relative,
                manifest,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_parse_full_manifest() {
        let manifest = PackageManifest::parse(
            "package.json",
            r#"{
                "name": "@acme/web",
                "version": "1.2.3",
                "description": "Storefront",
                "private": true,
                "scripts": {"build": "vite build", "test": "vitest"},
                "dependencies": {"react": "^18.2.0"},
                "devDependencies": {"vite": "^5.0.0"},
                "peerDependencies": {"react-dom": "^18"},
                "workspaces": ["packages/*"]
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.name.as_deref(), Some("@acme/web"));
        assert_eq!(manifest.version.as_deref(), Some("1.2.3"));
        assert_eq!(manifest.private, Some(true));
        assert_eq!(manifest.scripts.len(), 2);
        assert_eq!(manifest.dependencies["react"], "^18.2.0");
        assert_eq!(manifest.dev_dependencies["vite"], "^5.0.0");
        assert_eq!(manifest.peer_dependencies["react-dom"], "^18");
    }

    #[test]
    fn test_parse_minimal_manifest() {
        let manifest = PackageManifest::parse("package.json", "{}").unwrap();
        assert_eq!(manifest, PackageManifest::default());
    }

    #[test]
    fn test_parse_malformed_manifest() {
        let result = PackageManifest::parse("pkg/package.json", "{ \"name\": ");
        match result {
            Err(ToolError::Parse { path, .. }) => assert_eq!(path, "pkg/package.json"),
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_manifests_skips_dependency_cache() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "package.json", r#"{"name": "root"}"#);
        write(temp.path(), "packages/ui/package.json", r#"{"name": "ui"}"#);
        write(temp.path(), "node_modules/react/package.json", "not even json");

        let manifests = load_manifests(temp.path()).unwrap();

        let paths: Vec<&str> = manifests.iter().map(|m| m.path.as_str()).collect();
        assert_eq!(paths, vec!["package.json", "packages/ui/package.json"]);
    }

    #[test]
    fn test_load_manifests_fails_on_any_malformed_manifest() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "package.json", r#"{"name": "root"}"#);
        write(temp.path(), "packages/broken/package.json", "{ nope");

        let result = load_manifests(temp.path());
        assert!(matches!(result, Err(ToolError::Parse { .. })));
    }
}
