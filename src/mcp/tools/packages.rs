//! `get_package_info` tool.

use std::collections::BTreeMap;

use rmcp::{ErrorData as McpError, model::*, schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ToolSettings;
use crate::manifest::{LocatedManifest, load_manifests};
use crate::mcp::tools::{blocking, plural, respond};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetPackageInfoParams {
    #[schemars(description = "Only report the package with this exact name (optional)")]
    pub package_name: Option<String>,
    #[schemars(
        description = "Directory to search for package.json files, relative to the project root (default: '.')"
    )]
    pub directory: Option<String>,
}

pub(crate) async fn get_package_info(
    settings: &ToolSettings,
    params: GetPackageInfoParams,
) -> Result<CallToolResult, McpError> {
    debug!(?params, "get_package_info");

    let package_name = params
        .package_name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());
    let directory = params
        .directory
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(".")
        .to_string();

    let root = settings.root.clone();
    let result = blocking(move || {
        let base = root.join(&directory)?;
        let manifests = load_manifests(&base)?
            .into_iter()
            .filter(|located| match &package_name {
                Some(name) => located.manifest.name.as_deref() == Some(name.as_str()),
                None => true,
            })
            .map(|located| LocatedManifest {
                path: root.display(&base.join(&located.path)),
                manifest: located.manifest,
            })
            .collect::<Vec<_>>();
        Ok(manifests)
    })
    .await
    .map(|manifests| format_packages(&manifests));

    Ok(respond("get_package_info", result))
}

fn format_packages(packages: &[LocatedManifest]) -> String {
    let mut out = format!("Found {}\n", plural(packages.len(), "package"));

    for LocatedManifest { path, manifest } in packages {
        let name = manifest.name.as_deref().unwrap_or("(unnamed)");
        match &manifest.version {
            Some(version) => out.push_str(&format!("\n## {name}@{version}\n")),
            None => out.push_str(&format!("\n## {name}\n")),
        }
        out.push_str(&format!("- Path: `{path}`\n"));
        if let Some(description) = &manifest.description {
            out.push_str(&format!("- Description: {description}\n"));
        }
        if manifest.private == Some(true) {
            out.push_str("- Private: yes\n");
        }
        if !manifest.scripts.is_empty() {
            let scripts: Vec<&str> = manifest.scripts.keys().map(String::as_str).collect();
            out.push_str(&format!("- Scripts: {}\n", scripts.join(", ")));
        }
        push_dependencies(&mut out, "Dependencies", &manifest.dependencies);
        push_dependencies(&mut out, "Dev Dependencies", &manifest.dev_dependencies);
        push_dependencies(&mut out, "Peer Dependencies", &manifest.peer_dependencies);
    }

    out
}

fn push_dependencies(out: &mut String, label: &str, deps: &BTreeMap<String, String>) {
    if deps.is_empty() {
        return;
    }
    let listed: Vec<String> = deps
        .iter()
        .map(|(name, version)| format!("{name}@{version}"))
        .collect();
    out.push_str(&format!("- {label} ({}): {}\n", deps.len(), listed.join(", ")));
}
