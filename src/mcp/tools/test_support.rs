//! Shared fixtures for tool tests.

use std::path::Path;
use std::time::Duration;

use rmcp::model::{CallToolResult, RawContent};
use tempfile::TempDir;

use crate::config::{ProjectRoot, ToolSettings};
use crate::git::MockGitOps;
use crate::mcp::DevLensServer;

/// Write `contents` to `relative` under `root`, creating parent directories.
pub(crate) fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

pub(crate) fn settings(temp: &TempDir) -> ToolSettings {
    let mut settings = ToolSettings::new(ProjectRoot::resolve(temp.path()).unwrap());
    settings.git_timeout = Duration::from_secs(5);
    settings
}

/// Server over `temp` whose git layer is `git`.
pub(crate) fn server_with(temp: &TempDir, git: MockGitOps) -> DevLensServer<MockGitOps> {
    DevLensServer::with_git(settings(temp), git)
}

/// Server over `temp` for tools that never touch git.
pub(crate) fn server(temp: &TempDir) -> DevLensServer<MockGitOps> {
    server_with(temp, MockGitOps::new())
}

/// The single text item of a successful tool result.
pub(crate) fn text(result: &CallToolResult) -> &str {
    assert!(result.is_error.is_none() || result.is_error == Some(false));
    assert_eq!(result.content.len(), 1);
    match &result.content[0].raw {
        RawContent::Text(text_content) => text_content.text.as_str(),
        _ => panic!("Expected text content"),
    }
}
