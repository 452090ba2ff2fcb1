use crate::config::{ConfigError, ProjectRoot};
use crate::fs::FsError;
use std::fs;
use tempfile::TempDir;

fn root() -> (TempDir, ProjectRoot) {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("src/components")).unwrap();
    let root = ProjectRoot::resolve(temp.path()).unwrap();
    (temp, root)
}

#[test]
fn test_resolve_canonicalizes() {
    let (temp, root) = root();
    assert_eq!(root.path(), temp.path().canonicalize().unwrap());
    assert!(root.path().is_absolute());
}

#[test]
fn test_resolve_missing_root() {
    let temp = TempDir::new().unwrap();
    let result = ProjectRoot::resolve(temp.path().join("missing"));
    assert!(matches!(result, Err(ConfigError::RootNotFound(_))));
}

#[test]
fn test_resolve_file_root() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("file.txt");
    fs::write(&file, "").unwrap();

    let result = ProjectRoot::resolve(&file);
    assert!(matches!(result, Err(ConfigError::RootNotADirectory(_))));
}

#[test]
fn test_join_relative_paths() {
    let (_temp, root) = root();

    assert_eq!(root.join(".").unwrap(), root.path());
    assert_eq!(root.join("").unwrap(), root.path());
    assert_eq!(root.join("src").unwrap(), root.path().join("src"));
    assert_eq!(
        root.join("./src/components/../").unwrap(),
        root.path().join("src")
    );
    assert_eq!(root.join("  src  ").unwrap(), root.path().join("src"));
}

#[test]
fn test_join_rejects_escaping_paths() {
    let (_temp, root) = root();

    assert!(matches!(root.join(".."), Err(FsError::OutsideRoot { .. })));
    assert!(matches!(
        root.join("src/../../etc"),
        Err(FsError::OutsideRoot { .. })
    ));
    assert!(matches!(root.join("/etc"), Err(FsError::OutsideRoot { .. })));
}

#[test]
fn test_join_accepts_absolute_path_under_root() {
    let (_temp, root) = root();
    let absolute = root.path().join("src");

    let joined = root.join(absolute.to_str().unwrap()).unwrap();
    assert_eq!(joined, absolute);
}

#[test]
fn test_display_relative() {
    let (_temp, root) = root();

    assert_eq!(root.display(root.path()), ".");
    assert_eq!(root.display(&root.path().join("src/components")), "src/components");
}
