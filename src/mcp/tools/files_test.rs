//! Tests for file discovery tools

use std::collections::BTreeSet;

use rmcp::handler::server::wrapper::Parameters;
use tempfile::TempDir;

use crate::mcp::tools::files::*;
use crate::mcp::tools::test_support::{server, text, write};

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "src/App.tsx", "");
    write(root, "src/components/Button.tsx", "");
    write(root, "src/components/Button.test.tsx", "");
    write(root, "src/components/Card.vue", "");
    write(root, "src/widgets/Slider.svelte", "");
    write(root, "src/app/home.component.ts", "");
    write(root, "lib/legacy.jsx", "");
    write(root, "lib/util.ts", "");
    write(root, "node_modules/pkg/Hidden.tsx", "");
    write(root, "tests/integration/api.integration.test.ts", "");
    write(root, "tests/integration/db.ts", "");
    write(root, "e2e/login.e2e.ts", "");
    write(root, "cypress/e2e/checkout.cy.ts", "");
    write(root, "scripts/test_build.py", "");
    temp
}

fn listed(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|l| l.strip_prefix("- "))
        .map(str::to_string)
        .collect()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_files_single_directory() {
    let temp = project();
    let server = server(&temp);

    let result = server
        .search_files(Parameters(SearchFilesParams {
            pattern: "**/*.tsx".to_string(),
            directory: Some("src".to_string()),
            max_results: None,
        }))
        .await
        .unwrap();
    let text = text(&result);

    assert!(text.starts_with("Found 3 files matching `**/*.tsx`"));
    assert!(text.contains("### src (3)"));
    assert_eq!(
        listed(text),
        vec![
            "src/App.tsx",
            "src/components/Button.test.tsx",
            "src/components/Button.tsx"
        ]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_files_multiple_directories_keep_group_order() {
    let temp = project();
    let server = server(&temp);

    let result = server
        .search_files(Parameters(SearchFilesParams {
            pattern: "**/*.{jsx,ts}".to_string(),
            directory: Some("lib, src".to_string()),
            max_results: None,
        }))
        .await
        .unwrap();
    let text = text(&result);

    let lib_idx = text.find("### lib (2)").unwrap();
    let src_idx = text.find("### src (1)").unwrap();
    assert!(lib_idx < src_idx);
    assert_eq!(
        listed(text),
        vec!["lib/legacy.jsx", "lib/util.ts", "src/app/home.component.ts"]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_files_overlapping_directories_are_not_deduplicated() {
    let temp = project();
    let server = server(&temp);

    let result = server
        .search_files(Parameters(SearchFilesParams {
            pattern: "**/Card.vue".to_string(),
            directory: Some("src,src/components".to_string()),
            max_results: None,
        }))
        .await
        .unwrap();
    let text = text(&result);

    assert!(text.starts_with("Found 2 files"));
    assert_eq!(
        listed(text),
        vec!["src/components/Card.vue", "src/components/Card.vue"]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_files_max_results_truncates_listing() {
    let temp = project();
    let server = server(&temp);

    let result = server
        .search_files(Parameters(SearchFilesParams {
            pattern: "**/*".to_string(),
            directory: Some("src".to_string()),
            max_results: Some(2),
        }))
        .await
        .unwrap();
    let text = text(&result);

    assert!(text.contains("- ... and 4 more"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_files_missing_directory_returns_error_text() {
    let temp = project();
    let server = server(&temp);

    let result = server
        .search_files(Parameters(SearchFilesParams {
            pattern: "**/*".to_string(),
            directory: Some("src,nope".to_string()),
            max_results: None,
        }))
        .await
        .unwrap();

    let text = text(&result);
    assert!(text.starts_with("Error: Not found"), "got: {}", text);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_files_outside_root_returns_error_text() {
    let temp = project();
    let server = server(&temp);

    let result = server
        .search_files(Parameters(SearchFilesParams {
            pattern: "**/*".to_string(),
            directory: Some("../".to_string()),
            max_results: None,
        }))
        .await
        .unwrap();

    let text = text(&result);
    assert!(text.starts_with("Error: Invalid input"), "got: {}", text);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_files_rejects_bad_parameters() {
    let temp = project();
    let server = server(&temp);

    let empty = server
        .search_files(Parameters(SearchFilesParams {
            pattern: "  ".to_string(),
            directory: None,
            max_results: None,
        }))
        .await;
    assert!(empty.is_err());

    let malformed = server
        .search_files(Parameters(SearchFilesParams {
            pattern: "src/[oops".to_string(),
            directory: None,
            max_results: None,
        }))
        .await;
    assert!(malformed.is_err());

    let zero = server
        .search_files(Parameters(SearchFilesParams {
            pattern: "**/*".to_string(),
            directory: None,
            max_results: Some(0),
        }))
        .await;
    assert!(zero.is_err());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_find_components_defaults_to_src_and_all_frameworks() {
    let temp = project();
    let server = server(&temp);

    let result = server
        .find_components(Parameters(FindComponentsParams {
            directory: None,
            framework: None,
        }))
        .await
        .unwrap();
    let text = text(&result);

    assert!(text.contains("framework: all"));
    let files: BTreeSet<String> = listed(text).into_iter().collect();
    let expected: BTreeSet<String> = [
        "src/App.tsx",
        "src/components/Button.tsx",
        "src/components/Button.test.tsx",
        "src/components/Card.vue",
        "src/widgets/Slider.svelte",
        "src/app/home.component.ts",
    ]
    .into_iter()
    .map(str::to_string)
    .collect();
    assert_eq!(files, expected);
    assert!(!text.contains("node_modules"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_find_components_by_framework() {
    let temp = project();
    let server = server(&temp);

    let result = server
        .find_components(Parameters(FindComponentsParams {
            directory: Some("src,lib".to_string()),
            framework: Some(Framework::Vue),
        }))
        .await
        .unwrap();
    let text = text(&result);

    assert_eq!(listed(text), vec!["src/components/Card.vue"]);
    assert!(text.contains("### lib (0)"));
    assert!(text.contains("_No matches_"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_find_test_files_by_type() {
    let temp = project();
    let server = server(&temp);

    let unit = server
        .find_test_files(Parameters(FindTestFilesParams {
            directory: None,
            test_type: Some(TestType::Unit),
        }))
        .await
        .unwrap();
    let unit_files = listed(text(&unit));
    assert!(unit_files.contains(&"src/components/Button.test.tsx".to_string()));
    assert!(unit_files.contains(&"scripts/test_build.py".to_string()));

    let e2e = server
        .find_test_files(Parameters(FindTestFilesParams {
            directory: None,
            test_type: Some(TestType::E2e),
        }))
        .await
        .unwrap();
    let e2e_files = listed(text(&e2e));
    assert_eq!(
        e2e_files,
        vec!["e2e/login.e2e.ts", "cypress/e2e/checkout.cy.ts"]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_find_test_files_all_is_union_of_types() {
    let temp = project();
    let server = server(&temp);

    let mut union = BTreeSet::new();
    for test_type in [TestType::Unit, TestType::Integration, TestType::E2e] {
        let result = server
            .find_test_files(Parameters(FindTestFilesParams {
                directory: None,
                test_type: Some(test_type),
            }))
            .await
            .unwrap();
        union.extend(listed(text(&result)));
    }

    let all = server
        .find_test_files(Parameters(FindTestFilesParams {
            directory: None,
            test_type: None,
        }))
        .await
        .unwrap();
    let all_text = text(&all);
    let all_files = listed(all_text);
    let all_set: BTreeSet<String> = all_files.iter().cloned().collect();

    assert!(all_set.is_superset(&union));
    // deduplicated: the integration test file matches both unit and integration patterns
    assert_eq!(all_files.len(), all_set.len());
    assert!(all_text.contains("(type: all)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_find_test_files_empty_project() {
    let temp = TempDir::new().unwrap();
    let server = server(&temp);

    let result = server
        .find_test_files(Parameters(FindTestFilesParams {
            directory: None,
            test_type: None,
        }))
        .await
        .unwrap();

    assert_eq!(text(&result), "Found 0 test files (type: all)\n");
}

#[test]
fn test_framework_and_test_type_deserialize_lowercase() {
    let params: FindTestFilesParams =
        serde_json::from_value(serde_json::json!({"type": "e2e"})).unwrap();
    assert_eq!(params.test_type, Some(TestType::E2e));

    let params: FindComponentsParams =
        serde_json::from_value(serde_json::json!({"framework": "svelte"})).unwrap();
    assert_eq!(params.framework, Some(Framework::Svelte));

    let bad: Result<FindTestFilesParams, _> =
        serde_json::from_value(serde_json::json!({"type": "smoke"}));
    assert!(bad.is_err());
}
