use std::collections::HashSet;

use tempfile::TempDir;

use crate::{ExecutionRequest, ExecutionStatus, Registry};

mod utils;

use fixtures::{code_samples, test_scenarios};
use utils::{checks::*, defaults::*};

#[tokio::test]
async fn test_concurrent_mixed_execution() {
    let temp = TempDir::new().unwrap();
    let runner = setup_test_runner(&temp);

    let requests = vec![
        ("python", code_samples::PYTHON_HELLO, "Hello from Python!"),
        ("javascript", code_samples::JS_HELLO, "Hello from JavaScript!"),
        ("bash", code_samples::BASH_HELLO, "Hello from Bash!"),
    ];

    let mut handles = vec![];
    for (language, code, expected) in requests {
        if skip_language(language) {
            continue;
        }
        let runner = runner.clone();
        handles.push(tokio::spawn(async move {
            (runner.execute(language, code).await, expected)
        }));
    }

    for handle in handles {
        let (result, expected) = handle.await.unwrap();
        assert_status(result.status, ExecutionStatus::Success, &result.text);
        assert_eq!(result.text, expected);
    }
    assert_workspace_clean(temp.path());
}

#[tokio::test]
async fn test_concurrent_same_language_isolated() {
    if skip_language("python") {
        return;
    }
    let temp = TempDir::new().unwrap();
    let runner = setup_test_runner(&temp);

    let mut handles = vec![];
    for i in 0..8 {
        let runner = runner.clone();
        handles.push(tokio::spawn(async move {
            // every request writes the same file name in its own directory
            let code = format!(
                "open('shared.txt', 'w').write('{i}')\nprint(open('shared.txt').read())"
            );
            (i, runner.execute("python", &code).await)
        }));
    }

    let mut seen = HashSet::new();
    for handle in handles {
        let (i, result) = handle.await.unwrap();
        assert_status(result.status, ExecutionStatus::Success, &result.text);
        assert_eq!(result.text, i.to_string());
        seen.insert(i);
    }
    assert_eq!(seen.len(), 8);
    assert_workspace_clean(temp.path());
}

#[tokio::test]
async fn test_repeated_requests_are_independent() {
    if skip_language("python") {
        return;
    }
    let temp = TempDir::new().unwrap();
    let runner = setup_test_runner(&temp);

    let first = runner.execute("python", test_scenarios::PYTHON_MULTILINE).await;
    let second = runner.execute("python", test_scenarios::PYTHON_MULTILINE).await;
    assert_eq!(first, second);
    assert_workspace_clean(temp.path());
}

#[tokio::test]
async fn test_compiled_then_run_leaves_no_artifacts() {
    if skip_language("c") {
        return;
    }
    let temp = TempDir::new().unwrap();
    let runner = setup_test_runner(&temp);

    let result = runner.execute("c", code_samples::C_HELLO).await;
    assert_status(result.status, ExecutionStatus::Success, &result.text);
    let result = runner.execute("c", fixtures::syntax_errors::C).await;
    assert_status(result.status, ExecutionStatus::CompileError, &result.text);
    assert_workspace_clean(temp.path());
}

#[tokio::test]
async fn test_unknown_language_touches_nothing() {
    let temp = TempDir::new().unwrap();
    let runner = setup_test_runner(&temp);

    let result = runner.run(&ExecutionRequest::new("cobol", "DISPLAY 'HI'.")).await;
    assert_eq!(result.status, ExecutionStatus::ConfigurationError);
    assert_eq!(result.text, "Configuration error: unsupported language: cobol");
    assert_workspace_clean(temp.path());
}

#[tokio::test]
async fn test_every_builtin_language_reports_a_status() {
    // whatever is installed, each language must come back with a result and clean up
    let temp = TempDir::new().unwrap();
    let runner = setup_test_runner(&temp);

    for spec in Registry::builtin().specs() {
        let result = runner.execute(spec.id, "").await;
        assert!(!result.text.is_empty(), "{} produced empty text", spec.id);
        if crate::languages::skip_if_not_available(&spec.required_tools()) {
            assert_eq!(result.status, ExecutionStatus::ConfigurationError, "{}", spec.id);
        }
    }
    assert_workspace_clean(temp.path());
}
