use super::super::fixtures::{code_samples::PYTHON_HELLO, infinite_loops, test_scenarios::*};
use super::super::utils::{checks::*, defaults::*};
use super::*;
use crate::{ExecutionRequest, NO_OUTPUT};

#[tokio::test]
async fn test_python_basic() {
    test_language_execution("python", PYTHON_HELLO, "Hello from Python!").await;
}

#[tokio::test]
async fn test_python_aliases() {
    for alias in ["py", "python3", " Python "] {
        test_language_execution(alias, PYTHON_HELLO, "Hello from Python!").await;
    }
}

#[tokio::test]
async fn test_python_timeout() {
    test_language_timeout("python", infinite_loops::PYTHON).await;
}

#[tokio::test]
async fn test_python_multiline() {
    test_language_execution("python", PYTHON_MULTILINE, "Factorial of 5 is 120").await;
}

#[tokio::test]
async fn test_python_input() {
    if skip_language("python") {
        return;
    }
    let temp = TempDir::new().unwrap();
    let runner = setup_test_runner(&temp);

    let request = ExecutionRequest::new("python", PYTHON_WITH_INPUT).with_stdin("test user\n");
    let result = runner.run(&request).await;
    assert_status(result.status, ExecutionStatus::Success, &result.text);
    assert_eq!(result.text, "Hello, test user!");
}

#[tokio::test]
async fn test_python_stderr_fallback() {
    test_language_execution("python", PYTHON_STDERR_ONLY, "diagnostic only").await;
}

#[tokio::test]
async fn test_python_no_output() {
    test_language_execution("python", "x = 1", NO_OUTPUT).await;
}

#[tokio::test]
async fn test_python_exception() {
    if let Some(result) = run_once("python", PYTHON_EXCEPTION).await {
        assert_status(result.status, ExecutionStatus::RuntimeError, &result.text);
        assert!(result.text.starts_with("Execution error: "));
        assert!(result.text.contains("ValueError: bad value"), "{}", result.text);
    }
}
