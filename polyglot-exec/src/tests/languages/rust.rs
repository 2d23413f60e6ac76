use super::super::fixtures::{code_samples::RUST_HELLO, infinite_loops, syntax_errors, test_scenarios::*};
use super::*;

#[tokio::test]
async fn test_rust_basic() {
    test_language_execution("rust", RUST_HELLO, "Hello from Rust!").await;
}

#[tokio::test]
async fn test_rust_compile_error() {
    if let Some(result) = run_once("rust", syntax_errors::RUST).await {
        assert_status(result.status, ExecutionStatus::CompileError, &result.text);
        assert!(result.text.contains("error"), "{}", result.text);
    }
}

#[tokio::test]
async fn test_rust_panic() {
    if let Some(result) = run_once("rust", RUST_PANIC).await {
        assert_status(result.status, ExecutionStatus::RuntimeError, &result.text);
        assert!(result.text.starts_with("Execution error: "));
        assert!(result.text.contains("boom"), "{}", result.text);
    }
}

#[tokio::test]
async fn test_rust_timeout() {
    test_language_timeout("rust", infinite_loops::RUST).await;
}

#[tokio::test]
async fn test_rust_alias() {
    test_language_execution("rs", RUST_HELLO, "Hello from Rust!").await;
}
