use super::super::fixtures::{code_samples::GO_HELLO, infinite_loops, syntax_errors};
use super::*;

#[tokio::test]
async fn test_go_basic() {
    test_language_execution("go", GO_HELLO, "Hello from Go!").await;
}

#[tokio::test]
async fn test_go_alias() {
    test_language_execution("golang", GO_HELLO, "Hello from Go!").await;
}

#[tokio::test]
async fn test_go_compile_error() {
    test_language_compile_error("go", syntax_errors::GO).await;
}

#[tokio::test]
async fn test_go_timeout() {
    test_language_timeout("go", infinite_loops::GO).await;
}

#[tokio::test]
async fn test_go_nonzero_exit() {
    let code = r#"
        package main
        import "os"
        func main() { os.Exit(3) }
    "#;
    if let Some(result) = run_once("go", code).await {
        assert_status(result.status, ExecutionStatus::RuntimeError, &result.text);
        assert!(result.text.contains("exited with code 3"), "{}", result.text);
    }
}
