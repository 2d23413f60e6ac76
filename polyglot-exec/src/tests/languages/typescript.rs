use super::super::fixtures::{code_samples::TS_HELLO, infinite_loops, syntax_errors};
use super::*;

#[tokio::test]
async fn test_typescript_basic() {
    test_language_execution("typescript", TS_HELLO, "Hello from TypeScript!").await;
}

#[tokio::test]
async fn test_typescript_alias() {
    test_language_execution("ts", TS_HELLO, "Hello from TypeScript!").await;
}

#[tokio::test]
async fn test_typescript_compile_error() {
    test_language_compile_error("typescript", syntax_errors::TS).await;
}

#[tokio::test]
async fn test_typescript_type_error() {
    // tsc reports type errors on stdout
    let code = r#"const n: number = "not a number"; console.log(n);"#;
    if let Some(result) = run_once("typescript", code).await {
        assert_status(result.status, ExecutionStatus::CompileError, &result.text);
        assert!(result.text.contains("TS2322"), "{}", result.text);
    }
}

#[tokio::test]
async fn test_typescript_timeout() {
    test_language_timeout("typescript", infinite_loops::TS).await;
}
