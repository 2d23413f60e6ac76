use super::super::fixtures::{code_samples::JS_HELLO, infinite_loops, test_scenarios::*};
use super::*;

#[tokio::test]
async fn test_javascript_basic() {
    test_language_execution("javascript", JS_HELLO, "Hello from JavaScript!").await;
}

#[tokio::test]
async fn test_javascript_alias() {
    test_language_execution("js", JS_HELLO, "Hello from JavaScript!").await;
}

#[tokio::test]
async fn test_javascript_busy_loop() {
    test_language_timeout("javascript", infinite_loops::JS).await;
}

#[tokio::test]
async fn test_javascript_pending_timer() {
    // the event loop stays alive on the timer alone
    test_language_timeout("javascript", JS_WITH_TIMEOUT).await;
}

#[tokio::test]
async fn test_javascript_throw() {
    if let Some(result) = run_once("javascript", "throw new Error('kaboom')").await {
        assert_status(result.status, ExecutionStatus::RuntimeError, &result.text);
        assert!(result.text.contains("kaboom"), "{}", result.text);
    }
}
