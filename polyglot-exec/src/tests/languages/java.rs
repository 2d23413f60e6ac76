use super::super::fixtures::{code_samples::JAVA_HELLO, infinite_loops, syntax_errors, test_scenarios::*};
use super::*;

#[tokio::test]
async fn test_java_basic() {
    test_language_execution("java", JAVA_HELLO, "Hello from Java!").await;
}

#[tokio::test]
async fn test_java_compact_main() {
    test_language_execution("java", JAVA_HI, "Hi").await;
}

#[tokio::test]
async fn test_java_compile_error() {
    test_language_compile_error("java", syntax_errors::JAVA).await;
}

#[tokio::test]
async fn test_java_timeout() {
    test_language_timeout("java", infinite_loops::JAVA).await;
}

#[tokio::test]
async fn test_java_uncaught_exception() {
    let code = r#"
        public class Main {
            public static void main(String[] args) {
                throw new IllegalStateException("broken state");
            }
        }
    "#;
    if let Some(result) = run_once("java", code).await {
        assert_status(result.status, ExecutionStatus::RuntimeError, &result.text);
        assert!(result.text.contains("broken state"), "{}", result.text);
    }
}
