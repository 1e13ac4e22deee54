use sla_core::errors::*;

#[test]
fn only_transient_errors_are_retryable() {
    assert!(QueryError::Transient { reason: "503".into() }.is_retryable());
    assert!(!QueryError::Rejected { reason: "bad filter".into() }.is_retryable());
    assert!(!QueryError::Decode { reason: "not json".into() }.is_retryable());
    assert!(!QueryError::Cancelled.is_retryable());
}

#[test]
fn query_error_converts_to_sla_error() {
    let err: SlaError = QueryError::Rejected { reason: "bad filter".into() }.into();
    assert!(matches!(err, SlaError::Query(_)));
    assert!(err.to_string().contains("bad filter"));
}

#[test]
fn config_error_carries_field() {
    let err = ConfigError::ValidationFailed {
        field: "fetch.page_size".into(),
        message: "must be between 1 and 1000".into(),
    };
    assert!(err.to_string().contains("fetch.page_size"));
    let wrapped: SlaError = err.into();
    assert!(matches!(wrapped, SlaError::Config(_)));
}
