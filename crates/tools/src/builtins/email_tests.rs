// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::transport::NoopTransport;

#[tokio::test]
async fn sends_and_returns_provider_message_id() {
    let tool = SendEmailTool::new(Arc::new(NoopTransport));
    let result = tool
        .execute(serde_json::json!({"to": "a@example.com", "subject": "hi", "body": "hello"}))
        .await
        .unwrap();
    assert_eq!(result["provider"], "noop");
    assert!(result["message_id"].is_string());
}

#[tokio::test]
async fn missing_required_field_is_validation_error() {
    let tool = SendEmailTool::new(Arc::new(NoopTransport));
    let err = tool.execute(serde_json::json!({"to": "a@example.com"})).await.unwrap_err();
    assert!(matches!(err, OrchestratorError::ValidationError { .. }));
}
