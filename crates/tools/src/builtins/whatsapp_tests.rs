// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::transport::NoopTransport;

#[tokio::test]
async fn sends_and_returns_message_sid() {
    let tool = SendWhatsappTool::new(Arc::new(NoopTransport));
    let result = tool.execute(serde_json::json!({"to": "+15551234567", "message": "hi"})).await.unwrap();
    assert!(result["message_sid"].is_string());
}
